// Database entities - SeaORM models
pub mod complaint;
pub mod history_entry;
pub mod user;
