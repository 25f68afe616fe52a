// Config layer - environment-driven settings
mod areas;
mod database;
mod logging;

pub use areas::AreaCatalog;
pub use database::{init_database, migrate_database};
pub use logging::init_logging;
