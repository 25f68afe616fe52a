// Stores layer - Data access and repository pattern
pub mod complaint_store;
pub mod credential_store;

pub use complaint_store::{ComplaintStore, NewComplaint};
pub use credential_store::CredentialStore;
