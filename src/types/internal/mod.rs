// Internal types - shared across service, store and workflow layers
pub mod auth;
pub mod complaint;
pub mod context;
