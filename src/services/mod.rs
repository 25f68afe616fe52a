// Services layer - stateless domain services
pub mod notifier;
pub mod token_service;

pub use notifier::{LogNotifier, Notifier};
pub use token_service::TokenService;
