pub mod error;
pub mod user;

pub use error::DomainError;
