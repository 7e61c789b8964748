//! Domain layer: entities and business rules
//!
//! This layer is independent of external concerns (no I/O, no HTTP, no CLI).

pub mod entities;
pub mod error;

pub use entities::*;
pub use error::DomainError;
