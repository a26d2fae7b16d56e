//! Domain layer - Core booking entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Persistence models are converted into these types at the repository boundary.

pub mod caller;
pub mod constants;
pub mod email;
pub mod error;
pub mod pet;
pub mod trip;
pub mod user;

pub use caller::{CallerContext, CurrentUser};
pub use constants::*;
pub use email::Email;
pub use error::{DomainError, DomainResult};
pub use pet::Pet;
pub use trip::Trip;
pub use user::User;
