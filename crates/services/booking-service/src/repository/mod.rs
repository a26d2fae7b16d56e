//! Repository layer for data access.

pub mod entities;
mod pet_repository;
mod trip_repository;
mod user_repository;

use common::AppError;
use sea_orm::{DbErr, SqlErr};

pub use pet_repository::{PetRepository, PetStore};
pub use trip_repository::{TripRepository, TripStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use pet_repository::MockPetRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use trip_repository::MockTripRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Map a store error, turning unique-index violations into `Conflict`.
pub(crate) fn map_write_err(err: DbErr, entity: &str) -> AppError {
    let sql_err = err.sql_err();
    classify_write_err(err, sql_err, entity)
}

fn classify_write_err(err: DbErr, sql_err: Option<SqlErr>, entity: &str) -> AppError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(entity, %detail, "Unique constraint violated");
            AppError::conflict(entity)
        }
        _ => AppError::from(err),
    }
}
