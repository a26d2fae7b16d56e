//! Pet repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use super::entities::pet::ActiveModel;
use common::{AppError, AppResult};
use domain::Pet;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Pet repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Create a pet owned by the user
    async fn create(&self, user_id: Uuid, name: String) -> AppResult<Pet>;
}

/// Concrete implementation of PetRepository
pub struct PetStore {
    db: DatabaseConnection,
}

impl PetStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PetRepository for PetStore {
    async fn create(&self, user_id: Uuid, name: String) -> AppResult<Pet> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Pet::from(model))
    }
}
