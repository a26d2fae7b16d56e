//! User repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{Email, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user for the email, or return the existing one unchanged
    async fn upsert_by_email(&self, email: &Email) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn upsert_by_email(&self, email: &Email) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // A no-op update on conflict makes RETURNING yield the existing row
        let model = UserEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(user::Column::Email)
                    .update_column(user::Column::Email)
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        tracing::debug!(user_id = %model.id, "User upserted");
        Ok(User::from(model))
    }
}
