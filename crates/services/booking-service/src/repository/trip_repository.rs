//! Trip repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::trip::{self, ActiveModel, Entity as TripEntity};
use super::map_write_err;
use common::{AppError, AppResult};
use domain::Trip;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Trip repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Find the trip a user booked for a launch
    async fn find_by_user_and_launch(&self, user_id: Uuid, launch_id: i32)
        -> AppResult<Option<Trip>>;

    /// Create a new trip. Fails with `Conflict` if the pair is already booked.
    async fn create(&self, user_id: Uuid, launch_id: i32) -> AppResult<Trip>;

    /// List all trips owned by a user, oldest first
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Trip>>;

    /// Delete the trip a user booked for a launch, returning rows removed
    async fn delete_by_user_and_launch(&self, user_id: Uuid, launch_id: i32) -> AppResult<u64>;
}

/// Concrete implementation of TripRepository
pub struct TripStore {
    db: DatabaseConnection,
}

impl TripStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TripRepository for TripStore {
    async fn find_by_user_and_launch(
        &self,
        user_id: Uuid,
        launch_id: i32,
    ) -> AppResult<Option<Trip>> {
        let result = TripEntity::find()
            .filter(trip::Column::UserId.eq(user_id))
            .filter(trip::Column::LaunchId.eq(launch_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Trip::from))
    }

    async fn create(&self, user_id: Uuid, launch_id: i32) -> AppResult<Trip> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            launch_id: Set(Some(launch_id)),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, "Trip"))?;

        tracing::debug!(trip_id = %model.id, %user_id, launch_id, "Trip created");
        Ok(Trip::from(model))
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Trip>> {
        let models = TripEntity::find()
            .filter(trip::Column::UserId.eq(user_id))
            .order_by_asc(trip::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Trip::from).collect())
    }

    async fn delete_by_user_and_launch(&self, user_id: Uuid, launch_id: i32) -> AppResult<u64> {
        let result = TripEntity::delete_many()
            .filter(trip::Column::UserId.eq(user_id))
            .filter(trip::Column::LaunchId.eq(launch_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
