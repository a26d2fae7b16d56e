//! User booking service - resolves the caller and performs per-user trip
//! mutations and queries.
//!
//! Every operation receives the caller context explicitly. Read-style
//! operations answer with empty values for anonymous callers; write-style
//! operations reject them with `AppError::Unauthorized`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{CallerContext, Email, Pet, Trip, User, TRIP_CANCELLATION_FEATURE};

use crate::config::BookingConfig;
use crate::repository::{PetRepository, TripRepository, UserRepository};

/// User booking service trait for dependency injection.
#[async_trait]
pub trait UserBookingService: Send + Sync {
    /// Find or create the user for the caller's email, falling back to
    /// `fallback_email` for anonymous callers. Returns `None` when no valid
    /// email is available.
    async fn find_or_create_user(
        &self,
        caller: &CallerContext,
        fallback_email: Option<&str>,
    ) -> AppResult<Option<User>>;

    /// Book a launch for the caller. Booking an already booked launch
    /// returns the existing trip.
    async fn book_trip(&self, caller: &CallerContext, launch_id: i32) -> AppResult<Trip>;

    /// Book several launches in order, keeping whichever succeed.
    async fn book_trips(&self, caller: &CallerContext, launch_ids: &[i32])
        -> AppResult<Vec<Trip>>;

    /// Cancel the caller's trip for a launch, reporting whether one was removed.
    async fn cancel_trip(&self, caller: &CallerContext, launch_id: i32) -> AppResult<bool>;

    /// Launch ids of every trip the caller booked
    async fn get_launch_ids_by_user(&self, caller: &CallerContext) -> AppResult<Vec<i32>>;

    /// Whether the caller booked the launch
    async fn is_booked_on_launch(&self, caller: &CallerContext, launch_id: i32)
        -> AppResult<bool>;

    /// Add a pet owned by the caller
    async fn add_pet_for_user(&self, caller: &CallerContext, name: &str)
        -> AppResult<Option<Pet>>;
}

/// Concrete implementation of UserBookingService using repositories.
pub struct BookingManager {
    users: Arc<dyn UserRepository>,
    trips: Arc<dyn TripRepository>,
    pets: Arc<dyn PetRepository>,
    config: BookingConfig,
}

impl BookingManager {
    /// Create new booking service instance with repositories
    pub fn new(
        users: Arc<dyn UserRepository>,
        trips: Arc<dyn TripRepository>,
        pets: Arc<dyn PetRepository>,
        config: BookingConfig,
    ) -> Self {
        Self {
            users,
            trips,
            pets,
            config,
        }
    }
}

#[async_trait]
impl UserBookingService for BookingManager {
    async fn find_or_create_user(
        &self,
        caller: &CallerContext,
        fallback_email: Option<&str>,
    ) -> AppResult<Option<User>> {
        let Some(raw) = caller.email().or(fallback_email) else {
            return Ok(None);
        };

        let Ok(email) = Email::parse(raw) else {
            debug!("Rejected malformed email");
            return Ok(None);
        };

        self.users.upsert_by_email(&email).await.map(Some)
    }

    async fn book_trip(&self, caller: &CallerContext, launch_id: i32) -> AppResult<Trip> {
        let user_id = caller.require_user()?.id;

        if let Some(trip) = self
            .trips
            .find_by_user_and_launch(user_id, launch_id)
            .await?
        {
            return Ok(trip);
        }

        match self.trips.create(user_id, launch_id).await {
            Ok(trip) => {
                info!(%user_id, launch_id, trip_id = %trip.id, "Trip booked");
                Ok(trip)
            }
            // Lost a race with a concurrent booking of the same launch
            Err(AppError::Conflict(_)) => self
                .trips
                .find_by_user_and_launch(user_id, launch_id)
                .await?
                .ok_or_not_found(),
            Err(e) => Err(e),
        }
    }

    async fn book_trips(
        &self,
        caller: &CallerContext,
        launch_ids: &[i32],
    ) -> AppResult<Vec<Trip>> {
        if !caller.is_authenticated() {
            return Ok(Vec::new());
        }

        let mut results = Vec::with_capacity(launch_ids.len());
        for &launch_id in launch_ids {
            match self.book_trip(caller, launch_id).await {
                Ok(trip) => results.push(trip),
                Err(e) => {
                    warn!(launch_id, error = %e, code = e.code(), "Skipping failed booking");
                }
            }
        }

        Ok(results)
    }

    async fn cancel_trip(&self, caller: &CallerContext, launch_id: i32) -> AppResult<bool> {
        let user_id = caller.require_user()?.id;

        if !self.config.trip_cancellation {
            return Err(AppError::not_implemented(TRIP_CANCELLATION_FEATURE));
        }

        let removed = self
            .trips
            .delete_by_user_and_launch(user_id, launch_id)
            .await?;

        if removed > 0 {
            info!(%user_id, launch_id, "Trip cancelled");
        }
        Ok(removed > 0)
    }

    async fn get_launch_ids_by_user(&self, caller: &CallerContext) -> AppResult<Vec<i32>> {
        let Some(user_id) = caller.user_id() else {
            return Ok(Vec::new());
        };

        let trips = self.trips.list_by_user(user_id).await?;
        Ok(trips.into_iter().filter_map(|t| t.launch_id).collect())
    }

    async fn is_booked_on_launch(
        &self,
        caller: &CallerContext,
        launch_id: i32,
    ) -> AppResult<bool> {
        let Some(user_id) = caller.user_id() else {
            return Ok(false);
        };

        Ok(self
            .trips
            .find_by_user_and_launch(user_id, launch_id)
            .await?
            .is_some())
    }

    async fn add_pet_for_user(
        &self,
        caller: &CallerContext,
        name: &str,
    ) -> AppResult<Option<Pet>> {
        let Some(user_id) = caller.user_id() else {
            return Ok(None);
        };

        self.pets.create(user_id, name.to_string()).await.map(Some)
    }
}
