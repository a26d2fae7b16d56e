//! Booking behavior against an in-memory store that enforces the same
//! uniqueness rules as the database schema.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::Barrier;
use uuid::Uuid;

use booking_service_lib::config::BookingConfig;
use booking_service_lib::repository::{PetRepository, TripRepository, UserRepository};
use booking_service_lib::service::{BookingManager, UserBookingService};
use common::{AppError, AppResult};
use domain::{CallerContext, Email, Pet, Trip, User};

/// Store double with unique email and unique (user, launch) constraints.
#[derive(Default)]
struct InMemoryStore {
    users: Mutex<Vec<User>>,
    trips: Mutex<Vec<Trip>>,
    pets: Mutex<Vec<Pet>>,
    calls: AtomicUsize,
    /// When set, this many trip lookups wait for each other after reading,
    /// so every caller observes the same snapshot
    read_barrier: Mutex<Option<(Arc<Barrier>, usize)>>,
}

impl InMemoryStore {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn trip_rows(&self) -> usize {
        self.trips.lock().unwrap().len()
    }

    fn hold_reads(&self, readers: usize) {
        *self.read_barrier.lock().unwrap() = Some((Arc::new(Barrier::new(readers)), readers));
    }

    fn take_barrier_slot(&self) -> Option<Arc<Barrier>> {
        let mut guard = self.read_barrier.lock().unwrap();
        match guard.as_mut() {
            Some((barrier, remaining)) if *remaining > 0 => {
                *remaining -= 1;
                Some(barrier.clone())
            }
            _ => None,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn upsert_by_email(&self, email: &Email) -> AppResult<User> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter().find(|u| u.email == email.as_str()) {
            return Ok(existing.clone());
        }
        let user = User::new(Uuid::new_v4(), email.as_str().to_string());
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl TripRepository for InMemoryStore {
    async fn find_by_user_and_launch(
        &self,
        user_id: Uuid,
        launch_id: i32,
    ) -> AppResult<Option<Trip>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let snapshot = self
            .trips
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.user_id == user_id && t.is_for_launch(launch_id))
            .cloned();

        if let Some(barrier) = self.take_barrier_slot() {
            barrier.wait().await;
        }
        Ok(snapshot)
    }

    async fn create(&self, user_id: Uuid, launch_id: i32) -> AppResult<Trip> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut trips = self.trips.lock().unwrap();
        if trips
            .iter()
            .any(|t| t.user_id == user_id && t.is_for_launch(launch_id))
        {
            return Err(AppError::conflict("Trip"));
        }
        let trip = Trip::new(Uuid::new_v4(), user_id, launch_id);
        trips.push(trip.clone());
        Ok(trip)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Trip>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .trips
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_by_user_and_launch(&self, user_id: Uuid, launch_id: i32) -> AppResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut trips = self.trips.lock().unwrap();
        let before = trips.len();
        trips.retain(|t| !(t.user_id == user_id && t.is_for_launch(launch_id)));
        Ok((before - trips.len()) as u64)
    }
}

#[async_trait]
impl PetRepository for InMemoryStore {
    async fn create(&self, user_id: Uuid, name: String) -> AppResult<Pet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let pet = Pet::new(Uuid::new_v4(), name, user_id);
        self.pets.lock().unwrap().push(pet.clone());
        Ok(pet)
    }
}

fn service_over(store: &Arc<InMemoryStore>, config: BookingConfig) -> BookingManager {
    BookingManager::new(store.clone(), store.clone(), store.clone(), config)
}

async fn signed_in(service: &BookingManager, email: &str) -> CallerContext {
    let user = service
        .find_or_create_user(&CallerContext::anonymous(), Some(email))
        .await
        .unwrap()
        .unwrap();
    CallerContext::authenticated(user)
}

#[tokio::test]
async fn test_find_or_create_user_is_idempotent() {
    let store = Arc::new(InMemoryStore::default());
    let service = service_over(&store, BookingConfig::default());
    let anonymous = CallerContext::anonymous();

    let first = service
        .find_or_create_user(&anonymous, Some("a@b.com"))
        .await
        .unwrap()
        .unwrap();
    let second = service
        .find_or_create_user(&anonymous, Some("a@b.com"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(store.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_email_makes_no_store_calls() {
    let store = Arc::new(InMemoryStore::default());
    let service = service_over(&store, BookingConfig::default());

    let result = service
        .find_or_create_user(&CallerContext::anonymous(), Some("not-an-email"))
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_booking_same_launch_twice_returns_same_trip() {
    let store = Arc::new(InMemoryStore::default());
    let service = service_over(&store, BookingConfig::default());
    let caller = signed_in(&service, "crew@example.com").await;

    let first = service.book_trip(&caller, 42).await.unwrap();
    let second = service.book_trip(&caller, 42).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(store.trip_rows(), 1);
}

#[tokio::test]
async fn test_concurrent_double_booking_converges_to_one_row() {
    const ATTEMPTS: usize = 4;

    let store = Arc::new(InMemoryStore::default());
    let service = service_over(&store, BookingConfig::default());
    let caller = signed_in(&service, "crew@example.com").await;

    // Every attempt sees the launch as unbooked before any insert happens
    store.hold_reads(ATTEMPTS);
    let results = join_all((0..ATTEMPTS).map(|_| service.book_trip(&caller, 42))).await;

    let ids: Vec<Uuid> = results.into_iter().map(|r| r.unwrap().id).collect();
    assert!(ids.iter().all(|id| *id == ids[0]));
    assert_eq!(store.trip_rows(), 1);
}

#[tokio::test]
async fn test_bookings_are_listed_per_user() {
    let store = Arc::new(InMemoryStore::default());
    let service = service_over(&store, BookingConfig::default());
    let alice = signed_in(&service, "alice@example.com").await;
    let bob = signed_in(&service, "bob@example.com").await;

    service.book_trips(&alice, &[1, 2, 3]).await.unwrap();
    service.book_trip(&bob, 2).await.unwrap();

    assert_eq!(service.get_launch_ids_by_user(&alice).await.unwrap(), vec![1, 2, 3]);
    assert_eq!(service.get_launch_ids_by_user(&bob).await.unwrap(), vec![2]);
    assert!(service.is_booked_on_launch(&bob, 2).await.unwrap());
    assert!(!service.is_booked_on_launch(&bob, 3).await.unwrap());
}

#[tokio::test]
async fn test_unauthenticated_reads_make_no_store_calls() {
    let store = Arc::new(InMemoryStore::default());
    let service = service_over(&store, BookingConfig::default());
    let anonymous = CallerContext::anonymous();

    assert!(!service.is_booked_on_launch(&anonymous, 1).await.unwrap());
    assert!(service.get_launch_ids_by_user(&anonymous).await.unwrap().is_empty());
    assert!(service.book_trips(&anonymous, &[1]).await.unwrap().is_empty());
    assert!(service
        .add_pet_for_user(&anonymous, "Laika")
        .await
        .unwrap()
        .is_none());
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_cancel_trip_when_enabled() {
    let store = Arc::new(InMemoryStore::default());
    let service = service_over(&store, BookingConfig::default().with_trip_cancellation(true));
    let caller = signed_in(&service, "crew@example.com").await;

    service.book_trip(&caller, 42).await.unwrap();

    assert!(service.cancel_trip(&caller, 42).await.unwrap());
    assert!(!service.cancel_trip(&caller, 42).await.unwrap());
    assert!(!service.is_booked_on_launch(&caller, 42).await.unwrap());
}

#[tokio::test]
async fn test_cancel_trip_when_disabled_keeps_booking() {
    let store = Arc::new(InMemoryStore::default());
    let service = service_over(&store, BookingConfig::default());
    let caller = signed_in(&service, "crew@example.com").await;

    service.book_trip(&caller, 42).await.unwrap();
    let result = service.cancel_trip(&caller, 42).await;

    assert!(matches!(result, Err(AppError::NotImplemented(_))));
    assert_eq!(store.trip_rows(), 1);
}

#[tokio::test]
async fn test_pets_are_not_unique_by_name() {
    let store = Arc::new(InMemoryStore::default());
    let service = service_over(&store, BookingConfig::default());
    let caller = signed_in(&service, "crew@example.com").await;

    let first = service.add_pet_for_user(&caller, "Laika").await.unwrap().unwrap();
    let second = service.add_pet_for_user(&caller, "Laika").await.unwrap().unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.pets.lock().unwrap().len(), 2);
}
