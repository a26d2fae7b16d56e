//! Service layer - booking business logic.

mod booking_service;


pub use booking_service::{BookingManager, UserBookingService};
