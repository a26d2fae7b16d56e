//! Domain-level constants.
//!
//! These constants define business rules shared by the booking layers.

// =============================================================================
// Bookings
// =============================================================================

/// Feature name reported when trip cancellation is switched off
pub const TRIP_CANCELLATION_FEATURE: &str = "trip cancellation";

/// Cancellation stays disabled unless explicitly enabled
pub const DEFAULT_TRIP_CANCELLATION_ENABLED: bool = false;
