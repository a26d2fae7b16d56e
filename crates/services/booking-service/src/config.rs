//! Booking service configuration.

use common::{env_flag, DatabaseConfig};
use domain::DEFAULT_TRIP_CANCELLATION_ENABLED;

/// Environment prefix for service-specific overrides.
pub const ENV_PREFIX: &str = "BOOKING_SERVICE";

/// Booking behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingConfig {
    /// Whether `cancel_trip` deletes bookings instead of reporting the
    /// operation as not implemented
    pub trip_cancellation: bool,
}

impl BookingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            trip_cancellation: env_flag(
                "BOOKING_ENABLE_TRIP_CANCELLATION",
                DEFAULT_TRIP_CANCELLATION_ENABLED,
            ),
        }
    }

    pub fn with_trip_cancellation(mut self, enabled: bool) -> Self {
        self.trip_cancellation = enabled;
        self
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            trip_cancellation: DEFAULT_TRIP_CANCELLATION_ENABLED,
        }
    }
}

/// Booking service configuration.
#[derive(Debug, Clone, Default)]
pub struct BookingServiceConfig {
    pub database: DatabaseConfig,
    pub booking: BookingConfig,
}

impl BookingServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(ENV_PREFIX),
            booking: BookingConfig::from_env(),
        }
    }
}
