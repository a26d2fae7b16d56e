//! Booking Service Library
//!
//! This crate provides the user booking data-access layer: per-user trip
//! bookings and pets over a PostgreSQL store accessed through SeaORM.
//! It is consumed as a library by a resolver layer; the binary only manages
//! the schema.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use crate::config::BookingServiceConfig;
use crate::infra::Database;
use crate::repository::{PetStore, TripStore, UserStore};
use crate::service::BookingManager;

/// Connect to the store, apply pending migrations and build the service.
pub async fn build_service(
    config: &BookingServiceConfig,
) -> Result<Arc<BookingManager>, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let conn = db.get_connection();

    let service = BookingManager::new(
        Arc::new(UserStore::new(conn.clone())),
        Arc::new(TripStore::new(conn.clone())),
        Arc::new(PetStore::new(conn)),
        config.booking,
    );

    info!(
        trip_cancellation = config.booking.trip_cancellation,
        "Booking service ready"
    );
    Ok(Arc::new(service))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = BookingServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Verify the store is reachable and the schema is current.
pub async fn check() -> Result<(), Box<dyn std::error::Error>> {
    let config = BookingServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;
    db.ping().await?;

    let pending: Vec<String> = db
        .migration_status()
        .await?
        .into_iter()
        .filter(|(_, applied)| !applied)
        .map(|(name, _)| name)
        .collect();

    if pending.is_empty() {
        info!("Database reachable, schema up to date");
    } else {
        tracing::warn!(?pending, "Database reachable, migrations pending");
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
