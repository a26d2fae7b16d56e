//! `booking-service` CLI: manages the trips/users/pets schema and checks that
//! the booking store is reachable. The booking operations themselves are
//! consumed as a library.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use booking_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "booking-service", version)]
#[command(about = "Schema and connectivity tooling for the trip booking store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply, roll back or inspect the users, trips and pets tables
    Migrate {
        #[command(subcommand)]
        step: MigrateStep,
    },
    /// Ping the booking store and report pending migrations
    Check,
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateStep {
    /// Create any missing booking tables and indexes
    Up,
    /// Undo the most recent booking migration
    Down,
    /// List booking migrations with their applied state
    Status,
    /// Drop every booking table and rebuild from scratch
    Fresh,
}

impl From<MigrateStep> for MigrateAction {
    fn from(step: MigrateStep) -> Self {
        match step {
            MigrateStep::Up => MigrateAction::Up,
            MigrateStep::Down => MigrateAction::Down,
            MigrateStep::Status => MigrateAction::Status,
            MigrateStep::Fresh => MigrateAction::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // BOOKING_SERVICE_DATABASE_URL and friends may live in .env
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match Cli::parse().command {
        Command::Migrate { step } => booking_service_lib::run_migrations(step.into()).await?,
        Command::Check => booking_service_lib::check().await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_migrate_step_maps_to_action() {
        let cli = Cli::try_parse_from(["booking-service", "migrate", "fresh"]).unwrap();
        let Command::Migrate { step } = cli.command else {
            panic!("expected migrate command");
        };
        assert!(matches!(MigrateAction::from(step), MigrateAction::Fresh));
    }

    #[test]
    fn test_check_takes_no_arguments() {
        assert!(Cli::try_parse_from(["booking-service", "check"]).is_ok());
        assert!(Cli::try_parse_from(["booking-service", "check", "--force"]).is_err());
    }
}
