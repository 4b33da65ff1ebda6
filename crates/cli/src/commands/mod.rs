//! Subcommand dispatch.

pub mod complaints;
pub mod migrate;

use complaint_desk_db::{ComplaintRepository, ConfigError, DatabaseConfig, OperationFailed};
use thiserror::Error;

use crate::Commands;
use crate::output::OutputFormat;

/// Errors that end a CLI invocation with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CliError {
    /// Database settings are missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A data-access operation failed (including rejected input).
    #[error(transparent)]
    Operation(#[from] OperationFailed),

    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run one subcommand and write its report to stdout.
///
/// # Errors
///
/// Returns `CliError` if configuration, the operation, or output fails.
pub async fn run(command: Commands, format: OutputFormat) -> Result<(), CliError> {
    let config = DatabaseConfig::from_env()?;
    tracing::debug!(?config, "Loaded database configuration");

    let repo = ComplaintRepository::new(&config);

    let report = match command {
        Commands::Add {
            user_id,
            description,
        } => complaints::add(&repo, &user_id, &description).await?,
        Commands::Respond {
            complaint_id,
            admin_id,
            text,
        } => complaints::respond(&repo, &complaint_id, &admin_id, &text).await?,
        Commands::Delete { complaint_id } => complaints::delete(&repo, &complaint_id).await?,
        Commands::List => complaints::list(&repo).await?,
        Commands::Search { status } => complaints::search(&repo, &status).await?,
        Commands::ByUser { user_id } => complaints::by_user(&repo, &user_id).await?,
        Commands::ByDate {
            start_date,
            end_date,
        } => complaints::by_date(&repo, &start_date, &end_date).await?,
        Commands::Count => complaints::count(&repo).await?,
        Commands::Migrate => migrate::run(&config).await?,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report.render(&mut out, format)?;
    Ok(())
}
