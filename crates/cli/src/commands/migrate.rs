//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! complaint-desk migrate
//! ```
//!
//! # Environment Variables
//!
//! - `COMPLAINTS_DATABASE_URL` - `PostgreSQL` connection string
//!   (or the discrete `COMPLAINTS_DB_*` variables)
//!
//! # Migration Files
//!
//! `crates/db/migrations/`, embedded into the binary at build time:
//! ```text
//! migrations/
//! ├── 20241016000001_create_complaint_tables.sql
//! └── 20241016000002_create_complaint_routines.sql
//! ```

use complaint_desk_db::{DatabaseConfig, run_migrations};

use super::CliError;
use crate::output::Report;

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `CliError` if configuration is missing or a migration fails.
pub async fn run(config: &DatabaseConfig) -> Result<Report, CliError> {
    run_migrations(config).await?;
    Ok(Report::Notice("Database is up to date.".to_owned()))
}
