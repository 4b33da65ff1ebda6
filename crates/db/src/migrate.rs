//! Schema migrations (tables and stored routines).
//!
//! Migrations are stored in `crates/db/migrations/` and embedded at compile
//! time. They are never applied implicitly; run them via:
//! ```bash
//! complaint-desk migrate
//! ```

use sqlx::migrate::Migrator;
use sqlx::{Connection, PgConnection};

use crate::config::DatabaseConfig;
use crate::error::OperationFailed;

/// Embedded migrations from `crates/db/migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const OPERATION: &str = "migrate";

/// Apply all pending migrations on a dedicated connection.
///
/// # Errors
///
/// Returns `OperationFailed` if the connection cannot be opened or a
/// migration fails.
pub async fn run_migrations(config: &DatabaseConfig) -> Result<(), OperationFailed> {
    tracing::info!("Connecting to complaints database...");
    let mut conn = PgConnection::connect_with(&config.connect_options())
        .await
        .map_err(|e| OperationFailed::new(OPERATION, e.to_string()))?;

    tracing::info!(
        available = MIGRATOR.iter().count(),
        "Running complaint database migrations..."
    );
    let result = MIGRATOR.run(&mut conn).await;

    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "failed to close database connection cleanly");
    }

    result.map_err(|e| OperationFailed::new(OPERATION, e.to_string()))?;
    tracing::info!("Complaint database migrations complete!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_embedded_in_order() {
        let versions: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();
        assert_eq!(versions.len(), 2);
        assert!(versions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_routine_migration_defines_every_routine() {
        let sql: String = MIGRATOR.iter().map(|m| m.sql.to_string()).collect();
        for name in [
            "add_complaint",
            "add_response",
            "delete_complaint",
            "search_complaints_by_status",
            "get_complaints_by_user",
            "get_complaints_by_date",
            "count_complaints_by_status",
        ] {
            assert!(sql.contains(name), "missing routine {name}");
        }
    }
}
