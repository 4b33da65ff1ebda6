//! Complaint repository: the eight data-access operations.
//!
//! Every operation opens its own connection, runs exactly one statement,
//! reads the complete result and closes the connection again, whether the
//! statement succeeded or not. Nothing is retried and no partial result is
//! ever returned.

use chrono::NaiveDate;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use tracing::Instrument;

use complaint_desk_core::requests::{
    AddComplaint, AddResponse, ComplaintsByDateRange, ComplaintsByUser, DeleteComplaint,
    SearchByStatus,
};
use complaint_desk_core::{Complaint, ComplaintId, ComplaintStatus, StatusCounts};

use crate::config::DatabaseConfig;
use crate::error::{OperationFailed, RepositoryError};
use crate::routine::Routine;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Row shape shared by the list query and every complaint-returning routine.
#[derive(Debug, sqlx::FromRow)]
struct ComplaintRow {
    complaint_id: i32,
    user_name: String,
    description: String,
    status: String,
    submit_date: NaiveDate,
}

impl TryFrom<ComplaintRow> for Complaint {
    type Error = RepositoryError;

    fn try_from(row: ComplaintRow) -> Result<Self, Self::Error> {
        let id = ComplaintId::new(row.complaint_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid complaint id in database: {e}"))
        })?;
        let status = row.status.parse::<ComplaintStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("complaint {id}: {e}"))
        })?;

        Ok(Self {
            id,
            user_name: row.user_name,
            description: row.description,
            status,
            submit_date: row.submit_date,
        })
    }
}

/// Row returned by `count_complaints_by_status()`.
#[derive(Debug, sqlx::FromRow)]
struct StatusCountRow {
    status: String,
    total: i64,
}

fn collect_counts(rows: Vec<StatusCountRow>) -> Result<StatusCounts, RepositoryError> {
    let mut counts = StatusCounts::new();
    for row in rows {
        let status = row
            .status
            .parse::<ComplaintStatus>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let total = u64::try_from(row.total).map_err(|_| {
            RepositoryError::DataCorruption(format!("negative count for {status}: {}", row.total))
        })?;
        counts.add(status, total);
    }
    Ok(counts)
}

fn collect_complaints(rows: Vec<ComplaintRow>) -> Result<Vec<Complaint>, RepositoryError> {
    rows.into_iter().map(TryInto::try_into).collect()
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for complaint database operations.
///
/// Holds connection settings only; no connection outlives a single call.
#[derive(Debug, Clone)]
pub struct ComplaintRepository {
    options: PgConnectOptions,
}

impl ComplaintRepository {
    /// Create a repository from loaded configuration.
    #[must_use]
    pub fn new(config: &DatabaseConfig) -> Self {
        Self::with_options(config.connect_options())
    }

    /// Create a repository from explicit connection options.
    #[must_use]
    pub const fn with_options(options: PgConnectOptions) -> Self {
        Self { options }
    }

    /// Submit a new complaint. It starts out `Pending`, dated today.
    ///
    /// # Errors
    ///
    /// Returns `OperationFailed` if the connection fails, the user does not
    /// exist, or the procedure call fails.
    pub async fn add_complaint(&self, request: &AddComplaint) -> Result<(), OperationFailed> {
        let routine = Routine::AddComplaint;
        async {
            let mut conn = self.connect(routine).await?;
            let result = sqlx::query(routine.sql())
                .bind(request.user_id)
                .bind(&request.description)
                .execute(&mut conn)
                .await
                .map_err(RepositoryError::from);
            release(conn).await;
            finish(routine, result.map(drop))
        }
        .instrument(tracing::info_span!("db_call", routine = routine.name(), user_id = %request.user_id))
        .await
    }

    /// Record an administrator response to a complaint.
    ///
    /// The database may change the complaint's status as a side effect;
    /// re-read the complaint to observe it.
    ///
    /// # Errors
    ///
    /// Returns `OperationFailed` if the connection fails, the complaint does
    /// not exist, or the procedure call fails.
    pub async fn add_response(&self, request: &AddResponse) -> Result<(), OperationFailed> {
        let routine = Routine::AddResponse;
        async {
            let mut conn = self.connect(routine).await?;
            let result = sqlx::query(routine.sql())
                .bind(request.complaint_id)
                .bind(request.admin_id)
                .bind(&request.response_text)
                .execute(&mut conn)
                .await
                .map_err(RepositoryError::from);
            release(conn).await;
            finish(routine, result.map(drop))
        }
        .instrument(tracing::info_span!(
            "db_call",
            routine = routine.name(),
            complaint_id = %request.complaint_id,
            admin_id = %request.admin_id
        ))
        .await
    }

    /// Delete a complaint. Its responses are removed with it.
    ///
    /// # Errors
    ///
    /// Returns `OperationFailed` if the complaint does not exist, a
    /// constraint prevents the delete, or the connection fails.
    pub async fn delete_complaint(&self, request: &DeleteComplaint) -> Result<(), OperationFailed> {
        let routine = Routine::DeleteComplaint;
        async {
            let mut conn = self.connect(routine).await?;
            let result = sqlx::query(routine.sql())
                .bind(request.complaint_id)
                .execute(&mut conn)
                .await
                .map_err(RepositoryError::from);
            release(conn).await;
            finish(routine, result.map(drop))
        }
        .instrument(tracing::info_span!("db_call", routine = routine.name(), complaint_id = %request.complaint_id))
        .await
    }

    /// List every complaint, newest `submit_date` first.
    ///
    /// # Errors
    ///
    /// Returns `OperationFailed` on connection or query failure, or if a row
    /// cannot be mapped.
    pub async fn list_complaints(&self) -> Result<Vec<Complaint>, OperationFailed> {
        let routine = Routine::ListComplaints;
        async {
            let mut conn = self.connect(routine).await?;
            let result = sqlx::query_as::<_, ComplaintRow>(routine.sql())
                .fetch_all(&mut conn)
                .await
                .map_err(RepositoryError::from);
            release(conn).await;
            finish(routine, result.and_then(collect_complaints))
        }
        .instrument(tracing::info_span!("db_call", routine = routine.name()))
        .await
    }

    /// Complaints with the requested status. No match is an empty list.
    ///
    /// # Errors
    ///
    /// Returns `OperationFailed` on connection or query failure.
    pub async fn search_by_status(
        &self,
        request: &SearchByStatus,
    ) -> Result<Vec<Complaint>, OperationFailed> {
        let routine = Routine::SearchComplaintsByStatus;
        async {
            let mut conn = self.connect(routine).await?;
            let result = sqlx::query_as::<_, ComplaintRow>(routine.sql())
                .bind(request.status)
                .fetch_all(&mut conn)
                .await
                .map_err(RepositoryError::from);
            release(conn).await;
            finish(routine, result.and_then(collect_complaints))
        }
        .instrument(tracing::info_span!("db_call", routine = routine.name(), status = %request.status))
        .await
    }

    /// Complaints submitted by one user. Unknown users yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns `OperationFailed` on connection or query failure.
    pub async fn complaints_by_user(
        &self,
        request: &ComplaintsByUser,
    ) -> Result<Vec<Complaint>, OperationFailed> {
        let routine = Routine::GetComplaintsByUser;
        async {
            let mut conn = self.connect(routine).await?;
            let result = sqlx::query_as::<_, ComplaintRow>(routine.sql())
                .bind(request.user_id)
                .fetch_all(&mut conn)
                .await
                .map_err(RepositoryError::from);
            release(conn).await;
            finish(routine, result.and_then(collect_complaints))
        }
        .instrument(tracing::info_span!("db_call", routine = routine.name(), user_id = %request.user_id))
        .await
    }

    /// Complaints whose `submit_date` lies in the inclusive range.
    ///
    /// # Errors
    ///
    /// Returns `OperationFailed` on connection or query failure.
    pub async fn complaints_by_date_range(
        &self,
        request: &ComplaintsByDateRange,
    ) -> Result<Vec<Complaint>, OperationFailed> {
        let routine = Routine::GetComplaintsByDate;
        async {
            let mut conn = self.connect(routine).await?;
            let result = sqlx::query_as::<_, ComplaintRow>(routine.sql())
                .bind(request.range.start())
                .bind(request.range.end())
                .fetch_all(&mut conn)
                .await
                .map_err(RepositoryError::from);
            release(conn).await;
            finish(routine, result.and_then(collect_complaints))
        }
        .instrument(tracing::info_span!("db_call", routine = routine.name(), range = %request.range))
        .await
    }

    /// Number of complaints per status; statuses with no complaints count zero.
    ///
    /// # Errors
    ///
    /// Returns `OperationFailed` on connection or query failure, or if the
    /// database reports an unknown status.
    pub async fn count_by_status(&self) -> Result<StatusCounts, OperationFailed> {
        let routine = Routine::CountComplaintsByStatus;
        async {
            let mut conn = self.connect(routine).await?;
            let result = sqlx::query_as::<_, StatusCountRow>(routine.sql())
                .fetch_all(&mut conn)
                .await
                .map_err(RepositoryError::from);
            release(conn).await;
            finish(routine, result.and_then(collect_counts))
        }
        .instrument(tracing::info_span!("db_call", routine = routine.name()))
        .await
    }

    /// Open a fresh connection for one call.
    async fn connect(&self, routine: Routine) -> Result<PgConnection, OperationFailed> {
        PgConnection::connect_with(&self.options)
            .await
            .map_err(|e| {
                let err = OperationFailed::from_repository(routine.name(), e.into());
                tracing::warn!(error = %err, "database connection failed");
                err
            })
    }
}

/// Close a connection, logging (not propagating) a failed shutdown.
async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "failed to close database connection cleanly");
    }
}

/// Flatten an internal result into the public error type, logging the outcome.
fn finish<T: Outcome>(
    routine: Routine,
    result: Result<T, RepositoryError>,
) -> Result<T, OperationFailed> {
    match result {
        Ok(value) => {
            if routine.is_mutation() {
                tracing::info!("{} succeeded", routine.label());
            } else {
                tracing::debug!(rows = value.rows(), "{} succeeded", routine.label());
            }
            Ok(value)
        }
        Err(e) => {
            let err = OperationFailed::from_repository(routine.name(), e);
            tracing::warn!(error = %err, "{} failed", routine.label());
            Err(err)
        }
    }
}

/// Row count reported in success logs.
trait Outcome {
    fn rows(&self) -> usize;
}

impl Outcome for () {
    fn rows(&self) -> usize {
        0
    }
}

impl Outcome for Vec<Complaint> {
    fn rows(&self) -> usize {
        self.len()
    }
}

impl Outcome for StatusCounts {
    fn rows(&self) -> usize {
        self.iter().count()
    }
}
