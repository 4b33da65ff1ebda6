//! Complaint commands.
//!
//! Each command validates its raw arguments into a typed request, runs one
//! repository operation, and returns a [`Report`]. Commands that change data
//! re-list all complaints afterwards so the caller sees the effect, such as a
//! status change caused by a response.

use complaint_desk_core::requests::{
    AddComplaint, AddResponse, ComplaintsByDateRange, ComplaintsByUser, DeleteComplaint,
    SearchByStatus,
};
use complaint_desk_db::{ComplaintRepository, OperationFailed};

use crate::output::Report;

/// Submit a complaint, then show the refreshed list.
///
/// # Errors
///
/// Returns `OperationFailed` if the input is invalid or the database call fails.
pub async fn add(
    repo: &ComplaintRepository,
    user_id: &str,
    description: &str,
) -> Result<Report, OperationFailed> {
    let request = AddComplaint::parse(user_id, description)?;
    repo.add_complaint(&request).await?;
    tracing::info!(user_id = %request.user_id, "Complaint added");
    refreshed(repo, "Complaint added successfully!".to_owned()).await
}

/// Record a response, then show the refreshed list.
///
/// # Errors
///
/// Returns `OperationFailed` if the input is invalid or the database call fails.
pub async fn respond(
    repo: &ComplaintRepository,
    complaint_id: &str,
    admin_id: &str,
    text: &str,
) -> Result<Report, OperationFailed> {
    let request = AddResponse::parse(complaint_id, admin_id, text)?;
    repo.add_response(&request).await?;
    tracing::info!(
        complaint_id = %request.complaint_id,
        admin_id = %request.admin_id,
        "Response added"
    );
    refreshed(repo, "Response added successfully!".to_owned()).await
}

/// Delete a complaint, then show the refreshed list.
///
/// # Errors
///
/// Returns `OperationFailed` if the id is invalid or unknown, or the database
/// call fails.
pub async fn delete(
    repo: &ComplaintRepository,
    complaint_id: &str,
) -> Result<Report, OperationFailed> {
    let request = DeleteComplaint::parse(complaint_id)?;
    repo.delete_complaint(&request).await?;
    tracing::info!(complaint_id = %request.complaint_id, "Complaint deleted");
    refreshed(
        repo,
        format!("Complaint {} deleted successfully!", request.complaint_id),
    )
    .await
}

/// List every complaint.
///
/// # Errors
///
/// Returns `OperationFailed` if the query fails.
pub async fn list(repo: &ComplaintRepository) -> Result<Report, OperationFailed> {
    Ok(Report::Complaints {
        notice: None,
        complaints: repo.list_complaints().await?,
    })
}

/// Complaints with a given status.
///
/// # Errors
///
/// Returns `OperationFailed` if the status is unknown or the query fails.
pub async fn search(repo: &ComplaintRepository, status: &str) -> Result<Report, OperationFailed> {
    let request = SearchByStatus::parse(status)?;
    Ok(Report::Complaints {
        notice: None,
        complaints: repo.search_by_status(&request).await?,
    })
}

/// Complaints submitted by one user.
///
/// # Errors
///
/// Returns `OperationFailed` if the id is not an integer or the query fails.
pub async fn by_user(repo: &ComplaintRepository, user_id: &str) -> Result<Report, OperationFailed> {
    let request = ComplaintsByUser::parse(user_id)?;
    Ok(Report::Complaints {
        notice: None,
        complaints: repo.complaints_by_user(&request).await?,
    })
}

/// Complaints submitted within an inclusive date range.
///
/// # Errors
///
/// Returns `OperationFailed` if a date is malformed, the range is inverted,
/// or the query fails.
pub async fn by_date(
    repo: &ComplaintRepository,
    start_date: &str,
    end_date: &str,
) -> Result<Report, OperationFailed> {
    let request = ComplaintsByDateRange::parse(start_date, end_date)?;
    Ok(Report::Complaints {
        notice: None,
        complaints: repo.complaints_by_date_range(&request).await?,
    })
}

/// Complaint counts per status.
///
/// # Errors
///
/// Returns `OperationFailed` if the query fails.
pub async fn count(repo: &ComplaintRepository) -> Result<Report, OperationFailed> {
    Ok(Report::Counts(repo.count_by_status().await?))
}

async fn refreshed(repo: &ComplaintRepository, notice: String) -> Result<Report, OperationFailed> {
    Ok(Report::Complaints {
        notice: Some(notice),
        complaints: repo.list_complaints().await?,
    })
}
