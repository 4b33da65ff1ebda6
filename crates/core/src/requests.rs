//! Typed requests, one per data-access operation.
//!
//! Each request carries already-validated field types, so a request that
//! exists is a request the database may be asked to run. The `parse`
//! constructors accept raw form/CLI strings and validate them in one go.

use serde::{Deserialize, Serialize};

use crate::types::{
    AdminId, ComplaintId, ComplaintStatus, ComplaintText, DateRange, DateRangeError, IdError,
    StatusError, TextError, UserId,
};

/// Any validation failure while building a request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// An ID field was empty, not an integer, or not positive.
    #[error(transparent)]
    Id(#[from] IdError),
    /// A text field was empty or too long.
    #[error("{field}: {source}")]
    Text {
        /// Name of the offending field.
        field: &'static str,
        /// Underlying validation error.
        source: TextError,
    },
    /// A status label was not recognised.
    #[error(transparent)]
    Status(#[from] StatusError),
    /// A date was malformed or the range inverted.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),
}

fn parse_text(field: &'static str, s: &str) -> Result<ComplaintText, RequestError> {
    ComplaintText::parse(s).map_err(|source| RequestError::Text { field, source })
}

/// Submit a new complaint on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddComplaint {
    /// Submitting user. Must exist in the database.
    pub user_id: UserId,
    /// What the complaint is about.
    pub description: ComplaintText,
}

impl AddComplaint {
    /// Build the request from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if either field is empty or invalid.
    pub fn parse(user_id: &str, description: &str) -> Result<Self, RequestError> {
        Ok(Self {
            user_id: user_id.parse()?,
            description: parse_text("description", description)?,
        })
    }
}

/// Record an administrator's response to a complaint.
///
/// Recording a response may change the complaint's status; the rule is owned
/// by the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddResponse {
    /// Complaint being answered. Must exist in the database.
    pub complaint_id: ComplaintId,
    /// Responding administrator.
    pub admin_id: AdminId,
    /// Response body.
    pub response_text: ComplaintText,
}

impl AddResponse {
    /// Build the request from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if any field is empty or invalid.
    pub fn parse(
        complaint_id: &str,
        admin_id: &str,
        response_text: &str,
    ) -> Result<Self, RequestError> {
        Ok(Self {
            complaint_id: complaint_id.parse()?,
            admin_id: admin_id.parse()?,
            response_text: parse_text("response text", response_text)?,
        })
    }
}

/// Remove a complaint (and, by cascade, its responses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteComplaint {
    /// Complaint to delete.
    pub complaint_id: ComplaintId,
}

impl DeleteComplaint {
    /// Build the request from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the id is empty or invalid.
    pub fn parse(complaint_id: &str) -> Result<Self, RequestError> {
        Ok(Self {
            complaint_id: complaint_id.parse()?,
        })
    }
}

/// Find complaints with a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchByStatus {
    /// Status to match.
    pub status: ComplaintStatus,
}

impl SearchByStatus {
    /// Build the request from a status label.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Status`] for labels other than
    /// `Pending`/`Resolved`.
    pub fn parse(status: &str) -> Result<Self, RequestError> {
        Ok(Self {
            status: status.parse()?,
        })
    }
}

/// Find every complaint submitted by one user.
///
/// The id is a lookup key, not a reference: any integer is accepted, and
/// ids that match no user (zero, negative, unknown) yield no complaints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintsByUser {
    /// User whose complaints to list.
    pub user_id: i64,
}

impl ComplaintsByUser {
    /// Build the request from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Id`] if the id is empty or not an integer.
    pub fn parse(user_id: &str) -> Result<Self, RequestError> {
        let trimmed = user_id.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty { entity: "user id" }.into());
        }
        let user_id = trimmed.parse::<i64>().map_err(|_| IdError::NotAnInteger {
            entity: "user id",
            value: trimmed.to_owned(),
        })?;
        Ok(Self { user_id })
    }
}

impl From<UserId> for ComplaintsByUser {
    fn from(user_id: UserId) -> Self {
        Self {
            user_id: user_id.as_i32().into(),
        }
    }
}

/// Find complaints submitted within an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintsByDateRange {
    /// Range of submit dates, both ends included.
    pub range: DateRange,
}

impl ComplaintsByDateRange {
    /// Build the request from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::DateRange`] for malformed dates or when the
    /// start is after the end.
    pub fn parse(start_date: &str, end_date: &str) -> Result<Self, RequestError> {
        Ok(Self {
            range: DateRange::parse(start_date, end_date)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_complaint_parse() {
        let request = AddComplaint::parse("3", " Noisy neighbor ").unwrap();
        assert_eq!(request.user_id.as_i32(), 3);
        assert_eq!(request.description.as_str(), "Noisy neighbor");
    }

    #[test]
    fn test_add_complaint_requires_both_fields() {
        assert!(matches!(
            AddComplaint::parse("", "Noisy neighbor"),
            Err(RequestError::Id(IdError::Empty { .. }))
        ));
        let err = AddComplaint::parse("3", "  ").unwrap_err();
        assert_eq!(err.to_string(), "description: text cannot be empty");
    }

    #[test]
    fn test_add_response_parse() {
        let request = AddResponse::parse("12", "1", "Fixed on Monday").unwrap();
        assert_eq!(request.complaint_id.as_i32(), 12);
        assert_eq!(request.admin_id.as_i32(), 1);
        assert_eq!(request.response_text.as_str(), "Fixed on Monday");
    }

    #[test]
    fn test_add_response_rejects_blank_text() {
        let err = AddResponse::parse("12", "1", "\n").unwrap_err();
        assert!(matches!(
            err,
            RequestError::Text {
                field: "response text",
                source: TextError::Empty
            }
        ));
    }

    #[test]
    fn test_add_response_rejects_bad_admin_id() {
        let err = AddResponse::parse("12", "root", "ok").unwrap_err();
        assert_eq!(err.to_string(), "admin id must be an integer (got 'root')");
    }

    #[test]
    fn test_delete_complaint_parse() {
        assert_eq!(
            DeleteComplaint::parse("9999").unwrap().complaint_id.as_i32(),
            9999
        );
        assert!(DeleteComplaint::parse("").is_err());
    }

    #[test]
    fn test_search_by_status_parse() {
        assert_eq!(
            SearchByStatus::parse("Resolved").unwrap().status,
            ComplaintStatus::Resolved
        );
        assert!(matches!(
            SearchByStatus::parse("Closed"),
            Err(RequestError::Status(_))
        ));
    }

    #[test]
    fn test_complaints_by_user_requires_integer() {
        assert_eq!(ComplaintsByUser::parse(" 4 ").unwrap().user_id, 4);
        assert!(matches!(
            ComplaintsByUser::parse("four"),
            Err(RequestError::Id(IdError::NotAnInteger { .. }))
        ));
        assert!(matches!(
            ComplaintsByUser::parse(""),
            Err(RequestError::Id(IdError::Empty { .. }))
        ));
    }

    #[test]
    fn test_complaints_by_user_accepts_any_integer() {
        assert_eq!(ComplaintsByUser::parse("0").unwrap().user_id, 0);
        assert_eq!(ComplaintsByUser::parse("-5").unwrap().user_id, -5);
        assert_eq!(
            ComplaintsByUser::parse("3000000000").unwrap().user_id,
            3_000_000_000
        );
    }

    #[test]
    fn test_complaints_by_date_range_parse() {
        let request = ComplaintsByDateRange::parse("2024-01-01", "2024-01-31").unwrap();
        assert_eq!(request.range.start().to_string(), "2024-01-01");
        assert!(matches!(
            ComplaintsByDateRange::parse("2024-01-31", "2024-01-01"),
            Err(RequestError::DateRange(DateRangeError::Inverted { .. }))
        ));
    }
}
