//! Names and SQL for every database call the repository makes.

/// One database call issued by [`crate::ComplaintRepository`].
///
/// `name()` is the `PostgreSQL` routine (or, for [`Self::ListComplaints`], the
/// logical name of the direct query); `label()` is the name the operation is
/// known by in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    AddComplaint,
    AddResponse,
    DeleteComplaint,
    ListComplaints,
    SearchComplaintsByStatus,
    GetComplaintsByUser,
    GetComplaintsByDate,
    CountComplaintsByStatus,
}

impl Routine {
    /// Snake-case name used in the database and in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AddComplaint => "add_complaint",
            Self::AddResponse => "add_response",
            Self::DeleteComplaint => "delete_complaint",
            Self::ListComplaints => "list_complaints",
            Self::SearchComplaintsByStatus => "search_complaints_by_status",
            Self::GetComplaintsByUser => "get_complaints_by_user",
            Self::GetComplaintsByDate => "get_complaints_by_date",
            Self::CountComplaintsByStatus => "count_complaints_by_status",
        }
    }

    /// `PascalCase` name of the routine.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddComplaint => "AddComplaint",
            Self::AddResponse => "AddResponse",
            Self::DeleteComplaint => "DeleteComplaint",
            Self::ListComplaints => "ListComplaints",
            Self::SearchComplaintsByStatus => "SearchComplaintsByStatus",
            Self::GetComplaintsByUser => "GetComplaintsByUser",
            Self::GetComplaintsByDate => "GetComplaintsByDate",
            Self::CountComplaintsByStatus => "CountComplaintsByStatus",
        }
    }

    /// Whether the routine is a procedure that changes data.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        matches!(
            self,
            Self::AddComplaint | Self::AddResponse | Self::DeleteComplaint
        )
    }

    /// SQL statement with positional parameters.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::AddComplaint => "CALL add_complaint($1, $2)",
            Self::AddResponse => "CALL add_response($1, $2, $3)",
            Self::DeleteComplaint => "CALL delete_complaint($1)",
            Self::ListComplaints => {
                r"
                SELECT c.complaint_id, u.name AS user_name, c.description,
                       c.status, c.submit_date
                FROM complaint c
                JOIN app_user u ON u.user_id = c.user_id
                ORDER BY c.submit_date DESC, c.complaint_id DESC
                "
            }
            Self::SearchComplaintsByStatus => {
                "SELECT complaint_id, user_name, description, status, submit_date \
                 FROM search_complaints_by_status($1)"
            }
            Self::GetComplaintsByUser => {
                "SELECT complaint_id, user_name, description, status, submit_date \
                 FROM get_complaints_by_user($1)"
            }
            Self::GetComplaintsByDate => {
                "SELECT complaint_id, user_name, description, status, submit_date \
                 FROM get_complaints_by_date($1, $2)"
            }
            Self::CountComplaintsByStatus => {
                "SELECT status, total FROM count_complaints_by_status()"
            }
        }
    }
}

impl std::fmt::Display for Routine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
