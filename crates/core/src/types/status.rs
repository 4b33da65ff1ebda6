//! Complaint status and lifecycle.
//!
//! A complaint starts out [`ComplaintStatus::Pending`] and may become
//! [`ComplaintStatus::Resolved`] as a side effect of an administrator
//! response. The rule that decides the transition lives in the database's
//! `add_response` routine, so nothing here performs a transition; these types
//! only describe the states and which moves are possible at all.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown status label.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid complaint status: '{0}' (expected Pending or Resolved)")]
pub struct StatusError(pub String);

/// Status of a complaint.
///
/// The labels are stored verbatim (`Pending`, `Resolved`) in the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum ComplaintStatus {
    /// Submitted, no resolving response yet.
    #[default]
    Pending,
    /// Closed by an administrator response.
    Resolved,
}

impl ComplaintStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 2] = [Self::Pending, Self::Resolved];

    /// The database label for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Resolved => "Resolved",
        }
    }

    /// Whether no further transition is possible from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved)
    }

    /// Whether a complaint may move from `self` to `next`.
    ///
    /// Only `Pending -> Resolved` exists; there is no way back to `Pending`.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!((self, next), (Self::Pending, Self::Resolved))
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComplaintStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Pending" => Ok(Self::Pending),
            "Resolved" => Ok(Self::Resolved),
            other => Err(StatusError(other.to_owned())),
        }
    }
}

// Stored as TEXT with a CHECK constraint rather than a Postgres enum type.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ComplaintStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ComplaintStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ComplaintStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}
