//! Complaint records and status summaries as returned by queries.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ComplaintId, ComplaintStatus};

/// One row of a complaint listing.
///
/// Every query returns complaints in this shape: the owning user is shown by
/// name rather than by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    /// System-generated complaint ID.
    pub id: ComplaintId,
    /// Display name of the user who submitted the complaint.
    pub user_name: String,
    /// Complaint description.
    pub description: String,
    /// Current status.
    pub status: ComplaintStatus,
    /// Day the complaint was submitted. Never changes after creation.
    pub submit_date: NaiveDate,
}

/// Number of complaints per status.
///
/// Always holds an entry for every [`ComplaintStatus`]; statuses the database
/// did not report count as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCounts(BTreeMap<ComplaintStatus, u64>);

impl StatusCounts {
    /// All statuses at zero.
    #[must_use]
    pub fn new() -> Self {
        Self(ComplaintStatus::ALL.iter().map(|s| (*s, 0)).collect())
    }

    /// Add `count` complaints to `status`.
    pub fn add(&mut self, status: ComplaintStatus, count: u64) {
        *self.0.entry(status).or_insert(0) += count;
    }

    /// Count for a single status.
    #[must_use]
    pub fn get(&self, status: ComplaintStatus) -> u64 {
        self.0.get(&status).copied().unwrap_or(0)
    }

    /// Sum over all statuses.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Iterate `(status, count)` pairs in lifecycle order.
    pub fn iter(&self) -> impl Iterator<Item = (ComplaintStatus, u64)> + '_ {
        self.0.iter().map(|(status, count)| (*status, *count))
    }
}

impl Default for StatusCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(ComplaintStatus, u64)> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = (ComplaintStatus, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (status, count) in iter {
            counts.add(status, count);
        }
        counts
    }
}
