//! Core types for Complaint Desk.
//!
//! This module provides type-safe wrappers for the complaint domain.

pub mod complaint;
pub mod date_range;
pub mod id;
pub mod status;
pub mod text;

pub use complaint::{Complaint, StatusCounts};
pub use date_range::{DATE_FORMAT, DateRange, DateRangeError, parse_date};
pub use id::*;
pub use status::{ComplaintStatus, StatusError};
pub use text::{ComplaintText, TextError};
