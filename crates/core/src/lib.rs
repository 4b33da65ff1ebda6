//! Complaint Desk Core - Complaint lifecycle types.
//!
//! This crate provides the types shared by the Complaint Desk components:
//! - `db` - Data access layer (connection handling, stored routines)
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. Every
//! type validates on construction, so the data access layer never receives
//! an empty ID, a blank description, or an inverted date range.
//!
//! # Modules
//!
//! - [`types`] - IDs, complaint status, validated text, date ranges, records
//! - [`requests`] - One typed request per data-access operation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod requests;
pub mod types;

pub use requests::RequestError;
pub use types::*;
