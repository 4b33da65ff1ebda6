//! Complaint Desk data access layer.
//!
//! # Database: `complaint_management` (`PostgreSQL`)
//!
//! ## Tables
//!
//! - `app_user` - Complaint submitters (managed outside this system)
//! - `admin_user` - Administrators who respond to complaints
//! - `complaint` - Complaint records with status and submit date
//! - `complaint_response` - Administrator responses (cascade on complaint delete)
//!
//! ## Routines
//!
//! Business rules live in stored routines; see [`Routine`] for the full list.
//! The status transition triggered by a response is owned by the
//! `add_response` procedure, not by this crate.
//!
//! # Errors
//!
//! Every operation fails with the single error kind [`OperationFailed`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod complaints;
pub mod config;
pub mod error;
pub mod migrate;
pub mod routine;

pub use complaints::ComplaintRepository;
pub use config::{ConfigError, DatabaseConfig};
pub use error::OperationFailed;
pub use migrate::run_migrations;
pub use routine::Routine;
