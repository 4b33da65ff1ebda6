//! Complaint Desk CLI - Manage complaints from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Apply the schema and stored routines
//! complaint-desk migrate
//!
//! # Submit a complaint for user 3
//! complaint-desk add -u 3 -d "Noisy neighbor"
//!
//! # Respond to complaint 12 as admin 1
//! complaint-desk respond -c 12 -a 1 -t "Spoke to the tenant"
//!
//! # Queries
//! complaint-desk list
//! complaint-desk search Pending
//! complaint-desk by-user 3
//! complaint-desk by-date 2024-01-01 2024-01-31
//! complaint-desk count --format json
//! ```
//!
//! # Environment Variables
//!
//! - `COMPLAINTS_DATABASE_URL` (or `COMPLAINTS_DB_*`) - see `complaint_desk_db::config`
//! - `RUST_LOG` - Log filter (default: `complaint_desk_cli=info,complaint_desk_db=warn`)
//! - `COMPLAINT_DESK_LOG_FORMAT` - `json` for structured logs
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT` - Optional error reporting

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;
mod output;
mod telemetry;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "complaint-desk")]
#[command(author, version, about = "Complaint management tools")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new complaint
    Add {
        /// Submitting user's ID
        #[arg(short, long)]
        user_id: String,

        /// What the complaint is about
        #[arg(short, long)]
        description: String,
    },
    /// Record an administrator response (may resolve the complaint)
    Respond {
        /// Complaint being answered
        #[arg(short, long)]
        complaint_id: String,

        /// Responding administrator's ID
        #[arg(short, long)]
        admin_id: String,

        /// Response text
        #[arg(short, long)]
        text: String,
    },
    /// Delete a complaint and its responses
    Delete {
        /// Complaint to delete
        complaint_id: String,
    },
    /// List all complaints, newest first
    List,
    /// Find complaints by status (`Pending` or `Resolved`)
    Search {
        /// Status to match
        status: String,
    },
    /// List a user's complaints
    ByUser {
        /// User ID
        user_id: String,
    },
    /// List complaints submitted between two dates (inclusive, YYYY-MM-DD)
    ByDate {
        /// First day
        start_date: String,
        /// Last day
        end_date: String,
    },
    /// Count complaints per status
    Count,
    /// Apply database migrations (tables and stored routines)
    Migrate,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let settings = telemetry::TelemetrySettings::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = telemetry::init_sentry(&settings);
    telemetry::init_tracing(&settings);

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command, cli.format).await {
        tracing::error!("Command failed: {e}");
        // Flush pending Sentry events before exiting
        drop(sentry_guard);
        std::process::exit(1);
    }
}
