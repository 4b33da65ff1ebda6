//! Rendering of command results as text tables or JSON.

use std::io::{self, Write};

use clap::ValueEnum;
use complaint_desk_core::{Complaint, StatusCounts};

/// Maximum width of the description column in table output.
const DESCRIPTION_WIDTH: usize = 40;

const HEADERS: [&str; 5] = ["Complaint ID", "User", "Description", "Status", "Submit Date"];

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// JSON document
    Json,
}

/// Result of a command, ready to render.
#[derive(Debug)]
pub enum Report {
    /// A complaint listing, optionally preceded by a confirmation message.
    Complaints {
        notice: Option<String>,
        complaints: Vec<Complaint>,
    },
    /// Per-status counts.
    Counts(StatusCounts),
    /// A bare confirmation message.
    Notice(String),
}

impl Report {
    /// Write the report to `out` in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn render<W: Write>(&self, out: &mut W, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Table => self.render_table(out),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &self.to_json())?;
                writeln!(out)
            }
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Complaints {
                notice: None,
                complaints,
            } => serde_json::json!(complaints),
            Self::Complaints {
                notice: Some(notice),
                complaints,
            } => serde_json::json!({ "notice": notice, "complaints": complaints }),
            Self::Counts(counts) => serde_json::json!({
                "counts": counts,
                "total": counts.total(),
            }),
            Self::Notice(notice) => serde_json::json!({ "notice": notice }),
        }
    }

    fn render_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Self::Complaints { notice, complaints } => {
                if let Some(notice) = notice {
                    writeln!(out, "{notice}")?;
                    writeln!(out)?;
                }
                write_complaint_table(out, complaints)
            }
            Self::Counts(counts) => {
                for (status, count) in counts.iter() {
                    writeln!(out, "{status}: {count}")?;
                }
                writeln!(out, "Total: {}", counts.total())
            }
            Self::Notice(notice) => writeln!(out, "{notice}"),
        }
    }
}

/// One display row: cell text in header order.
fn cells(complaint: &Complaint) -> [String; 5] {
    [
        complaint.id.to_string(),
        complaint.user_name.clone(),
        truncate(&complaint.description, DESCRIPTION_WIDTH),
        complaint.status.to_string(),
        complaint.submit_date.to_string(),
    ]
}

/// Collapse whitespace runs (including newlines) and cut to `width` characters.
fn truncate(text: &str, width: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

fn write_complaint_table<W: Write>(out: &mut W, complaints: &[Complaint]) -> io::Result<()> {
    if complaints.is_empty() {
        return writeln!(out, "No complaints found.");
    }

    let rows: Vec<[String; 5]> = complaints.iter().map(cells).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &HEADERS.map(str::to_owned), &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, row: &[String; 5], widths: &[usize; 5]) -> io::Result<()> {
    let padded: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", padded.join(" | ").trim_end())
}
