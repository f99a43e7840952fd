//! Output formatting for the CLI.

use crate::config::{OutputFormat, Profile};
use crate::error::Result;
use colored::*;
use medblock_contract::{record_id_from_key, RecordListing};
use medblock_domain::{Claim, ClaimStatus, MedicalRecord};
use medblock_store::CommitReceipt;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format medical records.
    pub fn format_records(&self, records: &[MedicalRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| r.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a single medical record.
    pub fn format_record(&self, record: &MedicalRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            _ => self.format_records(std::slice::from_ref(record)),
        }
    }

    /// Format a patient listing, noting entries that could not be read.
    pub fn format_listing(&self, listing: &RecordListing) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&serde_json::json!({
                "records": listing.records,
                "skipped": listing.skipped,
            }))?);
        }

        let mut out = self.format_records(&listing.records)?;
        if !listing.is_complete() && self.format == OutputFormat::Table {
            let ids: Vec<&str> = listing
                .skipped
                .iter()
                .map(|key| record_id_from_key(key).unwrap_or(key))
                .collect();
            out.push('\n');
            out.push_str(&self.warning(&format!(
                "{} unreadable record(s) skipped: {}",
                ids.len(),
                ids.join(", ")
            )));
        }
        Ok(out)
    }

    fn format_records_table(&self, records: &[MedicalRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No records found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Patient", "Content", "Created At", "Created By"]);
        for record in records {
            builder.push_record([
                record.id.as_str(),
                record.patient_id.as_str(),
                record.content_reference.as_str(),
                record.created_at.as_str(),
                record.created_by.as_str(),
            ]);
        }
        self.render(builder)
    }

    /// Format a claim.
    pub fn format_claim(&self, claim: &Claim) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(claim)?),
            OutputFormat::Quiet => Ok(claim.claim_id.clone()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Claim", "Record", "Status", "Decided By"]);
                builder.push_record([
                    claim.claim_id.clone(),
                    claim.record_id.clone(),
                    self.status(claim.status),
                    if claim.approved_by.is_empty() {
                        "-".to_string()
                    } else {
                        claim.approved_by.clone()
                    },
                ]);
                Ok(self.render(builder))
            }
        }
    }

    /// Report a committed write.
    ///
    /// Quiet and JSON output carry only the entity, so the receipt is shown
    /// in table mode alone.
    pub fn committed(&self, message: &str, receipt: &CommitReceipt) -> Option<String> {
        match self.format {
            OutputFormat::Table => Some(self.success(&format!(
                "{} (tx {}, height {})",
                message, receipt.tx_id, receipt.height
            ))),
            _ => None,
        }
    }

    /// Format a profile entry.
    pub fn profile(&self, name: &str, profile: &Profile, active: bool) -> String {
        let marker = if active { "* " } else { "  " };
        let name = if active {
            self.success(name)
        } else {
            name.to_string()
        };
        format!(
            "{}{}\n    Identity: {}\n    Membership: {}",
            marker, name, profile.identity, profile.membership
        )
    }

    /// Colour a claim status by outcome.
    pub fn status(&self, status: ClaimStatus) -> String {
        let color = match status {
            ClaimStatus::Pending => "yellow",
            ClaimStatus::Approved => "green",
            ClaimStatus::Rejected => "red",
        };
        self.colorize(status.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
