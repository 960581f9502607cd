//! Append-only feedback log.
//!
//! One line per submission: `city,budget,['cuisine', ...],Feedback`. There
//! is no header and no escaping, so a city or cuisine containing a comma
//! makes the line ambiguous for readers.

use crate::error::Result;
use crate::types::{Feedback, PriceTier};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default log file name.
pub const DEFAULT_FEEDBACK_LOG: &str = "feedback_log.csv";

/// Rendered for an unset city or budget.
const UNSET: &str = "None";

/// One feedback submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub city: Option<String>,
    pub budget: Option<PriceTier>,
    pub cuisines: Vec<String>,
    pub feedback: Feedback,
}

impl FeedbackEntry {
    /// The log line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.city.as_deref().unwrap_or(UNSET),
            self.budget.map_or(UNSET, |b| b.as_str()),
            format_list(&self.cuisines),
            self.feedback
        )
    }
}

/// Bracketed, single-quoted list: `['italian', 'thai']`.
fn format_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{}'", item)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Writer for the feedback log file.
#[derive(Debug, Clone)]
pub struct FeedbackLog {
    path: PathBuf,
}

impl Default for FeedbackLog {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_LOG)
    }
}

impl FeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, creating the file if needed. The handle is closed
    /// before returning.
    pub fn append(&self, entry: &FeedbackEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry.to_line())?;

        info!("Feedback recorded to {}", self.path.display());
        Ok(())
    }
}
