//! Progress bar display for materialization

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display while writing the dropin tree
pub struct ProgressDisplay {
    unit_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total placement count
    pub fn new(total_units: u64) -> Self {
        let unit_pb = ProgressBar::new(total_units);
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            unit_pb.set_style(style.progress_chars("#>-"));
        }
        Self { unit_pb }
    }

    /// Progress display that draws nothing (tests, `--json`)
    pub fn hidden() -> Self {
        Self {
            unit_pb: ProgressBar::hidden(),
        }
    }

    /// Update to show the unit currently being installed
    pub fn update_unit(&self, subpackage: &str, unit: &str) {
        // Truncate long ids for display
        let display = match unit.get(unit.len().saturating_sub(47)..) {
            Some(tail) if unit.len() > 50 => format!("...{tail}"),
            _ => unit.to_string(),
        };
        self.unit_pb.set_message(format!("{subpackage}: {display}"));
    }

    /// Increment unit progress
    pub fn inc_unit(&self) {
        self.unit_pb.inc(1);
    }

    pub fn finish(&self) {
        self.unit_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.unit_pb.abandon();
    }
}
