use serde::{Deserialize, Serialize};

use crate::error::{QuirkError, Result};

/// Attribute reporting throttle applied by the protocol stack.
///
/// A `max_interval` of zero disables periodic reports, leaving only
/// change-triggered ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Minimum seconds between two reports.
    pub min_interval: u16,
    /// Maximum seconds between two reports.
    pub max_interval: u16,
    /// Minimum change of a numeric attribute that triggers a report.
    pub reportable_change: u32,
}

impl ReportingConfig {
    pub const fn new(min_interval: u16, max_interval: u16, reportable_change: u32) -> Self {
        Self {
            min_interval,
            max_interval,
            reportable_change,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_interval != 0 && self.min_interval > self.max_interval {
            return Err(QuirkError::InvalidReportingConfig(format!(
                "min interval {}s exceeds max interval {}s",
                self.min_interval, self.max_interval
            )));
        }
        Ok(())
    }
}
