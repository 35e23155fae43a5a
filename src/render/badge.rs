//! Status badge lookup tables

use std::fmt;

use crate::filters::BedStatus;
use crate::models::{Severity, StockLevel};

/// Visual weight of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Neutral,
}

impl Tone {
    /// Single-character marker used in text output
    pub fn marker(&self) -> char {
        match self {
            Tone::Success => '+',
            Tone::Warning => '~',
            Tone::Danger => '!',
            Tone::Neutral => ' ',
        }
    }
}

/// Label plus tone, rendered as `[! CRITICAL]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub tone: Tone,
}

impl Badge {
    pub const fn new(label: &'static str, tone: Tone) -> Self {
        Self { label, tone }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.tone.marker(), self.label)
    }
}

pub fn bed_badge(status: BedStatus) -> Badge {
    match status {
        BedStatus::Good => Badge::new("GOOD", Tone::Success),
        BedStatus::Moderate => Badge::new("MODERATE", Tone::Warning),
        BedStatus::Critical => Badge::new("CRITICAL", Tone::Danger),
    }
}

pub fn stock_badge(level: StockLevel) -> Badge {
    match level {
        StockLevel::High => Badge::new("HIGH", Tone::Success),
        StockLevel::Moderate => Badge::new("MODERATE", Tone::Warning),
        StockLevel::Low => Badge::new("LOW", Tone::Danger),
    }
}

pub fn severity_badge(severity: Severity) -> Badge {
    match severity {
        Severity::Critical => Badge::new("CRITICAL", Tone::Danger),
        Severity::Moderate => Badge::new("MODERATE", Tone::Warning),
    }
}

pub fn recall_badge() -> Badge {
    Badge::new("RECALL", Tone::Danger)
}
