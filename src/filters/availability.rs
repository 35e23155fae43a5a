//! Bed availability tiers
//!
//! Percentages are compared in integer arithmetic so the 30% and 15%
//! boundaries land exactly on the higher tier.

use serde::Serialize;

use crate::models::Hospital;

/// At or above this share of free beds a hospital is `Good`
pub const GOOD_THRESHOLD_PERCENT: u64 = 30;

/// At or above this share (and below `GOOD_THRESHOLD_PERCENT`) it is `Moderate`
pub const MODERATE_THRESHOLD_PERCENT: u64 = 15;

/// Availability tier derived from available / total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BedStatus {
    Good,
    Moderate,
    Critical,
}

impl BedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BedStatus::Good => "good",
            BedStatus::Moderate => "moderate",
            BedStatus::Critical => "critical",
        }
    }
}

/// Classify `available` of `total` beds. Zero capacity counts as critical.
pub fn classify(available: u32, total: u32) -> BedStatus {
    if total == 0 {
        return BedStatus::Critical;
    }

    let scaled = u64::from(available) * 100;
    let total = u64::from(total);

    if scaled >= total * GOOD_THRESHOLD_PERCENT {
        BedStatus::Good
    } else if scaled >= total * MODERATE_THRESHOLD_PERCENT {
        BedStatus::Moderate
    } else {
        BedStatus::Critical
    }
}

/// Share of free beds in percent, `None` when there is no capacity
pub fn availability_percent(available: u32, total: u32) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(f64::from(available) / f64::from(total) * 100.0)
    }
}

impl Hospital {
    pub fn bed_status(&self) -> BedStatus {
        classify(self.available_beds, self.total_beds)
    }

    pub fn icu_status(&self) -> BedStatus {
        classify(self.available_icu, self.icu_beds)
    }

    pub fn bed_percent(&self) -> Option<f64> {
        availability_percent(self.available_beds, self.total_beds)
    }

    pub fn icu_percent(&self) -> Option<f64> {
        availability_percent(self.available_icu, self.icu_beds)
    }
}
