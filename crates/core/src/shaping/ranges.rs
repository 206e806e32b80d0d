//! Reference-range classification of metric values.

use serde::Serialize;
use std::fmt;

use crate::components::vitals::{MetricKey, MetricValue};
use crate::shaping::series::{blood_pressure_value, numeric_value, BloodPressure};
use crate::shaping::ParseOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RangeStatus {
    Low,
    Normal,
    High,
}

impl RangeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RangeStatus::Low => "low",
            RangeStatus::Normal => "normal",
            RangeStatus::High => "high",
        }
    }
}

impl fmt::Display for RangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const SYSTOLIC_RANGE: ReferenceRange = ReferenceRange {
    min: 90.0,
    max: 120.0,
    unit: "mmHg",
};

pub const DIASTOLIC_RANGE: ReferenceRange = ReferenceRange {
    min: 60.0,
    max: 80.0,
    unit: "mmHg",
};

/// Static reference table. Height and weight have no clinical range.
pub fn reference_range(key: MetricKey) -> Option<ReferenceRange> {
    let range = |min, max, unit| Some(ReferenceRange { min, max, unit });
    match key {
        MetricKey::Systolic => Some(SYSTOLIC_RANGE),
        MetricKey::Diastolic => Some(DIASTOLIC_RANGE),
        // Classified per component, see `classify_blood_pressure`.
        MetricKey::BloodPressure => Some(SYSTOLIC_RANGE),
        MetricKey::Hemoglobin => range(12.0, 17.5, "g/dL"),
        MetricKey::Glucose => range(70.0, 140.0, "mg/dL"),
        MetricKey::Sgpt => range(7.0, 56.0, "U/L"),
        MetricKey::Sgot => range(8.0, 48.0, "U/L"),
        MetricKey::Urea => range(7.0, 20.0, "U/L"),
        MetricKey::Temperature => range(97.0, 99.0, "°F"),
        MetricKey::Height | MetricKey::Weight => None,
    }
}

pub fn classify(value: f64, range: ReferenceRange) -> RangeStatus {
    if value < range.min {
        RangeStatus::Low
    } else if value > range.max {
        RangeStatus::High
    } else {
        RangeStatus::Normal
    }
}

/// High wins over low, low over normal.
pub fn combine(systolic: RangeStatus, diastolic: RangeStatus) -> RangeStatus {
    if systolic == RangeStatus::High || diastolic == RangeStatus::High {
        RangeStatus::High
    } else if systolic == RangeStatus::Low || diastolic == RangeStatus::Low {
        RangeStatus::Low
    } else {
        RangeStatus::Normal
    }
}

pub fn classify_blood_pressure(bp: BloodPressure) -> RangeStatus {
    combine(
        classify(bp.systolic, SYSTOLIC_RANGE),
        classify(bp.diastolic, DIASTOLIC_RANGE),
    )
}

/// Classifies a raw metric value against its reference range.
///
/// Returns `None` for metrics without a range and for values that do not parse, so a
/// defaulted zero never reads as a clinical "low".
pub fn classify_metric(key: MetricKey, value: &MetricValue) -> Option<RangeStatus> {
    let range = reference_range(key)?;
    match key {
        MetricKey::BloodPressure => match blood_pressure_value(value) {
            ParseOutcome::Parsed(bp) => Some(classify_blood_pressure(bp)),
            ParseOutcome::Defaulted(_) => None,
        },
        _ => match numeric_value(value) {
            ParseOutcome::Parsed(n) => Some(classify(n, range)),
            ParseOutcome::Defaulted(_) => None,
        },
    }
}
