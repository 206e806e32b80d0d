//! Vitals records.
//!
//! A vitals record is a dated snapshot of whatever metrics were measured at a visit. Any metric
//! may be missing from any record, so the metrics are held as a map from the closed
//! [`MetricKey`] set to a raw [`MetricValue`]. On the wire the record is flat:
//!
//! ```json
//! { "date": "2024-03-15", "blood_pressure": "120/80", "glucose": 95 }
//! ```
//!
//! Metric names outside [`MetricKey`] are rejected when the record is deserialised.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{ClinicError, ClinicResult};

/// Every metric a vitals record can carry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    BloodPressure,
    Hemoglobin,
    Glucose,
    Sgpt,
    Sgot,
    Urea,
    Height,
    Weight,
    Temperature,
    Systolic,
    Diastolic,
}

impl MetricKey {
    pub const ALL: [MetricKey; 11] = [
        MetricKey::BloodPressure,
        MetricKey::Hemoglobin,
        MetricKey::Glucose,
        MetricKey::Sgpt,
        MetricKey::Sgot,
        MetricKey::Urea,
        MetricKey::Height,
        MetricKey::Weight,
        MetricKey::Temperature,
        MetricKey::Systolic,
        MetricKey::Diastolic,
    ];

    /// Wire name of the metric.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::BloodPressure => "blood_pressure",
            MetricKey::Hemoglobin => "hemoglobin",
            MetricKey::Glucose => "glucose",
            MetricKey::Sgpt => "sgpt",
            MetricKey::Sgot => "sgot",
            MetricKey::Urea => "urea",
            MetricKey::Height => "height",
            MetricKey::Weight => "weight",
            MetricKey::Temperature => "temperature",
            MetricKey::Systolic => "systolic",
            MetricKey::Diastolic => "diastolic",
        }
    }

    /// Human-readable label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            MetricKey::BloodPressure => "Blood Pressure",
            MetricKey::Hemoglobin => "Hemoglobin",
            MetricKey::Glucose => "Glucose",
            MetricKey::Sgpt => "SGPT",
            MetricKey::Sgot => "SGOT",
            MetricKey::Urea => "Urea",
            MetricKey::Height => "Height",
            MetricKey::Weight => "Weight",
            MetricKey::Temperature => "Temperature",
            MetricKey::Systolic => "Systolic",
            MetricKey::Diastolic => "Diastolic",
        }
    }

    /// Display unit appended by the value formatter.
    ///
    /// `systolic` and `diastolic` have no entry in the display table and are shown bare.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            MetricKey::BloodPressure => Some("mmHg"),
            MetricKey::Hemoglobin => Some("g/dL"),
            MetricKey::Glucose => Some("mg/dL"),
            MetricKey::Sgpt | MetricKey::Sgot | MetricKey::Urea => Some("U/L"),
            MetricKey::Temperature => Some("°F"),
            MetricKey::Height => Some("cm"),
            MetricKey::Weight => Some("kg"),
            MetricKey::Systolic | MetricKey::Diastolic => None,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = ClinicError;

    fn from_str(s: &str) -> ClinicResult<Self> {
        MetricKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ClinicError::InvalidInput(format!("unknown metric: {s}")))
    }
}

/// Raw value of a metric as recorded: a number, or text such as `"120/80"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Whether the value counts as present for charting.
    ///
    /// Zero, NaN and empty text are treated like a missing value.
    pub fn is_truthy(&self) -> bool {
        match self {
            MetricValue::Number(n) => *n != 0.0 && !n.is_nan(),
            MetricValue::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{n}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_owned())
    }
}

/// A dated snapshot of a patient's measured metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsRecord {
    /// Free-form date string; never validated or used for ordering.
    pub date: String,
    #[serde(flatten)]
    pub metrics: BTreeMap<MetricKey, MetricValue>,
}

impl VitalsRecord {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Builder-style insert, mostly for fixtures.
    pub fn with(mut self, key: MetricKey, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(key, value.into());
        self
    }

    pub fn get(&self, key: MetricKey) -> Option<&MetricValue> {
        self.metrics.get(&key)
    }
}

/// Per-patient vitals history as served by `/medical-records/vitals`.
///
/// Most recent first: new records are always prepended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsHistory {
    pub patient_id: String,
    #[serde(default)]
    pub records: Vec<VitalsRecord>,
}
