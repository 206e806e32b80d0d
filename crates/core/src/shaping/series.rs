//! Latest-vitals lookup, per-metric chart series and value formatting.

use serde::Serialize;

use crate::components::vitals::{MetricKey, MetricValue, VitalsRecord};
use crate::shaping::ParseOutcome;

/// The most recent vitals record.
///
/// "Most recent" is the first element of the history, whatever its date says. Writers prepend
/// new records, so index 0 is the newest as long as that convention holds.
pub fn latest_vitals(history: &[VitalsRecord]) -> Option<&VitalsRecord> {
    history.first()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
}

impl BloodPressure {
    pub const ZERO: BloodPressure = BloodPressure {
        systolic: 0.0,
        diastolic: 0.0,
    };
}

/// Parses `"systolic/diastolic"`.
///
/// A missing slash or a non-numeric half yields `0/0`, flagged as defaulted.
pub fn parse_blood_pressure(raw: &str) -> ParseOutcome<BloodPressure> {
    let Some((systolic, diastolic)) = raw.split_once('/') else {
        return ParseOutcome::Defaulted(BloodPressure::ZERO);
    };

    match (
        systolic.trim().parse::<f64>(),
        diastolic.trim().parse::<f64>(),
    ) {
        (Ok(systolic), Ok(diastolic)) if systolic.is_finite() && diastolic.is_finite() => {
            ParseOutcome::Parsed(BloodPressure {
                systolic,
                diastolic,
            })
        }
        _ => ParseOutcome::Defaulted(BloodPressure::ZERO),
    }
}

/// Reads a metric value as a number. Unparseable text falls back to `0`.
pub fn numeric_value(value: &MetricValue) -> ParseOutcome<f64> {
    match value {
        MetricValue::Number(n) => ParseOutcome::Parsed(*n),
        MetricValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => ParseOutcome::Parsed(n),
            _ => ParseOutcome::Defaulted(0.0),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesValue {
    Scalar(f64),
    BloodPressure(BloodPressure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint<'a> {
    pub date: &'a str,
    pub value: ParseOutcome<SeriesValue>,
}

/// Chart series for one metric, in history order.
///
/// Records where the metric is absent or falsy are skipped. Blood pressure is split into its
/// two components; everything else is read as a number.
pub fn metric_series(
    history: &[VitalsRecord],
    key: MetricKey,
) -> impl Iterator<Item = SeriesPoint<'_>> + '_ {
    history.iter().filter_map(move |record| {
        let raw = record.get(key).filter(|v| v.is_truthy())?;
        let value = match key {
            MetricKey::BloodPressure => blood_pressure_value(raw).map(SeriesValue::BloodPressure),
            _ => numeric_value(raw).map(SeriesValue::Scalar),
        };
        Some(SeriesPoint {
            date: &record.date,
            value,
        })
    })
}

/// Reads a raw blood-pressure metric; a bare number has no slash and so defaults.
pub fn blood_pressure_value(raw: &MetricValue) -> ParseOutcome<BloodPressure> {
    match raw {
        MetricValue::Text(s) => parse_blood_pressure(s),
        MetricValue::Number(_) => ParseOutcome::Defaulted(BloodPressure::ZERO),
    }
}

/// Appends the display unit for `key`, e.g. `95` -> `"95 mg/dL"`.
pub fn format_metric(key: MetricKey, raw: &MetricValue) -> String {
    match key.unit() {
        Some(unit) => format!("{raw} {unit}"),
        None => raw.to_string(),
    }
}

/// String-keyed variant of [`format_metric`]; unknown keys pass the value through unchanged.
pub fn format_metric_str(key: &str, raw: &MetricValue) -> String {
    match key.parse::<MetricKey>() {
        Ok(key) => format_metric(key, raw),
        Err(_) => raw.to_string(),
    }
}
