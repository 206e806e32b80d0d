//! Per-patient vitals histories: latest summary, chart series and health-check submission.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use super::directory::found;
use super::store::ClinicStore;
use crate::components::directory::Patient;
use crate::components::vitals::{MetricKey, MetricValue, VitalsHistory, VitalsRecord};
use crate::shaping::health_check::HealthCheckDraft;
use crate::shaping::ranges::{classify_metric, RangeStatus};
use crate::shaping::series::{format_metric, latest_vitals, metric_series, SeriesValue};
use crate::shaping::ParseOutcome;
use crate::ClinicResult;

/// One metric of a vitals record, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct MetricReading {
    pub metric: MetricKey,
    pub label: &'static str,
    #[schema(value_type = Object)]
    pub value: MetricValue,
    /// Value with its unit, e.g. `"95 mg/dL"`.
    pub display: String,
    /// `None` for metrics without a reference range and for unreadable values.
    pub status: Option<RangeStatus>,
}

/// A vitals record rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct VitalsSummary {
    pub date: String,
    pub readings: Vec<MetricReading>,
}

impl VitalsSummary {
    pub fn from_record(record: &VitalsRecord) -> Self {
        let readings = record
            .metrics
            .iter()
            .map(|(key, value)| MetricReading {
                metric: *key,
                label: key.label(),
                value: value.clone(),
                display: format_metric(*key, value),
                status: classify_metric(*key, value),
            })
            .collect();

        Self {
            date: record.date.clone(),
            readings,
        }
    }

    /// Summary of the latest record (index 0), if any.
    pub fn latest(history: &[VitalsRecord]) -> Option<Self> {
        latest_vitals(history).map(Self::from_record)
    }
}

/// An owned chart point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesEntry {
    pub date: String,
    pub value: ParseOutcome<SeriesValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    pub metric: MetricKey,
    pub label: &'static str,
    pub unit: Option<&'static str>,
    pub points: Vec<SeriesEntry>,
}

impl MetricSeries {
    pub fn build(history: &[VitalsRecord], key: MetricKey) -> Self {
        Self {
            metric: key,
            label: key.label(),
            unit: key.unit(),
            points: metric_series(history, key)
                .map(|point| SeriesEntry {
                    date: point.date.to_string(),
                    value: point.value,
                })
                .collect(),
        }
    }
}

#[derive(Clone)]
pub struct VitalsService {
    store: Arc<ClinicStore>,
}

impl VitalsService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Most recent first. A patient with no recorded vitals has an empty history.
    pub fn history(&self, patient_id: &str) -> ClinicResult<Vec<VitalsRecord>> {
        Ok(self
            .store
            .vitals
            .get(patient_id)?
            .map(|h| h.records)
            .unwrap_or_default())
    }

    pub fn latest(&self, patient_id: &str) -> ClinicResult<Option<VitalsSummary>> {
        Ok(VitalsSummary::latest(&self.history(patient_id)?))
    }

    pub fn series(&self, patient_id: &str, key: MetricKey) -> ClinicResult<MetricSeries> {
        Ok(MetricSeries::build(&self.history(patient_id)?, key))
    }

    /// Records a manually entered health check as the patient's newest vitals record.
    ///
    /// Entries go through [`HealthCheckDraft`], so a metric entered twice is refused with the
    /// metric's label and nothing is saved.
    ///
    /// # Errors
    ///
    /// - `ClinicError::NotFound` if the patient does not exist.
    /// - `ClinicError::DuplicateMetric` if a metric appears twice.
    /// - `ClinicError::InvalidInput` for empty values or an empty submission.
    pub fn submit_health_check(
        &self,
        patient_id: &str,
        entries: &[(MetricKey, String)],
        date: NaiveDate,
    ) -> ClinicResult<VitalsRecord> {
        found::<Patient>(self.store.patients.get(patient_id)?, patient_id)?;

        let mut draft = HealthCheckDraft::new();
        for (key, value) in entries {
            draft.add(*key, value)?;
        }
        let record = draft.submit(date)?;

        let empty = VitalsHistory {
            patient_id: patient_id.to_string(),
            records: Vec::new(),
        };
        self.store
            .vitals
            .modify_or_insert(empty, &mut |history| history.records.insert(0, record.clone()))?;

        tracing::info!(
            patient_id,
            metrics = record.metrics.len(),
            "health check recorded"
        );
        Ok(record)
    }
}
