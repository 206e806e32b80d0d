//! Manual health-check entry.
//!
//! Staff enter metrics one at a time into a working set. Each metric may appear once; a second
//! entry for the same metric is refused and the set is left as it was. Saving turns the whole set
//! into one dated [`VitalsRecord`] and empties the draft.

use chrono::{DateTime, NaiveDate, Utc};
use clinic_types::NonEmptyText;

use crate::components::vitals::{MetricKey, MetricValue, VitalsRecord};
use crate::constants::DUPLICATE_NOTICE_TTL;
use crate::{ClinicError, ClinicResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthCheckDraft {
    entries: Vec<(MetricKey, MetricValue)>,
}

impl HealthCheckDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a metric to the working set.
    ///
    /// Text values are trimmed; numeric-looking text is stored as a number, except blood
    /// pressure which stays text (`"120/80"`).
    ///
    /// # Errors
    ///
    /// - `ClinicError::DuplicateMetric` naming the metric's label if it is already in the set.
    /// - `ClinicError::InvalidInput` if the value is empty.
    pub fn add(&mut self, key: MetricKey, value: &str) -> ClinicResult<()> {
        if self.contains(key) {
            return Err(ClinicError::DuplicateMetric { label: key.label() });
        }

        let value = NonEmptyText::new(value)
            .map_err(|_| ClinicError::InvalidInput(format!("{} needs a value", key.label())))?;

        let value = match (key, value.as_str().parse::<f64>()) {
            (MetricKey::BloodPressure, _) => MetricValue::Text(value.into_inner()),
            (_, Ok(n)) if n.is_finite() => MetricValue::Number(n),
            _ => MetricValue::Text(value.into_inner()),
        };

        self.entries.push((key, value));
        Ok(())
    }

    /// Removes a metric; returns whether it was present.
    pub fn remove(&mut self, key: MetricKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| *k != key);
        self.entries.len() != before
    }

    pub fn contains(&self, key: MetricKey) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(MetricKey, MetricValue)] {
        &self.entries
    }

    /// Turns the working set into a vitals record dated `date` and clears the draft.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidInput` if there is nothing to save.
    pub fn submit(&mut self, date: NaiveDate) -> ClinicResult<VitalsRecord> {
        if self.entries.is_empty() {
            return Err(ClinicError::InvalidInput(
                "health check has no metrics to save".into(),
            ));
        }

        let mut record = VitalsRecord::new(date.format("%Y-%m-%d").to_string());
        record.metrics.extend(self.entries.drain(..));
        Ok(record)
    }
}

/// A transient, user-facing message about a refused duplicate entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateNotice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl DuplicateNotice {
    pub fn new(label: &str, raised_at: DateTime<Utc>) -> Self {
        Self {
            message: format!("{label} has already been added"),
            raised_at,
        }
    }

    /// Whether the notice has been visible for longer than [`DUPLICATE_NOTICE_TTL`].
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let ttl = chrono::Duration::from_std(DUPLICATE_NOTICE_TTL).unwrap_or(chrono::Duration::zero());
        now - self.raised_at >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_duplicate_metric_is_rejected_and_set_unchanged() {
        let mut draft = HealthCheckDraft::new();
        draft.add(MetricKey::Glucose, "95").unwrap();

        let err = draft
            .add(MetricKey::Glucose, "110")
            .expect_err("second glucose entry should be refused");
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.entries()[0].1, MetricValue::Number(95.0));

        // The message names the label, not the raw key.
        assert_eq!(err.to_string(), "Glucose has already been added");
    }

    #[test]
    fn test_duplicate_message_uses_human_label() {
        let mut draft = HealthCheckDraft::new();
        draft.add(MetricKey::BloodPressure, "120/80").unwrap();
        let err = draft.add(MetricKey::BloodPressure, "130/85").unwrap_err();
        assert!(matches!(err, ClinicError::DuplicateMetric { label: "Blood Pressure" }));
        assert!(!err.to_string().contains("blood_pressure"));
    }

    #[test]
    fn test_re_adding_after_remove_is_allowed() {
        let mut draft = HealthCheckDraft::new();
        draft.add(MetricKey::Weight, "70").unwrap();
        assert!(draft.remove(MetricKey::Weight));
        assert!(!draft.remove(MetricKey::Weight));
        draft.add(MetricKey::Weight, "71").unwrap();
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn test_empty_value_is_validation_error() {
        let mut draft = HealthCheckDraft::new();
        let err = draft.add(MetricKey::Urea, "   ").unwrap_err();
        assert!(matches!(err, ClinicError::InvalidInput(msg) if msg.contains("Urea")));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_submit_builds_record_and_clears() {
        let mut draft = HealthCheckDraft::new();
        draft.add(MetricKey::BloodPressure, "120/80").unwrap();
        draft.add(MetricKey::Temperature, "98.6").unwrap();
        draft.add(MetricKey::Hemoglobin, "n/a").unwrap();

        let record = draft.submit(date()).unwrap();
        assert_eq!(record.date, "2024-03-15");
        assert_eq!(
            record.get(MetricKey::BloodPressure),
            Some(&MetricValue::Text("120/80".into()))
        );
        assert_eq!(record.get(MetricKey::Temperature), Some(&MetricValue::Number(98.6)));
        assert_eq!(
            record.get(MetricKey::Hemoglobin),
            Some(&MetricValue::Text("n/a".into()))
        );
        assert!(draft.is_empty());
    }

    #[test]
    fn test_submit_empty_draft_is_refused() {
        let mut draft = HealthCheckDraft::new();
        assert!(draft.submit(date()).is_err());
    }

    #[test]
    fn test_notice_expires_after_ttl() {
        let raised = DateTime::parse_from_rfc3339("2024-03-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let notice = DuplicateNotice::new(MetricKey::Glucose.label(), raised);
        assert_eq!(notice.message, "Glucose has already been added");
        assert!(!notice.is_expired(raised + chrono::Duration::seconds(2)));
        assert!(notice.is_expired(raised + chrono::Duration::seconds(3)));
    }
}
