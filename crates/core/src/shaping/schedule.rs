//! Prescription schedule phrases.
//!
//! The structured prescription form collects a frequency (daily, weekly, alternate days or
//! custom text) and, for daily medication, a times-per-day count. That selection is rendered into
//! a fixed English phrase. Older prescriptions only exist as flat `"Name - Dosage - Schedule"`
//! strings and are split back apart on a best-effort basis.

use serde::{Deserialize, Serialize};

use crate::components::prescription::Prescription;
use crate::constants::LEGACY_PRESCRIPTION_DELIMITER;
use crate::shaping::ParseOutcome;
use crate::{ClinicError, ClinicResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Frequency {
    Daily { times_per_day: u32 },
    Weekly,
    Alternate,
    Custom { text: String },
}

impl Frequency {
    /// Builds a frequency from the raw prescription form fields.
    ///
    /// `times_per_day` is only read for `daily`, `custom_text` only for `custom`.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidInput` for an unknown frequency, a times-per-day that is not
    /// a positive integer, or empty custom text.
    pub fn from_form(frequency: &str, times_per_day: &str, custom_text: &str) -> ClinicResult<Self> {
        match frequency.trim().to_ascii_lowercase().as_str() {
            "daily" => {
                let times_per_day = times_per_day
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        ClinicError::InvalidInput(format!(
                            "times per day must be a positive integer, got {times_per_day:?}"
                        ))
                    })?;
                Ok(Frequency::Daily { times_per_day })
            }
            "weekly" => Ok(Frequency::Weekly),
            "alternate" => Ok(Frequency::Alternate),
            "custom" => {
                let text = custom_text.trim();
                if text.is_empty() {
                    return Err(ClinicError::InvalidInput(
                        "custom schedule text cannot be empty".into(),
                    ));
                }
                Ok(Frequency::Custom { text: text.into() })
            }
            other => Err(ClinicError::InvalidInput(format!(
                "unknown frequency: {other}"
            ))),
        }
    }

    /// The display phrase stored as the prescription's schedule.
    pub fn schedule_text(&self) -> String {
        match self {
            Frequency::Daily { times_per_day } => match times_per_day {
                1 => "Once daily".into(),
                2 => "Twice daily".into(),
                3 => "Three times daily".into(),
                4 => "Four times daily".into(),
                n => format!("{n} times daily"),
            },
            Frequency::Weekly => "Once weekly".into(),
            Frequency::Alternate => "Every other day".into(),
            Frequency::Custom { text } => text.clone(),
        }
    }
}

/// Splits a legacy `"Name - Dosage - Schedule"` string.
///
/// Only the first two delimiters split; anything after them belongs to the schedule. With fewer
/// than three parts the whole string is taken as the name and the result is flagged as
/// defaulted. A name that itself contains `" - "` is split wrongly; the flat format cannot tell
/// the difference.
pub fn parse_legacy_prescription(text: &str) -> ParseOutcome<Prescription> {
    let parts: Vec<&str> = text.splitn(3, LEGACY_PRESCRIPTION_DELIMITER).collect();

    let prescription = |name: &str, dosage: &str, schedule: &str| Prescription {
        name: name.trim().to_string(),
        dosage: dosage.trim().to_string(),
        schedule: schedule.trim().to_string(),
        frequency: None,
        time_of_day: Vec::new(),
        with_food: None,
    };

    match parts.as_slice() {
        &[name, dosage, schedule] => ParseOutcome::Parsed(prescription(name, dosage, schedule)),
        _ => ParseOutcome::Defaulted(prescription(text, "", "")),
    }
}

/// Renders a prescription back into the legacy flat form.
pub fn to_legacy_string(prescription: &Prescription) -> String {
    [
        prescription.name.as_str(),
        prescription.dosage.as_str(),
        prescription.schedule.as_str(),
    ]
    .join(LEGACY_PRESCRIPTION_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(times: &str) -> String {
        Frequency::from_form("daily", times, "")
            .unwrap()
            .schedule_text()
    }

    #[test]
    fn test_daily_phrases() {
        assert_eq!(daily("1"), "Once daily");
        assert_eq!(daily("2"), "Twice daily");
        assert_eq!(daily("3"), "Three times daily");
        assert_eq!(daily("4"), "Four times daily");
        assert_eq!(daily("5"), "5 times daily");
        assert_eq!(daily("7"), "7 times daily");
    }

    #[test]
    fn test_other_frequencies() {
        assert_eq!(
            Frequency::from_form("weekly", "", "").unwrap().schedule_text(),
            "Once weekly"
        );
        assert_eq!(
            Frequency::from_form("alternate", "3", "").unwrap().schedule_text(),
            "Every other day"
        );
        assert_eq!(
            Frequency::from_form("custom", "", "Every 6 hours as needed")
                .unwrap()
                .schedule_text(),
            "Every 6 hours as needed"
        );
    }

    #[test]
    fn test_from_form_rejects_bad_input() {
        assert!(Frequency::from_form("daily", "0", "").is_err());
        assert!(Frequency::from_form("daily", "two", "").is_err());
        assert!(Frequency::from_form("custom", "", "  ").is_err());
        assert!(Frequency::from_form("hourly", "", "").is_err());
    }

    #[test]
    fn test_legacy_parse_three_parts() {
        let parsed = parse_legacy_prescription("Lisinopril - 10mg - Once daily");
        assert!(!parsed.is_defaulted());
        let p = parsed.into_value();
        assert_eq!(p.name, "Lisinopril");
        assert_eq!(p.dosage, "10mg");
        assert_eq!(p.schedule, "Once daily");
    }

    #[test]
    fn test_legacy_parse_keeps_remainder_in_schedule() {
        let p = parse_legacy_prescription("Ibuprofen - 200mg - Twice daily - after food").into_value();
        assert_eq!(p.name, "Ibuprofen");
        assert_eq!(p.dosage, "200mg");
        assert_eq!(p.schedule, "Twice daily - after food");
    }

    #[test]
    fn test_legacy_parse_name_only() {
        let parsed = parse_legacy_prescription("Aspirin");
        assert!(parsed.is_defaulted());
        let p = parsed.into_value();
        assert_eq!(p.name, "Aspirin");
        assert_eq!(p.dosage, "");
        assert_eq!(p.schedule, "");
    }

    #[test]
    fn test_legacy_parse_two_parts_is_name_only() {
        let p = parse_legacy_prescription("Aspirin - 75mg").into_value();
        assert_eq!(p.name, "Aspirin - 75mg");
        assert_eq!(p.dosage, "");
    }

    #[test]
    fn test_legacy_parse_hyphenated_name_is_misread() {
        // Known limitation of the flat format.
        let p = parse_legacy_prescription("Co - codamol - 500mg - Twice daily").into_value();
        assert_eq!(p.name, "Co");
        assert_eq!(p.dosage, "codamol");
        assert_eq!(p.schedule, "500mg - Twice daily");
    }

    #[test]
    fn test_to_legacy_string() {
        let p = Prescription::structured("Metformin", "500mg", Frequency::Daily { times_per_day: 2 });
        assert_eq!(to_legacy_string(&p), "Metformin - 500mg - Twice daily");
    }
}
