//! Prescriptions and medical records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shaping::schedule::Frequency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FoodInstruction {
    Before,
    With,
    After,
}

impl FoodInstruction {
    pub fn as_phrase(self) -> &'static str {
        match self {
            FoodInstruction::Before => "Before food",
            FoodInstruction::With => "With food",
            FoodInstruction::After => "After food",
        }
    }
}

/// A prescribed medication.
///
/// `schedule` is the display phrase. When the prescription was entered through the structured
/// form, the [`Frequency`] it was generated from is kept next to it so the prescription can be
/// edited without re-parsing the phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Prescription {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_of_day: Vec<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_food: Option<FoodInstruction>,
}

impl Prescription {
    /// Builds a prescription from its structured frequency, deriving the schedule phrase.
    pub fn structured(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: Frequency,
    ) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            schedule: frequency.schedule_text(),
            frequency: Some(frequency),
            time_of_day: Vec::new(),
            with_food: None,
        }
    }
}

/// A visit note with the prescriptions written at that visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub diagnosis: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_prescription_keeps_frequency_and_phrase() {
        let p = Prescription::structured(
            "Metformin",
            "500mg",
            Frequency::Daily { times_per_day: 2 },
        );
        assert_eq!(p.schedule, "Twice daily");
        assert_eq!(p.frequency, Some(Frequency::Daily { times_per_day: 2 }));
    }

    #[test]
    fn test_prescription_without_optional_fields_deserialises() {
        let p: Prescription =
            serde_json::from_str(r#"{"name":"Aspirin","dosage":"75mg","schedule":"Once daily"}"#)
                .unwrap();
        assert_eq!(p.frequency, None);
        assert!(p.time_of_day.is_empty());
        assert_eq!(p.with_food, None);
    }

    #[test]
    fn test_prescription_serialises_structured_form() {
        let mut p = Prescription::structured("Amoxicillin", "250mg", Frequency::Alternate);
        p.with_food = Some(FoodInstruction::After);
        p.time_of_day = vec![TimeOfDay::Morning];
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["schedule"], "Every other day");
        assert_eq!(json["frequency"]["kind"], "alternate");
        assert_eq!(json["with_food"], "after");
        assert_eq!(json["time_of_day"][0], "morning");
    }
}
