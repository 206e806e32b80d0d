//! Appointments and their closed status/type/mode vocabularies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::components::directory::ContactDetails;
use crate::components::vitals::VitalsRecord;
use crate::{ClinicError, ClinicResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum AppointmentType {
    #[serde(rename = "Check-up")]
    CheckUp,
    Consultation,
    #[serde(rename = "Follow-up")]
    FollowUp,
    Procedure,
    Emergency,
}

impl AppointmentType {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentType::CheckUp => "Check-up",
            AppointmentType::Consultation => "Consultation",
            AppointmentType::FollowUp => "Follow-up",
            AppointmentType::Procedure => "Procedure",
            AppointmentType::Emergency => "Emergency",
        }
    }
}

/// Appointment status. The wire strings are exactly the variant names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema,
)]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
    Completed,
    Scheduled,
    Upcoming,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 6] = [
        AppointmentStatus::Confirmed,
        AppointmentStatus::Pending,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
        AppointmentStatus::Scheduled,
        AppointmentStatus::Upcoming,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Upcoming => "Upcoming",
        }
    }

    /// Whether the appointment still lies ahead of the patient.
    pub fn is_open(self) -> bool {
        !matches!(
            self,
            AppointmentStatus::Cancelled | AppointmentStatus::Completed
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ClinicError;

    /// Case-insensitive, so query strings like `?tab=confirmed` work.
    fn from_str(s: &str) -> ClinicResult<Self> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClinicError::InvalidInput(format!("unknown appointment status: {s}")))
    }
}

/// Staff-view categorisation, independent of status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentMode {
    InClinic,
    Upcoming,
}

impl AppointmentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentMode::InClinic => "in-clinic",
            AppointmentMode::Upcoming => "upcoming",
        }
    }
}

impl FromStr for AppointmentMode {
    type Err = ClinicError;

    fn from_str(s: &str) -> ClinicResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in-clinic" => Ok(AppointmentMode::InClinic),
            "upcoming" => Ok(AppointmentMode::Upcoming),
            other => Err(ClinicError::InvalidInput(format!(
                "unknown appointment mode: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PatientRef {
    pub id: String,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub avatar: Option<String>,
    pub contact: ContactDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DoctorRef {
    pub id: String,
    pub name: String,
}

/// Summary of the patient's previous visit, as shown in the appointment view.
///
/// `prescriptions` holds legacy flat strings ("Name - Dosage - Schedule").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct PreviousVisit {
    pub complaints: Vec<String>,
    pub diagnoses: Vec<String>,
    pub prescriptions: Vec<String>,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Appointment {
    pub id: String,
    pub patient: PatientRef,
    pub doctor: DoctorRef,
    pub specialty: String,
    pub date: NaiveDate,
    pub time: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub mode: AppointmentMode,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub previous_visit: PreviousVisit,
    /// Most recent first by convention; index 0 is treated as the latest.
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub vitals: Vec<VitalsRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_strings_are_exact() {
        let names: Vec<String> = AppointmentStatus::ALL
            .iter()
            .map(|s| serde_json::to_value(s).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            ["Confirmed", "Pending", "Cancelled", "Completed", "Scheduled", "Upcoming"]
        );
    }

    #[test]
    fn test_status_rejects_unknown_string_at_boundary() {
        assert!(serde_json::from_str::<AppointmentStatus>("\"Rescheduled\"").is_err());
        assert!("rescheduled".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            "confirmed".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Confirmed
        );
    }

    #[test]
    fn test_type_uses_hyphenated_names() {
        assert_eq!(
            serde_json::to_string(&AppointmentType::CheckUp).unwrap(),
            "\"Check-up\""
        );
        assert_eq!(
            serde_json::from_str::<AppointmentType>("\"Follow-up\"").unwrap(),
            AppointmentType::FollowUp
        );
    }

    #[test]
    fn test_mode_wire_strings() {
        assert_eq!(
            serde_json::to_string(&AppointmentMode::InClinic).unwrap(),
            "\"in-clinic\""
        );
        assert_eq!(
            "Upcoming".parse::<AppointmentMode>().unwrap(),
            AppointmentMode::Upcoming
        );
    }
}
