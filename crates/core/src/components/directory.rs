//! People known to the clinic: patients, doctors, staff and login users.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{ClinicError, ClinicResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactDetails {
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact: ContactDetails,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub status: PatientStatus,
    #[serde(default)]
    pub last_visit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DoctorAvailability {
    Available,
    Busy,
    OnLeave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub contact: ContactDetails,
    pub availability: DoctorAvailability,
    #[serde(default)]
    pub experience_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StaffStatus {
    Active,
    OnLeave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Staff {
    pub id: String,
    pub name: String,
    /// Job title, e.g. "Nurse" or "Receptionist".
    pub role: String,
    pub department: String,
    pub contact: ContactDetails,
    pub status: StaffStatus,
}

/// Role of a logged-in user; decides which views they get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Doctor,
    Staff,
}

impl FromStr for UserRole {
    type Err = ClinicError;

    fn from_str(s: &str) -> ClinicResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "doctor" => Ok(UserRole::Doctor),
            "staff" => Ok(UserRole::Staff),
            other => Err(ClinicError::InvalidInput(format!("unknown role: {other}"))),
        }
    }
}

/// A login account. Passwords are plaintext mock values and never serialised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub role: UserRole,
    /// Doctor entry this account belongs to, for doctor users.
    #[serde(default)]
    pub doctor_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_password_is_not_serialised() {
        let user = User {
            id: "U001".into(),
            name: "Admin".into(),
            email: "admin@clinic.test".into(),
            password: "secret".into(),
            role: UserRole::Admin,
            doctor_id: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn test_user_deserialises_password_from_seed() {
        let user: User = serde_json::from_str(
            r#"{"id":"U002","name":"Dr. Lee","email":"lee@clinic.test","password":"pw","role":"doctor","doctor_id":"D001"}"#,
        )
        .unwrap();
        assert_eq!(user.password, "pw");
        assert_eq!(user.doctor_id.as_deref(), Some("D001"));
    }

    #[test]
    fn test_doctor_availability_wire_strings() {
        assert_eq!(
            serde_json::to_string(&DoctorAvailability::OnLeave).unwrap(),
            "\"on-leave\""
        );
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Doctor".parse::<UserRole>().unwrap(), UserRole::Doctor);
        assert!("nurse".parse::<UserRole>().is_err());
    }
}
