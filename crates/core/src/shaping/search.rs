//! Free-text search and tab filtering over flat lists.
//!
//! A query matches an item when any of the item's search fields contains the query as a
//! case-insensitive substring. An empty query matches everything, so the input order and
//! contents come back unchanged. Tab predicates are ANDed with the query.

use std::str::FromStr;

use crate::components::appointment::{Appointment, AppointmentMode, AppointmentStatus};
use crate::components::directory::{Doctor, Patient, Staff};
use crate::components::prescription::MedicalRecord;
use crate::{ClinicError, ClinicResult};

/// Records that expose a default set of free-text search fields.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Patient {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.id.as_str(), self.contact.phone.as_str()];
        if let Some(email) = &self.contact.email {
            fields.push(email);
        }
        fields
    }
}

impl Searchable for Doctor {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.id.as_str(), self.specialty.as_str()]
    }
}

impl Searchable for Staff {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.id.as_str(),
            self.role.as_str(),
            self.department.as_str(),
        ]
    }
}

impl Searchable for Appointment {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.patient.name.as_str(),
            self.patient.id.as_str(),
            self.doctor.name.as_str(),
            self.specialty.as_str(),
            self.id.as_str(),
        ]
    }
}

impl Searchable for MedicalRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.patient_id.as_str(),
            self.doctor_id.as_str(),
            self.diagnosis.as_str(),
        ]
    }
}

/// A lowercased, trimmed search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any of `fields` contains the query.
    pub fn matches<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        self.is_empty()
            || fields
                .into_iter()
                .any(|field| field.to_lowercase().contains(&self.0))
    }
}

/// Filters `items` by `query` over the fields selected by `fields`.
pub fn filter_by_query<'a, T, F>(items: &'a [T], query: &str, fields: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<&str>,
{
    let query = SearchQuery::new(query);
    items
        .iter()
        .filter(|item| query.matches(fields(*item)))
        .collect()
}

/// Filters by query over the default search fields, ANDed with a tab predicate.
pub fn filter_items<'a, T, P>(items: &'a [T], query: &str, tab: P) -> Vec<&'a T>
where
    T: Searchable,
    P: Fn(&T) -> bool,
{
    let query = SearchQuery::new(query);
    items
        .iter()
        .filter(|item| tab(*item) && query.matches(item.search_fields()))
        .collect()
}

/// Category tabs of the appointment views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppointmentTab {
    #[default]
    All,
    Status(AppointmentStatus),
    Mode(AppointmentMode),
}

impl AppointmentTab {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        match self {
            AppointmentTab::All => true,
            AppointmentTab::Status(status) => appointment.status == *status,
            AppointmentTab::Mode(mode) => appointment.mode == *mode,
        }
    }
}

impl FromStr for AppointmentTab {
    type Err = ClinicError;

    /// Accepts `all`, any status name, or a mode (`in-clinic`). A `status:` or `mode:` prefix
    /// picks the category explicitly.
    ///
    /// Bare `upcoming` names both a status and a mode; it resolves to the status. Use
    /// `mode:upcoming` for the mode.
    fn from_str(s: &str) -> ClinicResult<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(AppointmentTab::All);
        }
        if let Some((category, value)) = s.split_once(':') {
            return match category.trim().to_ascii_lowercase().as_str() {
                "status" => value.parse().map(AppointmentTab::Status),
                "mode" => value.parse().map(AppointmentTab::Mode),
                _ => Err(ClinicError::InvalidInput(format!("unknown appointment tab: {s}"))),
            };
        }
        if let Ok(status) = s.parse::<AppointmentStatus>() {
            return Ok(AppointmentTab::Status(status));
        }
        s.parse::<AppointmentMode>()
            .map(AppointmentTab::Mode)
            .map_err(|_| ClinicError::InvalidInput(format!("unknown appointment tab: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::appointment::{AppointmentType, DoctorRef, PatientRef, PreviousVisit};
    use crate::components::directory::{ContactDetails, DoctorAvailability};
    use chrono::NaiveDate;

    fn doctor(id: &str, name: &str, specialty: &str) -> Doctor {
        Doctor {
            id: id.into(),
            name: name.into(),
            specialty: specialty.into(),
            contact: ContactDetails::default(),
            availability: DoctorAvailability::Available,
            experience_years: 5,
        }
    }

    fn appointment(
        id: &str,
        patient: &str,
        status: AppointmentStatus,
        mode: AppointmentMode,
    ) -> Appointment {
        Appointment {
            id: id.into(),
            patient: PatientRef {
                id: format!("P-{id}"),
                name: patient.into(),
                age: 40,
                avatar: None,
                contact: ContactDetails::default(),
            },
            doctor: DoctorRef {
                id: "D001".into(),
                name: "Dr. Sarah Lee".into(),
            },
            specialty: "Cardiology".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            time: "10:00 AM".into(),
            duration: "30 min".into(),
            appointment_type: AppointmentType::CheckUp,
            status,
            mode,
            notes: String::new(),
            previous_visit: PreviousVisit::default(),
            vitals: Vec::new(),
        }
    }

    fn doctors() -> Vec<Doctor> {
        vec![
            doctor("D001", "Dr. Sarah Lee", "Cardiology"),
            doctor("D002", "Dr. Omar Khan", "Dermatology"),
            doctor("D003", "Dr. Lena Park", "Cardiology"),
        ]
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let items = doctors();
        let ids: Vec<&str> = filter_by_query(&items, "", Doctor::search_fields)
            .into_iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, ["D001", "D002", "D003"]);

        assert_eq!(filter_by_query(&items, "   ", Doctor::search_fields).len(), 3);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let items = doctors();
        let hits = filter_by_query(&items, "CARDIO", Doctor::search_fields);
        let ids: Vec<&str> = hits.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["D001", "D003"]);
    }

    #[test]
    fn test_query_matching_no_fields_returns_nothing() {
        let items = doctors();
        assert!(filter_by_query(&items, "neurology", Doctor::search_fields).is_empty());
    }

    #[test]
    fn test_custom_field_selection() {
        let items = doctors();
        let by_id_only = filter_by_query(&items, "lee", |d: &Doctor| vec![d.id.as_str()]);
        assert!(by_id_only.is_empty());
    }

    #[test]
    fn test_empty_collection() {
        let items: Vec<Doctor> = Vec::new();
        assert!(filter_by_query(&items, "lee", Doctor::search_fields).is_empty());
        assert!(filter_items(&items, "", |_| true).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let items = doctors();
        for query in ["lee", "cardio", "d00", "nothing"] {
            let once: Vec<Doctor> = filter_by_query(&items, query, Doctor::search_fields)
                .into_iter()
                .cloned()
                .collect();
            let twice: Vec<Doctor> = filter_by_query(&once, query, Doctor::search_fields)
                .into_iter()
                .cloned()
                .collect();
            assert_eq!(once, twice, "query {query:?}");
        }
    }

    #[test]
    fn test_tab_and_query_combine_with_and() {
        let items = vec![
            appointment("A1", "John Smith", AppointmentStatus::Confirmed, AppointmentMode::InClinic),
            appointment("A2", "Jane Doe", AppointmentStatus::Pending, AppointmentMode::Upcoming),
            appointment("A3", "John Carter", AppointmentStatus::Pending, AppointmentMode::InClinic),
        ];

        let tab = AppointmentTab::Status(AppointmentStatus::Pending);
        let hits = filter_items(&items, "john", |a| tab.matches(a));
        let ids: Vec<&str> = hits.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["A3"]);

        let tab = AppointmentTab::Mode(AppointmentMode::InClinic);
        assert_eq!(filter_items(&items, "", |a| tab.matches(a)).len(), 2);
    }

    #[test]
    fn test_tab_excluding_everything() {
        let items = vec![appointment(
            "A1",
            "John Smith",
            AppointmentStatus::Confirmed,
            AppointmentMode::InClinic,
        )];
        let tab = AppointmentTab::Status(AppointmentStatus::Cancelled);
        assert!(filter_items(&items, "", |a| tab.matches(a)).is_empty());
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("all".parse::<AppointmentTab>().unwrap(), AppointmentTab::All);
        assert_eq!("".parse::<AppointmentTab>().unwrap(), AppointmentTab::All);
        assert_eq!(
            "completed".parse::<AppointmentTab>().unwrap(),
            AppointmentTab::Status(AppointmentStatus::Completed)
        );
        assert_eq!(
            "in-clinic".parse::<AppointmentTab>().unwrap(),
            AppointmentTab::Mode(AppointmentMode::InClinic)
        );
        assert_eq!(
            "upcoming".parse::<AppointmentTab>().unwrap(),
            AppointmentTab::Status(AppointmentStatus::Upcoming)
        );
        assert!("archived".parse::<AppointmentTab>().is_err());
    }

    #[test]
    fn test_prefixed_tabs_pick_the_category() {
        assert_eq!(
            "mode:upcoming".parse::<AppointmentTab>().unwrap(),
            AppointmentTab::Mode(AppointmentMode::Upcoming)
        );
        assert_eq!(
            "Mode: Upcoming".parse::<AppointmentTab>().unwrap(),
            AppointmentTab::Mode(AppointmentMode::Upcoming)
        );
        assert_eq!(
            "status:upcoming".parse::<AppointmentTab>().unwrap(),
            AppointmentTab::Status(AppointmentStatus::Upcoming)
        );
        assert!("mode:confirmed".parse::<AppointmentTab>().is_err());
        assert!("kind:upcoming".parse::<AppointmentTab>().is_err());
    }
}
