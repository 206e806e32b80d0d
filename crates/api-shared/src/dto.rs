//! Request and response bodies of the clinic API.

use chrono::NaiveDate;
use clinic_core::components::appointment::{Appointment, AppointmentStatus};
use clinic_core::components::directory::{Doctor, Patient, Staff, User};
use clinic_core::components::prescription::{MedicalRecord, Prescription};
use clinic_core::components::vitals::{MetricKey, VitalsRecord};
use clinic_core::repositories::vitals::{MetricSeries, SeriesEntry, VitalsSummary};
use clinic_core::shaping::pagination::{Page, Pagination};
use clinic_core::shaping::ParseOutcome;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRes {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogoutRes {
    pub ok: bool,
}

/// The list envelope: one page of items plus totals.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    PatientListRes = ListRes<Patient>,
    DoctorListRes = ListRes<Doctor>,
    StaffListRes = ListRes<Staff>,
    AppointmentListRes = ListRes<Appointment>,
    MedicalRecordListRes = ListRes<MedicalRecord>
)]
pub struct ListRes<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> From<Page<T>> for ListRes<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            data: page.data,
            pagination: page.pagination,
        }
    }
}

/// Query string of the list endpoints. Not every endpoint reads every field.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive free-text search.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
    /// Page size.
    pub limit: Option<usize>,
    /// Appointment tab: `all`, a status name, `in-clinic`, or a prefixed `status:<name>` /
    /// `mode:<name>` (`mode:upcoming` selects the upcoming mode).
    pub tab: Option<String>,
    /// Restrict medical records to one patient.
    pub patient_id: Option<String>,
}

impl ListQuery {
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdateReq {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VitalsQuery {
    pub patient_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VitalsHistoryRes {
    pub patient_id: String,
    /// Most recent first.
    #[schema(value_type = Vec<Object>)]
    pub records: Vec<VitalsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricEntry {
    pub metric: MetricKey,
    pub value: String,
}

/// A manually entered health check.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthCheckReq {
    pub patient_id: String,
    /// Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub entries: Vec<MetricEntry>,
}

impl HealthCheckReq {
    pub fn entries(&self) -> Vec<(MetricKey, String)> {
        self.entries
            .iter()
            .map(|e| (e.metric, e.value.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LatestVitalsRes {
    /// `None` when nothing has been recorded.
    pub latest: Option<VitalsSummary>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SeriesRes {
    pub metric: MetricKey,
    pub label: &'static str,
    pub unit: Option<&'static str>,
    #[schema(value_type = Vec<Object>)]
    pub points: Vec<SeriesEntry>,
}

impl From<MetricSeries> for SeriesRes {
    fn from(series: MetricSeries) -> Self {
        Self {
            metric: series.metric,
            label: series.label,
            unit: series.unit,
            points: series.points,
        }
    }
}

/// A legacy prescription string split into fields.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParsedPrescription {
    pub prescription: Prescription,
    /// The string did not have three parts; only `name` is filled.
    pub defaulted: bool,
}

impl From<ParseOutcome<Prescription>> for ParsedPrescription {
    fn from(outcome: ParseOutcome<Prescription>) -> Self {
        let defaulted = outcome.is_defaulted();
        Self {
            prescription: outcome.into_value(),
            defaulted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::shaping::pagination::{paginate, PageRequest};
    use clinic_core::shaping::schedule::parse_legacy_prescription;

    #[test]
    fn test_list_res_wire_shape() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(2, 2).unwrap());
        let json = serde_json::to_value(ListRes::from(page)).unwrap();
        assert_eq!(json["data"], serde_json::json!([3]));
        assert_eq!(
            json["pagination"],
            serde_json::json!({"total": 3, "page": 2, "limit": 2, "pages": 2})
        );
    }

    #[test]
    fn test_health_check_req_date_is_optional() {
        let req: HealthCheckReq = serde_json::from_str(
            r#"{"patient_id":"P001","entries":[{"metric":"blood_pressure","value":"120/80"}]}"#,
        )
        .unwrap();
        assert!(req.date.is_none());
        assert_eq!(
            req.entries(),
            vec![(MetricKey::BloodPressure, "120/80".to_string())]
        );
    }

    #[test]
    fn test_health_check_req_rejects_unknown_metric() {
        let res = serde_json::from_str::<HealthCheckReq>(
            r#"{"patient_id":"P001","entries":[{"metric":"pulse","value":"72"}]}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_parsed_prescription_flags_default() {
        let parsed = ParsedPrescription::from(parse_legacy_prescription("Vitamin D"));
        assert!(parsed.defaulted);
        assert_eq!(parsed.prescription.name, "Vitamin D");
    }

    #[test]
    fn test_list_query_defaults() {
        let q = ListQuery::default();
        assert_eq!(q.query(), "");
    }
}
