//! Medical records and structured prescription entry.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::appointments::acting_for;
use super::directory::found;
use super::store::ClinicStore;
use crate::components::directory::User;
use crate::components::prescription::{FoodInstruction, MedicalRecord, Prescription, TimeOfDay};
use crate::shaping::pagination::{paginate, Page, PageRequest};
use crate::shaping::schedule::Frequency;
use crate::shaping::search::filter_items;
use crate::{ClinicError, ClinicResult};
use clinic_types::NonEmptyText;

/// Prescription as entered in the structured form.
///
/// `times_per_day` only matters for `daily`, `custom_text` only for `custom`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct PrescriptionForm {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    pub frequency: String,
    #[serde(default)]
    pub times_per_day: String,
    #[serde(default)]
    pub custom_text: String,
    #[serde(default)]
    pub time_of_day: Vec<TimeOfDay>,
    #[serde(default)]
    pub with_food: Option<FoodInstruction>,
}

impl PrescriptionForm {
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidInput` for a blank name or an invalid frequency selection.
    pub fn into_prescription(self) -> ClinicResult<Prescription> {
        let name = NonEmptyText::new(&self.name)?;
        let frequency = Frequency::from_form(&self.frequency, &self.times_per_day, &self.custom_text)?;
        let mut prescription =
            Prescription::structured(name.into_inner(), self.dosage.trim(), frequency);
        prescription.time_of_day = self.time_of_day;
        prescription.with_food = self.with_food;
        Ok(prescription)
    }
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct NewMedicalRecord {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub diagnosis: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub prescriptions: Vec<PrescriptionForm>,
}

#[derive(Clone)]
pub struct MedicalRecordService {
    store: Arc<ClinicStore>,
}

impl MedicalRecordService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Records matching `query`, optionally restricted to one patient.
    pub fn list(
        &self,
        query: &str,
        patient_id: Option<&str>,
        page: PageRequest,
    ) -> ClinicResult<Page<MedicalRecord>> {
        let records = self.store.medical_records.list()?;
        let matched: Vec<MedicalRecord> = filter_items(&records, query, |r| {
            patient_id.map_or(true, |id| r.patient_id == id)
        })
        .into_iter()
        .cloned()
        .collect();
        Ok(paginate(matched, page))
    }

    pub fn get(&self, id: &str) -> ClinicResult<MedicalRecord> {
        found(self.store.medical_records.get(id)?, id)
    }

    /// Creates a record, deriving each prescription's schedule phrase from its frequency.
    ///
    /// # Errors
    ///
    /// - `ClinicError::NotFound` if the patient or doctor does not exist.
    /// - `ClinicError::InvalidInput` for a blank diagnosis or an invalid prescription.
    /// - `ClinicError::Forbidden` if a doctor files the record under another doctor.
    pub fn create(&self, author: &User, new: NewMedicalRecord) -> ClinicResult<MedicalRecord> {
        acting_for(author, &new.doctor_id)?;
        found(self.store.patients.get(&new.patient_id)?, &new.patient_id)?;
        found(self.store.doctors.get(&new.doctor_id)?, &new.doctor_id)?;

        let diagnosis = NonEmptyText::new(&new.diagnosis)
            .map_err(|_| ClinicError::InvalidInput("diagnosis is required".into()))?;

        let prescriptions = new
            .prescriptions
            .into_iter()
            .map(PrescriptionForm::into_prescription)
            .collect::<ClinicResult<Vec<_>>>()?;

        let record = MedicalRecord {
            id: format!("MR-{}", Uuid::new_v4().simple()),
            patient_id: new.patient_id,
            doctor_id: new.doctor_id,
            date: new.date,
            diagnosis: diagnosis.into_inner(),
            notes: new.notes,
            prescriptions,
        };

        self.store.medical_records.insert(record.clone())?;
        tracing::info!(
            record_id = %record.id,
            patient_id = %record.patient_id,
            prescriptions = record.prescriptions.len(),
            "medical record created"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::directory::UserRole;

    fn author(role: UserRole, doctor_id: Option<&str>) -> User {
        User {
            id: "U-test".into(),
            name: "Test".into(),
            email: "test@clinic.test".into(),
            password: String::new(),
            role,
            doctor_id: doctor_id.map(str::to_string),
        }
    }

    fn admin() -> User {
        author(UserRole::Admin, None)
    }

    fn service() -> (MedicalRecordService, Arc<ClinicStore>) {
        let store = Arc::new(ClinicStore::embedded().unwrap());
        (MedicalRecordService::new(store.clone()), store)
    }

    fn form(frequency: &str, times: &str, custom: &str) -> PrescriptionForm {
        PrescriptionForm {
            name: "Amlodipine".into(),
            dosage: "5mg".into(),
            frequency: frequency.into(),
            times_per_day: times.into(),
            custom_text: custom.into(),
            time_of_day: vec![TimeOfDay::Morning],
            with_food: Some(FoodInstruction::After),
        }
    }

    fn new_record(store: &ClinicStore, prescriptions: Vec<PrescriptionForm>) -> NewMedicalRecord {
        NewMedicalRecord {
            patient_id: store.patients.list().unwrap()[0].id.clone(),
            doctor_id: store.doctors.list().unwrap()[0].id.clone(),
            date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            diagnosis: "Hypertension".into(),
            notes: String::new(),
            prescriptions,
        }
    }

    #[test]
    fn test_create_derives_schedule_text() {
        let (svc, store) = service();
        let record = svc
            .create(&admin(), new_record(&store, vec![form("daily", "3", "")]))
            .unwrap();

        let rx = &record.prescriptions[0];
        assert_eq!(rx.schedule, "Three times daily");
        assert_eq!(rx.frequency, Some(Frequency::Daily { times_per_day: 3 }));
        assert_eq!(rx.with_food, Some(FoodInstruction::After));
        assert_eq!(svc.get(&record.id).unwrap(), record);
    }

    #[test]
    fn test_create_rejects_invalid_frequency() {
        let (svc, store) = service();
        let before = store.medical_records.list().unwrap().len();
        let err = svc
            .create(&admin(), new_record(&store, vec![form("daily", "0", "")]))
            .unwrap_err();
        assert!(matches!(err, ClinicError::InvalidInput(_)));
        assert_eq!(store.medical_records.list().unwrap().len(), before);
    }

    #[test]
    fn test_create_requires_known_patient() {
        let (svc, store) = service();
        let mut new = new_record(&store, vec![]);
        new.patient_id = "P-missing".into();
        assert!(matches!(
            svc.create(&admin(), new),
            Err(ClinicError::NotFound { kind: "patient", .. })
        ));
    }

    #[test]
    fn test_doctor_files_records_only_under_themselves() {
        let (svc, store) = service();
        let new = new_record(&store, vec![]);
        let own_id = new.doctor_id.clone();

        let err = svc
            .create(&author(UserRole::Doctor, Some("D-other")), new_record(&store, vec![]))
            .unwrap_err();
        assert!(matches!(err, ClinicError::Forbidden(_)));

        let record = svc
            .create(&author(UserRole::Doctor, Some(own_id.as_str())), new)
            .unwrap();
        assert_eq!(record.doctor_id, own_id);
    }

    #[test]
    fn test_list_by_patient() {
        let (svc, store) = service();
        let patient_id = store.medical_records.list().unwrap()[0].patient_id.clone();
        let page = svc
            .list("", Some(&patient_id), PageRequest::new(1, 100).unwrap())
            .unwrap();
        assert!(page.pagination.total > 0);
        assert!(page.data.iter().all(|r| r.patient_id == patient_id));
    }
}
