//! Patients, doctors and staff.

use std::sync::Arc;

use super::store::ClinicStore;
use super::Record;
use crate::components::directory::{Doctor, Patient, Staff};
use crate::shaping::pagination::{paginate, Page, PageRequest};
use crate::shaping::search::{filter_items, Searchable};
use crate::{ClinicError, ClinicResult};

#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<ClinicStore>,
}

impl DirectoryService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    pub fn list_patients(&self, query: &str, page: PageRequest) -> ClinicResult<Page<Patient>> {
        Ok(search_page(self.store.patients.list()?, query, page))
    }

    pub fn get_patient(&self, id: &str) -> ClinicResult<Patient> {
        found(self.store.patients.get(id)?, id)
    }

    pub fn create_patient(&self, patient: Patient) -> ClinicResult<Patient> {
        require_id(&patient)?;
        self.store.patients.insert(patient.clone())?;
        tracing::info!(patient_id = %patient.id, "patient created");
        Ok(patient)
    }

    pub fn list_doctors(&self, query: &str, page: PageRequest) -> ClinicResult<Page<Doctor>> {
        Ok(search_page(self.store.doctors.list()?, query, page))
    }

    pub fn get_doctor(&self, id: &str) -> ClinicResult<Doctor> {
        found(self.store.doctors.get(id)?, id)
    }

    pub fn create_doctor(&self, doctor: Doctor) -> ClinicResult<Doctor> {
        require_id(&doctor)?;
        self.store.doctors.insert(doctor.clone())?;
        tracing::info!(doctor_id = %doctor.id, "doctor created");
        Ok(doctor)
    }

    pub fn list_staff(&self, query: &str, page: PageRequest) -> ClinicResult<Page<Staff>> {
        Ok(search_page(self.store.staff.list()?, query, page))
    }

    pub fn get_staff(&self, id: &str) -> ClinicResult<Staff> {
        found(self.store.staff.get(id)?, id)
    }

    pub fn create_staff(&self, staff: Staff) -> ClinicResult<Staff> {
        require_id(&staff)?;
        self.store.staff.insert(staff.clone())?;
        tracing::info!(staff_id = %staff.id, "staff member created");
        Ok(staff)
    }
}

/// Query filter then pagination over a whole collection.
pub(crate) fn search_page<T: Searchable + Clone>(
    items: Vec<T>,
    query: &str,
    page: PageRequest,
) -> Page<T> {
    let matched: Vec<T> = filter_items(&items, query, |_| true)
        .into_iter()
        .cloned()
        .collect();
    paginate(matched, page)
}

pub(crate) fn found<T: Record>(item: Option<T>, id: &str) -> ClinicResult<T> {
    item.ok_or_else(|| ClinicError::NotFound {
        kind: T::KIND,
        id: id.to_string(),
    })
}

pub(crate) fn require_id<T: Record>(item: &T) -> ClinicResult<()> {
    if item.id().trim().is_empty() {
        return Err(ClinicError::InvalidInput(format!("{} id is required", T::KIND)));
    }
    Ok(())
}
