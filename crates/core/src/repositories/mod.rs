//! Repositories and the services built on them.
//!
//! [`Repository`] is the storage seam: services only ever talk to the trait, so the data shaping
//! stays pure and the in-memory implementation used for mock data and tests can be swapped for a
//! real store.

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod directory;
pub mod medical_records;
pub mod memory;
pub mod store;
pub mod vitals;

use crate::components::appointment::Appointment;
use crate::components::directory::{Doctor, Patient, Staff, User};
use crate::components::prescription::MedicalRecord;
use crate::components::vitals::VitalsHistory;
use crate::ClinicResult;

/// A record with a string identity.
pub trait Record: Clone + Send + Sync + 'static {
    /// Name used in errors and logs, e.g. `"patient"`.
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// Storage for one collection of records.
pub trait Repository<T: Record>: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> ClinicResult<Vec<T>>;

    fn get(&self, id: &str) -> ClinicResult<Option<T>>;

    /// Appends a record.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::DuplicateId` if a record with the same id exists.
    fn insert(&self, item: T) -> ClinicResult<()>;

    /// Replaces the record with the same id.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::NotFound` if no record has that id.
    fn update(&self, item: T) -> ClinicResult<()>;

    /// Applies `change` to the record with `id` under one write lock and returns the result.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::NotFound` if no record has that id.
    fn modify(&self, id: &str, change: &mut dyn FnMut(&mut T)) -> ClinicResult<T>;

    /// Like [`Repository::modify`], but appends `seed` first when no record has its id.
    fn modify_or_insert(&self, seed: T, change: &mut dyn FnMut(&mut T)) -> ClinicResult<T>;

    /// Replaces the whole collection.
    fn replace_all(&self, items: Vec<T>) -> ClinicResult<()>;
}

impl Record for Patient {
    const KIND: &'static str = "patient";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Doctor {
    const KIND: &'static str = "doctor";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Staff {
    const KIND: &'static str = "staff member";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for User {
    const KIND: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Appointment {
    const KIND: &'static str = "appointment";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for MedicalRecord {
    const KIND: &'static str = "medical record";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Vitals histories are keyed by the patient they belong to.
impl Record for VitalsHistory {
    const KIND: &'static str = "vitals history";

    fn id(&self) -> &str {
        &self.patient_id
    }
}
