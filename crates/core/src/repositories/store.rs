//! The clinic's record collections and seed-data loading.
//!
//! Seed data is YAML with one list per collection. An embedded data set ships with the crate;
//! `CLINIC_SEED_FILE` replaces it wholesale.

use std::sync::Arc;

use serde::Deserialize;

use super::memory::InMemoryRepository;
use super::Repository;
use crate::components::appointment::Appointment;
use crate::components::directory::{Doctor, Patient, Staff, User};
use crate::components::prescription::MedicalRecord;
use crate::components::vitals::VitalsHistory;
use crate::config::CoreConfig;
use crate::constants::EMBEDDED_SEED_YAML;
use crate::{ClinicError, ClinicResult};

/// Raw seed file contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SeedData {
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub staff: Vec<Staff>,
    pub users: Vec<User>,
    pub appointments: Vec<Appointment>,
    pub medical_records: Vec<MedicalRecord>,
    pub vitals: Vec<VitalsHistory>,
}

/// Parse seed YAML, reporting the path of the first offending field.
///
/// # Errors
///
/// Returns `ClinicError::SeedParse` if the YAML does not match [`SeedData`].
pub fn parse_seed_yaml(yaml: &str) -> ClinicResult<SeedData> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml);
    serde_path_to_error::deserialize::<_, SeedData>(deserializer).map_err(|err| {
        let path = err.path().to_string();
        let path = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        ClinicError::SeedParse {
            path,
            source: err.into_inner(),
        }
    })
}

/// One repository per collection.
pub struct ClinicStore {
    pub patients: Box<dyn Repository<Patient>>,
    pub doctors: Box<dyn Repository<Doctor>>,
    pub staff: Box<dyn Repository<Staff>>,
    pub users: Box<dyn Repository<User>>,
    pub appointments: Box<dyn Repository<Appointment>>,
    pub medical_records: Box<dyn Repository<MedicalRecord>>,
    pub vitals: Box<dyn Repository<VitalsHistory>>,
}

impl ClinicStore {
    /// An empty in-memory store.
    pub fn empty() -> Self {
        Self {
            patients: Box::new(InMemoryRepository::new()),
            doctors: Box::new(InMemoryRepository::new()),
            staff: Box::new(InMemoryRepository::new()),
            users: Box::new(InMemoryRepository::new()),
            appointments: Box::new(InMemoryRepository::new()),
            medical_records: Box::new(InMemoryRepository::new()),
            vitals: Box::new(InMemoryRepository::new()),
        }
    }

    /// # Errors
    ///
    /// Returns `ClinicError::DuplicateId` if any collection repeats an id.
    pub fn from_seed(seed: SeedData) -> ClinicResult<Self> {
        Ok(Self {
            patients: Box::new(InMemoryRepository::from_items(seed.patients)?),
            doctors: Box::new(InMemoryRepository::from_items(seed.doctors)?),
            staff: Box::new(InMemoryRepository::from_items(seed.staff)?),
            users: Box::new(InMemoryRepository::from_items(seed.users)?),
            appointments: Box::new(InMemoryRepository::from_items(seed.appointments)?),
            medical_records: Box::new(InMemoryRepository::from_items(seed.medical_records)?),
            vitals: Box::new(InMemoryRepository::from_items(seed.vitals)?),
        })
    }

    /// The data set compiled into the crate.
    pub fn embedded() -> ClinicResult<Self> {
        Self::from_seed(parse_seed_yaml(EMBEDDED_SEED_YAML)?)
    }

    /// Builds the store for `cfg`: the seed file override if set, otherwise the embedded data.
    ///
    /// # Errors
    ///
    /// - `ClinicError::SeedRead` if the override cannot be read.
    /// - `ClinicError::SeedParse` if the YAML is malformed.
    /// - `ClinicError::DuplicateId` if a collection repeats an id.
    pub fn load(cfg: &CoreConfig) -> ClinicResult<Arc<Self>> {
        let seed = match cfg.seed_file() {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading seed data");
                let yaml = std::fs::read_to_string(path).map_err(ClinicError::SeedRead)?;
                parse_seed_yaml(&yaml)?
            }
            None => {
                tracing::info!("loading embedded seed data");
                parse_seed_yaml(EMBEDDED_SEED_YAML)?
            }
        };

        tracing::debug!(
            patients = seed.patients.len(),
            doctors = seed.doctors.len(),
            appointments = seed.appointments.len(),
            "seed data parsed"
        );

        Ok(Arc::new(Self::from_seed(seed)?))
    }
}
