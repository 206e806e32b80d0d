//! # Clinic Core
//!
//! Core business logic for the clinic records system.
//!
//! - `components`: the domain records (appointments, vitals, prescriptions, people)
//! - `shaping`: pure functions turning raw collections into view models
//! - `repositories`: the storage trait, the in-memory store and the services built on it
//!
//! **No API concerns**: HTTP servers and authentication middleware belong in `api-rest` and
//! `api-shared`.

pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod repositories;
pub mod shaping;

use std::sync::Arc;

pub use clinic_types::NonEmptyText;
pub use config::CoreConfig;
pub use error::{ClinicError, ClinicResult};

use repositories::appointments::AppointmentService;
use repositories::auth::AuthService;
use repositories::dashboard::DashboardService;
use repositories::directory::DirectoryService;
use repositories::medical_records::MedicalRecordService;
use repositories::store::ClinicStore;
use repositories::vitals::VitalsService;

/// Every domain service over one shared store.
#[derive(Clone)]
pub struct ClinicServices {
    pub directory: DirectoryService,
    pub appointments: AppointmentService,
    pub vitals: VitalsService,
    pub medical_records: MedicalRecordService,
    pub auth: AuthService,
    pub dashboard: DashboardService,
}

impl ClinicServices {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self {
            directory: DirectoryService::new(store.clone()),
            appointments: AppointmentService::new(store.clone()),
            vitals: VitalsService::new(store.clone()),
            medical_records: MedicalRecordService::new(store.clone()),
            auth: AuthService::new(store.clone()),
            dashboard: DashboardService::new(store),
        }
    }

    /// Loads the store described by `cfg` and builds the services over it.
    ///
    /// # Errors
    ///
    /// Propagates seed loading errors from [`ClinicStore::load`].
    pub fn load(cfg: &CoreConfig) -> ClinicResult<Self> {
        Ok(Self::new(ClinicStore::load(cfg)?))
    }
}
