//! Appointments, scoped to the viewer's role.
//!
//! Doctors only ever see their own appointments: listing filters them out and direct lookups of
//! another doctor's appointment report not-found. Admin and staff see everything.

use std::sync::Arc;

use uuid::Uuid;

use super::directory::found;
use super::store::ClinicStore;
use super::vitals::VitalsSummary;
use crate::components::appointment::{Appointment, AppointmentStatus};
use crate::components::directory::{User, UserRole};
use crate::components::prescription::Prescription;
use crate::shaping::pagination::{paginate, Page, PageRequest};
use crate::shaping::schedule::parse_legacy_prescription;
use crate::shaping::search::{filter_items, AppointmentTab};
use crate::shaping::ParseOutcome;
use crate::{ClinicError, ClinicResult};

/// Whether `viewer` may see `appointment`.
pub fn visible_to(viewer: &User, appointment: &Appointment) -> bool {
    match viewer.role {
        UserRole::Admin | UserRole::Staff => true,
        UserRole::Doctor => viewer.doctor_id.as_deref() == Some(appointment.doctor.id.as_str()),
    }
}

/// Doctors may only write on their own behalf; admin and staff may act for any doctor.
///
/// # Errors
///
/// Returns `ClinicError::Forbidden` when a doctor names another doctor.
pub(crate) fn acting_for(viewer: &User, doctor_id: &str) -> ClinicResult<()> {
    match viewer.role {
        UserRole::Admin | UserRole::Staff => Ok(()),
        UserRole::Doctor if viewer.doctor_id.as_deref() == Some(doctor_id) => Ok(()),
        UserRole::Doctor => Err(ClinicError::Forbidden(format!(
            "doctors can only write for themselves, not {doctor_id}"
        ))),
    }
}

#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<ClinicStore>,
}

impl AppointmentService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Appointments visible to `viewer`, filtered by query and tab, then paged.
    pub fn list(
        &self,
        viewer: &User,
        query: &str,
        tab: AppointmentTab,
        page: PageRequest,
    ) -> ClinicResult<Page<Appointment>> {
        let scoped: Vec<Appointment> = self
            .store
            .appointments
            .list()?
            .into_iter()
            .filter(|a| visible_to(viewer, a))
            .collect();

        let matched: Vec<Appointment> = filter_items(&scoped, query, |a| tab.matches(a))
            .into_iter()
            .cloned()
            .collect();

        tracing::debug!(
            user_id = %viewer.id,
            visible = scoped.len(),
            matched = matched.len(),
            "appointments listed"
        );
        Ok(paginate(matched, page))
    }

    pub fn get(&self, viewer: &User, id: &str) -> ClinicResult<Appointment> {
        let appointment = self
            .store
            .appointments
            .get(id)?
            .filter(|a| visible_to(viewer, a));
        found(appointment, id)
    }

    /// Stores a new appointment. A blank id is replaced with a generated one.
    ///
    /// A doctor can only book appointments with themselves, so every appointment they create
    /// stays visible to them.
    pub fn create(&self, viewer: &User, mut appointment: Appointment) -> ClinicResult<Appointment> {
        if appointment.id.trim().is_empty() {
            appointment.id = format!("A-{}", Uuid::new_v4().simple());
        }
        if appointment.patient.id.trim().is_empty() || appointment.doctor.id.trim().is_empty() {
            return Err(ClinicError::InvalidInput(
                "appointment needs a patient and a doctor".into(),
            ));
        }
        acting_for(viewer, &appointment.doctor.id)?;

        self.store.appointments.insert(appointment.clone())?;
        tracing::info!(
            appointment_id = %appointment.id,
            doctor_id = %appointment.doctor.id,
            "appointment created"
        );
        Ok(appointment)
    }

    pub fn update_status(
        &self,
        viewer: &User,
        id: &str,
        status: AppointmentStatus,
    ) -> ClinicResult<Appointment> {
        let previous = self.get(viewer, id)?.status;
        let appointment = self
            .store
            .appointments
            .modify(id, &mut |appointment| appointment.status = status)?;
        tracing::info!(appointment_id = %id, from = %previous, to = %status, "appointment status changed");
        Ok(appointment)
    }

    /// Prescriptions from the previous visit, split out of their legacy flat strings.
    pub fn previous_prescriptions(
        &self,
        viewer: &User,
        id: &str,
    ) -> ClinicResult<Vec<ParseOutcome<Prescription>>> {
        let appointment = self.get(viewer, id)?;
        Ok(appointment
            .previous_visit
            .prescriptions
            .iter()
            .map(|raw| parse_legacy_prescription(raw))
            .collect())
    }

    /// Latest vitals recorded against the appointment.
    pub fn vitals_summary(&self, viewer: &User, id: &str) -> ClinicResult<Option<VitalsSummary>> {
        let appointment = self.get(viewer, id)?;
        Ok(VitalsSummary::latest(&appointment.vitals))
    }
}
