//! Dashboard headline numbers.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use super::appointments::visible_to;
use super::store::ClinicStore;
use crate::components::appointment::AppointmentStatus;
use crate::components::directory::User;
use crate::ClinicResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct DashboardStats {
    pub total_patients: usize,
    pub total_doctors: usize,
    pub total_staff: usize,
    /// Appointments visible to the viewer.
    pub total_appointments: usize,
    /// Every status is present, zero when unused.
    pub appointments_by_status: BTreeMap<AppointmentStatus, usize>,
    pub today_appointments: usize,
    /// Open appointments dated after today.
    pub upcoming_appointments: usize,
}

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<ClinicStore>,
}

impl DashboardService {
    pub fn new(store: Arc<ClinicStore>) -> Self {
        Self { store }
    }

    /// Totals as seen by `viewer`. Appointment counts follow the same role scoping as the
    /// appointment list.
    pub fn stats(&self, viewer: &User, today: NaiveDate) -> ClinicResult<DashboardStats> {
        let appointments: Vec<_> = self
            .store
            .appointments
            .list()?
            .into_iter()
            .filter(|a| visible_to(viewer, a))
            .collect();

        let mut by_status: BTreeMap<AppointmentStatus, usize> =
            AppointmentStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        for appointment in &appointments {
            *by_status.entry(appointment.status).or_default() += 1;
        }

        Ok(DashboardStats {
            total_patients: self.store.patients.list()?.len(),
            total_doctors: self.store.doctors.list()?.len(),
            total_staff: self.store.staff.list()?.len(),
            total_appointments: appointments.len(),
            appointments_by_status: by_status,
            today_appointments: appointments.iter().filter(|a| a.date == today).count(),
            upcoming_appointments: appointments
                .iter()
                .filter(|a| a.date > today && a.status.is_open())
                .count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::directory::UserRole;

    fn admin() -> User {
        User {
            id: "U0".into(),
            name: "Admin".into(),
            email: "admin@clinic.test".into(),
            password: String::new(),
            role: UserRole::Admin,
            doctor_id: None,
        }
    }

    #[test]
    fn test_stats_add_up() {
        let store = Arc::new(ClinicStore::embedded().unwrap());
        let svc = DashboardService::new(store.clone());
        let appointments = store.appointments.list().unwrap();
        let today = appointments[0].date;

        let stats = svc.stats(&admin(), today).unwrap();
        assert_eq!(stats.total_appointments, appointments.len());
        assert_eq!(
            stats.appointments_by_status.values().sum::<usize>(),
            appointments.len()
        );
        assert_eq!(stats.appointments_by_status.len(), AppointmentStatus::ALL.len());
        assert!(stats.today_appointments >= 1);
        assert_eq!(stats.total_patients, store.patients.list().unwrap().len());
    }

    #[test]
    fn test_doctor_stats_are_scoped() {
        let store = Arc::new(ClinicStore::embedded().unwrap());
        let svc = DashboardService::new(store.clone());
        let doctor = User {
            role: UserRole::Doctor,
            doctor_id: Some("D001".into()),
            ..admin()
        };
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let mine = store
            .appointments
            .list()
            .unwrap()
            .into_iter()
            .filter(|a| a.doctor.id == "D001")
            .count();
        assert_eq!(svc.stats(&doctor, today).unwrap().total_appointments, mine);
    }
}
