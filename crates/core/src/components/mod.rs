//! Clinic record types.
//!
//! Plain serde records with no behaviour beyond boundary validation. The shaping functions in
//! [`crate::shaping`] and the services in [`crate::repositories`] operate on these.

pub mod appointment;
pub mod directory;
pub mod prescription;
pub mod vitals;
