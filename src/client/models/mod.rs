//! Clinic API data models
//!
//! Each entity lives in its own module together with its create/update
//! payloads. Wire names are the backend's; Rust fields use English names.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::pagination::SortOrder;

mod appointment;
mod auth;
mod doctor;
mod doctor_office;
mod medical_record;
mod medication;
mod office;
mod patient;
mod prescription;
mod specialty;
mod user;

pub use appointment::{Appointment, AppointmentInput, AppointmentStatus};
pub use auth::{Credentials, LoginResponse};
pub use doctor::{Doctor, DoctorInput};
pub use doctor_office::{DoctorOffice, DoctorOfficeInput};
pub use medical_record::{MedicalRecord, MedicalRecordInput, MedicalRecordUpdate};
pub use medication::{Medication, MedicationInput};
pub use office::{Office, OfficeInput, OfficeStatus};
pub use patient::{Patient, PatientInput};
pub use prescription::{Prescription, PrescriptionInput};
pub use specialty::{Specialty, SpecialtyInput};
pub use user::{User, UserInput, UserUpdate};

/// HTTP verb a collection uses for updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMethod {
    Patch,
    Put,
}

impl UpdateMethod {
    pub fn as_method(&self) -> reqwest::Method {
        match self {
            UpdateMethod::Patch => reqwest::Method::PATCH,
            UpdateMethod::Put => reqwest::Method::PUT,
        }
    }
}

/// A REST collection served at `PATH`.
///
/// One generic client covers every entity; the per-entity differences
/// (identifier type, update verb, search field, payload shapes) live here.
pub trait Resource: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Identifier type used in `PATH/:id`
    type Id: Display + FromStr + Clone + PartialEq + Debug + Send + Sync + 'static;

    /// Payload for `POST PATH`
    type Create: Serialize + DeserializeOwned + Debug + Send + Sync + 'static;

    /// Payload for `PATCH|PUT PATH/:id`
    type Update: Serialize + DeserializeOwned + Debug + Send + Sync + 'static;

    /// Collection path, e.g. `/pacientes`
    const PATH: &'static str;

    /// Verb used by `update`
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Patch;

    /// Singular noun for messages ("patient")
    const NOUN: &'static str;

    /// Plural noun for messages and titles ("patients")
    const NOUN_PLURAL: &'static str;

    /// Field the list search term applies to, if the backend wants one
    const SEARCH_FIELD: Option<&'static str> = None;

    /// Default list ordering
    const DEFAULT_SORT: Option<(&'static str, SortOrder)> = None;

    /// Identifier of this entity
    fn id(&self) -> Self::Id;
}

/// Parse a path identifier for `R`.
pub fn parse_id<R: Resource>(raw: &str) -> crate::error::Result<R::Id> {
    raw.trim().parse::<R::Id>().map_err(|_| {
        crate::error::Error::Other(format!("Invalid {} id: {}", R::NOUN, raw.trim()))
    })
}
