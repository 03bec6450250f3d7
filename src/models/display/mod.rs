//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod care;
mod common;
mod facilities;
mod people;

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{
    Appointment, Doctor, DoctorOffice, MedicalRecord, Medication, Office, Patient, Prescription,
    Specialty, User,
};
use crate::view::FormResource;

pub use care::{AppointmentDisplay, MedicalRecordDisplay, MedicationDisplay, PrescriptionDisplay};
pub use common::{format_timestamp, or_empty};
pub use facilities::{DoctorOfficeDisplay, OfficeDisplay, SpecialtyDisplay};
pub use people::{DoctorDisplay, DoctorNames, PatientDisplay, UserDisplay};

/// An entity that can be shown as a table row
pub trait Listing: FormResource {
    type Row: Tabled + Serialize;

    fn row(&self) -> Self::Row;
}

macro_rules! listing {
    ($($entity:ty => $row:ty),* $(,)?) => {
        $(
            impl Listing for $entity {
                type Row = $row;

                fn row(&self) -> Self::Row {
                    <$row>::from(self)
                }
            }
        )*
    };
}

listing! {
    Patient => PatientDisplay,
    Doctor => DoctorDisplay,
    Specialty => SpecialtyDisplay,
    Office => OfficeDisplay,
    DoctorOffice => DoctorOfficeDisplay,
    Appointment => AppointmentDisplay,
    MedicalRecord => MedicalRecordDisplay,
    Prescription => PrescriptionDisplay,
    Medication => MedicationDisplay,
    User => UserDisplay,
}
