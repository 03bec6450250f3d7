//! Patient, doctor and user display models

use std::collections::HashMap;

use serde::Serialize;
use tabled::Tabled;

use super::common::{EMPTY, format_timestamp, id_label, or_empty};
use crate::client::models::{Doctor, Patient, User};

/// Patient display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PatientDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "USER")]
    pub user_id: i64,

    #[tabled(rename = "NATIONAL ID")]
    pub national_id: String,

    #[tabled(rename = "BIRTH DATE")]
    pub birth_date: String,

    #[tabled(rename = "PHONE")]
    pub phone: String,

    #[tabled(rename = "ADDRESS")]
    pub address: String,
}

impl From<&Patient> for PatientDisplay {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id,
            user_id: patient.user_id,
            national_id: patient.national_id.clone(),
            birth_date: format_timestamp(Some(&patient.birth_date)),
            phone: or_empty(Some(&patient.phone)),
            address: or_empty(Some(&patient.address)),
        }
    }
}

/// Names used to label a doctor's user and specialty references
#[derive(Debug, Clone, Default)]
pub struct DoctorNames {
    pub users: HashMap<i64, String>,
    pub specialties: HashMap<i64, String>,
}

/// Doctor display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DoctorDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    /// `#id - username` when resolved
    #[tabled(rename = "USER")]
    pub user: String,

    /// `#id - name` when resolved
    #[tabled(rename = "SPECIALTY")]
    pub specialty: String,

    /// Shift, e.g. "08:00-16:00"
    #[tabled(rename = "SHIFT")]
    pub shift: String,

    #[tabled(rename = "DAYS")]
    pub days: String,
}

impl DoctorDisplay {
    /// Build the row, labelling references with `names`.
    pub fn with_names(doctor: &Doctor, names: &DoctorNames) -> Self {
        let shift = match (&doctor.shift_start, &doctor.shift_end) {
            (Some(start), Some(end)) => format!("{}-{}", start, end),
            (Some(start), None) => format!("from {}", start),
            (None, Some(end)) => format!("until {}", end),
            (None, None) => EMPTY.to_string(),
        };

        Self {
            id: doctor.id,
            user: id_label(doctor.user_id, &names.users),
            specialty: id_label(doctor.specialty_id, &names.specialties),
            shift,
            days: or_empty(doctor.available_days.as_deref()),
        }
    }
}

impl From<&Doctor> for DoctorDisplay {
    fn from(doctor: &Doctor) -> Self {
        Self::with_names(doctor, &DoctorNames::default())
    }
}

/// User display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "USERNAME")]
    pub username: String,

    #[tabled(rename = "ROLE")]
    pub role: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<&User> for UserDisplay {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: or_empty(Some(&user.role)),
            created: format_timestamp(user.created_at.as_deref()),
        }
    }
}
