//! Specialty, office and doctor/office assignment display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{or_empty, truncate_string};
use crate::client::models::{DoctorOffice, Office, Specialty};

/// Specialty display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SpecialtyDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&Specialty> for SpecialtyDisplay {
    fn from(specialty: &Specialty) -> Self {
        Self {
            id: specialty.id,
            name: specialty.name.clone(),
            description: truncate_string(&or_empty(specialty.description.as_deref()), 60),
        }
    }
}

/// Office display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct OfficeDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "LOCATION")]
    pub location: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<&Office> for OfficeDisplay {
    fn from(office: &Office) -> Self {
        Self {
            id: office.id,
            name: office.name.clone(),
            location: or_empty(Some(&office.location)),
            status: office.status.to_string(),
        }
    }
}

/// Doctor/office assignment display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DoctorOfficeDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "DOCTOR")]
    pub doctor_id: i64,

    #[tabled(rename = "OFFICE")]
    pub office_id: i64,
}

impl From<&DoctorOffice> for DoctorOfficeDisplay {
    fn from(assignment: &DoctorOffice) -> Self {
        Self {
            id: assignment.id,
            doctor_id: assignment.doctor_id,
            office_id: assignment.office_id,
        }
    }
}
