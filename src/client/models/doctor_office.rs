//! Doctor/office assignment models

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::client::wire::int_from_any;

/// Assignment of a doctor to an office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorOffice {
    #[serde(deserialize_with = "int_from_any")]
    pub id: i64,

    #[serde(rename = "id_doctor", deserialize_with = "int_from_any")]
    pub doctor_id: i64,

    #[serde(rename = "id_consultorio", deserialize_with = "int_from_any")]
    pub office_id: i64,
}

/// Create/update payload for an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorOfficeInput {
    pub id_doctor: i64,
    pub id_consultorio: i64,
}

impl Resource for DoctorOffice {
    type Id = i64;
    type Create = DoctorOfficeInput;
    type Update = DoctorOfficeInput;

    const PATH: &'static str = "/doctores-consultorios";
    const NOUN: &'static str = "doctor/office assignment";
    const NOUN_PLURAL: &'static str = "doctor/office assignments";
    const SEARCH_FIELD: Option<&'static str> = Some("id_doctor");

    fn id(&self) -> i64 {
        self.id
    }
}
