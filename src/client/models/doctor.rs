//! Doctor models

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::client::wire::int_from_any;

/// Doctor record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    /// Doctor ID
    #[serde(rename = "id_doctor", deserialize_with = "int_from_any")]
    pub id: i64,

    /// User account of the doctor
    #[serde(rename = "id_usuario", deserialize_with = "int_from_any")]
    pub user_id: i64,

    /// Specialty ID
    #[serde(rename = "id_especialidad", deserialize_with = "int_from_any")]
    pub specialty_id: i64,

    /// Shift start (HH:mm)
    #[serde(rename = "horario_inicio", default, skip_serializing_if = "Option::is_none")]
    pub shift_start: Option<String>,

    /// Shift end (HH:mm)
    #[serde(rename = "horario_fin", default, skip_serializing_if = "Option::is_none")]
    pub shift_end: Option<String>,

    /// Free-text list of working days
    #[serde(rename = "dias_disponibles", default, skip_serializing_if = "Option::is_none")]
    pub available_days: Option<String>,
}

/// Create/update payload for a doctor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorInput {
    pub id_usuario: i64,
    pub id_especialidad: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horario_inicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horario_fin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dias_disponibles: Option<String>,
}

impl Resource for Doctor {
    type Id = i64;
    type Create = DoctorInput;
    type Update = DoctorInput;

    const PATH: &'static str = "/doctores";
    const NOUN: &'static str = "doctor";
    const NOUN_PLURAL: &'static str = "doctors";
    const SEARCH_FIELD: Option<&'static str> = Some("dias_disponibles");

    fn id(&self) -> i64 {
        self.id
    }
}
