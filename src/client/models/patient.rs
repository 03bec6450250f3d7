//! Patient models

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::client::wire::int_from_any;

/// Patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Patient ID
    #[serde(rename = "id_paciente", deserialize_with = "int_from_any")]
    pub id: i64,

    /// Owning user account
    #[serde(rename = "id_usuario", deserialize_with = "int_from_any")]
    pub user_id: i64,

    /// National identity number (10 digits)
    #[serde(rename = "cedula", default)]
    pub national_id: String,

    /// Date of birth (YYYY-MM-DD)
    #[serde(rename = "fecha_nacimiento", default)]
    pub birth_date: String,

    #[serde(rename = "telefono", default)]
    pub phone: String,

    #[serde(rename = "direccion", default)]
    pub address: String,
}

/// Create/update payload for a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    pub id_usuario: i64,
    pub cedula: String,
    pub fecha_nacimiento: String,
    pub telefono: String,
    pub direccion: String,
}

impl Resource for Patient {
    type Id = i64;
    type Create = PatientInput;
    type Update = PatientInput;

    const PATH: &'static str = "/pacientes";
    const NOUN: &'static str = "patient";
    const NOUN_PLURAL: &'static str = "patients";

    fn id(&self) -> i64 {
        self.id
    }
}
