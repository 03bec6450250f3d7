//! Appointment models

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::client::wire::int_from_any;

/// Appointment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pendiente,
    Confirmada,
    Cancelada,
}

impl AppointmentStatus {
    pub const ALL: [&'static str; 3] = ["Pendiente", "Confirmada", "Cancelada"];
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppointmentStatus::Pendiente => "Pendiente",
            AppointmentStatus::Confirmada => "Confirmada",
            AppointmentStatus::Cancelada => "Cancelada",
        };
        write!(f, "{}", s)
    }
}

/// Medical appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "id_cita", deserialize_with = "int_from_any")]
    pub id: i64,

    #[serde(rename = "id_paciente", deserialize_with = "int_from_any")]
    pub patient_id: i64,

    #[serde(rename = "id_doctor", deserialize_with = "int_from_any")]
    pub doctor_id: i64,

    #[serde(rename = "id_consultorio", deserialize_with = "int_from_any")]
    pub office_id: i64,

    /// Date (YYYY-MM-DD)
    #[serde(rename = "fecha_cita", default)]
    pub date: String,

    /// Time (HH:mm)
    #[serde(rename = "hora_cita", default)]
    pub time: String,

    #[serde(rename = "estado")]
    pub status: AppointmentStatus,

    /// Reason for the visit
    #[serde(rename = "motivo", default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(rename = "fecha_creacion", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Create/update payload for an appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentInput {
    pub id_paciente: i64,
    pub id_doctor: i64,
    pub id_consultorio: i64,
    pub fecha_cita: String,
    pub hora_cita: String,
    pub estado: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
}

impl Resource for Appointment {
    type Id = i64;
    type Create = AppointmentInput;
    type Update = AppointmentInput;

    const PATH: &'static str = "/citas-medicas";
    const NOUN: &'static str = "appointment";
    const NOUN_PLURAL: &'static str = "appointments";

    fn id(&self) -> i64 {
        self.id
    }
}
