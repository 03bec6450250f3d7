//! Medical record models
//!
//! Records are stored in a document database: the identifier is a string
//! that may arrive as `_id`, and `id_cita` may arrive as a string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Resource, UpdateMethod};
use crate::client::pagination::SortOrder;
use crate::client::wire::{document_id, int_from_any};

/// Clinical history entry attached to an appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MedicalRecordWire")]
pub struct MedicalRecord {
    pub id: String,

    /// Appointment this record belongs to
    #[serde(rename = "id_cita")]
    pub appointment_id: i64,

    #[serde(rename = "diagnostico", default)]
    pub diagnosis: String,

    #[serde(rename = "tratamiento", default)]
    pub treatment: String,

    #[serde(rename = "observaciones", default)]
    pub notes: String,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Record as the server sends it, possibly carrying both `_id` and `id`
#[derive(Deserialize)]
struct MedicalRecordWire {
    #[serde(rename = "_id", default)]
    underscore_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(rename = "id_cita", deserialize_with = "int_from_any")]
    appointment_id: i64,
    #[serde(rename = "diagnostico", default)]
    diagnosis: String,
    #[serde(rename = "tratamiento", default)]
    treatment: String,
    #[serde(rename = "observaciones", default)]
    notes: String,
    #[serde(rename = "createdAt", default)]
    created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    updated_at: Option<String>,
}

impl TryFrom<MedicalRecordWire> for MedicalRecord {
    type Error = String;

    fn try_from(wire: MedicalRecordWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document_id(wire.underscore_id, wire.id)?,
            appointment_id: wire.appointment_id,
            diagnosis: wire.diagnosis,
            treatment: wire.treatment,
            notes: wire.notes,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        })
    }
}

/// Create payload for a medical record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecordInput {
    pub id_cita: i64,
    pub diagnostico: String,
    pub tratamiento: String,
    #[serde(default)]
    pub observaciones: String,
}

/// Update payload; the appointment link is fixed once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecordUpdate {
    pub diagnostico: String,
    pub tratamiento: String,
    #[serde(default)]
    pub observaciones: String,
}

impl Resource for MedicalRecord {
    type Id = String;
    type Create = MedicalRecordInput;
    type Update = MedicalRecordUpdate;

    const PATH: &'static str = "/historial-clinico";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Put;
    const NOUN: &'static str = "medical record";
    const NOUN_PLURAL: &'static str = "medical records";
    const SEARCH_FIELD: Option<&'static str> = Some("diagnostico");
    const DEFAULT_SORT: Option<(&'static str, SortOrder)> = Some(("createdAt", SortOrder::Desc));

    fn id(&self) -> String {
        self.id.clone()
    }
}
