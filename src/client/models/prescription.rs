//! Prescription models

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::client::wire::int_from_any;

/// Prescription issued from a medical record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(rename = "id_receta", deserialize_with = "int_from_any")]
    pub id: i64,

    #[serde(rename = "id_historial", deserialize_with = "int_from_any")]
    pub record_id: i64,

    /// Issue date (YYYY-MM-DD)
    #[serde(rename = "fecha_emision", default, skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<String>,
}

/// Create/update payload for a prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionInput {
    pub id_historial: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_emision: Option<String>,
}

impl Resource for Prescription {
    type Id = i64;
    type Create = PrescriptionInput;
    type Update = PrescriptionInput;

    const PATH: &'static str = "/recetas";
    const NOUN: &'static str = "prescription";
    const NOUN_PLURAL: &'static str = "prescriptions";
    const SEARCH_FIELD: Option<&'static str> = Some("id_receta");

    fn id(&self) -> i64 {
        self.id
    }
}
