//! Medical specialty models

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::client::wire::int_from_any;

/// Medical specialty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialty {
    #[serde(rename = "id_especialidad", deserialize_with = "int_from_any")]
    pub id: i64,

    #[serde(rename = "nombre", default)]
    pub name: String,

    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Create/update payload for a specialty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyInput {
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

impl Resource for Specialty {
    type Id = i64;
    type Create = SpecialtyInput;
    type Update = SpecialtyInput;

    const PATH: &'static str = "/especialidades";
    const NOUN: &'static str = "specialty";
    const NOUN_PLURAL: &'static str = "specialties";

    fn id(&self) -> i64 {
        self.id
    }
}
