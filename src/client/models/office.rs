//! Consulting office models

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::client::wire::int_from_any;

/// Office availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfficeStatus {
    Activo,
    Inactivo,
}

impl fmt::Display for OfficeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfficeStatus::Activo => write!(f, "activo"),
            OfficeStatus::Inactivo => write!(f, "inactivo"),
        }
    }
}

/// Consulting office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    #[serde(rename = "id_consultorio", deserialize_with = "int_from_any")]
    pub id: i64,

    #[serde(rename = "nombre", default)]
    pub name: String,

    #[serde(rename = "ubicacion", default)]
    pub location: String,

    #[serde(rename = "estado")]
    pub status: OfficeStatus,
}

/// Create/update payload for an office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeInput {
    pub nombre: String,
    pub ubicacion: String,
    pub estado: OfficeStatus,
}

impl Resource for Office {
    type Id = i64;
    type Create = OfficeInput;
    type Update = OfficeInput;

    const PATH: &'static str = "/consultorios";
    const UPDATE_METHOD: super::UpdateMethod = super::UpdateMethod::Put;
    const NOUN: &'static str = "office";
    const NOUN_PLURAL: &'static str = "offices";

    fn id(&self) -> i64 {
        self.id
    }
}
