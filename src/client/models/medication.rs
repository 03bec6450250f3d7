//! Medication catalogue models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Resource;
use crate::client::pagination::SortOrder;
use crate::client::wire::{document_id, opt_f64_from_any, opt_int_from_any};

/// Catalogue medication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MedicationWire")]
pub struct Medication {
    pub id: String,

    #[serde(rename = "nombre", default)]
    pub name: String,

    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Units in stock
    #[serde(rename = "stock", skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Medication as the server sends it, possibly carrying both `_id` and `id`
#[derive(Deserialize)]
struct MedicationWire {
    #[serde(rename = "_id", default)]
    underscore_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(rename = "nombre", default)]
    name: String,
    #[serde(rename = "descripcion", default)]
    description: Option<String>,
    #[serde(rename = "precio", default, deserialize_with = "opt_f64_from_any")]
    price: Option<f64>,
    #[serde(rename = "stock", default, deserialize_with = "opt_int_from_any")]
    stock: Option<i64>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    updated_at: Option<String>,
}

impl TryFrom<MedicationWire> for Medication {
    type Error = String;

    fn try_from(wire: MedicationWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document_id(wire.underscore_id, wire.id)?,
            name: wire.name,
            description: wire.description,
            price: wire.price,
            stock: wire.stock,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        })
    }
}

/// Create/update payload for a medication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationInput {
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub precio: f64,
    pub stock: i64,
}

impl Resource for Medication {
    type Id = String;
    type Create = MedicationInput;
    type Update = MedicationInput;

    const PATH: &'static str = "/medicamentos";
    const NOUN: &'static str = "medication";
    const NOUN_PLURAL: &'static str = "medications";
    const SEARCH_FIELD: Option<&'static str> = Some("nombre");
    const DEFAULT_SORT: Option<(&'static str, SortOrder)> = Some(("nombre", SortOrder::Asc));

    fn id(&self) -> String {
        self.id.clone()
    }
}
