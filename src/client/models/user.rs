//! User account models

use serde::{Deserialize, Serialize};

use super::{Resource, UpdateMethod};
use crate::client::wire::int_from_any;

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "id_usuario", deserialize_with = "int_from_any")]
    pub id: i64,

    #[serde(rename = "nombre_usuario", default)]
    pub username: String,

    /// Role name, e.g. `admin`
    #[serde(rename = "rol", default)]
    pub role: String,

    #[serde(rename = "fecha_creacion", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Linked profile; null when the account has none
    #[serde(default)]
    pub profile: Option<String>,
}

/// Create payload for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub nombre_usuario: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rol: Option<String>,
}

/// Update payload; the password is only sent when changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub nombre_usuario: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rol: Option<String>,
}

impl Resource for User {
    type Id = i64;
    type Create = UserInput;
    type Update = UserUpdate;

    const PATH: &'static str = "/usuarios";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Put;
    const NOUN: &'static str = "user";
    const NOUN_PLURAL: &'static str = "users";

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::wire::decode_entity;
    use serde_json::json;

    #[test]
    fn test_user_profile_defaults_to_null() {
        let u: User = serde_json::from_value(json!({
            "id_usuario": 1, "nombre_usuario": "AdminUser", "rol": "admin"
        }))
        .unwrap();
        assert!(u.profile.is_none());
        let v = serde_json::to_value(&u).unwrap();
        assert!(v["profile"].is_null());
    }

    #[test]
    fn test_user_from_enveloped_mutation_response() {
        let u: User = decode_entity(
            json!({"data": {"id_usuario": 5, "nombre_usuario": "ana", "rol": "user"}}),
            "user",
        )
        .unwrap();
        assert_eq!(u.id, 5);
        assert_eq!(u.username, "ana");
    }

    #[test]
    fn test_update_omits_blank_password() {
        let update = UserUpdate {
            nombre_usuario: "ana".into(),
            password: None,
            rol: Some("user".into()),
        };
        let v = serde_json::to_value(&update).unwrap();
        assert!(v.get("password").is_none());
    }
}
