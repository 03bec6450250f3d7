//! Authentication models

use serde::{Deserialize, Serialize};

/// Username/password pair sent to `/auth/login` and `/auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub nombre_usuario: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            nombre_usuario: username.into(),
            password: password.into(),
        }
    }
}

/// `{ "data": { "access_token": "..." } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub data: Option<LoginData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub access_token: Option<String>,
}

impl LoginResponse {
    /// The issued token, if the server sent a non-empty one
    pub fn into_token(self) -> Option<String> {
        self.data
            .and_then(|d| d.access_token)
            .filter(|t| !t.trim().is_empty())
    }
}
