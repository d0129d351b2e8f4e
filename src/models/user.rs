use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Registered account (stored in `users`)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    /// bcrypt hash, never the plaintext password
    pub password: String,
    pub created_at: Option<BsonDateTime>,
}

impl User {
    pub fn new(email: &str, password_hash: &str) -> Self {
        Self {
            id: None,
            email: email.to_string(),
            password: password_hash.to_string(),
            created_at: Some(BsonDateTime::now()),
        }
    }

    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// Registration form (`user[email]`, `user[password]`)
///
/// Fields are optional; the handler validates them and answers with a flash.
#[derive(Debug, Deserialize, Default)]
pub struct RegisterForm {
    #[serde(rename = "user[email]", default)]
    pub email: Option<String>,
    #[serde(rename = "user[password]", default)]
    pub password: Option<String>,
}

/// Login form, same fields as registration
pub type LoginForm = RegisterForm;

impl RegisterForm {
    /// Returns trimmed email and raw password when both are present
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let email = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((email, password))
    }
}
