use std::fmt;

use chrono::{DateTime, Utc};
use resource_actor::{FieldValue, Fields};
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::auth::Role;

/// A registered account.
///
/// # Actor Framework
/// Managed by a [`ResourceActor`](resource_actor::ResourceActor); see
/// [`crate::user_actor`] for the creation and update rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub date_created: DateTime<Utc>,
}

impl Fields for User {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.into(),
            "firstName" => self.first_name.as_str().into(),
            "lastName" => self.last_name.as_str().into(),
            "username" => self.username.as_str().into(),
            "role" => self.role.into(),
            "isActive" => self.is_active.into(),
            "dateCreated" => self.date_created.into(),
            _ => return None,
        };
        Some(value)
    }
}

/// Payload for registering a user. `role` defaults to [`Role::User`].
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Partial update of a user. A new `password` must come with the current one in
/// `old_password`.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub old_password: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserUpdate {
    /// Whether the update touches fields only an administrator may change.
    pub fn is_privileged(&self) -> bool {
        self.role.is_some() || self.is_active.is_some()
    }
}

const REDACTED: &str = "<redacted>";

// Requests are logged at debug level, so credentials stay out of Debug output.
impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("role", &self.role)
            .finish()
    }
}

impl fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdate")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("old_password", &self.old_password.as_ref().map(|_| REDACTED))
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample() -> User {
        User {
            id: UserId::from(Uuid::new_v4()),
            first_name: "Amy".into(),
            last_name: "Pond".into(),
            username: "amy".into(),
            password_hash: "salt$digest".into(),
            role: Role::Editor,
            is_active: true,
            date_created: Utc::now(),
        }
    }

    #[test]
    fn hash_is_never_serialized() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["firstName"], "Amy");
        assert_eq!(json["role"], "editor");
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let update = UserUpdate {
            password: Some("new1".into()),
            old_password: Some("secret1".into()),
            ..Default::default()
        };
        let printed = format!("{update:?}");
        assert!(!printed.contains("new1"));
        assert!(!printed.contains("secret1"));
    }

    #[test]
    fn exposes_fields_by_wire_name() {
        let user = sample();
        assert_eq!(user.field("role"), Some(FieldValue::from("editor")));
        assert_eq!(user.field("isActive"), Some(FieldValue::Bool(true)));
        assert_eq!(user.field("passwordHash"), None);
    }
}
