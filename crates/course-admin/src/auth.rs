//! # Authorization Gate
//!
//! A pure function of `(role, action, resource)` deciding what a caller may do. The
//! same table drives which controls a UI renders ([`visible_actions`]) and the
//! authoritative check every service client runs before touching the store
//! ([`Caller::authorize`]).

use std::fmt;

use resource_actor::FieldValue;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::model::{User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Editor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Role> for FieldValue {
    fn from(role: Role) -> Self {
        FieldValue::Text(role.as_str().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    List,
    Create,
    Edit,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::List => "list",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    User,
    Course,
    Content,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::User => "users",
            ResourceKind::Course => "courses",
            ResourceKind::Content => "contents",
        })
    }
}

/// Whether `role` may perform `action` on `kind`.
///
/// | role   | users | create/edit course | delete course | create/edit content | delete content |
/// |--------|-------|--------------------|---------------|---------------------|----------------|
/// | user   | no    | no                 | no            | no                  | no             |
/// | editor | no    | yes                | no            | yes                 | no             |
/// | admin  | yes   | yes                | yes           | yes                 | yes            |
///
/// Every role may list courses and contents.
pub fn is_allowed(role: Role, action: Action, kind: ResourceKind) -> bool {
    match (role, kind, action) {
        (Role::Admin, _, _) => true,
        (_, ResourceKind::Course | ResourceKind::Content, Action::List) => true,
        (
            Role::Editor,
            ResourceKind::Course | ResourceKind::Content,
            Action::Create | Action::Edit,
        ) => true,
        _ => false,
    }
}

/// The mutating controls a UI should render for `role` on a `kind` table.
pub fn visible_actions(role: Role, kind: ResourceKind) -> Vec<Action> {
    [Action::Create, Action::Edit, Action::Delete]
        .into_iter()
        .filter(|action| is_allowed(role, *action, kind))
        .collect()
}

/// The authenticated principal on whose behalf a service call runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: UserId,
    pub role: Role,
}

impl Caller {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn authorize(&self, action: Action, kind: ResourceKind) -> Result<(), ServiceError> {
        if is_allowed(self.role, action, kind) {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(format!(
                "Role {} is not allowed to {action} {kind}",
                self.role
            )))
        }
    }
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}
