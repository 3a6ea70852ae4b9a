//! Domain rows and their request payloads.
//!
//! Rows serialize in camelCase. Fields that must never leave the server (the
//! password hash, a content's owning course) are skipped.

mod content;
mod course;
mod user;

pub use content::*;
pub use course::*;
pub use user::*;

use std::fmt;
use std::str::FromStr;

use resource_actor::FieldValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Defines a UUID-backed id newtype usable as an [`ActorEntity::Id`](resource_actor::ActorEntity).
macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<$name> for FieldValue {
            fn from(id: $name) -> Self {
                FieldValue::Text(id.to_string())
            }
        }
    };
}

resource_id!(
    /// Server-assigned id of a [`User`].
    UserId
);
resource_id!(
    /// Server-assigned id of a [`Course`].
    CourseId
);
resource_id!(
    /// Server-assigned id of a [`Content`].
    ContentId
);
