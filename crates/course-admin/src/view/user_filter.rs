//! Debounced filtering of the users table.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use super::{Debouncer, ListSession, ResourceApi};
use crate::auth::Role;
use crate::model::{User, UserId};
use crate::query::UserQuery;

/// Text filters take effect from this many characters.
pub const MIN_FILTER_CHARS: usize = 3;

/// Raw contents of the users table filter inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilterInput {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub role: Option<Role>,
}

impl UserFilterInput {
    /// Text shorter than [`MIN_FILTER_CHARS`] is ignored; the role always applies.
    pub fn to_query(&self) -> UserQuery {
        UserQuery {
            first_name: effective(&self.first_name),
            last_name: effective(&self.last_name),
            username: effective(&self.username),
            role: self.role,
            ..Default::default()
        }
    }
}

fn effective(text: &str) -> Option<String> {
    (text.chars().count() >= MIN_FILTER_CHARS).then(|| text.to_string())
}

pub fn hide_own_row(users: Vec<User>, own_id: UserId) -> Vec<User> {
    users.into_iter().filter(|user| user.id != own_id).collect()
}

/// Refetches the users list a quiet period after the last filter change.
pub struct UserSearch<A: ResourceApi<Query = UserQuery>> {
    session: Arc<ListSession<A>>,
    debouncer: Debouncer,
}

impl<A: ResourceApi<Query = UserQuery>> UserSearch<A> {
    pub fn new(session: Arc<ListSession<A>>) -> Self {
        Self {
            session,
            debouncer: Debouncer::default(),
        }
    }

    pub fn with_delay(session: Arc<ListSession<A>>, delay: Duration) -> Self {
        Self {
            session,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Records a filter change. Only the latest change within the quiet period fetches.
    pub fn input(&mut self, filter: &UserFilterInput) {
        let session = Arc::clone(&self.session);
        let query = filter.to_query();
        self.debouncer.schedule(async move {
            if let Err(e) = session.refresh(query).await {
                warn!(error = %e, "User search failed");
            }
        });
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_ignored_but_role_applies() {
        let input = UserFilterInput {
            first_name: "am".into(),
            last_name: "Pond".into(),
            username: String::new(),
            role: Some(Role::Editor),
        };
        let query = input.to_query();
        assert_eq!(query.first_name, None);
        assert_eq!(query.last_name.as_deref(), Some("Pond"));
        assert_eq!(query.username, None);
        assert_eq!(query.role, Some(Role::Editor));
    }

    #[test]
    fn length_counts_characters() {
        let input = UserFilterInput {
            first_name: "Óli".into(),
            ..Default::default()
        };
        assert_eq!(input.to_query().first_name.as_deref(), Some("Óli"));
    }
}
