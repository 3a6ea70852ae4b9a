//! [`ActorEntity`] implementation for [`User`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use tracing::debug;

use crate::error::{require_text, update_text, ServiceError};
use crate::model::{User, UserCreate, UserId, UserUpdate};
use crate::password::PasswordEncoder;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Context = Arc<dyn PasswordEncoder>;
    type Error = ServiceError;

    /// Validates the required fields and stores a hash in place of the password.
    fn from_create_params(
        id: UserId,
        params: UserCreate,
        encoder: &Self::Context,
    ) -> Result<Self, ServiceError> {
        require_text("firstName", &params.first_name)?;
        require_text("lastName", &params.last_name)?;
        require_text("username", &params.username)?;
        require_text("password", &params.password)?;

        Ok(Self {
            id,
            first_name: params.first_name,
            last_name: params.last_name,
            username: params.username,
            password_hash: encoder.encode(&params.password),
            role: params.role.unwrap_or_default(),
            is_active: true,
            date_created: Utc::now(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.username.clone())
    }

    /// Merges a partial update.
    ///
    /// A new password is accepted only when `old_password` matches the stored hash;
    /// the old value is consumed here and never stored.
    async fn on_update(
        &mut self,
        update: UserUpdate,
        encoder: &Self::Context,
    ) -> Result<(), ServiceError> {
        if let Some(password) = update.password {
            require_text("password", &password)?;
            let old_password = update.old_password.unwrap_or_default();
            if !encoder.is_match(&old_password, &self.password_hash) {
                debug!(user_id = %self.id, "Old password mismatch");
                return Err(ServiceError::BadRequest(
                    "Old password is incorrect".to_string(),
                ));
            }
            self.password_hash = encoder.encode(&password);
        }

        update_text("firstName", &mut self.first_name, update.first_name)?;
        update_text("lastName", &mut self.last_name, update.last_name)?;
        update_text("username", &mut self.username, update.username)?;
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::password::Sha256Encoder;
    use uuid::Uuid;

    fn encoder() -> Arc<dyn PasswordEncoder> {
        Arc::new(Sha256Encoder)
    }

    fn amy(encoder: &Arc<dyn PasswordEncoder>) -> User {
        let params = UserCreate {
            first_name: "Amy".into(),
            last_name: "Pond".into(),
            username: "amy".into(),
            password: "secret1".into(),
            role: None,
        };
        User::from_create_params(UserId::from(Uuid::new_v4()), params, encoder).unwrap()
    }

    #[test]
    fn create_hashes_and_applies_defaults() {
        let encoder = encoder();
        let user = amy(&encoder);
        assert_ne!(user.password_hash, "secret1");
        assert!(encoder.is_match("secret1", &user.password_hash));
        assert_eq!(user.role, Role::User);
        assert!(user.is_active);
    }

    #[test]
    fn create_rejects_blank_required_fields() {
        let params = UserCreate {
            first_name: "Amy".into(),
            last_name: "".into(),
            username: "amy".into(),
            password: "secret1".into(),
            role: None,
        };
        let err = User::from_create_params(UserId::from(Uuid::new_v4()), params, &encoder())
            .unwrap_err();
        assert_eq!(err, ServiceError::Validation("lastName is required".into()));
    }

    #[tokio::test]
    async fn password_change_requires_the_old_password() {
        let encoder = encoder();
        let mut user = amy(&encoder);
        let before = user.password_hash.clone();

        let wrong = UserUpdate {
            password: Some("new1".into()),
            old_password: Some("wrong".into()),
            ..Default::default()
        };
        let err = user.on_update(wrong, &encoder).await.unwrap_err();
        assert_eq!(err, ServiceError::BadRequest("Old password is incorrect".into()));
        assert_eq!(user.password_hash, before);

        let missing = UserUpdate {
            password: Some("new1".into()),
            ..Default::default()
        };
        assert!(user.on_update(missing, &encoder).await.is_err());

        let right = UserUpdate {
            password: Some("new1".into()),
            old_password: Some("secret1".into()),
            ..Default::default()
        };
        user.on_update(right, &encoder).await.unwrap();
        assert!(encoder.is_match("new1", &user.password_hash));
    }

    #[tokio::test]
    async fn profile_fields_merge_onto_the_row() {
        let encoder = encoder();
        let mut user = amy(&encoder);
        let update = UserUpdate {
            last_name: Some("Williams".into()),
            is_active: Some(false),
            ..Default::default()
        };
        user.on_update(update, &encoder).await.unwrap();
        assert_eq!(user.first_name, "Amy");
        assert_eq!(user.last_name, "Williams");
        assert!(!user.is_active);
    }
}
