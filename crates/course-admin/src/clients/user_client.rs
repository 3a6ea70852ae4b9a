//! # User Client
//!
//! Account management plus the lookups the HTTP layer needs to identify a caller.

use async_trait::async_trait;
use resource_actor::{ActorClient, Clause, FrameworkError, ResourceClient, StoreFilter};
use tracing::{debug, info, instrument, warn};

use crate::auth::{Action, Caller, ResourceKind};
use crate::error::ServiceError;
use crate::model::{User, UserCreate, UserId, UserUpdate};
use crate::query::{ListQuery, UserQuery};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = ServiceError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Conflict(username) => ServiceError::Conflict(format!(
                "User with username {username} already exists"
            )),
            other => ServiceError::from_framework(other, "user"),
        }
    }
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, caller: &Caller, params: UserCreate) -> Result<User, ServiceError> {
        caller.authorize(Action::Create, ResourceKind::User)?;
        self.register(params).await
    }

    /// Stores a new account without a caller check. Only used to seed the
    /// first administrator at startup.
    #[instrument(skip(self))]
    pub async fn register(&self, params: UserCreate) -> Result<User, ServiceError> {
        debug!("Sending request");
        let user = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        caller: &Caller,
        query: &UserQuery,
    ) -> Result<Vec<User>, ServiceError> {
        caller.authorize(Action::List, ResourceKind::User)?;
        self.list(query.translate()).await
    }

    /// Users may always read their own record; other records need the list permission.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, caller: &Caller, id: UserId) -> Result<User, ServiceError> {
        if caller.id != id {
            caller.authorize(Action::List, ResourceKind::User)?;
        }
        self.get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", &id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        let filter = StoreFilter::new().with_clause(Clause::equals("username", username));
        Ok(self.list(filter).await?.into_iter().next())
    }

    /// Updates an account. Users may edit their own profile, but role and active
    /// status are for administrators only.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        caller: &Caller,
        id: UserId,
        update: UserUpdate,
    ) -> Result<User, ServiceError> {
        if caller.id != id {
            caller.authorize(Action::Edit, ResourceKind::User)?;
        }
        if update.is_privileged() && !caller.is_admin() {
            warn!(caller_id = %caller.id, "Role or status change rejected");
            return Err(ServiceError::Forbidden(
                "Only administrators can change role or status".to_string(),
            ));
        }
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, caller: &Caller, id: UserId) -> Result<UserId, ServiceError> {
        caller.authorize(Action::Delete, ResourceKind::User)?;
        self.delete(id).await
    }

    /// Resolves the `x-user-id` of a request into a [`Caller`].
    ///
    /// Unknown, malformed and inactive ids are all reported as unauthenticated.
    #[instrument(skip(self))]
    pub async fn authenticate(&self, raw_id: &str) -> Result<Caller, ServiceError> {
        let unauthenticated = || ServiceError::Unauthenticated("Unauthorized".to_string());

        let id: UserId = raw_id.trim().parse().map_err(|_| unauthenticated())?;
        match self.get(id).await? {
            Some(user) if user.is_active => Ok(Caller::from(&user)),
            Some(_) => {
                warn!(user_id = %id, "Inactive user rejected");
                Err(unauthenticated())
            }
            None => Err(unauthenticated()),
        }
    }
}
