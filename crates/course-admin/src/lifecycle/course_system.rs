use std::sync::Arc;

use resource_actor::ActorClient;
use serde::Serialize;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, instrument};

use crate::auth::{Caller, Role};
use crate::clients::{ContentClient, CourseClient, UserClient};
use crate::error::ServiceError;
use crate::model::{User, UserCreate};
use crate::password::PasswordEncoder;

/// Counters shown on the dashboard. `number_of_users` is only filled in for admins.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub number_of_courses: usize,
    pub number_of_contents: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_users: Option<usize>,
}

impl DashboardStats {
    /// Counts every resource, hiding the user count from non-admins.
    pub async fn collect(
        caller: &Caller,
        users: &UserClient,
        courses: &CourseClient,
        contents: &ContentClient,
    ) -> Result<Self, ServiceError> {
        let number_of_users = if caller.is_admin() {
            Some(users.count().await?)
        } else {
            None
        };
        Ok(Self {
            number_of_courses: courses.count().await?,
            number_of_contents: contents.count().await?,
            number_of_users,
        })
    }
}

/// The running set of resource actors and the clients to reach them.
///
/// ```rust,ignore
/// let system = CourseSystem::new(32, Arc::new(Sha256Encoder));
/// let course = system.course_client.create(&admin, params).await?;
/// system.shutdown().await?;
/// ```
pub struct CourseSystem {
    pub user_client: UserClient,
    pub course_client: CourseClient,
    pub content_client: ContentClient,

    /// Actor task handles, awaited on shutdown.
    handles: Vec<JoinHandle<()>>,
}

impl CourseSystem {
    /// Spawns the User, Course and Content actors, each with a channel of `buffer_size`.
    pub fn new(buffer_size: usize, encoder: Arc<dyn PasswordEncoder>) -> Self {
        let (user_actor, user_client) = crate::user_actor::new(buffer_size);
        let (course_actor, course_client) = crate::course_actor::new(buffer_size);
        let (content_actor, content_client) = crate::content_actor::new(buffer_size);

        let user_handle = tokio::spawn(user_actor.run(encoder));
        let course_handle = tokio::spawn(course_actor.run(()));
        // Contents validate their course on create.
        let content_handle = tokio::spawn(content_actor.run(course_client.clone()));

        Self {
            user_client,
            course_client,
            content_client,
            handles: vec![user_handle, course_handle, content_handle],
        }
    }

    /// Creates the administrator account unless `username` is already taken.
    #[instrument(skip(self, password))]
    pub async fn seed_admin(&self, username: &str, password: &str) -> Result<User, ServiceError> {
        if let Some(existing) = self.user_client.find_by_username(username).await? {
            info!(user_id = %existing.id, "Administrator already present");
            return Ok(existing);
        }
        self.user_client
            .register(UserCreate {
                first_name: "admin".to_string(),
                last_name: "admin".to_string(),
                username: username.to_string(),
                password: password.to_string(),
                role: Some(Role::Admin),
            })
            .await
    }

    /// Dashboard counters for `caller`.
    #[instrument(skip(self))]
    pub async fn stats(&self, caller: &Caller) -> Result<DashboardStats, ServiceError> {
        DashboardStats::collect(
            caller,
            &self.user_client,
            &self.course_client,
            &self.content_client,
        )
        .await
    }

    /// Drops every client, then waits for the actors to drain and exit.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down system...");

        drop(self.user_client);
        drop(self.content_client);
        drop(self.course_client);

        join_all(self.handles).await?;

        info!("System shutdown complete.");
        Ok(())
    }
}

/// Awaits every handle, even after a failure, and returns the first error.
async fn join_all(handles: Vec<JoinHandle<()>>) -> Result<(), JoinError> {
    let mut first_error = None;
    for handle in handles {
        if let Err(e) = handle.await {
            error!("Actor task failed: {:?}", e);
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
