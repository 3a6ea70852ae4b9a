//! REST transport: maps HTTP requests onto the resource service clients.
//!
//! ## Routes
//!
//! - `GET /health`
//! - `GET /stats` - dashboard counters
//! - `GET|POST /users`, `GET|PATCH|DELETE /users/:id`
//! - `GET|POST /courses`, `GET|PATCH|DELETE /courses/:id`
//! - `GET|POST /courses/:id/contents`, `GET|PATCH|DELETE /courses/:id/contents/:content_id`
//!
//! Every route except `/health` needs an `x-user-id` header naming an active user.
//! Query strings and JSON bodies use camelCase field names.
//!
//! ```ignore
//! let system = CourseSystem::new(32, Arc::new(Sha256Encoder));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! api::serve(listener, AppState::from(&system), shutdown_signal()).await?;
//! system.shutdown().await?;
//! ```

mod contents;
mod courses;
pub mod error;
mod stats;
mod users;

use std::future::Future;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use crate::auth::Caller;
use crate::clients::{ContentClient, CourseClient, UserClient};
use crate::error::ServiceError;
use crate::lifecycle::CourseSystem;

/// Header carrying the id of the calling user.
pub const USER_HEADER: &str = "x-user-id";

/// Handles shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub courses: CourseClient,
    pub contents: ContentClient,
}

impl From<&CourseSystem> for AppState {
    fn from(system: &CourseSystem) -> Self {
        Self {
            users: system.user_client.clone(),
            courses: system.course_client.clone(),
            contents: system.content_client.clone(),
        }
    }
}

/// Build the axum `Router` for the whole API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats::show))
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:id",
            get(users::show).patch(users::update).delete(users::remove),
        )
        .route("/courses", get(courses::list).post(courses::create))
        .route(
            "/courses/:id",
            get(courses::show).patch(courses::update).delete(courses::remove),
        )
        .route(
            "/courses/:id/contents",
            get(contents::list).post(contents::create),
        )
        .route(
            "/courses/:id/contents/:content_id",
            get(contents::show)
                .patch(contents::update)
                .delete(contents::remove),
        )
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// The authenticated caller of a request, resolved from [`USER_HEADER`].
pub struct Authenticated(pub Caller);

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw_id = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ServiceError::Unauthenticated("Unauthorized".to_string()))?;
        state.users.authenticate(raw_id).await.map(Authenticated)
    }
}
