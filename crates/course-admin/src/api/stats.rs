use axum::extract::State;
use axum::Json;

use super::{AppState, Authenticated};
use crate::error::ServiceError;
use crate::lifecycle::DashboardStats;

/// `GET /stats`
pub async fn show(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
) -> Result<Json<DashboardStats>, ServiceError> {
    let stats =
        DashboardStats::collect(&caller, &state.users, &state.courses, &state.contents).await?;
    Ok(Json(stats))
}
