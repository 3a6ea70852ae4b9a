use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::error::parse_id;
use super::{AppState, Authenticated};
use crate::error::ServiceError;
use crate::model::{User, UserCreate, UserId, UserUpdate};
use crate::query::UserQuery;

pub async fn list(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<Vec<User>>, ServiceError> {
    let Query(query) = query?;
    Ok(Json(state.users.find_all(&caller, &query).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    payload: Result<Json<UserCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ServiceError> {
    let Json(params) = payload?;
    let user = state.users.create(&caller, params).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn show(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<User>, ServiceError> {
    let id: UserId = parse_id(&id, "user")?;
    Ok(Json(state.users.find_by_id(&caller, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(id): Path<String>,
    payload: Result<Json<UserUpdate>, JsonRejection>,
) -> Result<Json<User>, ServiceError> {
    let id: UserId = parse_id(&id, "user")?;
    let Json(update) = payload?;
    Ok(Json(state.users.update(&caller, id, update).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<UserId>, ServiceError> {
    let id: UserId = parse_id(&id, "user")?;
    Ok(Json(state.users.delete_by_id(&caller, id).await?))
}
