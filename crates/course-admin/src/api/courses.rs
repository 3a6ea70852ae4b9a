use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::error::parse_id;
use super::{AppState, Authenticated};
use crate::error::ServiceError;
use crate::model::{Course, CourseCreate, CourseId, CourseUpdate};
use crate::query::CourseQuery;

pub async fn list(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> Result<Json<Vec<Course>>, ServiceError> {
    let Query(query) = query?;
    Ok(Json(state.courses.find_all(&caller, &query).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    payload: Result<Json<CourseCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Course>), ServiceError> {
    let Json(params) = payload?;
    let course = state.courses.create(&caller, params).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn show(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<Course>, ServiceError> {
    let id: CourseId = parse_id(&id, "course")?;
    Ok(Json(state.courses.find_by_id(&caller, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(id): Path<String>,
    payload: Result<Json<CourseUpdate>, JsonRejection>,
) -> Result<Json<Course>, ServiceError> {
    let id: CourseId = parse_id(&id, "course")?;
    let Json(update) = payload?;
    Ok(Json(state.courses.update(&caller, id, update).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(id): Path<String>,
) -> Result<Json<CourseId>, ServiceError> {
    let id: CourseId = parse_id(&id, "course")?;
    Ok(Json(state.courses.delete_by_id(&caller, id).await?))
}
