use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::error::parse_id;
use super::{AppState, Authenticated};
use crate::error::ServiceError;
use crate::model::{Content, ContentCreate, ContentId, ContentUpdate, CourseId};
use crate::query::ContentQuery;

fn parse_ids(course_id: &str, id: &str) -> Result<(CourseId, ContentId), ServiceError> {
    Ok((parse_id(course_id, "course")?, parse_id(id, "content")?))
}

pub async fn list(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(course_id): Path<String>,
    query: Result<Query<ContentQuery>, QueryRejection>,
) -> Result<Json<Vec<Content>>, ServiceError> {
    let course_id: CourseId = parse_id(&course_id, "course")?;
    let Query(query) = query?;
    Ok(Json(
        state.contents.find_all(&caller, course_id, &query).await?,
    ))
}

pub async fn create(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(course_id): Path<String>,
    payload: Result<Json<ContentCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Content>), ServiceError> {
    let course_id: CourseId = parse_id(&course_id, "course")?;
    let Json(params) = payload?;
    let content = state.contents.create(&caller, course_id, params).await?;
    Ok((StatusCode::CREATED, Json(content)))
}

pub async fn show(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path((course_id, id)): Path<(String, String)>,
) -> Result<Json<Content>, ServiceError> {
    let (course_id, id) = parse_ids(&course_id, &id)?;
    Ok(Json(
        state.contents.find_by_id(&caller, course_id, id).await?,
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path((course_id, id)): Path<(String, String)>,
    payload: Result<Json<ContentUpdate>, JsonRejection>,
) -> Result<Json<Content>, ServiceError> {
    let (course_id, id) = parse_ids(&course_id, &id)?;
    let Json(update) = payload?;
    Ok(Json(
        state.contents.update(&caller, course_id, id, update).await?,
    ))
}

pub async fn remove(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path((course_id, id)): Path<(String, String)>,
) -> Result<Json<ContentId>, ServiceError> {
    let (course_id, id) = parse_ids(&course_id, &id)?;
    Ok(Json(
        state.contents.delete_by_id(&caller, course_id, id).await?,
    ))
}
