use crate::{
    application::{
        list_projects::dto::ListProjectsRequest, submit_project::dto::SubmitProjectRequest,
    },
    domain::{project::entity::Project, shared::pagination::PaginatedResponse},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Lists projects with search, category, sort and time-range filters.
///
/// # Query Parameters
/// - `q`: case-insensitive text matched against title, description and category
/// - `sort`: `most-liked` (default), `most-viewed`, `newest`
/// - `time`: `all-time` (default), `this-month`, `this-week`, `today`
/// - `category`: category display name
/// - `limit`: page size (1-100, default 50)
/// - `offset`: pagination offset (default 0)
#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
    params: Result<Query<ListProjectsRequest>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Project>>, AppError> {
    let Query(params) = params?;
    let start_time = Instant::now();
    let page = state.list_projects().execute(params).await?;
    debug!(
        total = page.total,
        returned = page.items.len(),
        has_more = page.has_more(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Listing served"
    );
    Ok(Json(page))
}

pub async fn get_project(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Project>, AppError> {
    let Path(id) = id?;
    let project = state.list_projects().find_one(id).await?;
    Ok(Json(project))
}

pub async fn submit_project(
    State(state): State<AppState>,
    payload: Result<Json<SubmitProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let Json(request) = payload?;
    let project = state.submit_project().execute(request).await?;
    Ok((StatusCode::CREATED, Json(project)))
}
