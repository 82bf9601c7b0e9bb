use crate::{
    api::{
        error::ApiError,
        validate::{FormFields, validate_new_project},
    },
    storage::Store,
};
use axum::{Form, extract::Extension, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use tracing::{info, instrument};

#[utoipa::path(
    post,
    path= "/project/",
    responses (
        (status = 201, description = "Project saved", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing project or username", body = String),
        (status = 404, description = "No user with this username", body = String),
    ),
    tag= "projects"
)]
/// Save a `project` description for an existing `username`.
///
/// The user lookup and the insert share one transaction, so the user cannot be
/// removed in between.
#[instrument(skip(store, fields))]
pub async fn add_project(
    store: Extension<Arc<dyn Store>>,
    Form(fields): Form<FormFields>,
) -> Result<impl IntoResponse, ApiError> {
    let project = validate_new_project(&fields)?;

    let id = store.add_project(&project).await?;

    info!("project {} saved to {}", id, project.username);

    Ok((
        StatusCode::CREATED,
        format!("Project saved to user, {}", project.username),
    ))
}
