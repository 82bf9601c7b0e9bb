use crate::{
    api::{
        error::ApiError,
        validate::{FormFields, validate_new_profile},
    },
    storage::{Profile, Store},
};
use axum::{
    Form, Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[utoipa::path(
    post,
    path= "/new-profile/",
    responses (
        (status = 201, description = "Profile created", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing field, invalid password or invalid zipcode", body = String),
        (status = 409, description = "Username or email already exists", body = String),
    ),
    tag= "profiles"
)]
/// Create a profile from `password`, `confirm_password`, `username`, `email` and `zipcode`.
#[instrument(skip(store, fields))]
pub async fn new_profile(
    store: Extension<Arc<dyn Store>>,
    Form(fields): Form<FormFields>,
) -> Result<impl IntoResponse, ApiError> {
    let user = validate_new_profile(&fields)?;

    debug!("username: {}, email: {}", user.username, user.email);

    let id = store.create_user(&user).await?;

    info!("profile {} created for {}", id, user.username);

    Ok((
        StatusCode::CREATED,
        format!("User, {}, added", user.username),
    ))
}

#[utoipa::path(
    get,
    path= "/profile/{id}/",
    params(("id" = i64, Path, description = "Profile id")),
    responses (
        (status = 200, description = "Profile found", body = Profile, content_type = "application/json"),
        (status = 404, description = "No profile with this id", body = String),
    ),
    tag= "profiles"
)]
/// Fetch the username, email and zipcode of a profile.
#[instrument(skip(store))]
pub async fn get_profile(
    Path(id): Path<String>,
    store: Extension<Arc<dyn Store>>,
) -> Result<Json<Profile>, ApiError> {
    // non-numeric ids cannot match a row
    let id = id.parse::<i64>().map_err(|_| ApiError::ProfileNotFound)?;

    store
        .get_user(id)
        .await?
        .map(Json)
        .ok_or(ApiError::ProfileNotFound)
}
