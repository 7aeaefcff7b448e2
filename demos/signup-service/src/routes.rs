use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use errform::prelude::*;

use crate::models::{CreateUserRequest, User};
use crate::AppState;

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.list().await)
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, Response> {
    let id = parse_id(&state, &id)?;
    match state.users.get_by_id(id).await {
        Some(user) => Ok(Json(user)),
        None => Err(state
            .errors
            .respond(&ApiError::NotFound(format!("No user with id {id}.")))),
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), Response> {
    let user = state
        .users
        .create(req)
        .await
        .map_err(|err| state.errors.handle_or_server_error(err))?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    let id = parse_id(&state, &id)?;
    let is_admin = headers
        .get("x-role")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|role| role == "admin");
    let deleted = state
        .users
        .delete(id, is_admin)
        .await
        .map_err(|err| state.errors.handle_or_server_error(err))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(state
            .errors
            .respond(&ApiError::NotFound(format!("No user with id {id}."))))
    }
}

fn parse_id(state: &AppState, raw: &str) -> Result<u64, Response> {
    raw.parse::<u64>()
        .map_err(|err| state.errors.handle_or_server_error(DomainError::from(err)))
}
