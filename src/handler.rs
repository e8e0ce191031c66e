use std::sync::Arc;

use axum::{
    Json, Router, middleware,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::info;

use crate::api::CreateBookmark;
use crate::auth;
use crate::config::Environment;
use crate::error::{AppError, StoreError};
use crate::store::BookmarkStore;
use crate::validate;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookmarkStore>,
    pub api_token: String,
    pub env: Environment,
}

impl AppState {
    fn unhandled(&self, err: StoreError) -> AppError {
        AppError::new(self.env, err)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route("/bookmarks/:id", get(get_bookmark).delete(delete_bookmark))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer))
        .with_state(state)
}

pub async fn hello() -> &'static str {
    "Hello, world!"
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Response, AppError> {
    let bookmarks = state.store.list().await.map_err(|e| state.unhandled(e))?;
    Ok((StatusCode::OK, Json(bookmarks)).into_response())
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookmark>,
) -> Result<Response, AppError> {
    let candidate = match validate::validate(payload) {
        Ok(candidate) => candidate,
        Err(e) => {
            tracing::error!("{}", e);
            return Ok((StatusCode::BAD_REQUEST, "Invalid data").into_response());
        }
    };

    let bookmark = state
        .store
        .insert(candidate)
        .await
        .map_err(|e| state.unhandled(e))?;

    info!("bookmark with id {} created", bookmark.id);
    let location = format!("/bookmarks/{}", bookmark.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(bookmark),
    )
        .into_response())
}

pub async fn get_bookmark(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    match state.store.get(id).await.map_err(|e| state.unhandled(e))? {
        Some(bookmark) => Ok((StatusCode::OK, Json(bookmark)).into_response()),
        None => {
            tracing::error!("bookmark with id {} not found", id);
            Ok((StatusCode::NOT_FOUND, "Bookmark Not Found").into_response())
        }
    }
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let removed = state.store.delete(id).await.map_err(|e| state.unhandled(e))?;

    if !removed {
        tracing::error!("bookmark with id {} not found", id);
        return Ok((StatusCode::NOT_FOUND, "Not found").into_response());
    }

    info!("bookmark with id {} deleted", id);
    Ok(StatusCode::NO_CONTENT.into_response())
}
