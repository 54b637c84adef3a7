use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::api::validation::{validate_film_id, validate_title};
use crate::models::Film;

/// GET /films
/// Every film record, ranked entries in ascending rank order.
pub async fn list_films(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Film>>, ApiError> {
    let films = state.store().list_films().await.map_err(ApiError::database)?;

    Ok(Json(films))
}

/// GET /films/{title}
/// Exact-match lookup; titles are not unique, multiple matches return an
/// arbitrary single record.
pub async fn get_film(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Json<Film>, ApiError> {
    let title = validate_title(&title)?;

    let film = state
        .store()
        .get_film_by_title(title)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(ApiError::film_not_found)?;

    Ok(Json(film))
}

/// POST /films/{id}/toggle
/// Flip the `seen` flag and return the updated record. Basic-auth protected;
/// the middleware rejects before this handler runs, so an unauthorized
/// attempt never reaches the store.
pub async fn toggle_seen(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Film>, ApiError> {
    let id = validate_film_id(id)?;

    let film = state
        .store()
        .toggle_seen(id)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(ApiError::film_not_found)?;

    tracing::info!(film_id = id, seen = film.seen, "Toggled seen status");

    Ok(Json(film))
}
