//! Handlers for `/materias` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/materias` | Body: [`MateriaInput`]; returns 201 + the submitted body |
//! | `GET`    | `/materias` | All records, each with its `id` |
//! | `PUT`    | `/materias/:id` | Body: [`MateriaInput`]; returns 201 + the submitted body |
//! | `DELETE` | `/materias/:id` | Returns `{"message":"materia deleted"}` |
//!
//! Bodies are type-checked by the JSON extractor but their values are not
//! validated: empty names and negative counts are stored as given.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use rollcall_core::{
  materia::{Materia, MateriaInput},
  store::MateriaStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;

/// Confirmation body returned by `DELETE /materias/:id`.
#[derive(Debug, Serialize)]
pub struct Deleted {
  pub message: &'static str,
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /materias` — returns 201 and echoes the body, not the assigned id.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<MateriaInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MateriaStore,
{
  let created = store
    .create(body.clone())
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(id = %created.id, materia = %created.materia, "created materia");
  Ok((StatusCode::CREATED, Json(body)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /materias`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Materia>>, ApiError>
where
  S: MateriaStore,
{
  let materias = store.list().await.map_err(ApiError::from_store)?;
  Ok(Json(materias))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /materias/:id` — overwrites all four fields; 404 if `id` is unknown.
///
/// Answers 201 like create and echoes the body.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<MateriaInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MateriaStore,
{
  store
    .update(id, body.clone())
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(%id, "updated materia");
  Ok((StatusCode::CREATED, Json(body)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /materias/:id` — 404 if `id` is unknown or already deleted.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ApiError>
where
  S: MateriaStore,
{
  store.delete(id).await.map_err(ApiError::from_store)?;
  tracing::info!(%id, "deleted materia");
  Ok(Json(Deleted { message: "materia deleted" }))
}
