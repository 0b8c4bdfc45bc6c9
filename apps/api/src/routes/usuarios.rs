//! # Usuario Routes
//!
//! `/api/usuarios` - account listing, detail, registration, login, partial
//! update and deletion. Every body leaving these handlers carries the
//! redacted [`tienda_core::UsuarioPublico`] projection.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::SharedState;
use tienda_core::{Credenciales, NuevoUsuario, UsuarioPublico, UsuarioUpdate};

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/login", post(login))
        .route("/:id", get(detalle).put(update).delete(delete))
}

/// GET /api/usuarios
async fn list(State(state): State<SharedState>) -> Result<Json<Vec<UsuarioPublico>>, ApiError> {
    let usuarios = state.db.usuarios().list().await?;
    Ok(Json(usuarios))
}

/// GET /api/usuarios/:id
async fn detalle(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
) -> Result<Json<UsuarioPublico>, ApiError> {
    let usuario = state.db.usuarios().get(id).await?;
    Ok(Json(usuario))
}

/// POST /api/usuarios
async fn create(
    State(state): State<SharedState>,
    Json(nuevo): Json<NuevoUsuario>,
) -> Result<(StatusCode, Json<UsuarioPublico>), ApiError> {
    let usuario = state.db.usuarios().create(nuevo).await?;
    Ok((StatusCode::CREATED, Json(usuario)))
}

/// POST /api/usuarios/login
async fn login(
    State(state): State<SharedState>,
    Json(credenciales): Json<Credenciales>,
) -> Result<Json<Value>, ApiError> {
    let usuario = state.db.usuarios().authenticate(credenciales).await?;
    let token = state.tokens.issue(&usuario)?;
    Ok(Json(json!({ "token": token, "user": usuario })))
}

/// PUT /api/usuarios/:id
async fn update(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
    Json(cambios): Json<UsuarioUpdate>,
) -> Result<Json<Value>, ApiError> {
    let usuario = state.db.usuarios().update(id, cambios).await?;
    Ok(Json(json!({ "actualizado": usuario })))
}

/// DELETE /api/usuarios/:id
async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, ApiError> {
    let eliminado = state.db.usuarios().delete(id).await?;
    Ok(Json(json!({ "eliminado": eliminado })))
}
