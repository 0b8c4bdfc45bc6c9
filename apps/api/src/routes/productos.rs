//! # Producto Routes
//!
//! `/api/productos` - catalog listing, detail, creation, search, partial
//! update and deletion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SharedState;
use tienda_core::{NuevoProducto, Producto, ProductoUpdate};

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/buscar", post(buscar))
        .route("/:id", get(detalle).put(update).delete(delete))
}

/// GET /api/productos
async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Producto>>, ApiError> {
    let productos = state.db.productos().list().await?;
    Ok(Json(productos))
}

/// GET /api/productos/:id
async fn detalle(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
) -> Result<Json<Producto>, ApiError> {
    let producto = state.db.productos().get(id).await?;
    Ok(Json(producto))
}

/// POST /api/productos
async fn create(
    State(state): State<SharedState>,
    Json(nuevo): Json<NuevoProducto>,
) -> Result<(StatusCode, Json<Producto>), ApiError> {
    let producto = state.db.productos().create(nuevo).await?;
    Ok((StatusCode::CREATED, Json(producto)))
}

/// Search payload for POST /api/productos/buscar.
#[derive(Debug, Deserialize)]
struct Busqueda {
    texto: Option<String>,
}

/// POST /api/productos/buscar
async fn buscar(
    State(state): State<SharedState>,
    Json(busqueda): Json<Busqueda>,
) -> Result<Json<Vec<Producto>>, ApiError> {
    let texto = busqueda.texto.unwrap_or_default();
    debug!(texto = %texto, "buscar productos");

    let resultados = state.db.productos().search(&texto).await?;
    if resultados.is_empty() {
        return Err(ApiError::no_match(
            "No se encontraron productos que coincidan con la búsqueda",
        ));
    }
    Ok(Json(resultados))
}

/// PUT /api/productos/:id
async fn update(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
    Json(cambios): Json<ProductoUpdate>,
) -> Result<Json<Producto>, ApiError> {
    let producto = state.db.productos().update(id, cambios).await?;
    Ok(Json(producto))
}

/// DELETE /api/productos/:id
async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, ApiError> {
    let eliminado = state.db.productos().delete(id).await?;
    Ok(Json(json!({ "eliminado": eliminado })))
}
