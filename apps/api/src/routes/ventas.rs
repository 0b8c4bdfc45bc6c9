//! # Venta Routes
//!
//! `/api/ventas` - paginated listing, detail, creation (the atomic
//! stock-decrementing operation), criteria search, partial update and
//! deletion with stock restoration.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::SharedState;
use tienda_core::{NuevaVenta, Venta, VentaCriteria, VentaUpdate, VentasPage};

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/buscar", post(buscar))
        .route("/:id", get(detalle).put(update).delete(delete))
}

/// Query parameters for GET /api/ventas.
#[derive(Debug, Default, Deserialize)]
struct Paginacion {
    offset: Option<i64>,
    limit: Option<i64>,
}

/// GET /api/ventas?offset&limit
async fn list(
    State(state): State<SharedState>,
    Query(paginacion): Query<Paginacion>,
) -> Result<Json<VentasPage>, ApiError> {
    let pagina = state
        .db
        .ventas()
        .list(paginacion.offset, paginacion.limit)
        .await?;
    Ok(Json(pagina))
}

/// GET /api/ventas/:id
async fn detalle(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
) -> Result<Json<Venta>, ApiError> {
    let venta = state.db.ventas().get(id).await?;
    Ok(Json(venta))
}

/// POST /api/ventas
async fn create(
    State(state): State<SharedState>,
    Json(pedido): Json<NuevaVenta>,
) -> Result<(StatusCode, Json<Venta>), ApiError> {
    let venta = state.db.ventas().create(pedido).await?;
    Ok((StatusCode::CREATED, Json(venta)))
}

/// POST /api/ventas/buscar
async fn buscar(
    State(state): State<SharedState>,
    Json(criteria): Json<VentaCriteria>,
) -> Result<Json<Value>, ApiError> {
    let resultados = state.db.ventas().search(criteria).await?;
    if resultados.is_empty() {
        return Err(ApiError::no_match(
            "No se encontraron ventas con los criterios ingresados",
        ));
    }
    Ok(Json(json!({ "total": resultados.len(), "data": resultados })))
}

/// PUT /api/ventas/:id
async fn update(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
    Json(cambios): Json<VentaUpdate>,
) -> Result<Json<Value>, ApiError> {
    let venta = state.db.ventas().update(id, cambios).await?;
    Ok(Json(json!({ "actualizado": venta })))
}

/// DELETE /api/ventas/:id
async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, ApiError> {
    let eliminada = state.db.ventas().delete(id).await?;
    Ok(Json(json!({ "eliminado": eliminada })))
}
