//! # Routes
//!
//! The HTTP surface, one module per collection:
//!
//! | Base path        | Module       |
//! |------------------|--------------|
//! | `/api/productos` | [`productos`] |
//! | `/api/usuarios`  | [`usuarios`]  |
//! | `/api/ventas`    | [`ventas`]    |
//!
//! plus `GET /api/health` for liveness probes.

pub mod productos;
pub mod usuarios;
pub mod ventas;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

/// Builds the full application router (separated from `main` for testing).
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .nest("/api/productos", productos::routes())
        .nest("/api/usuarios", usuarios::routes())
        .nest("/api/ventas", ventas::routes())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> StatusCode {
    StatusCode::OK
}
