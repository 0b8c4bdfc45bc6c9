//! # Tienda API
//!
//! HTTP surface of the tienda backend. Handlers extract the request, call
//! one repository operation and map the outcome; everything else (locking,
//! validation, persistence) happens below, in `tienda-store`.
//!
//! Exposed as a library so the router can be exercised in-process by the
//! integration tests; the `api` binary is a thin `main` over [`routes::router`].

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
