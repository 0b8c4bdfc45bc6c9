//! # tienda-core: Pure Business Logic
//!
//! Domain types and business rules for the tienda backend, kept free of any
//! I/O so they can be exercised directly in unit tests.
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Producto, Usuario, Venta, VentaLinea) and the
//!   request payloads the managers accept
//! - [`money`] - 2-decimal rounding for prices, subtotals and totals
//! - [`fecha`] - Timestamp formatting and date-only parsing
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output - no clocks or randomness
//!    outside [`fecha::timestamp_ahora`]
//! 2. **No I/O**: storage and HTTP live in `tienda-store` and `apps/api`
//! 3. **Explicit errors**: every failure is a typed variant, never a panic

pub mod error;
pub mod fecha;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

/// First id handed out in the ventas collection.
///
/// Productos and usuarios number from 1; ventas start in their own range so
/// a sale id can never collide with a product id in hand-written documents.
pub const VENTA_ID_BASE: u32 = 4001;
