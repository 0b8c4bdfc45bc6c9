//! # tienda-store: Storage Layer
//!
//! Persistence for the tienda backend: three JSON collections on disk and
//! the repositories that implement the business operations over them.
//!
//! ## Data Flow
//! ```text
//! HTTP handler (apps/api)
//!      │
//!      ▼
//! Repository (this crate)          ProductoRepository / UsuarioRepository /
//!      │                           VentaRepository
//!      ▼
//! Database                         per-collection mutexes, repository access
//!      │
//!      ▼
//! JsonStore                        read / stage / commit of whole documents
//!      │
//!      ▼
//! <data_dir>/{productos,usuarios,ventas}.json
//! ```
//!
//! ## Consistency Model
//!
//! Every document is rewritten whole; there are no partial writes. Mutating
//! operations take the mutex of each collection they read-for-validation or
//! write, in canonical order (productos → usuarios → ventas), so two
//! concurrent sale creations can never both observe the same stale stock.
//! Multi-collection commits are staged to temp files first and only then
//! promoted, see [`store::JsonStore::commit`].

pub mod error;
pub mod repository;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{Collection, Database, JsonStore, StoreConfig};

pub use repository::producto::ProductoRepository;
pub use repository::usuario::UsuarioRepository;
pub use repository::venta::VentaRepository;
