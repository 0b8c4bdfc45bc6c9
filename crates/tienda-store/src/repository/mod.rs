//! # Repositories
//!
//! Business operations over the persisted collections, one repository per
//! entity:
//!
//! - [`producto::ProductoRepository`] - catalog CRUD and search
//! - [`usuario::UsuarioRepository`] - accounts, credential redaction, login
//! - [`venta::VentaRepository`] - sales, the only repository that touches
//!   more than one collection per operation
//!
//! Mutating operations follow the same shape everywhere: validate input,
//! take the locks of every collection involved (canonical order), read
//! fresh documents, apply the change in memory, persist whole documents.

pub mod producto;
pub mod usuario;
pub mod venta;
