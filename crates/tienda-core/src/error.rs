//! # Error Types
//!
//! Domain error types for tienda-core.
//!
//! Errors flow outward through the layers: `ValidationError` → `CoreError`
//! → `StoreError` (tienda-store) → `ApiError` (apps/api), each layer adding
//! its own failure modes. Display strings double as the user-facing Spanish
//! messages the HTTP layer returns.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
///
/// Each variant maps to one HTTP outcome in the API layer: not-found
/// variants to 404, conflicts to 409, credential mismatch to 401 and
/// wrapped validation failures to 400.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// No product with the requested id.
    #[error("Producto no encontrado")]
    ProductoNoEncontrado { id: u32 },

    /// No user with the requested id.
    #[error("Usuario no encontrado")]
    UsuarioNoEncontrado { id: u32 },

    /// No sale with the requested id.
    #[error("Venta no encontrada")]
    VentaNoEncontrada { id: u32 },

    /// Requested quantity exceeds the product's current stock.
    ///
    /// Raised during sale creation, before any stock is decremented.
    #[error("Stock insuficiente para {nombre}")]
    StockInsuficiente {
        nombre: String,
        disponible: i64,
        solicitado: i64,
    },

    /// Email already present in the usuarios collection.
    ///
    /// Only enforced at creation time; updates may move a user onto an
    /// existing email.
    #[error("Email ya registrado")]
    EmailRegistrado { email: String },

    /// Product is referenced by at least one sale line item.
    #[error("No se puede eliminar el producto porque está presente en ventas. Elimine o modifique esas ventas primero.")]
    ProductoEnVentas { id: u32 },

    /// User is referenced by at least one sale.
    #[error("No se puede eliminar el usuario porque tiene ventas asociadas. Elimine o reasigne esas ventas primero.")]
    UsuarioConVentas { id: u32 },

    /// Email/credential pair did not match any record exactly.
    #[error("Credenciales inválidas")]
    CredencialesInvalidas,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation failures.
///
/// Raised before any business logic runs; the record under validation is
/// never touched when one of these is returned.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// One or more required fields are absent or empty.
    ///
    /// `fields` is the comma-joined field list shown to the caller, e.g.
    /// `"nombre, marca, categoria y precio"`.
    #[error("{fields} son requeridos")]
    Requeridos { fields: &'static str },

    /// Price is negative or not a finite number.
    #[error("precio inválido")]
    PrecioInvalido,

    /// Stock is negative.
    #[error("stock inválido")]
    StockInvalido,

    /// Search text is empty.
    #[error("Debe ingresar texto a buscar")]
    TextoVacio,

    /// Sale line quantity is zero or negative.
    #[error("Cantidad inválida para producto {id}")]
    CantidadInvalida { id: u32 },

    /// Sale line references a product id that is not in the catalog.
    #[error("Producto inexistente: {id}")]
    ProductoInexistente { id: u32 },

    /// Sale references a user id that is not in the usuarios collection.
    #[error("id_usuario inválido")]
    IdUsuarioInvalido,

    /// Search bound could not be parsed as a `DD-MM-YYYY` date.
    #[error("fecha inválida: {valor}")]
    FechaInvalida { valor: String },
}

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::StockInsuficiente {
            nombre: "Alimento Gato 3kg".to_string(),
            disponible: 3,
            solicitado: 5,
        };
        assert_eq!(err.to_string(), "Stock insuficiente para Alimento Gato 3kg");

        let err = CoreError::VentaNoEncontrada { id: 4001 };
        assert_eq!(err.to_string(), "Venta no encontrada");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Requeridos {
            fields: "nombre, marca, categoria y precio",
        };
        assert_eq!(
            err.to_string(),
            "nombre, marca, categoria y precio son requeridos"
        );

        let err = ValidationError::ProductoInexistente { id: 7 };
        assert_eq!(err.to_string(), "Producto inexistente: 7");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::TextoVacio;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
