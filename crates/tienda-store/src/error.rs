//! # Storage Error Types
//!
//! Failures of the storage layer. Domain failures raised by the
//! repositories travel through here unchanged via [`StoreError::Core`], so
//! callers handle a single error type per operation.

use thiserror::Error;
use tienda_core::{CoreError, ValidationError};

use crate::store::Collection;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Domain error surfaced by a repository (not-found, conflict,
    /// validation, credentials).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backing document for a collection does not exist.
    #[error("colección {} no existe", .0.name())]
    Missing(Collection),

    /// The backing document exists but is not a valid JSON array of
    /// records, or a record could not be encoded.
    #[error("colección {} corrupta: {source}", .collection.name())]
    Corrupt {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the backing document failed.
    #[error("error de E/S en {}: {source}", .collection.name())]
    Io {
        collection: Collection,
        #[source]
        source: std::io::Error,
    },
}

/// ValidationError lifts straight into the domain arm; repositories can use
/// `?` on validation helpers without spelling the two-step conversion.
impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through_transparently() {
        let err: StoreError = CoreError::VentaNoEncontrada { id: 4001 }.into();
        assert_eq!(err.to_string(), "Venta no encontrada");
    }

    #[test]
    fn test_validation_error_lifts_into_core() {
        let err: StoreError = ValidationError::TextoVacio.into();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(ValidationError::TextoVacio))
        ));
    }

    #[test]
    fn test_missing_collection_message() {
        let err = StoreError::Missing(Collection::Ventas);
        assert_eq!(err.to_string(), "colección ventas no existe");
    }
}
