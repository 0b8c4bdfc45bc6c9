//! # Validation Rules
//!
//! Input validation for the three managers. Every check runs before any
//! state is touched, so a failed validation always leaves the collections
//! exactly as they were.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Filters an optional text field down to a usable value.
///
/// Required-field checks treat the empty (or whitespace-only) string the
/// same as an absent field, so both map to `None` here and callers can
/// pattern-match required fields in one place.
pub fn texto_requerido(valor: Option<String>) -> Option<String> {
    valor.filter(|v| !v.trim().is_empty())
}

/// Validates a price: must be a finite, non-negative number.
pub fn validar_precio(precio: f64) -> ValidationResult<()> {
    if !precio.is_finite() || precio < 0.0 {
        return Err(ValidationError::PrecioInvalido);
    }
    Ok(())
}

/// Validates a stock level: must be a non-negative integer.
pub fn validar_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::StockInvalido);
    }
    Ok(())
}

/// Validates a requested sale quantity: must be strictly positive.
pub fn validar_cantidad(id: u32, cantidad: i64) -> ValidationResult<()> {
    if cantidad <= 0 {
        return Err(ValidationError::CantidadInvalida { id });
    }
    Ok(())
}

/// Validates catalog search text: must be non-empty.
pub fn validar_texto_busqueda(texto: &str) -> ValidationResult<()> {
    if texto.is_empty() {
        return Err(ValidationError::TextoVacio);
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texto_requerido() {
        assert_eq!(
            texto_requerido(Some("collar".into())),
            Some("collar".to_string())
        );
        assert_eq!(texto_requerido(Some("".into())), None);
        assert_eq!(texto_requerido(Some("   ".into())), None);
        assert_eq!(texto_requerido(None), None);
    }

    #[test]
    fn test_validar_precio() {
        assert!(validar_precio(0.0).is_ok());
        assert!(validar_precio(1999.99).is_ok());
        assert_eq!(validar_precio(-0.01), Err(ValidationError::PrecioInvalido));
        assert_eq!(
            validar_precio(f64::NAN),
            Err(ValidationError::PrecioInvalido)
        );
    }

    #[test]
    fn test_validar_stock() {
        assert!(validar_stock(0).is_ok());
        assert!(validar_stock(150).is_ok());
        assert_eq!(validar_stock(-1), Err(ValidationError::StockInvalido));
    }

    #[test]
    fn test_validar_cantidad() {
        assert!(validar_cantidad(3, 1).is_ok());
        assert_eq!(
            validar_cantidad(3, 0),
            Err(ValidationError::CantidadInvalida { id: 3 })
        );
        assert_eq!(
            validar_cantidad(3, -2),
            Err(ValidationError::CantidadInvalida { id: 3 })
        );
    }

    #[test]
    fn test_validar_texto_busqueda() {
        assert!(validar_texto_busqueda("collar").is_ok());
        assert_eq!(
            validar_texto_busqueda(""),
            Err(ValidationError::TextoVacio)
        );
    }
}
