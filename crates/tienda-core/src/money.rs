//! # Money Rounding
//!
//! Monetary values in the persisted documents are plain JSON numbers with
//! two visible decimals, so every stored amount passes through [`round2`]
//! exactly once at the point it is computed: line subtotals at sale
//! creation, and the sale total over those already-rounded subtotals.

use crate::types::VentaLinea;

/// Rounds a monetary value to 2 decimals, half away from zero.
#[inline]
pub fn round2(valor: f64) -> f64 {
    (valor * 100.0).round() / 100.0
}

/// Line subtotal: unit price × quantity, rounded to 2 decimals.
#[inline]
pub fn subtotal(precio_unitario: f64, cantidad: i64) -> f64 {
    round2(precio_unitario * cantidad as f64)
}

/// Sale total: sum of the (already rounded) line subtotals, rounded again
/// to absorb accumulated binary representation error.
pub fn total(lineas: &[VentaLinea]) -> f64 {
    round2(lineas.iter().map(|l| l.subtotal).sum())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn linea(subtotal: f64) -> VentaLinea {
        VentaLinea {
            id: 1,
            nombre: "x".into(),
            precio_unitario: 0.0,
            cantidad: 1,
            subtotal,
        }
    }

    #[test]
    fn test_round2() {
        // 0.125 is exactly representable, so the half-way case is honest.
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(1999.0), 1999.0);
    }

    #[test]
    fn test_subtotal() {
        assert_eq!(subtotal(19.99, 3), 59.97);
        assert_eq!(subtotal(0.1, 3), 0.3);
        assert_eq!(subtotal(5.0, 0), 0.0);
    }

    #[test]
    fn test_total_sums_rounded_subtotals() {
        let lineas = vec![linea(59.97), linea(0.3), linea(10.0)];
        assert_eq!(total(&lineas), 70.27);
        assert_eq!(total(&[]), 0.0);
    }
}
