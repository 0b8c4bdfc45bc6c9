//! # Fecha Handling
//!
//! Sale timestamps are stored as strings in the fixed format
//! `DD-MM-YYYY, HH:mm:ss` (local time). Date-range search only ever looks
//! at the portion before the comma, so parsing is split accordingly:
//! [`timestamp_ahora`] produces the full stamp, [`parse_fecha`] recovers a
//! comparable date from either a full stamp or a bare `DD-MM-YYYY` bound.
//!
//! Malformed input parses to `None` rather than to a poisoned comparison
//! value; callers decide whether that means "reject the query" (search
//! bounds) or "fall outside every range" (stored timestamps).

use chrono::{Local, NaiveDate};

/// Storage format for sale timestamps.
pub const FORMATO_TIMESTAMP: &str = "%d-%m-%Y, %H:%M:%S";

/// Date-only prefix of [`FORMATO_TIMESTAMP`].
const FORMATO_FECHA: &str = "%d-%m-%Y";

/// Current local time in the storage format.
pub fn timestamp_ahora() -> String {
    Local::now().format(FORMATO_TIMESTAMP).to_string()
}

/// Parses the date portion of a timestamp or search bound.
///
/// Only the text before the first comma is considered, so both
/// `"05-03-2024, 18:21:09"` and `"05-03-2024"` yield the same date.
/// Returns `None` for anything that is not a real calendar date.
pub fn parse_fecha(valor: &str) -> Option<NaiveDate> {
    let fecha = valor.split(',').next()?.trim();
    NaiveDate::parse_from_str(fecha, FORMATO_FECHA).ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_timestamp() {
        let fecha = parse_fecha("05-03-2024, 18:21:09").unwrap();
        assert_eq!(fecha, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_parse_date_only_bound() {
        let fecha = parse_fecha("01-01-2024").unwrap();
        assert_eq!(fecha, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_fecha("").is_none());
        assert!(parse_fecha("ayer").is_none());
        assert!(parse_fecha("2024-01-01").is_none()); // ISO order is not accepted
        assert!(parse_fecha("32-01-2024").is_none()); // no day rollover
        assert!(parse_fecha("01-13-2024").is_none());
    }

    #[test]
    fn test_dates_compare_inclusively() {
        let desde = parse_fecha("01-01-2024").unwrap();
        let stamp = parse_fecha("01-01-2024, 00:00:01").unwrap();
        // Time of day never participates in the comparison.
        assert!(stamp >= desde);
    }

    #[test]
    fn test_timestamp_ahora_roundtrips() {
        // Whatever "now" is, it must parse back under the same format.
        assert!(parse_fecha(&timestamp_ahora()).is_some());
    }
}
