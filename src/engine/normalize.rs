//! Turns raw [`FleetRecord`]s into [`ProcessedRecord`]s.
//!
//! Nothing in here fails: a value that cannot be read becomes `0.0` and a
//! missing identity becomes [`PLACEHOLDER`].

use crate::engine::month;
use crate::record::{FleetRecord, Measure, ProcessedRecord};
use tracing::debug;

/// Stands in for a blank vehicle, group or month.
pub const PLACEHOLDER: &str = "N/A";

/// Reads a locale-formatted number such as `"7,35"` or `"1.234,56"`.
///
/// Everything except digits, separators and the minus sign is stripped. When
/// both `.` and `,` appear, the dot is a thousands separator. Returns `0.0`
/// for anything that does not parse to a finite value.
pub fn parse_locale_number(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let cleaned = if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    cleaned
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Numeric value of an optional source measure, `0.0` when absent.
pub fn parse_measure(measure: Option<&Measure>) -> f64 {
    match measure {
        Some(Measure::Number(n)) if n.is_finite() => *n,
        Some(Measure::Number(_)) | None => 0.0,
        Some(Measure::Text(s)) => parse_locale_number(s),
    }
}

fn identity(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Normalizes a single record.
pub fn normalize(mut record: FleetRecord) -> ProcessedRecord {
    record.vehicle = identity(&record.vehicle);
    record.group = identity(&record.group);
    record.month = month::zero_pad(&identity(&record.month));

    let efficiency = parse_measure(record.loaded_average.as_ref());
    ProcessedRecord::new(record, efficiency)
}

/// Normalizes a whole data set, preserving input order.
pub fn normalize_all(records: &[FleetRecord]) -> Vec<ProcessedRecord> {
    let processed: Vec<ProcessedRecord> = records.iter().cloned().map(normalize).collect();

    let unparsed = processed.iter().filter(|r| r.efficiency() == 0.0).count();
    debug!(
        records = processed.len(),
        zero_efficiency = unparsed,
        "Fleet records normalized"
    );

    processed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_locale_number("7,35"), 7.35);
        assert_eq!(parse_locale_number("8,0"), 8.0);
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(parse_locale_number("1.234,56"), 1234.56);
    }

    #[test]
    fn test_units_and_whitespace_are_stripped() {
        assert_eq!(parse_locale_number(" 2,5 km/l"), 2.5);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(parse_locale_number(""), 0.0);
        assert_eq!(parse_locale_number("n/d"), 0.0);
        assert_eq!(parse_locale_number("1,2,3"), 0.0);
    }

    #[test]
    fn test_parse_measure() {
        assert_eq!(parse_measure(None), 0.0);
        assert_eq!(parse_measure(Some(&Measure::Number(6.5))), 6.5);
        assert_eq!(parse_measure(Some(&Measure::Number(f64::NAN))), 0.0);
        assert_eq!(parse_measure(Some(&Measure::Text("6,5".into()))), 6.5);
    }

    #[test]
    fn test_null_efficiency_normalizes_to_zero() {
        let record: FleetRecord = serde_json::from_value(serde_json::json!({
            "Veículo": "A",
            "Grupo": "G1",
            "Mês": "01/2024",
            "Média Carregado": null
        }))
        .unwrap();

        let processed = normalize(record);
        assert_eq!(processed.efficiency(), 0.0);
        assert_eq!(processed.vehicle(), "A");
    }

    #[test]
    fn test_blank_identities_get_placeholder() {
        let processed = normalize(FleetRecord {
            vehicle: "  ".into(),
            ..Default::default()
        });

        assert_eq!(processed.vehicle(), PLACEHOLDER);
        assert_eq!(processed.group(), PLACEHOLDER);
        assert_eq!(processed.month(), PLACEHOLDER);
        assert_eq!(processed.model(), "");
    }

    #[test]
    fn test_month_is_zero_padded() {
        let processed = normalize(FleetRecord {
            vehicle: "A".into(),
            group: "G1".into(),
            month: "3/2024".into(),
            ..Default::default()
        });

        assert_eq!(processed.month(), "03/2024");
    }

    #[test]
    fn test_raw_measure_is_preserved() {
        let processed = normalize(FleetRecord {
            vehicle: "A".into(),
            loaded_average: Some(Measure::Text("7,5".into())),
            ..Default::default()
        });

        assert_eq!(processed.efficiency(), 7.5);
        assert_eq!(
            processed.record().loaded_average,
            Some(Measure::Text("7,5".into()))
        );
    }
}
