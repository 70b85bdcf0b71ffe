//! Fleet records as they arrive from a source, and their normalized form.
//!
//! Column names follow the fleet spreadsheet (`Veículo`, `Grupo`, `Mês`, ...)
//! with English aliases. Every field is optional on input: text fields accept
//! strings or numbers, numeric fields keep whatever the source sent so the
//! normalizer can decide how to read it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A numeric column exactly as the source sent it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Measure {
    Number(f64),
    Text(String),
}

/// One raw row of the fleet data set.
///
/// Each field is read from the first of its accepted column names that is
/// present, so a row carrying both `Veículo` and `Vehicle` still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetRecord {
    #[serde(rename = "Veículo")]
    pub vehicle: String,
    #[serde(rename = "Modelo")]
    pub model: String,
    #[serde(rename = "Marca")]
    pub brand: String,
    #[serde(rename = "Grupo")]
    pub group: String,
    #[serde(rename = "Mês")]
    pub month: String,
    #[serde(rename = "KM Rodado")]
    pub distance: Option<Measure>,
    #[serde(rename = "KM Carregado")]
    pub loaded_distance: Option<Measure>,
    #[serde(rename = "Média Carregado")]
    pub loaded_average: Option<Measure>,
}

/// Accepted column names per field, in order of preference.
const VEHICLE_KEYS: &[&str] = &["Veículo", "Veiculo", "Vehicle"];
const MODEL_KEYS: &[&str] = &["Modelo", "Model"];
const BRAND_KEYS: &[&str] = &["Marca", "Brand"];
const GROUP_KEYS: &[&str] = &["Grupo", "Group"];
const MONTH_KEYS: &[&str] = &["Mês", "Mes", "Month"];
const DISTANCE_KEYS: &[&str] = &["KM Rodado", "Km Rodado", "TotalDistance"];
const LOADED_DISTANCE_KEYS: &[&str] = &["KM Carregado", "Km Carregado", "LoadedDistance"];
const LOADED_AVERAGE_KEYS: &[&str] =
    &["Média Carregado", "Media Carregado", "LoadedAverageEfficiency"];

impl FleetRecord {
    /// Builds a record from a JSON object. Unknown keys are ignored and
    /// missing or oddly typed values fall back to empty.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            vehicle: lenient_text(pick(map, VEHICLE_KEYS)),
            model: lenient_text(pick(map, MODEL_KEYS)),
            brand: lenient_text(pick(map, BRAND_KEYS)),
            group: lenient_text(pick(map, GROUP_KEYS)),
            month: lenient_text(pick(map, MONTH_KEYS)),
            distance: lenient_measure(pick(map, DISTANCE_KEYS)),
            loaded_distance: lenient_measure(pick(map, LOADED_DISTANCE_KEYS)),
            loaded_average: lenient_measure(pick(map, LOADED_AVERAGE_KEYS)),
        }
    }
}

impl<'de> Deserialize<'de> for FleetRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_map(&Map::<String, Value>::deserialize(deserializer)?))
    }
}

/// A [`FleetRecord`] tagged with its parsed loaded-average efficiency.
///
/// Built once by [`crate::engine::normalize`]; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedRecord {
    #[serde(flatten)]
    record: FleetRecord,
    efficiency: f64,
}

impl ProcessedRecord {
    pub(crate) fn new(record: FleetRecord, efficiency: f64) -> Self {
        Self { record, efficiency }
    }

    pub fn record(&self) -> &FleetRecord {
        &self.record
    }

    /// Parsed loaded average (distance per unit of fuel). 0 when unparseable.
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn vehicle(&self) -> &str {
        &self.record.vehicle
    }

    pub fn group(&self) -> &str {
        &self.record.group
    }

    pub fn month(&self) -> &str {
        &self.record.month
    }

    pub fn model(&self) -> &str {
        &self.record.model
    }

    pub fn brand(&self) -> &str {
        &self.record.brand
    }

    pub fn distance(&self) -> f64 {
        crate::engine::normalize::parse_measure(self.record.distance.as_ref())
    }

    pub fn loaded_distance(&self) -> f64 {
        crate::engine::normalize::parse_measure(self.record.loaded_distance.as_ref())
    }
}

/// First non-null value under any of `keys`.
fn pick<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

fn lenient_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn lenient_measure(value: Option<&Value>) -> Option<Measure> {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(Measure::Number),
        Some(Value::String(s)) => Some(Measure::Text(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_portuguese_columns() {
        let record: FleetRecord = serde_json::from_value(json!({
            "Veículo": "ABC-1234",
            "Modelo": "FH 540",
            "Marca": "Volvo",
            "Grupo": "Bovinos",
            "Mês": "03/2024",
            "KM Rodado": 12500,
            "KM Carregado": "6.200",
            "Média Carregado": "2,35"
        }))
        .unwrap();

        assert_eq!(record.vehicle, "ABC-1234");
        assert_eq!(record.group, "Bovinos");
        assert_eq!(record.distance, Some(Measure::Number(12500.0)));
        assert_eq!(record.loaded_average, Some(Measure::Text("2,35".into())));
    }

    #[test]
    fn test_english_aliases_and_unknown_keys() {
        let record: FleetRecord = serde_json::from_value(json!({
            "Vehicle": "T-01",
            "Group": "G1",
            "Month": "01/2024",
            "LoadedAverageEfficiency": 7.5,
            "Driver": "ignored"
        }))
        .unwrap();

        assert_eq!(record.vehicle, "T-01");
        assert_eq!(record.month, "01/2024");
        assert_eq!(record.loaded_average, Some(Measure::Number(7.5)));
        assert_eq!(record.model, "");
    }

    #[test]
    fn test_numeric_vehicle_and_null_measure() {
        let record: FleetRecord = serde_json::from_value(json!({
            "Veículo": 4711,
            "Média Carregado": null,
            "KM Rodado": true
        }))
        .unwrap();

        assert_eq!(record.vehicle, "4711");
        assert_eq!(record.loaded_average, None);
        assert_eq!(record.distance, None);
    }

    #[test]
    fn test_duplicate_aliases_prefer_first_name() {
        let record: FleetRecord = serde_json::from_value(json!({
            "Vehicle": "EN-1",
            "Veiculo": "PT-1",
            "Month": "02/2024",
            "Mês": "01/2024",
            "LoadedAverageEfficiency": 3.0,
            "Media Carregado": "2,5"
        }))
        .unwrap();

        assert_eq!(record.vehicle, "PT-1");
        assert_eq!(record.month, "01/2024");
        assert_eq!(record.loaded_average, Some(Measure::Text("2,5".into())));
    }

    #[test]
    fn test_null_column_falls_through_to_alias() {
        let record: FleetRecord = serde_json::from_value(json!({
            "Veículo": null,
            "Vehicle": "T-07"
        }))
        .unwrap();

        assert_eq!(record.vehicle, "T-07");
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(serde_json::from_value::<FleetRecord>(json!([1, 2])).is_err());
    }
}
