use anyhow::{Context, Result};

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_HEATMAP_MONTHS: usize = 6;
pub const DEFAULT_HEATMAP_VEHICLES: usize = 20;

/// Settings read from the environment (after `.env` has been loaded).
///
/// | Variable                 | Default |
/// |--------------------------|---------|
/// | `FLEET_SHEET_URL`        | none    |
/// | `FLEET_TOP_N`            | 10      |
/// | `FLEET_HEATMAP_MONTHS`   | 6       |
/// | `FLEET_HEATMAP_VEHICLES` | 20      |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Published CSV export of the fleet spreadsheet.
    pub sheet_url: Option<String>,
    pub top_n: usize,
    pub heatmap_months: usize,
    pub heatmap_vehicles: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sheet_url: None,
            top_n: DEFAULT_TOP_N,
            heatmap_months: DEFAULT_HEATMAP_MONTHS,
            heatmap_vehicles: DEFAULT_HEATMAP_VEHICLES,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let count = |key: &str, default: usize| -> Result<usize> {
            match lookup(key) {
                Some(raw) if !raw.trim().is_empty() => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{key} must be a non-negative integer, got {raw:?}")),
                _ => Ok(default),
            }
        };

        Ok(Self {
            sheet_url: lookup("FLEET_SHEET_URL").filter(|url| !url.trim().is_empty()),
            top_n: count("FLEET_TOP_N", DEFAULT_TOP_N)?,
            heatmap_months: count("FLEET_HEATMAP_MONTHS", DEFAULT_HEATMAP_MONTHS)?,
            heatmap_vehicles: count("FLEET_HEATMAP_VEHICLES", DEFAULT_HEATMAP_VEHICLES)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<DashboardConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("FLEET_SHEET_URL", "https://example.com/export?format=csv"),
            ("FLEET_TOP_N", " 5 "),
            ("FLEET_HEATMAP_MONTHS", "12"),
        ])
        .unwrap();

        assert_eq!(cfg.sheet_url.as_deref(), Some("https://example.com/export?format=csv"));
        assert_eq!(cfg.top_n, 5);
        assert_eq!(cfg.heatmap_months, 12);
        assert_eq!(cfg.heatmap_vehicles, DEFAULT_HEATMAP_VEHICLES);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let cfg = config(&[("FLEET_SHEET_URL", ""), ("FLEET_TOP_N", "")]).unwrap();
        assert_eq!(cfg.sheet_url, None);
        assert_eq!(cfg.top_n, DEFAULT_TOP_N);
    }

    #[test]
    fn test_invalid_number() {
        let err = config(&[("FLEET_TOP_N", "ten")]).unwrap_err();
        assert!(err.to_string().contains("FLEET_TOP_N"));
    }
}
