use serde::Serialize;
use std::fmt;

/// Heatmap colour band for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Good,
    Medium,
    Bad,
}

/// Classifies `value` against a `reference` efficiency (usually the fleet mean).
///
/// | value / reference | Tier   |
/// |-------------------|--------|
/// | >= 1.05           | Good   |
/// | >= 0.95           | Medium |
/// | < 0.95            | Bad    |
///
/// A non-positive reference gives `Medium` for everything.
pub fn tier(value: f64, reference: f64) -> Tier {
    if reference <= 0.0 {
        return Tier::Medium;
    }
    match value / reference {
        r if r >= 1.05 => Tier::Good,
        r if r >= 0.95 => Tier::Medium,
        _ => Tier::Bad,
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Good => "good",
            Tier::Medium => "medium",
            Tier::Bad => "bad",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier(2.12, 2.0), Tier::Good);
        assert_eq!(tier(2.30, 2.0), Tier::Good);
        assert_eq!(tier(2.08, 2.0), Tier::Medium);
        assert_eq!(tier(2.0, 2.0), Tier::Medium);
        assert_eq!(tier(1.92, 2.0), Tier::Medium);
        assert_eq!(tier(1.88, 2.0), Tier::Bad);
        assert_eq!(tier(0.0, 2.0), Tier::Bad);
    }

    #[test]
    fn test_no_reference() {
        assert_eq!(tier(3.0, 0.0), Tier::Medium);
    }

    #[test]
    fn test_display() {
        assert_eq!(Tier::Good.to_string(), "good");
    }
}
