//! # Metric Registry
//!
//! A static lookup table with one entry per impact category. Everything the
//! engine needs to know about a metric kind at evaluation time (code, unit,
//! whether results of that kind may carry a biogenic carbon figure) lives
//! here rather than being scattered through the evaluation path.

use once_cell::sync::Lazy;

use crate::errors::{LcaError, LcaResult};
use crate::metrics::MetricKind;

/// Per-kind facts consulted during evaluation and reporting
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSpec {
    pub kind: MetricKind,
    /// EN 15804+A2 indicator code
    pub code: &'static str,
    /// Reporting unit
    pub unit: &'static str,
    /// Human-readable category name
    pub description: &'static str,
    /// Whether results of this kind may carry a biogenic carbon figure
    pub carries_biogenic_carbon: bool,
}

impl MetricSpec {
    /// Check that a biogenic carbon figure is only attached where the
    /// category admits one
    pub fn validate_biogenic(&self, biogenic_carbon: Option<f64>) -> LcaResult<()> {
        if biogenic_carbon.is_some() && !self.carries_biogenic_carbon {
            return Err(LcaError::misplaced_biogenic_carbon(self.kind));
        }
        Ok(())
    }
}

/// One entry per [`MetricKind`], positioned at `kind.index()`
static REGISTRY: Lazy<Vec<MetricSpec>> = Lazy::new(|| {
    MetricKind::ALL
        .iter()
        .map(|&kind| MetricSpec {
            kind,
            code: kind.code(),
            unit: kind.unit(),
            description: kind.description(),
            carries_biogenic_carbon: kind.is_climate_change(),
        })
        .collect()
});

/// Look up the registry entry for a kind
pub fn spec(kind: MetricKind) -> &'static MetricSpec {
    &REGISTRY[kind.index()]
}

/// All registry entries in reporting order
pub fn all() -> &'static [MetricSpec] {
    &REGISTRY
}

/// Find a registry entry by indicator code, e.g. from an EPD document
pub fn by_code(code: &str) -> Option<&'static MetricSpec> {
    REGISTRY.iter().find(|s| s.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_kind() {
        assert_eq!(all().len(), MetricKind::ALL.len());
        for kind in MetricKind::ALL {
            assert_eq!(spec(kind).kind, kind);
        }
    }

    #[test]
    fn test_biogenic_flag_follows_climate_family() {
        assert!(spec(MetricKind::ClimateChangeTotal).carries_biogenic_carbon);
        assert!(spec(MetricKind::ClimateChangeBiogenic).carries_biogenic_carbon);
        assert!(!spec(MetricKind::OzoneDepletion).carries_biogenic_carbon);
        assert!(!spec(MetricKind::WaterDeprivation).carries_biogenic_carbon);
    }

    #[test]
    fn test_lookup_by_code() {
        let entry = by_code("GWP-fossil").unwrap();
        assert_eq!(entry.kind, MetricKind::ClimateChangeFossil);
        // Document sources are inconsistent about case
        let entry = by_code("gwp-TOTAL").unwrap();
        assert_eq!(entry.kind, MetricKind::ClimateChangeTotal);
        assert!(by_code("GWP-unknown").is_none());
    }

    #[test]
    fn test_biogenic_validation() {
        let climate = spec(MetricKind::ClimateChangeFossil);
        assert!(climate.validate_biogenic(Some(-1.2)).is_ok());
        assert!(climate.validate_biogenic(None).is_ok());

        let water = spec(MetricKind::WaterDeprivation);
        assert!(water.validate_biogenic(None).is_ok());
        let err = water.validate_biogenic(Some(0.5)).unwrap_err();
        assert_eq!(err.error_code(), "MISPLACED_BIOGENIC_CARBON");
    }
}
