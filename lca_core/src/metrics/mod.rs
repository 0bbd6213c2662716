//! # Environmental Metrics
//!
//! A metric is one impact category's indicator values, keyed by life cycle
//! module. EPDs carry metrics as declared; evaluation scales them by a
//! resolved quantity to produce results.
//!
//! ```rust
//! use lca_core::metrics::{EnvironmentalMetric, MetricKind};
//! use lca_core::modules::Module;
//!
//! let metric = EnvironmentalMetric::new(MetricKind::ClimateChangeTotal)
//!     .with_indicator(Module::A1, 1.0)
//!     .with_indicator(Module::A2, 2.0)
//!     .with_biogenic_carbon(-0.4);
//! metric.validate().unwrap();
//!
//! assert_eq!(metric.value(Module::A2), 2.0);
//! assert!(metric.value(Module::C1).is_nan());
//! ```

pub mod kinds;
pub mod registry;

pub use kinds::MetricKind;
pub use registry::{all as all_specs, by_code, spec, MetricSpec};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{LcaError, LcaResult};
use crate::modules::Module;

/// One impact category's indicator values as declared on an EPD.
///
/// Indicator values are per declared unit of the EPD they sit on. Modules
/// may be individual stages or aggregated ranges, but never both where the
/// range covers the stage; [`EnvironmentalMetric::validate`] rejects the mix
/// because summing such a metric would double count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalMetric {
    pub kind: MetricKind,
    /// Indicator value per module, in the kind's unit
    pub indicators: BTreeMap<Module, f64>,
    /// Biogenic carbon per declared unit, kg C. Climate change kinds only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biogenic_carbon: Option<f64>,
}

impl EnvironmentalMetric {
    /// Create an empty metric of the given kind
    pub fn new(kind: MetricKind) -> Self {
        EnvironmentalMetric {
            kind,
            indicators: BTreeMap::new(),
            biogenic_carbon: None,
        }
    }

    /// Create a metric from already-assembled indicator values
    pub fn from_indicators(kind: MetricKind, indicators: BTreeMap<Module, f64>) -> Self {
        EnvironmentalMetric {
            kind,
            indicators,
            biogenic_carbon: None,
        }
    }

    /// Create a metric from stage totals, for EPDs that publish no discrete
    /// module breakdown. `None` leaves the range undeclared.
    pub fn from_stage_totals(
        kind: MetricKind,
        product_stage: Option<f64>,
        use_stage: Option<f64>,
        end_of_life: Option<f64>,
    ) -> Self {
        let mut metric = EnvironmentalMetric::new(kind);
        if let Some(value) = product_stage {
            metric.indicators.insert(Module::A1ToA3, value);
        }
        if let Some(value) = use_stage {
            metric.indicators.insert(Module::B1ToB7, value);
        }
        if let Some(value) = end_of_life {
            metric.indicators.insert(Module::C1ToC4, value);
        }
        metric
    }

    /// Set the indicator value for a module, replacing any previous value
    pub fn with_indicator(mut self, module: Module, value: f64) -> Self {
        self.indicators.insert(module, value);
        self
    }

    /// Attach a biogenic carbon figure
    pub fn with_biogenic_carbon(mut self, value: f64) -> Self {
        self.biogenic_carbon = Some(value);
        self
    }

    /// Indicator value for a module, NaN when the module is not declared
    pub fn value(&self, module: Module) -> f64 {
        self.indicators.get(&module).copied().unwrap_or(f64::NAN)
    }

    /// Indicator value for a module, if declared
    pub fn get(&self, module: Module) -> Option<f64> {
        self.indicators.get(&module).copied()
    }

    /// Declared modules in reporting order
    pub fn modules(&self) -> impl Iterator<Item = Module> + '_ {
        self.indicators.keys().copied()
    }

    /// Whether no modules are declared
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Check module granularity and biogenic carbon placement.
    ///
    /// Fails when an aggregated range and one of its parts are both
    /// declared, or a biogenic carbon figure sits on a non-climate kind.
    pub fn validate(&self) -> LcaResult<()> {
        for &module in self.indicators.keys() {
            if let Some(parts) = module.parts() {
                for &part in parts {
                    if self.indicators.contains_key(&part) {
                        return Err(LcaError::mixed_module_granularity(self.kind, module, part));
                    }
                }
            }
        }
        registry::spec(self.kind).validate_biogenic(self.biogenic_carbon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_reads() {
        let metric = EnvironmentalMetric::new(MetricKind::OzoneDepletion)
            .with_indicator(Module::A1ToA3, 1.5e-6)
            .with_indicator(Module::C1ToC4, 2.0e-7);

        assert_eq!(metric.value(Module::A1ToA3), 1.5e-6);
        assert_eq!(metric.get(Module::C1ToC4), Some(2.0e-7));
        assert!(metric.value(Module::D).is_nan());
        assert_eq!(metric.get(Module::D), None);
        assert_eq!(metric.modules().count(), 2);
    }

    #[test]
    fn test_with_indicator_replaces() {
        let metric = EnvironmentalMetric::new(MetricKind::AcidificationPotential)
            .with_indicator(Module::A4, 1.0)
            .with_indicator(Module::A4, 3.0);
        assert_eq!(metric.value(Module::A4), 3.0);
        assert_eq!(metric.indicators.len(), 1);
    }

    #[test]
    fn test_from_stage_totals() {
        let metric = EnvironmentalMetric::from_stage_totals(
            MetricKind::ClimateChangeFossil,
            Some(120.0),
            None,
            Some(8.5),
        );
        assert_eq!(metric.value(Module::A1ToA3), 120.0);
        assert_eq!(metric.get(Module::B1ToB7), None);
        assert_eq!(metric.value(Module::C1ToC4), 8.5);
        assert!(metric.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_disjoint_modules() {
        let metric = EnvironmentalMetric::new(MetricKind::ClimateChangeTotal)
            .with_indicator(Module::A1ToA3, 10.0)
            .with_indicator(Module::A4, 0.5)
            .with_indicator(Module::C1ToC4, 1.2)
            .with_indicator(Module::D, -0.8)
            .with_biogenic_carbon(-2.1);
        assert!(metric.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_mixed_granularity() {
        let metric = EnvironmentalMetric::new(MetricKind::ClimateChangeTotal)
            .with_indicator(Module::A1ToA3, 10.0)
            .with_indicator(Module::A2, 3.0);
        let err = metric.validate().unwrap_err();
        assert_eq!(err.error_code(), "MIXED_MODULE_GRANULARITY");
        assert!(err.to_string().contains("A1-A3"));
        assert!(err.to_string().contains("A2"));
    }

    #[test]
    fn test_validate_rejects_misplaced_biogenic() {
        let metric = EnvironmentalMetric::new(MetricKind::WaterDeprivation)
            .with_indicator(Module::A1ToA3, 4.0)
            .with_biogenic_carbon(-1.0);
        let err = metric.validate().unwrap_err();
        assert_eq!(err.error_code(), "MISPLACED_BIOGENIC_CARBON");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let metric = EnvironmentalMetric::new(MetricKind::ClimateChangeBiogenic)
            .with_indicator(Module::A1ToA3, -5.0)
            .with_indicator(Module::C3, 5.0)
            .with_biogenic_carbon(-1.36);
        let json = serde_json::to_string(&metric).unwrap();
        let roundtrip: EnvironmentalMetric = serde_json::from_str(&json).unwrap();
        assert_eq!(metric, roundtrip);
    }

    #[test]
    fn test_biogenic_carbon_omitted_from_json_when_absent() {
        let metric = EnvironmentalMetric::new(MetricKind::OzoneDepletion)
            .with_indicator(Module::A1, 1.0e-8);
        let json = serde_json::to_string(&metric).unwrap();
        assert!(!json.contains("biogenic_carbon"));
    }
}
