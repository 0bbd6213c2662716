//! # Evaluation
//!
//! The evaluation pipeline: resolve a quantity from a takeoff item per the
//! EPD's basis, scale the EPD's metrics by it, collect material results per
//! takeoff, and fold them up through elements, scopes, and the project.
//! Every call is a pure function of its inputs; diagnostics go on the log
//! the caller passes in.
//!
//! ```rust
//! use lca_core::diagnostics::DiagnosticLog;
//! use lca_core::elements::{BulkElement, ObjectCategory};
//! use lca_core::epd::{EpdRecord, QuantityBasis};
//! use lca_core::evaluate::{evaluate_element, EvaluationConfig};
//! use lca_core::metrics::{EnvironmentalMetric, MetricKind};
//! use lca_core::modules::Module;
//! use lca_core::takeoff::MaterialProfile;
//!
//! let epd = EpdRecord::new("Ready-mix C30/37", QuantityBasis::Volume).with_metric(
//!     EnvironmentalMetric::new(MetricKind::ClimateChangeTotal)
//!         .with_indicator(Module::A1, 1.0)
//!         .with_indicator(Module::A2, 2.0),
//! );
//! let element = BulkElement::new("Beam B-1", ObjectCategory::Beam, 2.0)
//!     .of_material(MaterialProfile::new("Concrete").with_epd(epd));
//!
//! let mut log = DiagnosticLog::new();
//! let results =
//!     evaluate_element(&element, &[], &EvaluationConfig::default(), &mut log).unwrap();
//!
//! assert_eq!(results[0].value(Module::A1), 2.0);
//! assert_eq!(results[0].value(Module::A2), 4.0);
//! ```

pub mod element;
pub mod metric;
pub mod quantity;
pub mod scope;
pub mod takeoff;

pub use element::{
    evaluate_by_area, evaluate_by_length, evaluate_by_mass, evaluate_by_volume,
    evaluate_element, evaluate_element_tagged, evaluate_embodied_carbon,
};
pub use metric::evaluate_epd;
pub use quantity::resolve_quantity;
pub use scope::{evaluate_project, evaluate_scope, CategoryElements, ScopeInventory};
pub use takeoff::evaluate_material_takeoff;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricKind;

/// What to do when a takeoff material carries no EPD
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingEpdPolicy {
    /// Fail the whole takeoff. One missing EPD makes the batch incomparable.
    #[default]
    AbortBatch,
    /// Record a diagnostic and evaluate the remaining items
    SkipItem,
}

/// What to do when a resolved quantity comes out NaN
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NanQuantityPolicy {
    /// Record an error diagnostic and let NaN flow into the results
    #[default]
    Propagate,
    /// Fail the evaluation
    Fail,
}

/// Knobs shared by the evaluation entry points.
///
/// The defaults match common reporting practice: evaluate every metric the
/// EPD declares, let template materials override model materials, fail hard
/// on a missing EPD, and propagate NaN quantities with a logged error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Metric kinds to evaluate; empty means all declared
    #[serde(default)]
    pub metric_filter: Vec<MetricKind>,
    /// Whether template materials win over model materials on conflict
    #[serde(default = "default_prioritise_template")]
    pub prioritise_template: bool,
    #[serde(default)]
    pub missing_epd: MissingEpdPolicy,
    #[serde(default)]
    pub nan_quantity: NanQuantityPolicy,
}

fn default_prioritise_template() -> bool {
    true
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            metric_filter: Vec::new(),
            prioritise_template: true,
            missing_epd: MissingEpdPolicy::default(),
            nan_quantity: NanQuantityPolicy::default(),
        }
    }
}

impl EvaluationConfig {
    pub fn new() -> Self {
        EvaluationConfig::default()
    }

    pub fn with_metric_filter(mut self, filter: impl IntoIterator<Item = MetricKind>) -> Self {
        self.metric_filter = filter.into_iter().collect();
        self
    }

    pub fn with_prioritise_template(mut self, prioritise_template: bool) -> Self {
        self.prioritise_template = prioritise_template;
        self
    }

    pub fn with_missing_epd(mut self, policy: MissingEpdPolicy) -> Self {
        self.missing_epd = policy;
        self
    }

    pub fn with_nan_quantity(mut self, policy: NanQuantityPolicy) -> Self {
        self.nan_quantity = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EvaluationConfig::default();
        assert!(config.metric_filter.is_empty());
        assert!(config.prioritise_template);
        assert_eq!(config.missing_epd, MissingEpdPolicy::AbortBatch);
        assert_eq!(config.nan_quantity, NanQuantityPolicy::Propagate);
    }

    #[test]
    fn test_builders() {
        let config = EvaluationConfig::new()
            .with_metric_filter([MetricKind::ClimateChangeTotal])
            .with_prioritise_template(false)
            .with_missing_epd(MissingEpdPolicy::SkipItem)
            .with_nan_quantity(NanQuantityPolicy::Fail);
        assert_eq!(config.metric_filter, vec![MetricKind::ClimateChangeTotal]);
        assert!(!config.prioritise_template);
        assert_eq!(config.missing_epd, MissingEpdPolicy::SkipItem);
        assert_eq!(config.nan_quantity, NanQuantityPolicy::Fail);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EvaluationConfig =
            serde_json::from_str(r#"{ "missing_epd": "SkipItem" }"#).unwrap();
        assert_eq!(config.missing_epd, MissingEpdPolicy::SkipItem);
        assert!(config.prioritise_template);
        assert_eq!(config.nan_quantity, NanQuantityPolicy::Propagate);
        assert!(config.metric_filter.is_empty());
    }
}
