//! # Environmental Product Declarations
//!
//! An EPD declares a set of environmental metrics measured against a
//! quantity basis, e.g. "per m3 of concrete" or "per kg of steel". The
//! engine resolves the matching physical quantity from the consuming
//! element and scales the declared values by it.
//!
//! ```rust
//! use lca_core::epd::{EpdRecord, QuantityBasis};
//! use lca_core::metrics::{EnvironmentalMetric, MetricKind};
//! use lca_core::modules::Module;
//!
//! let epd = EpdRecord::new("C30/37 ready-mix", QuantityBasis::Volume)
//!     .with_metric(
//!         EnvironmentalMetric::new(MetricKind::ClimateChangeTotal)
//!             .with_indicator(Module::A1ToA3, 280.0),
//!     );
//! epd.validate().unwrap();
//! assert_eq!(epd.quantity_per_declared_unit, 1.0);
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::errors::{LcaError, LcaResult};
use crate::metrics::{EnvironmentalMetric, MetricKind};

// ============================================================================
// Quantity Basis
// ============================================================================

/// The physical measurement an EPD's declared unit refers to.
///
/// Resolution dispatches on this: a Volume basis reads the element's solid
/// volume, a Mass basis converts volume through a density, the scalar bases
/// (Item through VolumetricFlowRate) read a declared figure straight off the
/// takeoff record.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum QuantityBasis {
    /// Not declared, evaluation always fails
    #[default]
    Undefined,
    /// Per kg
    Mass,
    /// Per m3
    Volume,
    /// Per m2
    Area,
    /// Per m
    Length,
    /// Per piece
    Item,
    /// Per kWh
    Energy,
    /// Per ampere
    ElectricCurrent,
    /// Per watt
    Power,
    /// Per m3/h
    VolumetricFlowRate,
}

impl QuantityBasis {
    /// Bases read directly off a takeoff record rather than derived from
    /// element geometry
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            QuantityBasis::Item
                | QuantityBasis::Energy
                | QuantityBasis::ElectricCurrent
                | QuantityBasis::Power
                | QuantityBasis::VolumetricFlowRate
        )
    }
}

impl std::fmt::Display for QuantityBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            QuantityBasis::Undefined => "Undefined",
            QuantityBasis::Mass => "Mass",
            QuantityBasis::Volume => "Volume",
            QuantityBasis::Area => "Area",
            QuantityBasis::Length => "Length",
            QuantityBasis::Item => "Item",
            QuantityBasis::Energy => "Energy",
            QuantityBasis::ElectricCurrent => "ElectricCurrent",
            QuantityBasis::Power => "Power",
            QuantityBasis::VolumetricFlowRate => "VolumetricFlowRate",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// Source Metadata
// ============================================================================

/// Where an EPD came from and how long it stays valid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpdSource {
    /// Publishing programme or database, e.g. "EC3" or "Okobaudat"
    pub provider: String,
    /// Provider-side identifier of the declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
}

impl EpdSource {
    pub fn new(provider: impl Into<String>) -> Self {
        EpdSource {
            provider: provider.into(),
            dataset_id: None,
            published: None,
            valid_until: None,
        }
    }

    pub fn with_dataset_id(mut self, dataset_id: impl Into<String>) -> Self {
        self.dataset_id = Some(dataset_id.into());
        self
    }

    pub fn with_published(mut self, published: NaiveDate) -> Self {
        self.published = Some(published);
        self
    }

    pub fn with_valid_until(mut self, valid_until: NaiveDate) -> Self {
        self.valid_until = Some(valid_until);
        self
    }

    /// Whether the declaration's validity period has passed.
    /// Unknown validity counts as not expired.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        match self.valid_until {
            Some(valid_until) => today > valid_until,
            None => false,
        }
    }
}

// ============================================================================
// EPD Record
// ============================================================================

/// One environmental product declaration.
///
/// `quantity_per_declared_unit` covers declarations made against a multiple
/// of the basis unit, e.g. "per 1000 bricks" or "per 0.5 m3 batch". Metric
/// values are divided by it during evaluation to get back to the native
/// unit, and that normalization is reported as a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpdRecord {
    pub name: String,
    pub quantity_basis: QuantityBasis,
    /// How many basis units the declared values cover, default 1
    #[serde(default = "default_quantity_per_declared_unit")]
    pub quantity_per_declared_unit: f64,
    /// kg/m3, used for mass-basis conversion when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    pub metrics: Vec<EnvironmentalMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EpdSource>,
}

fn default_quantity_per_declared_unit() -> f64 {
    1.0
}

impl EpdRecord {
    /// Create a record with no metrics and a unit declared quantity
    pub fn new(name: impl Into<String>, quantity_basis: QuantityBasis) -> Self {
        EpdRecord {
            name: name.into(),
            quantity_basis,
            quantity_per_declared_unit: 1.0,
            density: None,
            metrics: Vec::new(),
            source: None,
        }
    }

    pub fn with_quantity_per_declared_unit(mut self, quantity: f64) -> Self {
        self.quantity_per_declared_unit = quantity;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_metric(mut self, metric: EnvironmentalMetric) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = EnvironmentalMetric>) -> Self {
        self.metrics.extend(metrics);
        self
    }

    pub fn with_source(mut self, source: EpdSource) -> Self {
        self.source = Some(source);
        self
    }

    /// The record's density when it is usable for mass conversion
    pub fn usable_density(&self) -> Option<f64> {
        self.density.filter(|d| d.is_finite() && *d > 0.0)
    }

    /// Check the record is internally consistent.
    ///
    /// The declared quantity must be positive finite, a density when set
    /// must be positive finite, and every metric must pass its own checks.
    pub fn validate(&self) -> LcaResult<()> {
        if self.name.trim().is_empty() {
            return Err(LcaError::invalid_input(
                "name",
                &self.name,
                "EPD name must not be empty",
            ));
        }
        if !(self.quantity_per_declared_unit.is_finite() && self.quantity_per_declared_unit > 0.0) {
            return Err(LcaError::invalid_input(
                "quantity_per_declared_unit",
                self.quantity_per_declared_unit.to_string(),
                "declared quantity must be positive and finite",
            ));
        }
        if let Some(density) = self.density {
            if !(density.is_finite() && density > 0.0) {
                return Err(LcaError::invalid_input(
                    "density",
                    density.to_string(),
                    "density must be positive and finite when set",
                ));
            }
        }
        for metric in &self.metrics {
            metric.validate()?;
        }
        Ok(())
    }

    /// The record's metrics matching a kind filter.
    ///
    /// An empty filter matches everything. Otherwise each requested kind
    /// picks the first metric of that kind; a kind with no match is
    /// reported on the log and skipped, the rest still return.
    pub fn filtered_metrics<'a>(
        &'a self,
        filter: &[MetricKind],
        log: &mut DiagnosticLog,
    ) -> Vec<&'a EnvironmentalMetric> {
        if filter.is_empty() {
            return self.metrics.iter().collect();
        }
        let mut matched = Vec::with_capacity(filter.len());
        for &kind in filter {
            match self.metrics.iter().find(|m| m.kind == kind) {
                Some(metric) => matched.push(metric),
                None => log.error(
                    DiagnosticKind::MetricNotFound,
                    format!("EPD '{}' declares no {} metric", self.name, kind),
                ),
            }
        }
        matched
    }
}

// ============================================================================
// EPD Provider
// ============================================================================

/// Source of EPD records, typically backed by a remote dataset adapter.
///
/// Fetching is upstream of evaluation; implementations resolve identifiers
/// however they like (network, files, fixtures) and the engine only sees
/// finished records.
pub trait EpdProvider {
    fn fetch(&self, identifier: &str) -> LcaResult<EpdRecord>;
}

/// Name-keyed in-memory provider, useful for tests and for callers that
/// pre-download their dataset
#[derive(Debug, Clone, Default)]
pub struct InMemoryEpdStore {
    records: HashMap<String, EpdRecord>,
}

impl InMemoryEpdStore {
    pub fn new() -> Self {
        InMemoryEpdStore::default()
    }

    /// Add a record, keyed by its name. Replaces any previous record with
    /// the same name.
    pub fn insert(&mut self, record: EpdRecord) {
        self.records.insert(record.name.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl EpdProvider for InMemoryEpdStore {
    fn fetch(&self, identifier: &str) -> LcaResult<EpdRecord> {
        self.records
            .get(identifier)
            .cloned()
            .ok_or_else(|| LcaError::record_not_found(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::Module;

    fn gwp_metric() -> EnvironmentalMetric {
        EnvironmentalMetric::new(MetricKind::ClimateChangeTotal)
            .with_indicator(Module::A1, 1.0)
            .with_indicator(Module::A2, 2.0)
    }

    #[test]
    fn test_defaults() {
        let epd = EpdRecord::new("Test product", QuantityBasis::Volume);
        assert_eq!(epd.quantity_per_declared_unit, 1.0);
        assert_eq!(epd.density, None);
        assert!(epd.metrics.is_empty());
        assert_eq!(QuantityBasis::default(), QuantityBasis::Undefined);
    }

    #[test]
    fn test_scalar_bases() {
        assert!(QuantityBasis::Item.is_scalar());
        assert!(QuantityBasis::VolumetricFlowRate.is_scalar());
        assert!(!QuantityBasis::Mass.is_scalar());
        assert!(!QuantityBasis::Undefined.is_scalar());
    }

    #[test]
    fn test_validate_accepts_well_formed_record() {
        let epd = EpdRecord::new("CLT panel", QuantityBasis::Mass)
            .with_density(480.0)
            .with_quantity_per_declared_unit(1000.0)
            .with_metric(gwp_metric());
        assert!(epd.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_declared_quantity() {
        let epd =
            EpdRecord::new("Bad qpdu", QuantityBasis::Volume).with_quantity_per_declared_unit(0.0);
        let err = epd.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let epd = EpdRecord::new("NaN qpdu", QuantityBasis::Volume)
            .with_quantity_per_declared_unit(f64::NAN);
        assert!(epd.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_name_and_bad_density() {
        let epd = EpdRecord::new("  ", QuantityBasis::Volume);
        assert_eq!(epd.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let epd = EpdRecord::new("Negative density", QuantityBasis::Mass).with_density(-100.0);
        assert!(epd.validate().is_err());
    }

    #[test]
    fn test_validate_checks_metrics() {
        let epd = EpdRecord::new("Mixed granularity", QuantityBasis::Volume).with_metric(
            EnvironmentalMetric::new(MetricKind::ClimateChangeTotal)
                .with_indicator(Module::A1ToA3, 10.0)
                .with_indicator(Module::A1, 4.0),
        );
        let err = epd.validate().unwrap_err();
        assert_eq!(err.error_code(), "MIXED_MODULE_GRANULARITY");
    }

    #[test]
    fn test_usable_density() {
        assert_eq!(
            EpdRecord::new("x", QuantityBasis::Mass)
                .with_density(2400.0)
                .usable_density(),
            Some(2400.0)
        );
        assert_eq!(EpdRecord::new("x", QuantityBasis::Mass).usable_density(), None);
        assert_eq!(
            EpdRecord::new("x", QuantityBasis::Mass)
                .with_density(0.0)
                .usable_density(),
            None
        );
    }

    #[test]
    fn test_filtered_metrics_empty_filter_returns_all() {
        let epd = EpdRecord::new("Full", QuantityBasis::Volume)
            .with_metric(gwp_metric())
            .with_metric(
                EnvironmentalMetric::new(MetricKind::OzoneDepletion)
                    .with_indicator(Module::A1ToA3, 1.0e-7),
            );
        let mut log = DiagnosticLog::new();
        let metrics = epd.filtered_metrics(&[], &mut log);
        assert_eq!(metrics.len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_filtered_metrics_reports_misses_and_continues() {
        let epd = EpdRecord::new("GWP only", QuantityBasis::Volume).with_metric(gwp_metric());
        let mut log = DiagnosticLog::new();
        let metrics = epd.filtered_metrics(
            &[MetricKind::ClimateChangeTotal, MetricKind::AcidificationPotential],
            &mut log,
        );
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].kind, MetricKind::ClimateChangeTotal);
        let misses: Vec<_> = log.of_kind(DiagnosticKind::MetricNotFound).collect();
        assert_eq!(misses.len(), 1);
        assert!(misses[0].message.contains("GWP only"));
        assert!(misses[0].message.contains("AP"));
    }

    #[test]
    fn test_source_expiry() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let source = EpdSource::new("EC3")
            .with_dataset_id("ec3-4401")
            .with_published(date(2021, 3, 1))
            .with_valid_until(date(2026, 3, 1));
        assert!(!source.is_expired(date(2026, 3, 1)));
        assert!(source.is_expired(date(2026, 3, 2)));
        assert!(!EpdSource::new("EC3").is_expired(date(2030, 1, 1)));
    }

    #[test]
    fn test_in_memory_store_fetch() {
        let mut store = InMemoryEpdStore::new();
        store.insert(EpdRecord::new("C30/37", QuantityBasis::Volume).with_metric(gwp_metric()));
        assert_eq!(store.len(), 1);

        let fetched = store.fetch("C30/37").unwrap();
        assert_eq!(fetched.name, "C30/37");

        let err = store.fetch("S355").unwrap_err();
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
    }

    #[test]
    fn test_serde_defaults_quantity_per_declared_unit() {
        let json = r#"{
            "name": "Plasterboard",
            "quantity_basis": "Area",
            "metrics": []
        }"#;
        let epd: EpdRecord = serde_json::from_str(json).unwrap();
        assert_eq!(epd.quantity_per_declared_unit, 1.0);
        assert_eq!(epd.quantity_basis, QuantityBasis::Area);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let epd = EpdRecord::new("Steel section", QuantityBasis::Mass)
            .with_density(7850.0)
            .with_metric(gwp_metric())
            .with_source(EpdSource::new("Bauforumstahl").with_dataset_id("bfs-2019-07"));
        let json = serde_json::to_string(&epd).unwrap();
        let roundtrip: EpdRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(epd, roundtrip);
    }
}
