//! # lca_core - Environmental Impact Evaluation Engine
//!
//! `lca_core` computes the life cycle environmental impacts of building
//! elements from Environmental Product Declarations (EPDs). It resolves the
//! physical quantity an EPD is declared against (volume, mass via density,
//! area, piece counts, ...), scales the declared indicator values by it, and
//! sums results from single materials up through elements, reporting scopes,
//! and whole projects.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every evaluation is a pure function of its inputs
//! - **JSON-First**: EPDs, takeoffs, and results all serialize cleanly
//! - **Rich Errors**: structured error types, not just strings
//! - **Nothing Silent**: omitted modules, unit normalization, and density
//!   substitutions are reported on a diagnostic log, never dropped
//!
//! ## Quick Start
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
//! // An EPD declared per m3 of concrete
//! let epd = EpdRecord::new("C30/37 ready-mix", QuantityBasis::Volume).with_metric(
//!     EnvironmentalMetric::new(MetricKind::ClimateChangeTotal)
//!         .with_indicator(Module::A1ToA3, 280.0),
//! );
//!
//! // A 2 m3 beam of that concrete
//! let beam = BulkElement::new("Beam B-1", ObjectCategory::Beam, 2.0)
//!     .of_material(MaterialProfile::new("Concrete").with_epd(epd));
//!
//! let mut log = DiagnosticLog::new();
//! let results = evaluate_element(&beam, &[], &EvaluationConfig::default(), &mut log).unwrap();
//! assert_eq!(results[0].value(Module::A1ToA3), 560.0);
//! ```
//!
//! ## Modules
//!
//! - [`modules`] - EN 15978 life cycle stages (A1-A3, B1-B7, C1-C4, D)
//! - [`metrics`] - impact categories and per-module indicator values
//! - [`epd`] - EPD records, quantity bases, and providers
//! - [`takeoff`] - material takeoffs and template merging
//! - [`elements`] - element quantities, object categories, and scopes
//! - [`evaluate`] - the evaluation pipeline and its configuration
//! - [`results`] - result types and the summing rules between levels
//! - [`diagnostics`] - the note/warning/error side channel
//! - [`errors`] - structured error types

pub mod diagnostics;
pub mod elements;
pub mod epd;
pub mod errors;
pub mod evaluate;
pub mod metrics;
pub mod modules;
pub mod results;
pub mod takeoff;

// Re-export commonly used types at crate root for convenience
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, Severity};
pub use elements::{BulkElement, ElementQuantities, ObjectCategory, ScopeType};
pub use epd::{EpdProvider, EpdRecord, EpdSource, InMemoryEpdStore, QuantityBasis};
pub use errors::{LcaError, LcaResult};
pub use evaluate::{
    evaluate_element, evaluate_material_takeoff, evaluate_project, evaluate_scope,
    EvaluationConfig, MissingEpdPolicy, NanQuantityPolicy,
};
pub use metrics::{EnvironmentalMetric, MetricKind};
pub use modules::Module;
pub use results::{AggregateTotal, ElementResult, MaterialResult, ProjectResult, ScopeResult};
pub use takeoff::{MaterialProfile, MaterialTakeoff, TakeoffItem};
