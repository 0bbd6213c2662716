//! # Error Types
//!
//! Structured error types for lca_core. Every failure names the object,
//! material, or dataset involved so callers can surface a specific message
//! instead of a silent zero.
//!
//! ## Example
//!
//! ```rust
//! use lca_core::errors::{LcaError, LcaResult};
//!
//! fn validate_declared_units(value: f64) -> LcaResult<()> {
//!     if value <= 0.0 {
//!         return Err(LcaError::invalid_input(
//!             "quantity_per_declared_unit",
//!             value.to_string(),
//!             "Declared unit count must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::epd::QuantityBasis;
use crate::metrics::MetricKind;
use crate::modules::Module;

/// Result type alias for lca_core operations
pub type LcaResult<T> = Result<T, LcaError>;

/// Structured error type for evaluation operations.
///
/// Variants fall into three families with different propagation rules.
/// Quantity-resolution errors abort the single evaluation being attempted;
/// evaluation errors abort the whole batch under the default strict policy.
/// Model errors reject invalid data at construction time.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum LcaError {
    // === Quantity resolution ===
    /// Volume-basis resolution found no usable solid volume
    #[error("No usable volume for material '{material}': {reason}")]
    NoVolume { material: String, reason: String },

    /// Mass-basis resolution found no density on the EPD or the material
    #[error("No density available for material '{material}' evaluated against mass-basis EPD '{epd}'")]
    NoDensity { material: String, epd: String },

    /// The EPD's basis needs a 2D/1D measurement the element does not expose
    #[error("EPD '{epd}' is declared per {basis} but material '{material}' exposes no matching measurement")]
    UnsupportedElementShape {
        material: String,
        epd: String,
        basis: QuantityBasis,
    },

    /// The EPD declares no quantity basis at all
    #[error("EPD '{epd}' has an undefined quantity basis and cannot be evaluated")]
    UndefinedBasis { epd: String },

    /// A resolved quantity came out negative or NaN
    #[error("Resolved {basis} quantity for material '{material}' is {value}")]
    NegativeOrNanQuantity {
        material: String,
        basis: QuantityBasis,
        value: String,
    },

    // === Evaluation ===
    /// Evaluation was invoked without an EPD
    #[error("No EPD provided for evaluation of '{context}'")]
    MissingEpd { context: String },

    /// A takeoff item's material carries no EPD
    #[error("No EPD assigned to material '{material}'; unable to evaluate takeoff")]
    NoEpdOnMaterial { material: String },

    /// A basis-specific entry point was called with an EPD of another basis
    #[error("EPD '{epd}' is declared per {actual} and cannot be evaluated by {requested}")]
    UnsupportedQuantityBasis {
        epd: String,
        requested: QuantityBasis,
        actual: QuantityBasis,
    },

    // === Model ===
    /// A metric mixes an aggregate module with one of its own parts
    #[error("Metric {kind} mixes aggregate module {aggregate} with its part {part}")]
    MixedModuleGranularity {
        kind: MetricKind,
        aggregate: Module,
        part: Module,
    },

    /// A biogenic carbon scalar was set on a kind outside the climate-change family
    #[error("Metric kind {kind} does not carry a biogenic carbon scalar")]
    MisplacedBiogenicCarbon { kind: MetricKind },

    /// Results of different metric kinds cannot be summed together
    #[error("Results of kind {left} cannot be combined with results of kind {right}")]
    MismatchedMetricKinds { left: MetricKind, right: MetricKind },

    /// An input value is invalid (out of range, wrong shape, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A dataset record could not be found by the EPD provider
    #[error("Dataset record '{identifier}' not found")]
    RecordNotFound { identifier: String },
}

impl LcaError {
    /// Create a NoVolume error
    pub fn no_volume(material: impl Into<String>, reason: impl Into<String>) -> Self {
        LcaError::NoVolume {
            material: material.into(),
            reason: reason.into(),
        }
    }

    /// Create a NoDensity error
    pub fn no_density(material: impl Into<String>, epd: impl Into<String>) -> Self {
        LcaError::NoDensity {
            material: material.into(),
            epd: epd.into(),
        }
    }

    /// Create an UnsupportedElementShape error
    pub fn unsupported_element_shape(
        material: impl Into<String>,
        epd: impl Into<String>,
        basis: QuantityBasis,
    ) -> Self {
        LcaError::UnsupportedElementShape {
            material: material.into(),
            epd: epd.into(),
            basis,
        }
    }

    /// Create an UndefinedBasis error
    pub fn undefined_basis(epd: impl Into<String>) -> Self {
        LcaError::UndefinedBasis { epd: epd.into() }
    }

    /// Create a NegativeOrNanQuantity error
    pub fn negative_or_nan_quantity(
        material: impl Into<String>,
        basis: QuantityBasis,
        value: f64,
    ) -> Self {
        LcaError::NegativeOrNanQuantity {
            material: material.into(),
            basis,
            value: value.to_string(),
        }
    }

    /// Create a MissingEpd error
    pub fn missing_epd(context: impl Into<String>) -> Self {
        LcaError::MissingEpd {
            context: context.into(),
        }
    }

    /// Create a NoEpdOnMaterial error
    pub fn no_epd_on_material(material: impl Into<String>) -> Self {
        LcaError::NoEpdOnMaterial {
            material: material.into(),
        }
    }

    /// Create an UnsupportedQuantityBasis error
    pub fn unsupported_quantity_basis(
        epd: impl Into<String>,
        requested: QuantityBasis,
        actual: QuantityBasis,
    ) -> Self {
        LcaError::UnsupportedQuantityBasis {
            epd: epd.into(),
            requested,
            actual,
        }
    }

    /// Create a MixedModuleGranularity error
    pub fn mixed_module_granularity(kind: MetricKind, aggregate: Module, part: Module) -> Self {
        LcaError::MixedModuleGranularity {
            kind,
            aggregate,
            part,
        }
    }

    /// Create a MisplacedBiogenicCarbon error
    pub fn misplaced_biogenic_carbon(kind: MetricKind) -> Self {
        LcaError::MisplacedBiogenicCarbon { kind }
    }

    /// Create a MismatchedMetricKinds error
    pub fn mismatched_metric_kinds(left: MetricKind, right: MetricKind) -> Self {
        LcaError::MismatchedMetricKinds { left, right }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LcaError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a RecordNotFound error
    pub fn record_not_found(identifier: impl Into<String>) -> Self {
        LcaError::RecordNotFound {
            identifier: identifier.into(),
        }
    }

    /// Whether this error came from quantity resolution (as opposed to
    /// evaluation orchestration or model validation)
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            LcaError::NoVolume { .. }
                | LcaError::NoDensity { .. }
                | LcaError::UnsupportedElementShape { .. }
                | LcaError::UndefinedBasis { .. }
                | LcaError::NegativeOrNanQuantity { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            LcaError::NoVolume { .. } => "NO_VOLUME",
            LcaError::NoDensity { .. } => "NO_DENSITY",
            LcaError::UnsupportedElementShape { .. } => "UNSUPPORTED_ELEMENT_SHAPE",
            LcaError::UndefinedBasis { .. } => "UNDEFINED_BASIS",
            LcaError::NegativeOrNanQuantity { .. } => "NEGATIVE_OR_NAN_QUANTITY",
            LcaError::MissingEpd { .. } => "MISSING_EPD",
            LcaError::NoEpdOnMaterial { .. } => "NO_EPD_ON_MATERIAL",
            LcaError::UnsupportedQuantityBasis { .. } => "UNSUPPORTED_QUANTITY_BASIS",
            LcaError::MixedModuleGranularity { .. } => "MIXED_MODULE_GRANULARITY",
            LcaError::MisplacedBiogenicCarbon { .. } => "MISPLACED_BIOGENIC_CARBON",
            LcaError::MismatchedMetricKinds { .. } => "MISMATCHED_METRIC_KINDS",
            LcaError::InvalidInput { .. } => "INVALID_INPUT",
            LcaError::RecordNotFound { .. } => "RECORD_NOT_FOUND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = LcaError::no_density("Concrete C30/37", "Generic concrete EPD");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: LcaError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LcaError::no_epd_on_material("Steel S355").error_code(),
            "NO_EPD_ON_MATERIAL"
        );
        assert_eq!(
            LcaError::undefined_basis("Unknown dataset").error_code(),
            "UNDEFINED_BASIS"
        );
    }

    #[test]
    fn test_resolution_error_family() {
        assert!(LcaError::no_volume("Timber", "volume is unset").is_resolution_error());
        assert!(
            LcaError::negative_or_nan_quantity("Timber", QuantityBasis::Mass, -1.0)
                .is_resolution_error()
        );
        assert!(!LcaError::no_epd_on_material("Timber").is_resolution_error());
        assert!(!LcaError::missing_epd("beam takeoff").is_resolution_error());
    }

    #[test]
    fn test_message_names_the_object() {
        let error = LcaError::unsupported_element_shape(
            "Glass pane",
            "Flat glass EPD",
            QuantityBasis::Area,
        );
        let message = error.to_string();
        assert!(message.contains("Glass pane"));
        assert!(message.contains("Flat glass EPD"));
    }
}
