//! # Diagnostics
//!
//! A typed side channel for notes, warnings, and errors raised during an
//! evaluation. Entries never alter control flow by themselves; evaluation
//! functions record here *in addition to* returning errors, so a caller can
//! always reconstruct what happened to which object.
//!
//! A fresh [`DiagnosticLog`] is passed mutably through an evaluation call and
//! inspected afterwards:
//!
//! ```rust
//! use lca_core::diagnostics::{DiagnosticKind, DiagnosticLog};
//!
//! let mut log = DiagnosticLog::new();
//! log.note(DiagnosticKind::UnitNormalization, "values normalized by 2");
//! assert!(log.has(DiagnosticKind::UnitNormalization));
//! assert_eq!(log.notes().count(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// How serious a diagnostic entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational, evaluation unaffected
    Note,
    /// Something was skipped or substituted, totals may be incomplete
    Warning,
    /// A failure occurred (possibly alongside a returned error)
    Error,
}

/// What a diagnostic entry is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Modules absent from some group members were left out of a summed result
    OmittedModules,
    /// Metric values were divided by the EPD's quantity-per-declared-unit
    UnitNormalization,
    /// Mass conversion used the EPD's density instead of the material's
    MassFromEpdDensity,
    /// A resolved quantity was NaN and flowed through into the results
    NanQuantity,
    /// A requested metric kind was not present on the EPD
    MetricNotFound,
    /// A takeoff material had no EPD assigned
    MissingEpd,
    /// Quantity resolution failed and the evaluation was aborted
    QuantityFailure,
    /// An element failed to evaluate and was dropped from scope totals
    ElementSkipped,
    /// A scope inventory entry used a category unusual for that scope
    AtypicalCategory,
}

impl DiagnosticKind {
    /// Short code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::OmittedModules => "OMITTED_MODULES",
            DiagnosticKind::UnitNormalization => "UNIT_NORMALIZATION",
            DiagnosticKind::MassFromEpdDensity => "MASS_FROM_EPD_DENSITY",
            DiagnosticKind::NanQuantity => "NAN_QUANTITY",
            DiagnosticKind::MetricNotFound => "METRIC_NOT_FOUND",
            DiagnosticKind::MissingEpd => "MISSING_EPD",
            DiagnosticKind::QuantityFailure => "QUANTITY_FAILURE",
            DiagnosticKind::ElementSkipped => "ELEMENT_SKIPPED",
            DiagnosticKind::AtypicalCategory => "ATYPICAL_CATEGORY",
        }
    }
}

/// One recorded diagnostic entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Collects diagnostics raised during an evaluation call.
///
/// Entries are kept in recording order. The log holds no evaluation state;
/// dropping it loses only the messages, never results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticLog {
    pub entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    /// Create an empty log
    pub fn new() -> Self {
        DiagnosticLog::default()
    }

    /// Record a note
    pub fn note(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.record(Severity::Note, kind, message);
    }

    /// Record a warning
    pub fn warning(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.record(Severity::Warning, kind, message);
    }

    /// Record an error-severity entry
    pub fn error(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.record(Severity::Error, kind, message);
    }

    fn record(&mut self, severity: Severity, kind: DiagnosticKind, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity,
            kind,
            message: message.into(),
        });
    }

    /// All note-severity entries
    pub fn notes(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Note)
    }

    /// All warning-severity entries
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    /// All error-severity entries
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.severity == severity)
    }

    /// All entries of a given kind
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    /// Whether any entry of the given kind was recorded
    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
