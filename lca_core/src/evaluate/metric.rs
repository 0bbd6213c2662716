//! # Metric Evaluation
//!
//! Scales an EPD's declared metrics by a resolved quantity, producing one
//! material result per matching metric. Declared values are per declared
//! unit; when the declaration covers a multiple of the basis unit the
//! values are first normalized by `quantity_per_declared_unit`, and that
//! substitution is noted on the log since it materially changes the result.

use std::collections::BTreeMap;

use crate::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::epd::EpdRecord;
use crate::errors::{LcaError, LcaResult};
use crate::metrics::MetricKind;
use crate::modules::Module;
use crate::results::MaterialResult;

/// Evaluate an EPD's metrics for a material at a resolved quantity.
///
/// `None` for the EPD fails with a missing-EPD error rather than returning
/// empty results. An empty filter evaluates every declared metric; filter
/// kinds the EPD does not declare are reported on the log and skipped. NaN
/// indicator values stay NaN in the scaled output.
pub fn evaluate_epd(
    epd: Option<&EpdRecord>,
    material_name: &str,
    quantity: f64,
    metric_filter: &[MetricKind],
    log: &mut DiagnosticLog,
) -> LcaResult<Vec<MaterialResult>> {
    let epd = epd.ok_or_else(|| LcaError::missing_epd(material_name))?;

    let declared_quantity = epd.quantity_per_declared_unit;
    if !(declared_quantity.is_finite() && declared_quantity > 0.0) {
        return Err(LcaError::invalid_input(
            "quantity_per_declared_unit",
            declared_quantity.to_string(),
            format!("EPD '{}' declares a non-positive quantity", epd.name),
        ));
    }
    if declared_quantity != 1.0 {
        log.note(
            DiagnosticKind::UnitNormalization,
            format!(
                "values of EPD '{}' normalized by its declared quantity of {} before scaling",
                epd.name, declared_quantity
            ),
        );
    }

    epd.filtered_metrics(metric_filter, log)
        .into_iter()
        .map(|metric| {
            let indicators: BTreeMap<Module, f64> = metric
                .indicators
                .iter()
                .map(|(&module, &value)| (module, value / declared_quantity * quantity))
                .collect();
            let biogenic_carbon = metric
                .biogenic_carbon
                .map(|value| value / declared_quantity * quantity);
            MaterialResult::new(
                material_name,
                &epd.name,
                metric.kind,
                indicators,
                biogenic_carbon,
            )
        })
        .collect()
}
