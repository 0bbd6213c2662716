//! # Takeoff Evaluation
//!
//! Walks a material takeoff item by item: merge templates, resolve each
//! item's quantity against its EPD's basis, scale the EPD's metrics, and
//! accumulate the material results in takeoff order.
//!
//! Failure handling is asymmetric. A material without an EPD fails the
//! whole batch under the default policy. A quantity that resolves to NaN
//! is logged and flows through as NaN instead, so partial model data
//! still produces a traceable result.

use crate::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::errors::{LcaError, LcaResult};
use crate::evaluate::{evaluate_epd, resolve_quantity, EvaluationConfig, MissingEpdPolicy};
use crate::results::MaterialResult;
use crate::takeoff::{apply_template, MaterialProfile, MaterialTakeoff};

/// Evaluate every item of a takeoff, in order.
///
/// Template materials, when given, are merged onto the takeoff's materials
/// by name before evaluation, with `config.prioritise_template` picking the
/// winning side. Returns one material result per item per matching metric.
pub fn evaluate_material_takeoff(
    takeoff: &MaterialTakeoff,
    templates: &[MaterialProfile],
    config: &EvaluationConfig,
    log: &mut DiagnosticLog,
) -> LcaResult<Vec<MaterialResult>> {
    let merged;
    let items = if templates.is_empty() {
        &takeoff.items
    } else {
        merged = apply_template(takeoff, templates, config.prioritise_template);
        &merged.items
    };

    let mut results = Vec::new();
    for item in items {
        let material = &item.material.name;
        let epd = match &item.material.epd {
            Some(epd) => epd,
            None => match config.missing_epd {
                MissingEpdPolicy::AbortBatch => {
                    log.error(
                        DiagnosticKind::MissingEpd,
                        format!("material '{}' has no EPD, aborting the takeoff", material),
                    );
                    return Err(LcaError::no_epd_on_material(material));
                }
                MissingEpdPolicy::SkipItem => {
                    log.warning(
                        DiagnosticKind::MissingEpd,
                        format!("material '{}' has no EPD and was skipped", material),
                    );
                    continue;
                }
            },
        };

        let quantity = match resolve_quantity(item, epd, config.nan_quantity, log) {
            Ok(quantity) => quantity,
            Err(error) => {
                log.error(
                    DiagnosticKind::QuantityFailure,
                    format!("takeoff evaluation aborted: {}", error),
                );
                return Err(error);
            }
        };

        results.extend(evaluate_epd(
            Some(epd),
            material,
            quantity,
            &config.metric_filter,
            log,
        )?);
    }
    Ok(results)
}
