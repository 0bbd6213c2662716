//! # Element Evaluation
//!
//! Entry points taking a building element. The general path breaks the
//! element into its material takeoff and evaluates each material against
//! its own EPD; the by-basis paths evaluate the whole element against one
//! supplied EPD, failing fast when the EPD's basis does not match.

use crate::diagnostics::DiagnosticLog;
use crate::elements::{element_takeoff, ElementQuantities, ObjectCategory, ScopeType};
use crate::epd::{EpdRecord, QuantityBasis};
use crate::errors::{LcaError, LcaResult};
use crate::evaluate::{evaluate_material_takeoff, EvaluationConfig};
use crate::metrics::MetricKind;
use crate::results::{element_results, embodied_carbon, ElementResult};
use crate::takeoff::{MaterialProfile, MaterialTakeoff, TakeoffItem};

/// Evaluate an element against its materials' own EPDs, tagging the
/// results with an explicit scope and category.
///
/// The element is broken into its material takeoff, each material is
/// evaluated per the takeoff rules, and the material results are folded
/// into one element result per metric kind.
pub fn evaluate_element_tagged(
    element: &impl ElementQuantities,
    scope: ScopeType,
    category: ObjectCategory,
    templates: &[MaterialProfile],
    config: &EvaluationConfig,
    log: &mut DiagnosticLog,
) -> LcaResult<Vec<ElementResult>> {
    let takeoff = element_takeoff(element);
    if takeoff.is_empty() {
        return Err(LcaError::invalid_input(
            "material_composition",
            "[]",
            format!("element {} declares no materials", element.object_id()),
        ));
    }
    let material_results = evaluate_material_takeoff(&takeoff, templates, config, log)?;
    Ok(element_results(
        element.object_id(),
        scope,
        category,
        material_results,
        log,
    ))
}

/// Evaluate an element, deriving scope and category from the element itself
pub fn evaluate_element(
    element: &impl ElementQuantities,
    templates: &[MaterialProfile],
    config: &EvaluationConfig,
    log: &mut DiagnosticLog,
) -> LcaResult<Vec<ElementResult>> {
    let category = element.category();
    evaluate_element_tagged(
        element,
        category.default_scope(),
        category,
        templates,
        config,
        log,
    )
}

/// Evaluate an element against one volume-basis EPD
pub fn evaluate_by_volume(
    element: &impl ElementQuantities,
    epd: &EpdRecord,
    metric_filter: &[MetricKind],
    log: &mut DiagnosticLog,
) -> LcaResult<Vec<ElementResult>> {
    evaluate_with_basis(element, epd, QuantityBasis::Volume, metric_filter, log)
}

/// Evaluate an element against one mass-basis EPD
pub fn evaluate_by_mass(
    element: &impl ElementQuantities,
    epd: &EpdRecord,
    metric_filter: &[MetricKind],
    log: &mut DiagnosticLog,
) -> LcaResult<Vec<ElementResult>> {
    evaluate_with_basis(element, epd, QuantityBasis::Mass, metric_filter, log)
}

/// Evaluate an element against one area-basis EPD
pub fn evaluate_by_area(
    element: &impl ElementQuantities,
    epd: &EpdRecord,
    metric_filter: &[MetricKind],
    log: &mut DiagnosticLog,
) -> LcaResult<Vec<ElementResult>> {
    evaluate_with_basis(element, epd, QuantityBasis::Area, metric_filter, log)
}

/// Evaluate an element against one length-basis EPD
pub fn evaluate_by_length(
    element: &impl ElementQuantities,
    epd: &EpdRecord,
    metric_filter: &[MetricKind],
    log: &mut DiagnosticLog,
) -> LcaResult<Vec<ElementResult>> {
    evaluate_with_basis(element, epd, QuantityBasis::Length, metric_filter, log)
}

/// The element's embodied carbon in kg CO2-eq, evaluated over the climate
/// change metrics its EPDs declare. `None` when no climate change metric
/// was found on any material.
pub fn evaluate_embodied_carbon(
    element: &impl ElementQuantities,
    templates: &[MaterialProfile],
    config: &EvaluationConfig,
    log: &mut DiagnosticLog,
) -> LcaResult<Option<f64>> {
    let climate_config = EvaluationConfig {
        metric_filter: MetricKind::CLIMATE_CHANGE.to_vec(),
        ..config.clone()
    };
    let results = evaluate_element(element, templates, &climate_config, log)?;
    Ok(embodied_carbon(&results))
}

/// Evaluate the whole element as one takeoff item against one EPD,
/// whatever EPDs its materials might carry
fn evaluate_with_basis(
    element: &impl ElementQuantities,
    epd: &EpdRecord,
    expected: QuantityBasis,
    metric_filter: &[MetricKind],
    log: &mut DiagnosticLog,
) -> LcaResult<Vec<ElementResult>> {
    if epd.quantity_basis != expected {
        return Err(LcaError::unsupported_quantity_basis(
            &epd.name,
            expected,
            epd.quantity_basis,
        ));
    }

    let mut item = TakeoffItem::new(element_profile(element).with_epd(epd.clone()));
    item.volume = element.solid_volume();
    item.area = element.area();
    item.length = element.length();
    let takeoff = MaterialTakeoff::from_items(vec![item]);

    let config = EvaluationConfig::new().with_metric_filter(metric_filter.iter().copied());
    let material_results = evaluate_material_takeoff(&takeoff, &[], &config, log)?;
    let category = element.category();
    Ok(element_results(
        element.object_id(),
        category.default_scope(),
        category,
        material_results,
        log,
    ))
}

/// A single profile standing for the whole element. A one-material element
/// keeps its profile (and with it the density the mass basis may need);
/// anything else gets a profile named after its materials.
fn element_profile(element: &impl ElementQuantities) -> MaterialProfile {
    let mut composition = element.material_composition();
    match composition.len() {
        0 => MaterialProfile::new(element.category().description()),
        1 => {
            let (mut profile, _) = composition.remove(0);
            profile.epd = None;
            profile
        }
        _ => {
            let mut names: Vec<String> = Vec::new();
            for (profile, _) in composition {
                if !names.contains(&profile.name) {
                    names.push(profile.name);
                }
            }
            MaterialProfile::new(names.join(" + "))
        }
    }
}
