//! # Evaluation Results
//!
//! Result types for every aggregation level, material through project, plus
//! the summing rules between them. A module only enters a summed mapping
//! when every contributing result declares it; anything dropped by that rule
//! is reported on the diagnostic log rather than silently treated as zero.
//! NaN indicator values propagate through sums untouched.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::elements::{ObjectCategory, ScopeType};
use crate::errors::{LcaError, LcaResult};
use crate::metrics::{registry, MetricKind};
use crate::modules::Module;

// ============================================================================
// Material Level
// ============================================================================

/// One metric of one EPD scaled by a resolved quantity.
///
/// Indicator values are in the kind's reporting unit for the full evaluated
/// quantity, no longer per declared unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialResult {
    pub material_name: String,
    pub epd_name: String,
    pub kind: MetricKind,
    pub indicators: BTreeMap<Module, f64>,
    /// kg C for the evaluated quantity, climate change kinds only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biogenic_carbon: Option<f64>,
}

impl MaterialResult {
    /// Create a result, rejecting a biogenic carbon figure on a kind that
    /// does not admit one
    pub fn new(
        material_name: impl Into<String>,
        epd_name: impl Into<String>,
        kind: MetricKind,
        indicators: BTreeMap<Module, f64>,
        biogenic_carbon: Option<f64>,
    ) -> LcaResult<Self> {
        registry::spec(kind).validate_biogenic(biogenic_carbon)?;
        Ok(MaterialResult {
            material_name: material_name.into(),
            epd_name: epd_name.into(),
            kind,
            indicators,
            biogenic_carbon,
        })
    }

    /// Indicator value for a module, NaN when not present
    pub fn value(&self, module: Module) -> f64 {
        self.indicators.get(&module).copied().unwrap_or(f64::NAN)
    }

    pub fn get(&self, module: Module) -> Option<f64> {
        self.indicators.get(&module).copied()
    }

    /// Sum over all present modules. NaN values propagate into the total.
    pub fn total(&self) -> f64 {
        self.indicators.values().sum()
    }

    pub fn modules(&self) -> impl Iterator<Item = Module> + '_ {
        self.indicators.keys().copied()
    }
}

// ============================================================================
// Element Level
// ============================================================================

/// One metric kind summed across an element's material results.
///
/// The contributing material results are retained in evaluation order so a
/// summed figure can always be traced back to its parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementResult {
    pub object_id: Uuid,
    pub scope: ScopeType,
    pub category: ObjectCategory,
    pub kind: MetricKind,
    pub indicators: BTreeMap<Module, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biogenic_carbon: Option<f64>,
    pub material_results: Vec<MaterialResult>,
}

impl ElementResult {
    /// Indicator value for a module, NaN when not present
    pub fn value(&self, module: Module) -> f64 {
        self.indicators.get(&module).copied().unwrap_or(f64::NAN)
    }

    pub fn get(&self, module: Module) -> Option<f64> {
        self.indicators.get(&module).copied()
    }

    /// Sum over all present modules. NaN values propagate into the total.
    pub fn total(&self) -> f64 {
        self.indicators.values().sum()
    }
}

// ============================================================================
// Scope and Project Level
// ============================================================================

/// One metric kind summed across a group of element results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTotal {
    pub kind: MetricKind,
    pub indicators: BTreeMap<Module, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biogenic_carbon: Option<f64>,
}

impl AggregateTotal {
    pub fn get(&self, module: Module) -> Option<f64> {
        self.indicators.get(&module).copied()
    }

    /// Sum over all present modules. NaN values propagate into the total.
    pub fn total(&self) -> f64 {
        self.indicators.values().sum()
    }
}

/// Everything evaluated under one scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeResult {
    pub scope: ScopeType,
    pub element_results: Vec<ElementResult>,
    pub totals: Vec<AggregateTotal>,
}

impl ScopeResult {
    /// The scope total for a kind, if any element reported it
    pub fn total_of(&self, kind: MetricKind) -> Option<&AggregateTotal> {
        self.totals.iter().find(|t| t.kind == kind)
    }
}

/// A whole project's scopes and cross-scope totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResult {
    pub scopes: Vec<ScopeResult>,
    pub totals: Vec<AggregateTotal>,
}

impl ProjectResult {
    /// The project total for a kind, if any scope reported it
    pub fn total_of(&self, kind: MetricKind) -> Option<&AggregateTotal> {
        self.totals.iter().find(|t| t.kind == kind)
    }
}

// ============================================================================
// Summing
// ============================================================================

/// Sum module-keyed values across several mappings.
///
/// With `only_if_all_present`, a module enters the sum only when every
/// mapping declares it; partially declared modules come back in the second
/// return value, in reporting order. Without it, every declared module is
/// summed over the mappings that have it.
pub fn sum_module_values(
    maps: &[&BTreeMap<Module, f64>],
    only_if_all_present: bool,
) -> (BTreeMap<Module, f64>, Vec<Module>) {
    let mut present_anywhere: BTreeSet<Module> = BTreeSet::new();
    for map in maps {
        present_anywhere.extend(map.keys().copied());
    }

    let mut summed = BTreeMap::new();
    let mut omitted = Vec::new();
    for module in present_anywhere {
        let in_all = maps.iter().all(|map| map.contains_key(&module));
        if only_if_all_present && !in_all {
            omitted.push(module);
            continue;
        }
        let total: f64 = maps.iter().filter_map(|map| map.get(&module)).sum();
        summed.insert(module, total);
    }
    (summed, omitted)
}

/// Biogenic carbon only survives a sum when every member carries it,
/// mirroring the module rule
fn sum_biogenic<I: IntoIterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0usize;
    for value in values {
        match value {
            Some(v) => {
                total += v;
                count += 1;
            }
            None => return None,
        }
    }
    if count == 0 {
        None
    } else {
        Some(total)
    }
}

fn module_list(modules: &[Module]) -> String {
    modules
        .iter()
        .map(|m| m.code())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sum same-kind material results into one, e.g. to merge a material that
/// appears in several layers of a takeoff.
///
/// Fails when the results mix metric kinds or the list is empty. Modules
/// dropped by the all-present rule are noted on the log.
pub fn sum_material_results(
    results: &[MaterialResult],
    only_if_all_present: bool,
    log: &mut DiagnosticLog,
) -> LcaResult<MaterialResult> {
    let first = results.first().ok_or_else(|| {
        LcaError::invalid_input("results", "[]", "cannot sum an empty result list")
    })?;
    for other in &results[1..] {
        if other.kind != first.kind {
            return Err(LcaError::mismatched_metric_kinds(first.kind, other.kind));
        }
    }

    let maps: Vec<&BTreeMap<Module, f64>> = results.iter().map(|r| &r.indicators).collect();
    let (indicators, omitted) = sum_module_values(&maps, only_if_all_present);
    if !omitted.is_empty() {
        log.note(
            DiagnosticKind::OmittedModules,
            format!(
                "modules {} omitted from {} sum over materials {}: not declared on every result",
                module_list(&omitted),
                first.kind,
                joined_names(results, |r| r.material_name.as_str()),
            ),
        );
    }
    let biogenic_carbon = sum_biogenic(results.iter().map(|r| r.biogenic_carbon));

    MaterialResult::new(
        joined_names(results, |r| r.material_name.as_str()),
        joined_names(results, |r| r.epd_name.as_str()),
        first.kind,
        indicators,
        biogenic_carbon,
    )
}

fn joined_names<T, F: Fn(&T) -> &str>(items: &[T], name: F) -> String {
    let mut names: Vec<&str> = Vec::new();
    for item in items {
        let n = name(item);
        if !names.contains(&n) {
            names.push(n);
        }
    }
    names.join(" + ")
}

/// Fold one element's material results into element results, one per metric
/// kind present, in kind order.
///
/// Modules dropped by the all-present rule are noted on the log, naming the
/// element and the modules.
pub fn element_results(
    object_id: Uuid,
    scope: ScopeType,
    category: ObjectCategory,
    material_results: Vec<MaterialResult>,
    log: &mut DiagnosticLog,
) -> Vec<ElementResult> {
    let mut groups: BTreeMap<MetricKind, Vec<MaterialResult>> = BTreeMap::new();
    for result in material_results {
        groups.entry(result.kind).or_default().push(result);
    }

    groups
        .into_iter()
        .map(|(kind, members)| {
            let maps: Vec<&BTreeMap<Module, f64>> =
                members.iter().map(|r| &r.indicators).collect();
            let (indicators, omitted) = sum_module_values(&maps, true);
            if !omitted.is_empty() {
                log.note(
                    DiagnosticKind::OmittedModules,
                    format!(
                        "modules {} omitted from {} sum for element {}: not declared on every material result",
                        module_list(&omitted),
                        kind,
                        object_id,
                    ),
                );
            }
            let biogenic_carbon = sum_biogenic(members.iter().map(|r| r.biogenic_carbon));
            ElementResult {
                object_id,
                scope,
                category,
                kind,
                indicators,
                biogenic_carbon,
                material_results: members,
            }
        })
        .collect()
}

/// Sum element results into one total per metric kind, in kind order.
///
/// `context` names the grouping in omission notes, e.g. "scope Structures".
pub fn group_totals(
    element_results: &[ElementResult],
    only_if_all_present: bool,
    context: &str,
    log: &mut DiagnosticLog,
) -> Vec<AggregateTotal> {
    let mut groups: BTreeMap<MetricKind, Vec<&ElementResult>> = BTreeMap::new();
    for result in element_results {
        groups.entry(result.kind).or_default().push(result);
    }

    groups
        .into_iter()
        .map(|(kind, members)| {
            let maps: Vec<&BTreeMap<Module, f64>> =
                members.iter().map(|r| &r.indicators).collect();
            let (indicators, omitted) = sum_module_values(&maps, only_if_all_present);
            if !omitted.is_empty() {
                log.note(
                    DiagnosticKind::OmittedModules,
                    format!(
                        "modules {} omitted from {} total for {}: not present on every element result",
                        module_list(&omitted),
                        kind,
                        context,
                    ),
                );
            }
            let biogenic_carbon = sum_biogenic(members.iter().map(|r| r.biogenic_carbon));
            AggregateTotal {
                kind,
                indicators,
                biogenic_carbon,
            }
        })
        .collect()
}

/// Embodied carbon in kg CO2-eq across a set of element results.
///
/// Reads climate change totals, falling back to the figure excluding
/// biogenic carbon when no total is reported. `None` when neither kind is
/// present.
pub fn embodied_carbon(results: &[ElementResult]) -> Option<f64> {
    for kind in [
        MetricKind::ClimateChangeTotal,
        MetricKind::ClimateChangeTotalNoBiogenic,
    ] {
        let members: Vec<&ElementResult> = results.iter().filter(|r| r.kind == kind).collect();
        if !members.is_empty() {
            return Some(members.iter().map(|r| r.total()).sum());
        }
    }
    None
}
