//! # Scope and Project Evaluation
//!
//! Rolls element evaluations up into scope and project results. Unlike the
//! takeoff level, a failing element does not fail the scope: its failure
//! becomes a warning naming the object and the rest of the scope still
//! sums.

use crate::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::elements::{ElementQuantities, ObjectCategory, ScopeType};
use crate::evaluate::{evaluate_element_tagged, EvaluationConfig};
use crate::results::{group_totals, ElementResult, ProjectResult, ScopeResult};
use crate::takeoff::MaterialProfile;

/// Elements of one category inside a scope inventory
#[derive(Debug, Clone)]
pub struct CategoryElements<E> {
    pub category: ObjectCategory,
    pub elements: Vec<E>,
}

/// The elements a caller wants evaluated under one scope, grouped by
/// category
#[derive(Debug, Clone)]
pub struct ScopeInventory<E> {
    pub scope: ScopeType,
    pub entries: Vec<CategoryElements<E>>,
}

impl<E> ScopeInventory<E> {
    pub fn new(scope: ScopeType) -> Self {
        ScopeInventory {
            scope,
            entries: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: ObjectCategory, elements: Vec<E>) -> Self {
        self.entries.push(CategoryElements { category, elements });
        self
    }

    /// Total number of elements across all categories
    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.elements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Evaluate every element of a scope inventory and sum the survivors.
///
/// An element whose evaluation fails is reported as a warning naming the
/// object and left out of the totals. A category filed under a scope it
/// does not conventionally belong to is flagged but still evaluated.
pub fn evaluate_scope<E: ElementQuantities>(
    inventory: &ScopeInventory<E>,
    templates: &[MaterialProfile],
    config: &EvaluationConfig,
    log: &mut DiagnosticLog,
) -> ScopeResult {
    let mut element_results: Vec<ElementResult> = Vec::new();
    for entry in &inventory.entries {
        if !inventory.scope.accepts(entry.category) {
            log.warning(
                DiagnosticKind::AtypicalCategory,
                format!(
                    "category {} is unusual for scope {}",
                    entry.category, inventory.scope
                ),
            );
        }
        for element in &entry.elements {
            match evaluate_element_tagged(
                element,
                inventory.scope,
                entry.category,
                templates,
                config,
                log,
            ) {
                Ok(results) => element_results.extend(results),
                Err(error) => log.warning(
                    DiagnosticKind::ElementSkipped,
                    format!(
                        "element {} ({}) skipped from scope {}: {}",
                        element.object_id(),
                        entry.category,
                        inventory.scope,
                        error
                    ),
                ),
            }
        }
    }

    let context = format!("scope {}", inventory.scope);
    let totals = group_totals(&element_results, true, &context, log);
    ScopeResult {
        scope: inventory.scope,
        element_results,
        totals,
    }
}

/// Evaluate several scope inventories and sum everything again across the
/// whole project
pub fn evaluate_project<E: ElementQuantities>(
    inventories: &[ScopeInventory<E>],
    templates: &[MaterialProfile],
    config: &EvaluationConfig,
    log: &mut DiagnosticLog,
) -> ProjectResult {
    let scopes: Vec<ScopeResult> = inventories
        .iter()
        .map(|inventory| evaluate_scope(inventory, templates, config, log))
        .collect();

    let all_results: Vec<ElementResult> = scopes
        .iter()
        .flat_map(|scope| scope.element_results.iter().cloned())
        .collect();
    let totals = group_totals(&all_results, true, "project", log);
    ProjectResult { scopes, totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::BulkElement;
    use crate::epd::{EpdRecord, QuantityBasis};
    use crate::metrics::{EnvironmentalMetric, MetricKind};
    use crate::modules::Module;

    fn gwp_epd(name: &str, a1: f64) -> EpdRecord {
        EpdRecord::new(name, QuantityBasis::Volume).with_metric(
            EnvironmentalMetric::new(MetricKind::ClimateChangeTotal)
                .with_indicator(Module::A1, a1),
        )
    }

    fn concrete_beam(name: &str) -> BulkElement {
        BulkElement::new(name, ObjectCategory::Beam, 1.0).of_material(
            MaterialProfile::new("Concrete").with_epd(gwp_epd("Concrete EPD", 10.0)),
        )
    }

    #[test]
    fn test_failing_element_is_skipped_with_warning() {
        // Four evaluable beams and one whose material has no EPD
        let mut beams: Vec<BulkElement> = (1..=4)
            .map(|i| concrete_beam(&format!("B-{}", i)))
            .collect();
        let broken = BulkElement::new("B-5", ObjectCategory::Beam, 1.0)
            .of_material(MaterialProfile::new("Mystery"));
        let broken_id = broken.id;
        beams.push(broken);

        let inventory =
            ScopeInventory::new(ScopeType::Structures).with_category(ObjectCategory::Beam, beams);
        let mut log = DiagnosticLog::new();

        let result = evaluate_scope(&inventory, &[], &EvaluationConfig::default(), &mut log);
        assert_eq!(result.element_results.len(), 4);
        let total = result.total_of(MetricKind::ClimateChangeTotal).unwrap();
        assert_eq!(total.get(Module::A1), Some(40.0));

        let skipped: Vec<_> = log.of_kind(DiagnosticKind::ElementSkipped).collect();
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].message.contains(&broken_id.to_string()));
    }

    #[test]
    fn test_atypical_category_is_flagged_but_evaluated() {
        let duct = BulkElement::new("D-1", ObjectCategory::Duct, 0.2).of_material(
            MaterialProfile::new("Steel").with_epd(gwp_epd("Sheet steel", 50.0)),
        );
        let inventory = ScopeInventory::new(ScopeType::Structures)
            .with_category(ObjectCategory::Duct, vec![duct]);
        let mut log = DiagnosticLog::new();

        let result = evaluate_scope(&inventory, &[], &EvaluationConfig::default(), &mut log);
        assert_eq!(result.element_results.len(), 1);
        assert!(log.has(DiagnosticKind::AtypicalCategory));

        // The undefined scope is the anything-goes bucket
        let duct = BulkElement::new("D-2", ObjectCategory::Duct, 0.2).of_material(
            MaterialProfile::new("Steel").with_epd(gwp_epd("Sheet steel", 50.0)),
        );
        let inventory = ScopeInventory::new(ScopeType::Undefined)
            .with_category(ObjectCategory::Duct, vec![duct]);
        let mut quiet_log = DiagnosticLog::new();
        evaluate_scope(&inventory, &[], &EvaluationConfig::default(), &mut quiet_log);
        assert!(!quiet_log.has(DiagnosticKind::AtypicalCategory));
    }

    #[test]
    fn test_scope_results_keep_category_tags() {
        let inventory = ScopeInventory::new(ScopeType::Structures)
            .with_category(ObjectCategory::Beam, vec![concrete_beam("B-1")])
            .with_category(
                ObjectCategory::Column,
                vec![BulkElement::new("C-1", ObjectCategory::Column, 2.0).of_material(
                    MaterialProfile::new("Concrete").with_epd(gwp_epd("Concrete EPD", 10.0)),
                )],
            );
        let mut log = DiagnosticLog::new();

        let result = evaluate_scope(&inventory, &[], &EvaluationConfig::default(), &mut log);
        assert_eq!(result.element_results.len(), 2);
        assert_eq!(result.element_results[0].category, ObjectCategory::Beam);
        assert_eq!(result.element_results[1].category, ObjectCategory::Column);
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_project_rollup_sums_across_scopes() {
        let structures = ScopeInventory::new(ScopeType::Structures)
            .with_category(ObjectCategory::Beam, vec![concrete_beam("B-1")]);
        let foundations = ScopeInventory::new(ScopeType::Foundations).with_category(
            ObjectCategory::Footing,
            vec![BulkElement::new("F-1", ObjectCategory::Footing, 3.0).of_material(
                MaterialProfile::new("Concrete").with_epd(gwp_epd("Concrete EPD", 10.0)),
            )],
        );
        let mut log = DiagnosticLog::new();

        let project = evaluate_project(
            &[structures, foundations],
            &[],
            &EvaluationConfig::default(),
            &mut log,
        );
        assert_eq!(project.scopes.len(), 2);
        let structures_total = project.scopes[0]
            .total_of(MetricKind::ClimateChangeTotal)
            .unwrap();
        assert_eq!(structures_total.get(Module::A1), Some(10.0));

        let project_total = project.total_of(MetricKind::ClimateChangeTotal).unwrap();
        assert_eq!(project_total.get(Module::A1), Some(40.0));
    }

    #[test]
    fn test_empty_inventory_evaluates_to_nothing() {
        let inventory: ScopeInventory<BulkElement> = ScopeInventory::new(ScopeType::Mep);
        let mut log = DiagnosticLog::new();
        let result = evaluate_scope(&inventory, &[], &EvaluationConfig::default(), &mut log);
        assert!(result.element_results.is_empty());
        assert!(result.totals.is_empty());
        assert!(inventory.is_empty());
        assert!(log.is_empty());
    }
}
