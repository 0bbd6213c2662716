//! # Material Takeoffs
//!
//! A takeoff lists the materials making up an element together with the
//! physical measurements evaluation might need. Which measurement gets used
//! depends on each material's EPD basis, so a takeoff item carries every
//! measurement the model could supply, unset ones left `None`.
//!
//! Template materials let a caller keep EPD assignments in a library and
//! merge them onto model materials by name at evaluation time.

use serde::{Deserialize, Serialize};

use crate::epd::{EpdProvider, EpdRecord, QuantityBasis};
use crate::errors::LcaResult;

// ============================================================================
// Material Profile
// ============================================================================

/// A named material and what evaluation knows about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProfile {
    pub name: String,
    /// kg/m3
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epd: Option<EpdRecord>,
}

impl MaterialProfile {
    pub fn new(name: impl Into<String>) -> Self {
        MaterialProfile {
            name: name.into(),
            density: None,
            epd: None,
        }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_epd(mut self, epd: EpdRecord) -> Self {
        self.epd = Some(epd);
        self
    }

    /// The material's density when it is usable for mass conversion
    pub fn usable_density(&self) -> Option<f64> {
        self.density.filter(|d| d.is_finite() && *d > 0.0)
    }
}

// ============================================================================
// Takeoff
// ============================================================================

/// One material's share of an element, with every measurement the model
/// declared for it. `None` means the model did not supply that measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffItem {
    pub material: MaterialProfile,
    /// m3
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,
    /// m2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// m
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<f64>,
    /// kWh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    /// A
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electric_current: Option<f64>,
    /// W
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    /// m3/h
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumetric_flow_rate: Option<f64>,
}

impl TakeoffItem {
    /// Create an item with no measurements set
    pub fn new(material: MaterialProfile) -> Self {
        TakeoffItem {
            material,
            volume: None,
            mass: None,
            area: None,
            length: None,
            items: None,
            energy: None,
            electric_current: None,
            power: None,
            volumetric_flow_rate: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_items(mut self, items: f64) -> Self {
        self.items = Some(items);
        self
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_electric_current(mut self, electric_current: f64) -> Self {
        self.electric_current = Some(electric_current);
        self
    }

    pub fn with_power(mut self, power: f64) -> Self {
        self.power = Some(power);
        self
    }

    pub fn with_volumetric_flow_rate(mut self, volumetric_flow_rate: f64) -> Self {
        self.volumetric_flow_rate = Some(volumetric_flow_rate);
        self
    }

    /// The declared measurement matching a basis, if the model supplied it.
    /// Undefined has no measurement and always returns `None`.
    pub fn measurement(&self, basis: QuantityBasis) -> Option<f64> {
        match basis {
            QuantityBasis::Undefined => None,
            QuantityBasis::Mass => self.mass,
            QuantityBasis::Volume => self.volume,
            QuantityBasis::Area => self.area,
            QuantityBasis::Length => self.length,
            QuantityBasis::Item => self.items,
            QuantityBasis::Energy => self.energy,
            QuantityBasis::ElectricCurrent => self.electric_current,
            QuantityBasis::Power => self.power,
            QuantityBasis::VolumetricFlowRate => self.volumetric_flow_rate,
        }
    }
}

/// The materials making up one element, in model order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialTakeoff {
    pub items: Vec<TakeoffItem>,
}

impl MaterialTakeoff {
    pub fn new() -> Self {
        MaterialTakeoff::default()
    }

    pub fn from_items(items: Vec<TakeoffItem>) -> Self {
        MaterialTakeoff { items }
    }

    pub fn with_item(mut self, item: TakeoffItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Template Merging
// ============================================================================

/// Merge template materials onto a takeoff's model materials by name.
///
/// Matching is case-insensitive on the material name; the first matching
/// template wins. For density and EPD, `prioritise_template` picks which
/// side's value survives when both are set; either way a side with no value
/// takes the other's. Items with no matching template pass through as-is.
pub fn apply_template(
    takeoff: &MaterialTakeoff,
    templates: &[MaterialProfile],
    prioritise_template: bool,
) -> MaterialTakeoff {
    let merged = takeoff
        .items
        .iter()
        .map(|item| {
            let template = templates
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(&item.material.name));
            match template {
                Some(template) => {
                    let mut item = item.clone();
                    item.material = merge_profiles(&item.material, template, prioritise_template);
                    item
                }
                None => item.clone(),
            }
        })
        .collect();
    MaterialTakeoff { items: merged }
}

fn merge_profiles(
    model: &MaterialProfile,
    template: &MaterialProfile,
    prioritise_template: bool,
) -> MaterialProfile {
    let (density, epd) = if prioritise_template {
        (
            template.density.or(model.density),
            template.epd.clone().or_else(|| model.epd.clone()),
        )
    } else {
        (
            model.density.or(template.density),
            model.epd.clone().or_else(|| template.epd.clone()),
        )
    };
    MaterialProfile {
        name: model.name.clone(),
        density,
        epd,
    }
}

/// Build template materials by fetching one EPD per name from a provider.
///
/// Fails on the first identifier the provider cannot resolve.
pub fn templates_from_provider<P: EpdProvider>(
    names: &[String],
    provider: &P,
) -> LcaResult<Vec<MaterialProfile>> {
    names
        .iter()
        .map(|name| {
            let epd = provider.fetch(name)?;
            Ok(MaterialProfile::new(name.clone()).with_epd(epd))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epd::InMemoryEpdStore;

    fn volume_epd(name: &str) -> EpdRecord {
        EpdRecord::new(name, QuantityBasis::Volume)
    }

    #[test]
    fn test_measurement_dispatch() {
        let item = TakeoffItem::new(MaterialProfile::new("Concrete"))
            .with_volume(2.5)
            .with_items(12.0);

        assert_eq!(item.measurement(QuantityBasis::Volume), Some(2.5));
        assert_eq!(item.measurement(QuantityBasis::Item), Some(12.0));
        assert_eq!(item.measurement(QuantityBasis::Mass), None);
        assert_eq!(item.measurement(QuantityBasis::Undefined), None);
    }

    #[test]
    fn test_usable_density_filters_degenerate_values() {
        assert_eq!(
            MaterialProfile::new("x").with_density(2400.0).usable_density(),
            Some(2400.0)
        );
        assert_eq!(MaterialProfile::new("x").usable_density(), None);
        assert_eq!(MaterialProfile::new("x").with_density(0.0).usable_density(), None);
        assert_eq!(
            MaterialProfile::new("x").with_density(f64::NAN).usable_density(),
            None
        );
    }

    #[test]
    fn test_apply_template_matches_case_insensitively() {
        let takeoff = MaterialTakeoff::new()
            .with_item(TakeoffItem::new(MaterialProfile::new("CONCRETE C30/37")).with_volume(1.0));
        let templates =
            vec![MaterialProfile::new("concrete c30/37").with_epd(volume_epd("Ready-mix"))];

        let merged = apply_template(&takeoff, &templates, true);
        assert_eq!(
            merged.items[0].material.epd.as_ref().unwrap().name,
            "Ready-mix"
        );
        // Model name is kept
        assert_eq!(merged.items[0].material.name, "CONCRETE C30/37");
    }

    #[test]
    fn test_apply_template_priority() {
        let model = MaterialProfile::new("Steel")
            .with_density(7850.0)
            .with_epd(volume_epd("Model EPD"));
        let takeoff = MaterialTakeoff::new().with_item(TakeoffItem::new(model));
        let templates = vec![MaterialProfile::new("Steel").with_epd(volume_epd("Template EPD"))];

        let template_wins = apply_template(&takeoff, &templates, true);
        assert_eq!(
            template_wins.items[0].material.epd.as_ref().unwrap().name,
            "Template EPD"
        );
        // Template has no density, model's survives either way
        assert_eq!(template_wins.items[0].material.density, Some(7850.0));

        let model_wins = apply_template(&takeoff, &templates, false);
        assert_eq!(
            model_wins.items[0].material.epd.as_ref().unwrap().name,
            "Model EPD"
        );
    }

    #[test]
    fn test_apply_template_leaves_unmatched_items_alone() {
        let takeoff =
            MaterialTakeoff::new().with_item(TakeoffItem::new(MaterialProfile::new("Timber")));
        let templates = vec![MaterialProfile::new("Steel").with_epd(volume_epd("S355"))];

        let merged = apply_template(&takeoff, &templates, true);
        assert!(merged.items[0].material.epd.is_none());
    }

    #[test]
    fn test_templates_from_provider() {
        let mut store = InMemoryEpdStore::new();
        store.insert(volume_epd("C30/37"));

        let templates = templates_from_provider(&["C30/37".to_string()], &store).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].epd.as_ref().unwrap().name, "C30/37");

        let err =
            templates_from_provider(&["Unknown product".to_string()], &store).unwrap_err();
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
    }

    #[test]
    fn test_serialization_skips_unset_measurements() {
        let item = TakeoffItem::new(MaterialProfile::new("Concrete")).with_volume(1.0);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("volume"));
        assert!(!json.contains("electric_current"));
        let roundtrip: TakeoffItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, roundtrip);
    }
}
