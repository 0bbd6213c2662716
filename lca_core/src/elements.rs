//! # Elements and Scopes
//!
//! The model side of an evaluation: building elements expose the physical
//! quantities the engine needs through [`ElementQuantities`], each element
//! carries an [`ObjectCategory`], and categories roll up into the reporting
//! scopes (structures, foundations, enclosures, MEP, tenant improvement).
//!
//! ```rust
//! use lca_core::elements::{ObjectCategory, ScopeType};
//!
//! assert_eq!(ObjectCategory::Beam.default_scope(), ScopeType::Structures);
//! assert!(ScopeType::Mep.accepts(ObjectCategory::Duct));
//! assert!(!ScopeType::Foundations.accepts(ObjectCategory::Window));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::takeoff::{MaterialProfile, MaterialTakeoff, TakeoffItem};

// ============================================================================
// Object Categories
// ============================================================================

/// What kind of building object an element is
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ObjectCategory {
    #[default]
    Undefined,
    Beam,
    Column,
    Slab,
    CoreWall,
    Bracing,
    Footing,
    Pile,
    FoundationWall,
    GradeBeam,
    ExteriorWall,
    CurtainWall,
    Window,
    Door,
    Duct,
    Pipe,
    CableTray,
    Conduit,
    Equipment,
    LightFixture,
    Wiring,
    Ceiling,
    Flooring,
    PartitionWall,
    Furniture,
}

impl ObjectCategory {
    /// All categories
    pub const ALL: [ObjectCategory; 25] = [
        ObjectCategory::Undefined,
        ObjectCategory::Beam,
        ObjectCategory::Column,
        ObjectCategory::Slab,
        ObjectCategory::CoreWall,
        ObjectCategory::Bracing,
        ObjectCategory::Footing,
        ObjectCategory::Pile,
        ObjectCategory::FoundationWall,
        ObjectCategory::GradeBeam,
        ObjectCategory::ExteriorWall,
        ObjectCategory::CurtainWall,
        ObjectCategory::Window,
        ObjectCategory::Door,
        ObjectCategory::Duct,
        ObjectCategory::Pipe,
        ObjectCategory::CableTray,
        ObjectCategory::Conduit,
        ObjectCategory::Equipment,
        ObjectCategory::LightFixture,
        ObjectCategory::Wiring,
        ObjectCategory::Ceiling,
        ObjectCategory::Flooring,
        ObjectCategory::PartitionWall,
        ObjectCategory::Furniture,
    ];

    /// Human-readable category name
    pub fn description(&self) -> &'static str {
        match self {
            ObjectCategory::Undefined => "Undefined",
            ObjectCategory::Beam => "Beam",
            ObjectCategory::Column => "Column",
            ObjectCategory::Slab => "Slab",
            ObjectCategory::CoreWall => "Core wall",
            ObjectCategory::Bracing => "Bracing",
            ObjectCategory::Footing => "Footing",
            ObjectCategory::Pile => "Pile",
            ObjectCategory::FoundationWall => "Foundation wall",
            ObjectCategory::GradeBeam => "Grade beam",
            ObjectCategory::ExteriorWall => "Exterior wall",
            ObjectCategory::CurtainWall => "Curtain wall",
            ObjectCategory::Window => "Window",
            ObjectCategory::Door => "Door",
            ObjectCategory::Duct => "Duct",
            ObjectCategory::Pipe => "Pipe",
            ObjectCategory::CableTray => "Cable tray",
            ObjectCategory::Conduit => "Conduit",
            ObjectCategory::Equipment => "Equipment",
            ObjectCategory::LightFixture => "Light fixture",
            ObjectCategory::Wiring => "Wiring",
            ObjectCategory::Ceiling => "Ceiling",
            ObjectCategory::Flooring => "Flooring",
            ObjectCategory::PartitionWall => "Partition wall",
            ObjectCategory::Furniture => "Furniture",
        }
    }

    /// The scope this category conventionally reports under
    pub fn default_scope(&self) -> ScopeType {
        for scope in ScopeType::ALL {
            if scope.categories().contains(self) {
                return scope;
            }
        }
        ScopeType::Undefined
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Scopes
// ============================================================================

/// A reporting scope grouping object categories
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ScopeType {
    /// Unclassified bucket, accepts any category
    #[default]
    Undefined,
    Structures,
    Foundations,
    Enclosures,
    Mep,
    TenantImprovement,
}

impl ScopeType {
    /// All scopes
    pub const ALL: [ScopeType; 6] = [
        ScopeType::Undefined,
        ScopeType::Structures,
        ScopeType::Foundations,
        ScopeType::Enclosures,
        ScopeType::Mep,
        ScopeType::TenantImprovement,
    ];

    /// Human-readable scope name
    pub fn description(&self) -> &'static str {
        match self {
            ScopeType::Undefined => "Undefined",
            ScopeType::Structures => "Structures",
            ScopeType::Foundations => "Foundations",
            ScopeType::Enclosures => "Enclosures",
            ScopeType::Mep => "MEP",
            ScopeType::TenantImprovement => "Tenant improvement",
        }
    }

    /// The categories conventionally reported under this scope.
    /// The Undefined scope claims none.
    pub fn categories(&self) -> &'static [ObjectCategory] {
        match self {
            ScopeType::Undefined => &[],
            ScopeType::Structures => &[
                ObjectCategory::Beam,
                ObjectCategory::Column,
                ObjectCategory::Slab,
                ObjectCategory::CoreWall,
                ObjectCategory::Bracing,
            ],
            ScopeType::Foundations => &[
                ObjectCategory::Footing,
                ObjectCategory::Pile,
                ObjectCategory::FoundationWall,
                ObjectCategory::GradeBeam,
            ],
            ScopeType::Enclosures => &[
                ObjectCategory::ExteriorWall,
                ObjectCategory::CurtainWall,
                ObjectCategory::Window,
                ObjectCategory::Door,
            ],
            ScopeType::Mep => &[
                ObjectCategory::Duct,
                ObjectCategory::Pipe,
                ObjectCategory::CableTray,
                ObjectCategory::Conduit,
                ObjectCategory::Equipment,
                ObjectCategory::LightFixture,
                ObjectCategory::Wiring,
            ],
            ScopeType::TenantImprovement => &[
                ObjectCategory::Ceiling,
                ObjectCategory::Flooring,
                ObjectCategory::PartitionWall,
                ObjectCategory::Furniture,
            ],
        }
    }

    /// Whether a category is at home in this scope. The Undefined scope
    /// accepts anything.
    pub fn accepts(&self, category: ObjectCategory) -> bool {
        match self {
            ScopeType::Undefined => true,
            _ => self.categories().contains(&category),
        }
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Element Quantities
// ============================================================================

/// The physical quantities evaluation reads off a building element.
///
/// Model integrations implement this for their element types; the engine
/// never sees geometry, only resolved figures. Area and length default to
/// unavailable since most elements are neither sheet-like nor linear.
pub trait ElementQuantities {
    fn object_id(&self) -> Uuid;
    fn category(&self) -> ObjectCategory;
    /// Solid volume in m3, if computable
    fn solid_volume(&self) -> Option<f64>;
    /// Materials and their volume share of the element, shares summing to 1
    fn material_composition(&self) -> Vec<(MaterialProfile, f64)>;
    /// Surface area in m2, for sheet-like elements
    fn area(&self) -> Option<f64> {
        None
    }
    /// Axis length in m, for linear elements
    fn length(&self) -> Option<f64> {
        None
    }
}

/// A free-standing element described directly by its quantities, for
/// callers without a full building model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkElement {
    pub id: Uuid,
    pub name: String,
    pub category: ObjectCategory,
    /// m3
    pub volume: f64,
    /// Materials and their volume share
    pub composition: Vec<(MaterialProfile, f64)>,
    /// m2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// m
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

impl BulkElement {
    pub fn new(name: impl Into<String>, category: ObjectCategory, volume: f64) -> Self {
        BulkElement {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            volume,
            composition: Vec::new(),
            area: None,
            length: None,
        }
    }

    /// Add a material with its volume share
    pub fn with_material(mut self, material: MaterialProfile, ratio: f64) -> Self {
        self.composition.push((material, ratio));
        self
    }

    /// Shorthand for a single-material element
    pub fn of_material(self, material: MaterialProfile) -> Self {
        self.with_material(material, 1.0)
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }
}

impl ElementQuantities for BulkElement {
    fn object_id(&self) -> Uuid {
        self.id
    }

    fn category(&self) -> ObjectCategory {
        self.category
    }

    fn solid_volume(&self) -> Option<f64> {
        Some(self.volume)
    }

    fn material_composition(&self) -> Vec<(MaterialProfile, f64)> {
        self.composition.clone()
    }

    fn area(&self) -> Option<f64> {
        self.area
    }

    fn length(&self) -> Option<f64> {
        self.length
    }
}

/// Break an element into a material takeoff.
///
/// Each material gets the element volume scaled by its share. Area and
/// length are layer properties rather than shares, so every item carries
/// the element's full figure.
pub fn element_takeoff(element: &impl ElementQuantities) -> MaterialTakeoff {
    let volume = element.solid_volume();
    let area = element.area();
    let length = element.length();

    let items = element
        .material_composition()
        .into_iter()
        .map(|(material, ratio)| {
            let mut item = TakeoffItem::new(material);
            item.volume = volume.map(|v| v * ratio);
            item.area = area;
            item.length = length;
            item
        })
        .collect();
    MaterialTakeoff::from_items(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_one_home_scope() {
        for category in ObjectCategory::ALL {
            if category == ObjectCategory::Undefined {
                assert_eq!(category.default_scope(), ScopeType::Undefined);
                continue;
            }
            let homes: Vec<ScopeType> = ScopeType::ALL
                .into_iter()
                .filter(|s| s.categories().contains(&category))
                .collect();
            assert_eq!(homes.len(), 1, "{} should have one home scope", category);
            assert_eq!(category.default_scope(), homes[0]);
        }
    }

    #[test]
    fn test_scope_membership() {
        assert_eq!(ObjectCategory::Pile.default_scope(), ScopeType::Foundations);
        assert_eq!(ObjectCategory::CurtainWall.default_scope(), ScopeType::Enclosures);
        assert_eq!(ObjectCategory::CableTray.default_scope(), ScopeType::Mep);
        assert_eq!(
            ObjectCategory::Flooring.default_scope(),
            ScopeType::TenantImprovement
        );
        assert!(ScopeType::Structures.accepts(ObjectCategory::Bracing));
        assert!(!ScopeType::Structures.accepts(ObjectCategory::Duct));
    }

    #[test]
    fn test_undefined_scope_accepts_anything() {
        for category in ObjectCategory::ALL {
            assert!(ScopeType::Undefined.accepts(category));
        }
        assert!(ScopeType::Undefined.categories().is_empty());
    }

    #[test]
    fn test_bulk_element_quantities() {
        let element = BulkElement::new("B-101", ObjectCategory::Beam, 0.8)
            .with_material(MaterialProfile::new("Concrete"), 0.95)
            .with_material(MaterialProfile::new("Rebar"), 0.05)
            .with_length(6.0);

        assert_eq!(element.category(), ObjectCategory::Beam);
        assert_eq!(element.solid_volume(), Some(0.8));
        assert_eq!(element.length(), Some(6.0));
        assert_eq!(element.area(), None);
        assert_eq!(element.material_composition().len(), 2);
    }

    #[test]
    fn test_element_takeoff_splits_volume_by_share() {
        let element = BulkElement::new("W-7", ObjectCategory::ExteriorWall, 2.0)
            .with_material(MaterialProfile::new("Brick"), 0.75)
            .with_material(MaterialProfile::new("Insulation"), 0.25)
            .with_area(12.5);

        let takeoff = element_takeoff(&element);
        assert_eq!(takeoff.len(), 2);
        assert_eq!(takeoff.items[0].volume, Some(1.5));
        assert_eq!(takeoff.items[1].volume, Some(0.5));
        // Layers share the element face
        assert_eq!(takeoff.items[0].area, Some(12.5));
        assert_eq!(takeoff.items[1].area, Some(12.5));
        assert_eq!(takeoff.items[0].material.name, "Brick");
    }

    #[test]
    fn test_distinct_elements_get_distinct_ids() {
        let a = BulkElement::new("a", ObjectCategory::Slab, 1.0);
        let b = BulkElement::new("b", ObjectCategory::Slab, 1.0);
        assert_ne!(a.object_id(), b.object_id());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let element = BulkElement::new("Column C-3", ObjectCategory::Column, 0.45)
            .of_material(MaterialProfile::new("C40/50").with_density(2450.0));
        let json = serde_json::to_string(&element).unwrap();
        let roundtrip: BulkElement = serde_json::from_str(&json).unwrap();
        assert_eq!(element, roundtrip);
    }
}
