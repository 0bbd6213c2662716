//! # Life Cycle Modules
//!
//! The EN 15978 life cycle stages an environmental indicator can be reported
//! against. Individual modules (A1, B3, C2) and the standard aggregated
//! ranges (A1-A3, B1-B7, C1-C4) are distinct variants; a metric must not mix
//! an aggregate with one of its parts.
//!
//! ```rust
//! use lca_core::modules::Module;
//!
//! assert_eq!(Module::A1ToA3.code(), "A1-A3");
//! assert!(Module::A1ToA3.is_aggregate());
//! assert!(Module::A1ToA3.overlaps(Module::A2));
//! assert!(!Module::A4.overlaps(Module::A5));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A life cycle stage per EN 15978.
///
/// Declaration order is the conventional reporting order, with each
/// aggregated range directly after its parts. `Ord` follows declaration
/// order, so module-keyed `BTreeMap`s iterate in reporting order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Module {
    /// Raw material supply
    A1,
    /// Transport to manufacturing
    A2,
    /// Manufacturing
    A3,
    /// Product stage, A1 through A3 aggregated
    A1ToA3,
    /// Transport to site
    A4,
    /// Construction and installation
    A5,
    /// Use
    B1,
    /// Maintenance
    B2,
    /// Repair
    B3,
    /// Replacement
    B4,
    /// Refurbishment
    B5,
    /// Operational energy use
    B6,
    /// Operational water use
    B7,
    /// Use stage, B1 through B7 aggregated
    B1ToB7,
    /// Deconstruction and demolition
    C1,
    /// Transport to waste processing
    C2,
    /// Waste processing
    C3,
    /// Disposal
    C4,
    /// End of life stage, C1 through C4 aggregated
    C1ToC4,
    /// Benefits and loads beyond the system boundary
    D,
}

impl Module {
    /// All modules in reporting order
    pub const ALL: [Module; 20] = [
        Module::A1,
        Module::A2,
        Module::A3,
        Module::A1ToA3,
        Module::A4,
        Module::A5,
        Module::B1,
        Module::B2,
        Module::B3,
        Module::B4,
        Module::B5,
        Module::B6,
        Module::B7,
        Module::B1ToB7,
        Module::C1,
        Module::C2,
        Module::C3,
        Module::C4,
        Module::C1ToC4,
        Module::D,
    ];

    /// Short code as used in EPD documents
    pub fn code(&self) -> &'static str {
        match self {
            Module::A1 => "A1",
            Module::A2 => "A2",
            Module::A3 => "A3",
            Module::A1ToA3 => "A1-A3",
            Module::A4 => "A4",
            Module::A5 => "A5",
            Module::B1 => "B1",
            Module::B2 => "B2",
            Module::B3 => "B3",
            Module::B4 => "B4",
            Module::B5 => "B5",
            Module::B6 => "B6",
            Module::B7 => "B7",
            Module::B1ToB7 => "B1-B7",
            Module::C1 => "C1",
            Module::C2 => "C2",
            Module::C3 => "C3",
            Module::C4 => "C4",
            Module::C1ToC4 => "C1-C4",
            Module::D => "D",
        }
    }

    /// Human-readable stage name
    pub fn description(&self) -> &'static str {
        match self {
            Module::A1 => "Raw material supply",
            Module::A2 => "Transport to manufacturing",
            Module::A3 => "Manufacturing",
            Module::A1ToA3 => "Product stage (aggregated)",
            Module::A4 => "Transport to site",
            Module::A5 => "Construction and installation",
            Module::B1 => "Use",
            Module::B2 => "Maintenance",
            Module::B3 => "Repair",
            Module::B4 => "Replacement",
            Module::B5 => "Refurbishment",
            Module::B6 => "Operational energy use",
            Module::B7 => "Operational water use",
            Module::B1ToB7 => "Use stage (aggregated)",
            Module::C1 => "Deconstruction and demolition",
            Module::C2 => "Transport to waste processing",
            Module::C3 => "Waste processing",
            Module::C4 => "Disposal",
            Module::C1ToC4 => "End of life stage (aggregated)",
            Module::D => "Benefits and loads beyond the system boundary",
        }
    }

    /// Whether this module is an aggregated range
    pub fn is_aggregate(&self) -> bool {
        self.parts().is_some()
    }

    /// The individual modules an aggregated range covers
    pub fn parts(&self) -> Option<&'static [Module]> {
        match self {
            Module::A1ToA3 => Some(&[Module::A1, Module::A2, Module::A3]),
            Module::B1ToB7 => Some(&[
                Module::B1,
                Module::B2,
                Module::B3,
                Module::B4,
                Module::B5,
                Module::B6,
                Module::B7,
            ]),
            Module::C1ToC4 => Some(&[Module::C1, Module::C2, Module::C3, Module::C4]),
            _ => None,
        }
    }

    /// Whether two modules cover overlapping stages.
    ///
    /// A module overlaps itself, and an aggregated range overlaps each of
    /// its parts. Disjoint individual modules never overlap.
    pub fn overlaps(&self, other: Module) -> bool {
        if *self == other {
            return true;
        }
        if let Some(parts) = self.parts() {
            if parts.contains(&other) {
                return true;
            }
        }
        if let Some(parts) = other.parts() {
            if parts.contains(self) {
                return true;
            }
        }
        false
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_all_covers_every_module() {
        assert_eq!(Module::ALL.len(), 20);
        // Codes are unique
        let mut codes: Vec<&str> = Module::ALL.iter().map(|m| m.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 20);
    }

    #[test]
    fn test_aggregates_and_parts() {
        assert!(Module::A1ToA3.is_aggregate());
        assert!(Module::B1ToB7.is_aggregate());
        assert!(Module::C1ToC4.is_aggregate());
        assert!(!Module::A4.is_aggregate());
        assert!(!Module::D.is_aggregate());

        assert_eq!(Module::A1ToA3.parts().unwrap().len(), 3);
        assert_eq!(Module::B1ToB7.parts().unwrap().len(), 7);
        assert_eq!(Module::C1ToC4.parts().unwrap().len(), 4);
        assert!(Module::A5.parts().is_none());
    }

    #[test]
    fn test_overlaps() {
        // Identity
        assert!(Module::A4.overlaps(Module::A4));
        // Aggregate vs part, both directions
        assert!(Module::A1ToA3.overlaps(Module::A1));
        assert!(Module::C3.overlaps(Module::C1ToC4));
        // Disjoint
        assert!(!Module::A1.overlaps(Module::A2));
        assert!(!Module::A1ToA3.overlaps(Module::A4));
        assert!(!Module::B1ToB7.overlaps(Module::C1));
        assert!(!Module::D.overlaps(Module::C4));
    }

    #[test]
    fn test_btreemap_iterates_in_reporting_order() {
        let mut map = BTreeMap::new();
        map.insert(Module::D, 4.0);
        map.insert(Module::A1, 1.0);
        map.insert(Module::C1ToC4, 3.0);
        map.insert(Module::A1ToA3, 2.0);

        let keys: Vec<Module> = map.keys().copied().collect();
        assert_eq!(
            keys,
            vec![Module::A1, Module::A1ToA3, Module::C1ToC4, Module::D]
        );
    }

    #[test]
    fn test_display_uses_code() {
        assert_eq!(format!("{}", Module::A1ToA3), "A1-A3");
        assert_eq!(format!("{}", Module::B6), "B6");
    }

    #[test]
    fn test_serialization_as_map_key() {
        let mut map: BTreeMap<Module, f64> = BTreeMap::new();
        map.insert(Module::A1, 1.5);
        map.insert(Module::A1ToA3, 4.5);
        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains("\"A1\""));
        assert!(json.contains("\"A1ToA3\""));
        let roundtrip: BTreeMap<Module, f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, roundtrip);
    }
}
