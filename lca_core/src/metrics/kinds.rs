//! # Metric Kinds
//!
//! The environmental impact categories of EN 15804+A2. Each kind carries a
//! fixed reporting code and unit; the five climate change kinds additionally
//! admit a biogenic carbon figure on results.
//!
//! ```rust
//! use lca_core::metrics::MetricKind;
//!
//! assert_eq!(MetricKind::ClimateChangeTotal.code(), "GWP-total");
//! assert_eq!(MetricKind::AcidificationPotential.unit(), "mol H+-eq");
//! assert!(MetricKind::ClimateChangeBiogenic.is_climate_change());
//! assert!(!MetricKind::WaterDeprivation.is_climate_change());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// An environmental impact category per EN 15804+A2
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MetricKind {
    /// Climate change, total
    ClimateChangeTotal,
    /// Climate change, total excluding biogenic carbon
    ClimateChangeTotalNoBiogenic,
    /// Climate change, fossil
    ClimateChangeFossil,
    /// Climate change, biogenic
    ClimateChangeBiogenic,
    /// Climate change, land use and land use change
    ClimateChangeLandUse,
    /// Depletion of the stratospheric ozone layer
    OzoneDepletion,
    /// Acidification
    AcidificationPotential,
    /// Eutrophication, freshwater
    EutrophicationFreshwater,
    /// Eutrophication, marine
    EutrophicationMarine,
    /// Eutrophication, terrestrial
    EutrophicationTerrestrial,
    /// Photochemical ozone formation
    PhotochemicalOzoneCreation,
    /// Abiotic depletion of minerals and metals
    AbioticDepletionMineralsAndMetals,
    /// Abiotic depletion of fossil resources
    AbioticDepletionFossilResources,
    /// Water deprivation
    WaterDeprivation,
}

impl MetricKind {
    /// All impact categories in reporting order
    pub const ALL: [MetricKind; 14] = [
        MetricKind::ClimateChangeTotal,
        MetricKind::ClimateChangeTotalNoBiogenic,
        MetricKind::ClimateChangeFossil,
        MetricKind::ClimateChangeBiogenic,
        MetricKind::ClimateChangeLandUse,
        MetricKind::OzoneDepletion,
        MetricKind::AcidificationPotential,
        MetricKind::EutrophicationFreshwater,
        MetricKind::EutrophicationMarine,
        MetricKind::EutrophicationTerrestrial,
        MetricKind::PhotochemicalOzoneCreation,
        MetricKind::AbioticDepletionMineralsAndMetals,
        MetricKind::AbioticDepletionFossilResources,
        MetricKind::WaterDeprivation,
    ];

    /// The climate change family, used for embodied carbon reporting
    pub const CLIMATE_CHANGE: [MetricKind; 5] = [
        MetricKind::ClimateChangeTotal,
        MetricKind::ClimateChangeTotalNoBiogenic,
        MetricKind::ClimateChangeFossil,
        MetricKind::ClimateChangeBiogenic,
        MetricKind::ClimateChangeLandUse,
    ];

    /// EN 15804+A2 indicator code
    pub fn code(&self) -> &'static str {
        match self {
            MetricKind::ClimateChangeTotal => "GWP-total",
            MetricKind::ClimateChangeTotalNoBiogenic => "GWP-GHG",
            MetricKind::ClimateChangeFossil => "GWP-fossil",
            MetricKind::ClimateChangeBiogenic => "GWP-biogenic",
            MetricKind::ClimateChangeLandUse => "GWP-luluc",
            MetricKind::OzoneDepletion => "ODP",
            MetricKind::AcidificationPotential => "AP",
            MetricKind::EutrophicationFreshwater => "EP-freshwater",
            MetricKind::EutrophicationMarine => "EP-marine",
            MetricKind::EutrophicationTerrestrial => "EP-terrestrial",
            MetricKind::PhotochemicalOzoneCreation => "POCP",
            MetricKind::AbioticDepletionMineralsAndMetals => "ADPE",
            MetricKind::AbioticDepletionFossilResources => "ADPF",
            MetricKind::WaterDeprivation => "WDP",
        }
    }

    /// Reporting unit for the indicator values
    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::ClimateChangeTotal
            | MetricKind::ClimateChangeTotalNoBiogenic
            | MetricKind::ClimateChangeFossil
            | MetricKind::ClimateChangeBiogenic
            | MetricKind::ClimateChangeLandUse => "kg CO2-eq",
            MetricKind::OzoneDepletion => "kg CFC-11-eq",
            MetricKind::AcidificationPotential => "mol H+-eq",
            MetricKind::EutrophicationFreshwater => "kg P-eq",
            MetricKind::EutrophicationMarine => "kg N-eq",
            MetricKind::EutrophicationTerrestrial => "mol N-eq",
            MetricKind::PhotochemicalOzoneCreation => "kg NMVOC-eq",
            MetricKind::AbioticDepletionMineralsAndMetals => "kg Sb-eq",
            MetricKind::AbioticDepletionFossilResources => "MJ",
            MetricKind::WaterDeprivation => "m3 water-eq deprived",
        }
    }

    /// Human-readable category name
    pub fn description(&self) -> &'static str {
        match self {
            MetricKind::ClimateChangeTotal => "Climate change, total",
            MetricKind::ClimateChangeTotalNoBiogenic => {
                "Climate change, total excluding biogenic carbon"
            }
            MetricKind::ClimateChangeFossil => "Climate change, fossil",
            MetricKind::ClimateChangeBiogenic => "Climate change, biogenic",
            MetricKind::ClimateChangeLandUse => "Climate change, land use and land use change",
            MetricKind::OzoneDepletion => "Depletion of the stratospheric ozone layer",
            MetricKind::AcidificationPotential => "Acidification",
            MetricKind::EutrophicationFreshwater => "Eutrophication, freshwater",
            MetricKind::EutrophicationMarine => "Eutrophication, marine",
            MetricKind::EutrophicationTerrestrial => "Eutrophication, terrestrial",
            MetricKind::PhotochemicalOzoneCreation => "Photochemical ozone formation",
            MetricKind::AbioticDepletionMineralsAndMetals => {
                "Abiotic depletion of minerals and metals"
            }
            MetricKind::AbioticDepletionFossilResources => "Abiotic depletion of fossil resources",
            MetricKind::WaterDeprivation => "Water deprivation",
        }
    }

    /// Whether this kind belongs to the climate change family
    pub fn is_climate_change(&self) -> bool {
        MetricKind::CLIMATE_CHANGE.contains(self)
    }

    /// Position in [`MetricKind::ALL`], stable across releases
    pub(crate) fn index(&self) -> usize {
        match self {
            MetricKind::ClimateChangeTotal => 0,
            MetricKind::ClimateChangeTotalNoBiogenic => 1,
            MetricKind::ClimateChangeFossil => 2,
            MetricKind::ClimateChangeBiogenic => 3,
            MetricKind::ClimateChangeLandUse => 4,
            MetricKind::OzoneDepletion => 5,
            MetricKind::AcidificationPotential => 6,
            MetricKind::EutrophicationFreshwater => 7,
            MetricKind::EutrophicationMarine => 8,
            MetricKind::EutrophicationTerrestrial => 9,
            MetricKind::PhotochemicalOzoneCreation => 10,
            MetricKind::AbioticDepletionMineralsAndMetals => 11,
            MetricKind::AbioticDepletionFossilResources => 12,
            MetricKind::WaterDeprivation => 13,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
