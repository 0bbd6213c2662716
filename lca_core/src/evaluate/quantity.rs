//! # Quantity Resolution
//!
//! Maps a takeoff item and an EPD's declared basis to the physical quantity
//! the EPD's values must be scaled by. Volume reads the item's volume, mass
//! converts volume through a density chain unless the model declared a mass
//! directly, area and length need the matching measurement, and the scalar
//! bases read their declared figure as-is.
//!
//! A resolved quantity of exactly zero is valid and propagates as zero. A
//! negative quantity always fails. A NaN quantity follows the configured
//! policy: fail, or log an error and flow through.

use crate::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::epd::{EpdRecord, QuantityBasis};
use crate::errors::{LcaError, LcaResult};
use crate::evaluate::NanQuantityPolicy;
use crate::takeoff::TakeoffItem;

/// Resolve the quantity matching `epd.quantity_basis` from a takeoff item.
///
/// Fails on an Undefined basis, a missing or non-positive volume under a
/// Volume basis, an unresolvable density chain under a Mass basis, and a
/// missing measurement under an Area or Length basis. The returned quantity
/// is never negative; it is NaN only under [`NanQuantityPolicy::Propagate`].
pub fn resolve_quantity(
    item: &TakeoffItem,
    epd: &EpdRecord,
    nan_policy: NanQuantityPolicy,
    log: &mut DiagnosticLog,
) -> LcaResult<f64> {
    let basis = epd.quantity_basis;
    let material = &item.material.name;

    let quantity = match basis {
        QuantityBasis::Undefined => return Err(LcaError::undefined_basis(&epd.name)),
        QuantityBasis::Volume => resolve_volume(item)?,
        QuantityBasis::Mass => resolve_mass(item, epd, log)?,
        QuantityBasis::Area => item.area.ok_or_else(|| {
            LcaError::unsupported_element_shape(material, &epd.name, basis)
        })?,
        QuantityBasis::Length => item.length.ok_or_else(|| {
            LcaError::unsupported_element_shape(material, &epd.name, basis)
        })?,
        // Scalar bases read the declared figure; absent means unset
        _ => item.measurement(basis).unwrap_or(f64::NAN),
    };

    if quantity < 0.0 {
        return Err(LcaError::negative_or_nan_quantity(material, basis, quantity));
    }
    if quantity.is_nan() {
        match nan_policy {
            NanQuantityPolicy::Fail => {
                return Err(LcaError::negative_or_nan_quantity(material, basis, quantity))
            }
            NanQuantityPolicy::Propagate => log.error(
                DiagnosticKind::NanQuantity,
                format!(
                    "resolved {} quantity for material '{}' is NaN and will flow into the results",
                    basis, material
                ),
            ),
        }
    }
    Ok(quantity)
}

fn resolve_volume(item: &TakeoffItem) -> LcaResult<f64> {
    match item.volume {
        Some(volume) if volume.is_finite() && volume > 0.0 => Ok(volume),
        Some(volume) if volume.is_nan() => {
            Err(LcaError::no_volume(&item.material.name, "volume is NaN"))
        }
        Some(volume) => Err(LcaError::no_volume(
            &item.material.name,
            format!("volume {} is not a positive finite value", volume),
        )),
        None => Err(LcaError::no_volume(
            &item.material.name,
            "no volume measurement on the takeoff item",
        )),
    }
}

/// Mass resolution order: a declared non-zero mass is taken as-is, a zero
/// volume short-circuits to zero mass, otherwise volume is converted
/// through the EPD's density, then the material's. A declared mass of zero
/// counts as unset, matching datasets that zero-fill unknown figures.
fn resolve_mass(item: &TakeoffItem, epd: &EpdRecord, log: &mut DiagnosticLog) -> LcaResult<f64> {
    if let Some(mass) = item.mass {
        if mass.is_finite() && mass != 0.0 {
            return Ok(mass);
        }
    }
    match item.volume {
        Some(volume) if volume == 0.0 => Ok(0.0),
        Some(volume) if volume.is_finite() => {
            if let Some(density) = epd.usable_density() {
                log.note(
                    DiagnosticKind::MassFromEpdDensity,
                    format!(
                        "mass for material '{}' converted with density {} kg/m3 taken from EPD '{}'",
                        item.material.name, density, epd.name
                    ),
                );
                Ok(volume * density)
            } else if let Some(density) = item.material.usable_density() {
                Ok(volume * density)
            } else {
                Err(LcaError::no_density(&item.material.name, &epd.name))
            }
        }
        // No usable mass or volume at all resolves to unset
        _ => Ok(f64::NAN),
    }
}
