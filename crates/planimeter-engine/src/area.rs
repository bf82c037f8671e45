//! Net-area computation: convert boundary polygons into a physical
//! surface area using a calibration.
//!
//! Pixel-space areas come from the shoelace formula ([`geo::Area`] over
//! a closed ring); physical areas scale by the square of the calibration
//! factor. The net area of an object is its outer boundaries minus every
//! enclosed hole.

use geo::{Area, LineString, Polygon};

use crate::calibrate::Calibration;
use crate::types::{Contour, EngineError};

/// Convert a contour ring into a `geo` polygon.
///
/// `geo` closes the ring itself, so the contour's implicit closing edge
/// needs no duplicate vertex.
fn to_polygon(contour: &Contour) -> Polygon<f64> {
    let ring: Vec<(f64, f64)> = contour
        .points()
        .iter()
        .map(|p| (f64::from(p.x), f64::from(p.y)))
        .collect();
    Polygon::new(LineString::from(ring), Vec::new())
}

/// Enclosed area of a contour in pixel units.
///
/// Shoelace formula with the absolute value taken, so orientation does
/// not matter. A contour with fewer than 3 vertices encloses nothing
/// and contributes zero.
#[must_use]
pub fn pixel_area(contour: &Contour) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }
    to_polygon(contour).unsigned_area()
}

/// Physical area of a single contour.
///
/// `scale_factor² * pixel_area`, for the interactive case where one
/// contour has been selected rather than a full partition measured.
#[must_use]
pub fn single_area(contour: &Contour, calibration: Calibration) -> f64 {
    let scale = calibration.scale_factor();
    scale * scale * pixel_area(contour)
}

/// Net physical area of an external/internal partition.
///
/// `scale_factor² * (Σ external − Σ internal)`.
///
/// # Errors
///
/// Returns [`EngineError::HierarchyInconsistency`] if the summed hole
/// area exceeds the summed outer area — a negative surface indicates a
/// broken partition and is reported rather than returned as a number.
pub fn net_area(
    external: &[Contour],
    internal: &[Contour],
    calibration: Calibration,
) -> Result<f64, EngineError> {
    let external_px: f64 = external.iter().map(pixel_area).sum();
    let internal_px: f64 = internal.iter().map(pixel_area).sum();

    if internal_px > external_px {
        return Err(EngineError::HierarchyInconsistency {
            external: external_px,
            internal: internal_px,
        });
    }

    let scale = calibration.scale_factor();
    Ok(scale * scale * (external_px - internal_px))
}
