//! planimeter-engine: calibrated surface measurement (sans-IO).
//!
//! Measures the real-world surface area of an object photographed
//! against a uniform chroma-key background:
//! segmentation -> binarization -> contour tracing ->
//! hierarchy partition or pointer selection -> calibrated area.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! images and returns structured data. Transport concerns (HTTP, file
//! handling) live with the caller.
//!
//! Every measurement request is a pure, independent, synchronous
//! computation over its own inputs. The engine holds no shared mutable
//! state: calibration travels as an explicit [`CalibrationSession`]
//! value owned by the caller.

pub mod area;
pub mod calibrate;
pub mod decode;
pub mod extract;
pub mod segment;
pub mod select;
pub mod types;

pub use calibrate::{Calibration, CalibrationSession};
pub use decode::decode_image;
pub use extract::Retrieval;
pub use types::{
    ChromaKey, Contour, ContourNode, ContourTree, EngineError, GrayImage, MeasureConfig,
    Measurement, MeasurementSource, Partition, Point, RgbImage,
};

/// Extract boundary contours from a photograph.
///
/// # Pipeline steps
///
/// 1. Optional chroma-key pre-step: background pixels forced to white
///    (skipped when `config.chroma_key` is `None`).
/// 2. Reduce to a single-channel intensity map.
/// 3. Inverse binary threshold at `config.binarize_threshold` (darker
///    pixels are object).
/// 4. Border following in the requested [`Retrieval`] mode, with chain
///    compaction of straight runs.
///
/// An image with nothing measurable produces an empty tree, not an
/// error; the `measure_*` entry points turn that into typed failures.
#[must_use = "returns the extracted contour tree"]
pub fn extract_contours(
    image: &RgbImage,
    config: &MeasureConfig,
    retrieval: Retrieval,
) -> ContourTree {
    let intensity = match &config.chroma_key {
        Some(key) => image::imageops::grayscale(&segment::whiten_background(image, key)),
        None => image::imageops::grayscale(image),
    };
    let binary = extract::binarize(&intensity, config.binarize_threshold);
    extract::trace_contours(&binary, retrieval)
}

/// Measure the net physical surface of everything in the photograph.
///
/// Runs the full-tree flow: every outermost boundary contributes
/// positively, every enclosed hole is subtracted, and the pixel total is
/// converted to physical units through the session's calibration.
///
/// # Errors
///
/// - [`EngineError::Uncalibrated`] if the session has never been
///   calibrated.
/// - [`EngineError::NoForeground`] if the chroma mask classifies every
///   pixel as background (only when the chroma pre-step is enabled).
/// - [`EngineError::NoContour`] if extraction finds nothing measurable.
/// - [`EngineError::HierarchyInconsistency`] if hole area exceeds outer
///   area.
pub fn measure_net(
    image: &RgbImage,
    config: &MeasureConfig,
    session: &CalibrationSession,
) -> Result<Measurement, EngineError> {
    let calibration = session.current()?;

    if let Some(key) = &config.chroma_key {
        let mask = segment::chroma_mask(image, key);
        if !segment::has_foreground(&mask) {
            return Err(EngineError::NoForeground);
        }
    }

    let tree = extract_contours(image, config, Retrieval::Tree);
    if tree.is_empty() {
        return Err(EngineError::NoContour);
    }

    let partition = tree.into_partition();
    let area = area::net_area(&partition.external, &partition.internal, calibration)?;

    Ok(Measurement {
        area,
        source: MeasurementSource::Net {
            external: partition.external.len(),
            internal: partition.internal.len(),
        },
    })
}

/// Measure the physical surface of the contour nearest to a pointer
/// coordinate.
///
/// Extraction runs in external-only mode: pointer selection targets
/// object outlines, not holes. The selected contour's index (in
/// discovery order) is reported back in the measurement source.
///
/// # Errors
///
/// - [`EngineError::Uncalibrated`] if the session has never been
///   calibrated.
/// - [`EngineError::NoForeground`] if the chroma mask classifies every
///   pixel as background (only when the chroma pre-step is enabled).
/// - [`EngineError::NoContour`] if there is no candidate contour to
///   select — never reported as a zero-area success.
pub fn measure_at(
    image: &RgbImage,
    config: &MeasureConfig,
    session: &CalibrationSession,
    pointer: Point,
) -> Result<Measurement, EngineError> {
    let calibration = session.current()?;

    if let Some(key) = &config.chroma_key {
        let mask = segment::chroma_mask(image, key);
        if !segment::has_foreground(&mask) {
            return Err(EngineError::NoForeground);
        }
    }

    let candidates = extract_contours(image, config, Retrieval::External)
        .into_partition()
        .external;

    let index = select::nearest_contour(&candidates, pointer).ok_or(EngineError::NoContour)?;
    let area = area::single_area(&candidates[index], calibration);

    Ok(Measurement {
        area,
        source: MeasurementSource::Selected {
            contour_index: index,
        },
    })
}
