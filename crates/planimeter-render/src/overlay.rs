//! Contour overlay drawing.
//!
//! Walks each contour ring and strokes its edges (including the closing
//! edge) onto an RGB canvas with [`imageproc::drawing`]. External and
//! internal boundaries get distinct colors so operators can check the
//! hierarchy at a glance; calibration reference points are marked with
//! crosses and a connecting line.
//!
//! All entry points that take `&RgbImage` return a painted copy; the
//! source photograph is never mutated.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_line_segment_mut};

use planimeter_engine::{Contour, Partition, Point};

/// Colors used when painting an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    /// Stroke color for outermost boundaries.
    pub external: Rgb<u8>,
    /// Stroke color for holes and nested boundaries.
    pub internal: Rgb<u8>,
    /// Stroke color for an interactively selected contour.
    pub selected: Rgb<u8>,
    /// Marker color for calibration reference points.
    pub reference: Rgb<u8>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            external: Rgb([220, 40, 40]),
            internal: Rgb([40, 90, 220]),
            selected: Rgb([240, 200, 30]),
            reference: Rgb([200, 40, 200]),
        }
    }
}

/// Stroke one closed contour ring onto the canvas.
#[allow(clippy::cast_precision_loss)]
fn stroke_contour(canvas: &mut RgbImage, contour: &Contour, color: Rgb<u8>) {
    let points = contour.points();
    if points.len() < 2 {
        return;
    }

    let as_f32 = |p: Point| (p.x as f32, p.y as f32);
    for window in points.windows(2) {
        draw_line_segment_mut(canvas, as_f32(window[0]), as_f32(window[1]), color);
    }
    // Closing edge back to the first vertex.
    if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
        draw_line_segment_mut(canvas, as_f32(last), as_f32(first), color);
    }
}

/// Paint an external/internal partition onto a copy of the photograph.
#[must_use = "returns a painted copy, the input is not mutated"]
pub fn draw_partition(image: &RgbImage, partition: &Partition, style: &OverlayStyle) -> RgbImage {
    let mut canvas = image.clone();
    for contour in &partition.external {
        stroke_contour(&mut canvas, contour, style.external);
    }
    for contour in &partition.internal {
        stroke_contour(&mut canvas, contour, style.internal);
    }
    canvas
}

/// Paint a single selected contour onto a copy of the photograph.
#[must_use = "returns a painted copy, the input is not mutated"]
pub fn draw_selected(image: &RgbImage, contour: &Contour, style: &OverlayStyle) -> RgbImage {
    let mut canvas = image.clone();
    stroke_contour(&mut canvas, contour, style.selected);
    canvas
}

/// Mark the two calibration reference points on a copy of the photograph.
///
/// Each point gets a cross; a straight line connects them so the
/// measured pixel distance is visible.
#[must_use = "returns a painted copy, the input is not mutated"]
#[allow(clippy::cast_precision_loss)]
pub fn draw_reference(image: &RgbImage, p1: Point, p2: Point, style: &OverlayStyle) -> RgbImage {
    let mut canvas = image.clone();
    draw_line_segment_mut(
        &mut canvas,
        (p1.x as f32, p1.y as f32),
        (p2.x as f32, p2.y as f32),
        style.reference,
    );
    draw_cross_mut(&mut canvas, style.reference, p1.x, p1.y);
    draw_cross_mut(&mut canvas, style.reference, p2.x, p2.y);
    canvas
}
