//! Contour extraction: binarize an intensity map and trace boundary
//! polygons with their nesting relationships.
//!
//! Binarization is an inverse threshold: pixels *darker* than the cutoff
//! are treated as object. This pairs with the segmentation step, which
//! forces the keyed background to pure white.
//!
//! Tracing uses Suzuki–Abe border following via
//! [`imageproc::contours::find_contours`], which reports each border's
//! parent index — exactly the containment hierarchy needed to subtract
//! holes. Traced rings are chain-compacted: interior vertices of straight
//! runs are dropped, which reduces vertex count but never changes the
//! enclosed area.

use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};

use crate::types::{Contour, ContourNode, ContourTree, Point};

/// Default intensity cutoff for binarization.
///
/// Pixels darker than this count as object. 200 tolerates shadows and
/// off-white paper around the object.
pub const BINARIZE_THRESHOLD: u8 = 200;

/// Strict intensity cutoff used for calibrated measurement.
///
/// Only pixels that survived background whitening (anything not forced
/// to pure 255) count as object.
pub const STRICT_BINARIZE_THRESHOLD: u8 = 254;

/// Which boundaries to retrieve when tracing.
///
/// Full hierarchy is required whenever holes must be subtracted;
/// external-only suffices for outline display and pointer-based
/// selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Retrieval {
    /// Capture every boundary with its parent reference.
    #[default]
    Tree,
    /// Keep only outermost boundaries, ignoring holes.
    External,
}

/// Inverse binary threshold: darker pixels become foreground.
///
/// Returns a binary image of the same dimensions: 255 where the input
/// intensity is strictly below `threshold`, 0 elsewhere.
#[must_use = "returns the binarized image"]
pub fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y).0[0] < threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Trace boundary polygons in a binary image.
///
/// White pixels (non-zero) are object. In [`Retrieval::Tree`] mode every
/// border is kept along with its parent index; in
/// [`Retrieval::External`] mode only parentless borders survive.
///
/// A binary image with no foreground pixels produces an empty tree.
/// That is not an error — callers must treat it as "nothing measurable."
#[must_use = "returns the traced contour tree"]
pub fn trace_contours(binary: &GrayImage, retrieval: Retrieval) -> ContourTree {
    let raw: Vec<imageproc::contours::Contour<i32>> = imageproc::contours::find_contours(binary);

    let nodes = match retrieval {
        Retrieval::Tree => raw
            .into_iter()
            .map(|c| ContourNode {
                contour: Contour::new(compact_collinear(convert_points(c.points))),
                parent: c.parent,
            })
            .collect(),
        Retrieval::External => raw
            .into_iter()
            .filter(|c| c.parent.is_none())
            .map(|c| ContourNode {
                contour: Contour::new(compact_collinear(convert_points(c.points))),
                parent: None,
            })
            .collect(),
    };

    ContourTree::new(nodes)
}

/// Convert `imageproc` grid points into engine points.
fn convert_points(points: Vec<imageproc::point::Point<i32>>) -> Vec<Point> {
    points.into_iter().map(|p| Point::new(p.x, p.y)).collect()
}

/// Drop interior vertices of straight runs from a closed ring.
///
/// A vertex is dropped when its neighbors continue in exactly the same
/// direction (integer cross product zero, dot product positive). The
/// ring is treated cyclically, so runs crossing the start vertex also
/// collapse. Reversal points of degenerate out-and-back rings are kept.
#[must_use]
fn compact_collinear(points: Vec<Point>) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points;
    }

    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];

        let (ax, ay) = (
            i64::from(curr.x - prev.x),
            i64::from(curr.y - prev.y),
        );
        let (bx, by) = (
            i64::from(next.x - curr.x),
            i64::from(next.y - curr.y),
        );

        let cross = ax * by - ay * bx;
        let dot = ax * bx + ay * by;

        // Straight continuation: drop. Corners and reversals: keep.
        if cross != 0 || dot <= 0 {
            kept.push(curr);
        }
    }

    kept
}
