//! Shared types for the planimeter measurement engine.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference masks and
/// intensity maps without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbImage` so downstream crates can reference decoded
/// photographs without depending on `image` directly.
pub use image::RgbImage;

/// A 2D point on the pixel grid.
///
/// Contour vertices, pointer coordinates, and calibration reference
/// points all live on the integer grid of the source photograph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from the left edge).
    pub x: i32,
    /// Vertical position (pixels from the top edge).
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Exact integer arithmetic, so distance comparisons are free of
    /// floating-point ties.
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance(self, other: Self) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

/// A closed polygon boundary at pixel resolution.
///
/// Vertices are ordered; the ring is implicitly closed (the last vertex
/// connects back to the first). Orientation carries no meaning for area
/// computation, which uses the absolute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour(Vec<Point>);

impl Contour {
    /// Create a contour from an ordered ring of vertices.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the contour has no vertices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of vertices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all vertices.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the contour and returns the underlying vertex vector.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// One node of a contour forest: a boundary plus a reference to its
/// immediate enclosing boundary.
///
/// `parent` is an index into the owning [`ContourTree`]. A node without
/// a parent is an outermost ("external") boundary; a node with a parent
/// is enclosed by another boundary (a hole, or a shape nested inside a
/// hole).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContourNode {
    /// The boundary polygon.
    pub contour: Contour,
    /// Index of the immediate enclosing contour, if any.
    pub parent: Option<usize>,
}

/// All contours found in one mask, with their nesting relationships.
///
/// Nodes appear in discovery order from extraction. The tree structurally
/// allows arbitrary nesting depth, but measurement only distinguishes
/// "has a parent" from "has none" — see [`ContourTree::into_partition`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContourTree(Vec<ContourNode>);

impl ContourTree {
    /// Create a tree from extraction output.
    #[must_use]
    pub const fn new(nodes: Vec<ContourNode>) -> Self {
        Self(nodes)
    }

    /// Returns `true` if no contours were found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of contours in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all nodes in discovery order.
    #[must_use]
    pub fn nodes(&self) -> &[ContourNode] {
        &self.0
    }

    /// Iterate over the contours in discovery order, ignoring hierarchy.
    pub fn contours(&self) -> impl Iterator<Item = &Contour> {
        self.0.iter().map(|node| &node.contour)
    }

    /// Split the tree into external and internal contour sets.
    ///
    /// A contour with no parent is external; any contour with a parent
    /// is internal. Order within each set matches discovery order.
    /// Every contour lands in exactly one set, so the two sets together
    /// always recover the original contour count.
    #[must_use]
    pub fn into_partition(self) -> Partition {
        let mut external = Vec::new();
        let mut internal = Vec::new();
        for node in self.0 {
            if node.parent.is_none() {
                external.push(node.contour);
            } else {
                internal.push(node.contour);
            }
        }
        Partition { external, internal }
    }
}

/// External/internal split of a [`ContourTree`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Outermost boundaries (no enclosing contour).
    pub external: Vec<Contour>,
    /// Enclosed boundaries (holes and nested shapes).
    pub internal: Vec<Contour>,
}

impl Partition {
    /// Total number of contours across both sets.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.external.len() + self.internal.len()
    }

    /// Returns `true` if both sets are empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.external.is_empty() && self.internal.is_empty()
    }
}

/// Chroma-key band for background classification.
///
/// A pixel is background when its hue falls inside `[hue_low, hue_high]`
/// **and** both saturation and value reach their floors. Hue uses the
/// 8-bit convention (half-degrees, 0–179); saturation and value are
/// 0–255. Only the hue band is operator-tunable in practice; the floors
/// exist to keep near-gray and near-black pixels out of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromaKey {
    /// Lower hue bound, inclusive (half-degrees, 0–179).
    pub hue_low: u8,
    /// Upper hue bound, inclusive (half-degrees, 0–179).
    pub hue_high: u8,
    /// Minimum saturation for a pixel to count as keyed background.
    pub saturation_floor: u8,
    /// Minimum value for a pixel to count as keyed background.
    pub value_floor: u8,
}

impl Default for ChromaKey {
    /// Green-screen band: hue 35–85 with saturation/value floors of 50.
    fn default() -> Self {
        Self {
            hue_low: 35,
            hue_high: 85,
            saturation_floor: 50,
            value_floor: 50,
        }
    }
}

/// Configuration for a measurement request.
///
/// Background removal is an explicit, optional pre-step: when
/// `chroma_key` is `None` the raw image is thresholded directly, which
/// only works for dark objects on a light background. The default
/// enables the green-screen key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureConfig {
    /// Chroma-key band for background removal, or `None` to threshold
    /// the raw image without segmentation.
    pub chroma_key: Option<ChromaKey>,

    /// Intensity cutoff for binarization. Pixels darker than this are
    /// treated as object. Defaults to [`crate::extract::BINARIZE_THRESHOLD`];
    /// [`crate::extract::STRICT_BINARIZE_THRESHOLD`] keeps only pixels
    /// that survived whitening.
    pub binarize_threshold: u8,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            chroma_key: Some(ChromaKey::default()),
            binarize_threshold: crate::extract::BINARIZE_THRESHOLD,
        }
    }
}

/// What a [`Measurement`] was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementSource {
    /// Net area over a full external/internal partition.
    Net {
        /// Number of external boundaries summed.
        external: usize,
        /// Number of holes subtracted.
        internal: usize,
    },
    /// Area of one interactively selected contour.
    Selected {
        /// Index of the contour in the extracted candidate list.
        contour_index: usize,
    },
}

/// One surface measurement in physical squared units.
///
/// Created per request; the engine persists nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Area in physical squared units (e.g. mm² when the calibration
    /// length was given in mm).
    pub area: f64,
    /// Identity of the geometry the area was computed from.
    pub source: MeasurementSource,
}

/// Errors produced by the measurement engine.
///
/// Every error is local to a single request; the engine is deterministic
/// and side-effect-free, so nothing is retried internally. Transport
/// layers map these to failure responses.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Input bytes do not form a valid image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The chroma mask classified every pixel as background.
    #[error("no foreground detected: the mask is entirely background")]
    NoForeground,

    /// Selection or extraction yielded no usable contour.
    #[error("no contour found for the requested operation")]
    NoContour,

    /// Degenerate calibration input.
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    /// A physical-unit area was requested before any calibration.
    #[error("no calibration has been set")]
    Uncalibrated,

    /// Net area came out negative: hole area exceeds outer area, which
    /// indicates an inconsistent hierarchy partition.
    #[error("hierarchy inconsistency: hole area {internal} px² exceeds outer area {external} px²")]
    HierarchyInconsistency {
        /// Summed external area in pixel units.
        external: f64,
        /// Summed internal area in pixel units.
        internal: f64,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_distance_squared_is_exact() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(a.distance_squared(b), 25);
    }

    #[test]
    fn point_distance() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_distance_to_self_is_zero() {
        let p = Point::new(7, 11);
        assert_eq!(p.distance_squared(p), 0);
    }

    #[test]
    fn point_distance_handles_negative_coordinates() {
        let a = Point::new(-3, -4);
        let b = Point::new(0, 0);
        assert_eq!(a.distance_squared(b), 25);
    }

    // --- Contour tests ---

    #[test]
    fn contour_accessors() {
        let points = vec![Point::new(0, 0), Point::new(4, 0), Point::new(4, 4)];
        let contour = Contour::new(points.clone());
        assert_eq!(contour.len(), 3);
        assert!(!contour.is_empty());
        assert_eq!(contour.points(), &points);
        assert_eq!(contour.into_points(), points);
    }

    #[test]
    fn empty_contour() {
        let contour = Contour::new(vec![]);
        assert!(contour.is_empty());
        assert_eq!(contour.len(), 0);
    }

    // --- ContourTree / Partition tests ---

    fn square(origin: i32, side: i32) -> Contour {
        Contour::new(vec![
            Point::new(origin, origin),
            Point::new(origin + side, origin),
            Point::new(origin + side, origin + side),
            Point::new(origin, origin + side),
        ])
    }

    #[test]
    fn partition_splits_by_parent_presence() {
        let tree = ContourTree::new(vec![
            ContourNode {
                contour: square(0, 10),
                parent: None,
            },
            ContourNode {
                contour: square(2, 3),
                parent: Some(0),
            },
            ContourNode {
                contour: square(20, 5),
                parent: None,
            },
        ]);
        let partition = tree.into_partition();
        assert_eq!(partition.external.len(), 2);
        assert_eq!(partition.internal.len(), 1);
        assert_eq!(partition.internal[0], square(2, 3));
    }

    #[test]
    fn partition_preserves_contour_count() {
        // Round-trip property: re-union of the two sets recovers the
        // original count, with every contour in exactly one set.
        let tree = ContourTree::new(vec![
            ContourNode {
                contour: square(0, 10),
                parent: None,
            },
            ContourNode {
                contour: square(1, 2),
                parent: Some(0),
            },
            ContourNode {
                contour: square(5, 2),
                parent: Some(0),
            },
            ContourNode {
                contour: square(30, 8),
                parent: None,
            },
        ]);
        let original_count = tree.len();
        let partition = tree.into_partition();
        assert_eq!(partition.len(), original_count);
    }

    #[test]
    fn deep_nesting_collapses_to_two_sets() {
        // A shape nested inside a hole still has a parent, so it lands
        // in the internal set alongside the hole itself.
        let tree = ContourTree::new(vec![
            ContourNode {
                contour: square(0, 20),
                parent: None,
            },
            ContourNode {
                contour: square(4, 12),
                parent: Some(0),
            },
            ContourNode {
                contour: square(8, 4),
                parent: Some(1),
            },
        ]);
        let partition = tree.into_partition();
        assert_eq!(partition.external.len(), 1);
        assert_eq!(partition.internal.len(), 2);
    }

    #[test]
    fn empty_tree_partitions_to_empty_sets() {
        let partition = ContourTree::default().into_partition();
        assert!(partition.is_empty());
        assert_eq!(partition.len(), 0);
    }

    // --- Config tests ---

    #[test]
    fn chroma_key_defaults_to_green_band() {
        let key = ChromaKey::default();
        assert_eq!(key.hue_low, 35);
        assert_eq!(key.hue_high, 85);
        assert_eq!(key.saturation_floor, 50);
        assert_eq!(key.value_floor, 50);
    }

    #[test]
    fn measure_config_defaults() {
        let config = MeasureConfig::default();
        assert_eq!(config.chroma_key, Some(ChromaKey::default()));
        assert_eq!(config.binarize_threshold, 200);
    }

    // --- Error display tests ---

    #[test]
    fn error_uncalibrated_display() {
        assert_eq!(
            EngineError::Uncalibrated.to_string(),
            "no calibration has been set",
        );
    }

    #[test]
    fn error_invalid_calibration_display() {
        let err = EngineError::InvalidCalibration("reference points coincide".to_string());
        assert_eq!(
            err.to_string(),
            "invalid calibration: reference points coincide",
        );
    }

    #[test]
    fn error_hierarchy_inconsistency_carries_both_sums() {
        let err = EngineError::HierarchyInconsistency {
            external: 100.0,
            internal: 150.0,
        };
        let message = err.to_string();
        assert!(message.contains("150"), "missing internal sum: {message}");
        assert!(message.contains("100"), "missing external sum: {message}");
    }

    // --- Serde round-trip tests ---

    #[test]
    fn contour_serde_round_trip() {
        let contour = square(3, 7);
        let json = serde_json::to_string(&contour).unwrap();
        let deserialized: Contour = serde_json::from_str(&json).unwrap();
        assert_eq!(contour, deserialized);
    }

    #[test]
    fn measurement_serde_round_trip() {
        let measurement = Measurement {
            area: 1234.5,
            source: MeasurementSource::Net {
                external: 1,
                internal: 2,
            },
        };
        let json = serde_json::to_string(&measurement).unwrap();
        let deserialized: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(measurement, deserialized);
    }

    #[test]
    fn measure_config_serde_round_trip() {
        let config = MeasureConfig {
            chroma_key: None,
            binarize_threshold: 254,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MeasureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
