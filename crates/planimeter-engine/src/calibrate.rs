//! Scale calibration: derive a length-per-pixel factor from two
//! reference points a known real-world distance apart.
//!
//! Calibration is a caller-owned value, not ambient process state. A
//! transport layer that wants "calibrate once, measure many times"
//! keeps a [`CalibrationSession`] per operator (wrapping it in its own
//! lock if shared across threads); the engine itself holds no shared
//! mutable data.

use serde::{Deserialize, Serialize};

use crate::types::{EngineError, Point};

/// A validated length-per-pixel scale factor.
///
/// Construction is the only place degenerate input can enter, so any
/// `Calibration` in hand is safe to square and multiply with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    scale_factor: f64,
}

impl Calibration {
    /// Derive a scale factor from two reference points and the real
    /// distance between them.
    ///
    /// `scale_factor = real_length / pixel_distance(p1, p2)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCalibration`] when the reference
    /// points coincide (zero pixel distance) or `real_length` is not a
    /// positive finite number. A zero or infinite scale factor must
    /// never propagate into area computation.
    pub fn from_reference(p1: Point, p2: Point, real_length: f64) -> Result<Self, EngineError> {
        if p1 == p2 {
            return Err(EngineError::InvalidCalibration(
                "reference points coincide (zero pixel distance)".to_string(),
            ));
        }
        if !real_length.is_finite() || real_length <= 0.0 {
            return Err(EngineError::InvalidCalibration(format!(
                "real-world length must be positive, got {real_length}",
            )));
        }
        Ok(Self {
            scale_factor: real_length / p1.distance(p2),
        })
    }

    /// Wrap an externally supplied scale factor.
    ///
    /// Some callers already know their length-per-pixel (from a prior
    /// calibration or a fixed camera rig) and pass it directly.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCalibration`] unless `scale_factor`
    /// is a positive finite number.
    pub fn from_scale_factor(scale_factor: f64) -> Result<Self, EngineError> {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(EngineError::InvalidCalibration(format!(
                "scale factor must be positive, got {scale_factor}",
            )));
        }
        Ok(Self { scale_factor })
    }

    /// Physical length represented by one pixel.
    #[must_use]
    pub const fn scale_factor(self) -> f64 {
        self.scale_factor
    }
}

/// "Set once, reuse across calls" holder for the current calibration.
///
/// Starts unset; [`calibrate`](Self::calibrate) overwrites with
/// last-write-wins semantics; there is no way to clear it. Area requests
/// read it through [`current`](Self::current), which fails with
/// [`EngineError::Uncalibrated`] until the first successful calibration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSession {
    current: Option<Calibration>,
}

impl CalibrationSession {
    /// Create a session with no calibration set.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Derive and store a new calibration, replacing any previous one.
    ///
    /// Returns the resulting scale factor.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCalibration`] on degenerate input;
    /// the previously stored calibration (if any) is left untouched.
    pub fn calibrate(
        &mut self,
        p1: Point,
        p2: Point,
        real_length: f64,
    ) -> Result<f64, EngineError> {
        let calibration = Calibration::from_reference(p1, p2, real_length)?;
        self.current = Some(calibration);
        Ok(calibration.scale_factor())
    }

    /// Store an already validated calibration, replacing any previous one.
    pub const fn set(&mut self, calibration: Calibration) {
        self.current = Some(calibration);
    }

    /// The currently active calibration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Uncalibrated`] if no calibration has ever
    /// been set on this session.
    pub fn current(&self) -> Result<Calibration, EngineError> {
        self.current.ok_or(EngineError::Uncalibrated)
    }

    /// Returns `true` once a calibration has been set.
    #[must_use]
    pub const fn is_calibrated(&self) -> bool {
        self.current.is_some()
    }
}
