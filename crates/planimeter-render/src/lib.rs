//! planimeter-render: presentation layer for measurement results (sans-IO).
//!
//! Draws extracted contours, selections, and calibration references back
//! onto a copy of the photograph, and encodes images to byte buffers for
//! whatever transport the caller uses. Nothing here is part of the
//! measurement contract; it exists so operators can see what was
//! measured.

pub mod encode;
pub mod overlay;

pub use encode::{RenderError, encode_jpeg, encode_png};
pub use overlay::{OverlayStyle, draw_partition, draw_reference, draw_selected};
