//! Geometry primitives and coordinate translation.
//!
//! All state-carrying geometry in this crate lives in image-native
//! (pre-zoom) pixels. The helpers here translate between image space and
//! viewport space under a given scale and pan, and clamp pan axes to the
//! visible extent of the image.

use serde::{Deserialize, Serialize};

/// A 2D point or offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner X coordinate
    pub x: f32,
    /// Top-left corner Y coordinate
    pub y: f32,
    /// Width of the rect
    pub width: f32,
    /// Height of the rect
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Return this rect shifted by `(dx, dy)`, size unchanged.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Return this rect with every coordinate multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Clamp `value` to `[min, max]`.
///
/// A degenerate range (`min > max`) resolves to `max`. That case occurs when
/// the scaled image is smaller than its container; the pan then pins to the
/// container origin.
pub fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Map an image-space point to viewport space under `scale` and `pan`.
pub fn image_to_viewport(p: Point, scale: f32, pan: Point) -> Point {
    Point::new((p.x + pan.x) * scale, (p.y + pan.y) * scale)
}

/// Map a viewport-space point back to image space under `scale` and `pan`.
pub fn viewport_to_image(p: Point, scale: f32, pan: Point) -> Point {
    Point::new(p.x / scale - pan.x, p.y / scale - pan.y)
}
