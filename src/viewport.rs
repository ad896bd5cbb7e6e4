//! Viewport transform engine: zoom, pan, and drag-cursor state.
//!
//! All stored geometry is in image-native (pre-zoom) pixels. Scale is
//! applied exclusively at render time: image content maps through
//! `(p + pan) * scale`, while the highlight overlay, which has the pan
//! baked in by the state updates, maps through `h * scale` alone. Cursor
//! input arrives in viewport pixels; drag deltas are divided by the current
//! scale before they touch the pan, so drag speed tracks the cursor at
//! every zoom level.

use crate::constants::zoom;
use crate::geometry::{Point, clamp_axis};

/// Pointer buttons the drag machine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// The primary (usually left) button; the only one that starts a drag
    Primary,
    /// The secondary (usually right) button
    Secondary,
    /// The auxiliary (usually middle) button
    Auxiliary,
}

/// Owned transform state for the image viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Zoom level in percent; always a slider stop within bounds
    pub zoom_percent: u32,
    /// Pan offset in image-native pixels; each axis stays at or below zero
    pub image_position: Point,
    /// Last tracked cursor position in viewport pixels
    pub mouse_last_position: Point,
    /// Whether a drag is in progress
    pub is_dragging: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom_percent: zoom::DEFAULT,
            image_position: Point::default(),
            mouse_last_position: Point::default(),
            is_dragging: false,
        }
    }
}

/// The viewport transform engine.
///
/// Owns the transform state plus the container and image extents the pan
/// clamp needs. The render layer reads [`ViewportState`] as a snapshot.
#[derive(Debug, Clone)]
pub struct ViewportEngine {
    state: ViewportState,
    container_width: f32,
    container_height: f32,
    image_width: f32,
    image_height: f32,
}

impl ViewportEngine {
    /// Create an engine for a container of the given pixel size, with no
    /// image extents yet.
    pub fn new(container_width: f32, container_height: f32) -> Self {
        Self {
            state: ViewportState::default(),
            container_width,
            container_height,
            image_width: 0.0,
            image_height: 0.0,
        }
    }

    /// Current transform state snapshot.
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Current zoom level in percent.
    pub fn zoom_percent(&self) -> u32 {
        self.state.zoom_percent
    }

    /// Current pan offset in image-native pixels.
    pub fn image_position(&self) -> Point {
        self.state.image_position
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    /// Zoom factor the render layer applies.
    pub fn scale(&self) -> f32 {
        self.state.zoom_percent as f32 / 100.0
    }

    /// Pixel width of the viewport element.
    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Pixel height of the viewport element.
    pub fn container_height(&self) -> f32 {
        self.container_height
    }

    /// Record a new container size and re-clamp the pan against it.
    ///
    /// Returns the applied pan correction; the caller must forward it to an
    /// active highlight.
    pub fn set_container_size(&mut self, width: f32, height: f32) -> (f32, f32) {
        self.container_width = width;
        self.container_height = height;
        self.reclamp()
    }

    /// Record the native pixel size of the loaded image and re-clamp the
    /// pan against it. Returns the applied pan correction.
    pub fn set_image_size(&mut self, width: f32, height: f32) -> (f32, f32) {
        self.image_width = width;
        self.image_height = height;
        self.reclamp()
    }

    /// Set the zoom level, snapping to the nearest valid slider stop.
    ///
    /// Out-of-range or off-step input snaps to the nearest multiple of the
    /// step within bounds. The pan is re-clamped against the new scale
    /// immediately; the returned correction must shift an active highlight
    /// by the same amount so overlay and image stay consistent.
    pub fn set_zoom(&mut self, percent: u32) -> (f32, f32) {
        let snapped = snap_zoom(percent);
        if snapped != self.state.zoom_percent {
            log::debug!("zoom {}% -> {}%", self.state.zoom_percent, snapped);
        }
        self.state.zoom_percent = snapped;
        self.reclamp()
    }

    /// Start a drag at `pos` (viewport pixels).
    ///
    /// Only the primary button starts a drag; any other button is a no-op.
    pub fn begin_drag(&mut self, pos: Point, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        self.state.is_dragging = true;
        self.state.mouse_last_position = pos;
        log::debug!("drag started at ({:.1}, {:.1})", pos.x, pos.y);
    }

    /// Continue a drag to `pos` (viewport pixels).
    ///
    /// Returns the applied pan delta in image-native pixels, or `None` when
    /// no drag is in progress. The delta is post-clamp: at a pan boundary it
    /// is smaller than the cursor motion, and it is what must shift the
    /// highlight overlay. The tracked cursor position updates
    /// unconditionally, so a drag that hits a boundary and reverses resumes
    /// without a catch-up.
    pub fn drag_to(&mut self, pos: Point) -> Option<(f32, f32)> {
        if !self.state.is_dragging {
            return None;
        }

        let scale = self.scale();
        let last = self.state.mouse_last_position;
        let old = self.state.image_position;
        let proposed = Point::new(
            old.x - (last.x - pos.x) / scale,
            old.y - (last.y - pos.y) / scale,
        );

        let clamped = self.clamp_position(proposed);
        self.state.image_position = clamped;
        self.state.mouse_last_position = pos;
        Some((clamped.x - old.x, clamped.y - old.y))
    }

    /// End the drag. Idempotent; pointer-leave events are routed here as
    /// well so the machine cannot stick mid-drag.
    pub fn end_drag(&mut self) {
        self.state.is_dragging = false;
    }

    /// Restore transform defaults. Container and image extents are kept.
    pub fn reset(&mut self) {
        self.state = ViewportState::default();
    }

    /// Clamp the stored pan to the current bounds, returning the applied
    /// correction.
    fn reclamp(&mut self) -> (f32, f32) {
        let old = self.state.image_position;
        let clamped = self.clamp_position(old);
        self.state.image_position = clamped;
        (clamped.x - old.x, clamped.y - old.y)
    }

    /// Clamp a proposed pan so the image never reveals empty space beyond
    /// its own scaled extent. Each axis is clamped independently.
    fn clamp_position(&self, p: Point) -> Point {
        let scale = self.scale();
        let min_x = self.container_width / scale - self.image_width;
        let min_y = self.container_height / scale - self.image_height;
        Point::new(clamp_axis(p.x, min_x, 0.0), clamp_axis(p.y, min_y, 0.0))
    }
}

/// Snap a requested zoom percentage to the nearest valid slider stop.
fn snap_zoom(percent: u32) -> u32 {
    let rounded = (percent + zoom::STEP / 2) / zoom::STEP * zoom::STEP;
    rounded.clamp(zoom::MIN, zoom::MAX)
}
