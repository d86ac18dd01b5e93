//! World ↔ screen coordinate mapping under a pan/zoom transform.
//!
//! World space is where shape geometry lives; screen space is CSS pixels on
//! the drawing surface. A [`Transform`] maps one onto the other with a uniform
//! scale followed by a pixel offset.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }

    /// Whether both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pan/zoom state of the viewport.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom), kept within `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

/// Clamp a zoom factor into the allowed range.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

impl Transform {
    /// Build a transform, clamping `zoom` into range.
    #[must_use]
    pub fn new(pan_x: f64, pan_y: f64, zoom: f64) -> Self {
        Self { pan_x, pan_y, zoom: clamp_zoom(zoom) }
    }

    /// Repair a transform that came from outside the engine.
    ///
    /// Non-finite pan components reset to 0, a non-finite zoom resets to 1.
    #[must_use]
    pub fn clamped(self) -> Self {
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            pan_x: finite_or(self.pan_x, 0.0),
            pan_y: finite_or(self.pan_y, 0.0),
            zoom: clamp_zoom(finite_or(self.zoom, 1.0)),
        }
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Shift the pan offset by a screen-space delta. Zoom is unchanged.
    ///
    /// A delta that would push the pan past `f64` range is ignored.
    #[must_use]
    pub fn apply_pan(&self, delta: Point) -> Self {
        let next = Self { pan_x: self.pan_x + delta.x, pan_y: self.pan_y + delta.y, zoom: self.zoom };
        if next.is_finite() { next } else { *self }
    }

    /// Scale by `1 + zoom_delta` around `cursor`, keeping the world point
    /// under the cursor at the same screen position.
    ///
    /// The anchor is taken before the zoom changes and the new pan is solved
    /// directly from it: `pan = cursor - anchor * zoom`.
    #[must_use]
    pub fn apply_zoom(&self, zoom_delta: f64, cursor: Point) -> Self {
        if !zoom_delta.is_finite() {
            return *self;
        }
        let anchor = self.screen_to_world(cursor);
        let zoom = clamp_zoom(self.zoom * (1.0 + zoom_delta));
        let next = Self {
            pan_x: cursor.x - anchor.x * zoom,
            pan_y: cursor.y - anchor.y * zoom,
            zoom,
        };
        if next.is_finite() { next } else { *self }
    }

    /// Whether every component is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.pan_x.is_finite() && self.pan_y.is_finite() && self.zoom.is_finite()
    }
}
