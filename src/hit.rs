//! Hit-testing: resize handles of the selected shape and shape bodies.
//!
//! Handle tests run in screen space so the grab radius stays the same number
//! of pixels at every zoom level. Body tests run in world space.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Transform};
use crate::consts::HANDLE_HIT_RADIUS_PX;
use crate::doc::{EditorState, Rectangle, ShapeId};

/// One of the eight resize handles on a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Right,
    Bottom,
    Left,
}

impl Handle {
    /// All handles in hit-test priority order: corners before edges.
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
        Handle::Top,
        Handle::Right,
        Handle::Bottom,
        Handle::Left,
    ];

    /// Whether this handle sits on a corner.
    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight)
    }

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    /// Whether dragging this handle moves the right edge.
    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    /// Whether dragging this handle moves the bottom edge.
    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }
}

/// World-space position of `handle` on `rect`.
#[must_use]
pub fn handle_position(rect: &Rectangle, handle: Handle) -> Point {
    let cx = rect.x + rect.width / 2.0;
    let cy = rect.y + rect.height / 2.0;
    match handle {
        Handle::TopLeft => Point::new(rect.x, rect.y),
        Handle::TopRight => Point::new(rect.right(), rect.y),
        Handle::BottomLeft => Point::new(rect.x, rect.bottom()),
        Handle::BottomRight => Point::new(rect.right(), rect.bottom()),
        Handle::Top => Point::new(cx, rect.y),
        Handle::Right => Point::new(rect.right(), cy),
        Handle::Bottom => Point::new(cx, rect.bottom()),
        Handle::Left => Point::new(rect.x, cy),
    }
}

/// The first handle of `rect` within grab range of `world_pt`.
///
/// Distances are measured in screen pixels. Corner handles win over edge
/// handles where their grab circles overlap.
#[must_use]
pub fn hit_test_handle(world_pt: Point, rect: &Rectangle, transform: &Transform) -> Option<Handle> {
    let pt = transform.world_to_screen(world_pt);
    Handle::ALL.into_iter().find(|&handle| {
        let hp = transform.world_to_screen(handle_position(rect, handle));
        (pt.x - hp.x).hypot(pt.y - hp.y) <= HANDLE_HIT_RADIUS_PX
    })
}

/// The first shape, in creation order, containing `world_pt`.
#[must_use]
pub fn hit_test_shape(state: &EditorState, world_pt: Point) -> Option<ShapeId> {
    state.shapes().find(|s| s.contains(world_pt)).map(|s| s.id)
}

/// CSS cursor shown while hovering or dragging `handle`.
#[must_use]
pub fn cursor_for_handle(handle: Handle) -> &'static str {
    match handle {
        Handle::TopLeft | Handle::BottomRight => "nwse-resize",
        Handle::TopRight | Handle::BottomLeft => "nesw-resize",
        Handle::Top | Handle::Bottom => "ns-resize",
        Handle::Left | Handle::Right => "ew-resize",
    }
}
