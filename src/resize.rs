//! Resize geometry: turns a handle drag into a new rectangle.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::camera::Point;
use crate::consts::MIN_SIZE;
use crate::doc::Rectangle;
use crate::hit::Handle;

/// New geometry for `original` after dragging `handle` from `start` to `current`.
///
/// Each axis is solved on its own. A proposed size at or above `MIN_SIZE` is
/// taken as-is and the dragged edge follows the pointer. Anything smaller is
/// pinned to `MIN_SIZE` with the opposite edge left where it was, so the shape
/// never flips or jumps. Axes the handle does not touch are copied through.
#[must_use]
pub fn apply_resize(original: &Rectangle, handle: Handle, current: Point, start: Point) -> Rectangle {
    let d = current.delta_from(start);
    let (x, width) = resize_axis(original.x, original.width, d.x, handle.moves_left(), handle.moves_right());
    let (y, height) = resize_axis(original.y, original.height, d.y, handle.moves_top(), handle.moves_bottom());
    Rectangle { x, y, width, height, ..original.clone() }
}

/// Solve one axis. `low` / `high` say whether the drag moves the near or far edge.
fn resize_axis(origin: f64, size: f64, delta: f64, low: bool, high: bool) -> (f64, f64) {
    if low {
        let proposed = size - delta;
        if proposed >= MIN_SIZE {
            (origin + delta, proposed)
        } else {
            // far edge is the anchor
            (origin + size - MIN_SIZE, MIN_SIZE)
        }
    } else if high {
        let proposed = size + delta;
        if proposed >= MIN_SIZE { (origin, proposed) } else { (origin, MIN_SIZE) }
    } else {
        (origin, size)
    }
}
