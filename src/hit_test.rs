#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::ShapeStyle;

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
    Rectangle::create(x, y, w, h, ShapeStyle::default())
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Handle
// =============================================================

#[test]
fn handle_all_lists_corners_first() {
    assert!(Handle::ALL[..4].iter().all(|h| h.is_corner()));
    assert!(Handle::ALL[4..].iter().all(|h| !h.is_corner()));
}

#[test]
fn handle_serializes_kebab_case() {
    assert_eq!(serde_json::to_string(&Handle::TopLeft).unwrap(), "\"top-left\"");
    assert_eq!(serde_json::to_string(&Handle::Bottom).unwrap(), "\"bottom\"");
    let back: Handle = serde_json::from_str("\"bottom-right\"").unwrap();
    assert_eq!(back, Handle::BottomRight);
}

#[test]
fn each_handle_moves_expected_edges() {
    for h in Handle::ALL {
        assert!(!(h.moves_left() && h.moves_right()), "{h:?}");
        assert!(!(h.moves_top() && h.moves_bottom()), "{h:?}");
        let axes = usize::from(h.moves_left() || h.moves_right()) + usize::from(h.moves_top() || h.moves_bottom());
        assert_eq!(axes, if h.is_corner() { 2 } else { 1 }, "{h:?}");
    }
}

// =============================================================
// handle_position
// =============================================================

#[test]
fn handle_positions_on_rectangle() {
    let r = rect(10.0, 20.0, 100.0, 60.0);
    assert_eq!(handle_position(&r, Handle::TopLeft), pt(10.0, 20.0));
    assert_eq!(handle_position(&r, Handle::TopRight), pt(110.0, 20.0));
    assert_eq!(handle_position(&r, Handle::BottomLeft), pt(10.0, 80.0));
    assert_eq!(handle_position(&r, Handle::BottomRight), pt(110.0, 80.0));
    assert_eq!(handle_position(&r, Handle::Top), pt(60.0, 20.0));
    assert_eq!(handle_position(&r, Handle::Right), pt(110.0, 50.0));
    assert_eq!(handle_position(&r, Handle::Bottom), pt(60.0, 80.0));
    assert_eq!(handle_position(&r, Handle::Left), pt(10.0, 50.0));
}

// =============================================================
// hit_test_handle
// =============================================================

#[test]
fn hit_exact_corner() {
    let r = rect(0.0, 0.0, 100.0, 80.0);
    let t = Transform::default();
    assert_eq!(hit_test_handle(pt(100.0, 80.0), &r, &t), Some(Handle::BottomRight));
    assert_eq!(hit_test_handle(pt(0.0, 0.0), &r, &t), Some(Handle::TopLeft));
}

#[test]
fn hit_edge_midpoint() {
    let r = rect(0.0, 0.0, 100.0, 80.0);
    let t = Transform::default();
    assert_eq!(hit_test_handle(pt(50.0, 0.0), &r, &t), Some(Handle::Top));
    assert_eq!(hit_test_handle(pt(0.0, 40.0), &r, &t), Some(Handle::Left));
}

#[test]
fn hit_radius_is_inclusive() {
    let r = rect(0.0, 0.0, 100.0, 80.0);
    let t = Transform::default();
    assert_eq!(hit_test_handle(pt(108.0, 80.0), &r, &t), Some(Handle::BottomRight));
    assert_eq!(hit_test_handle(pt(108.5, 80.0), &r, &t), None);
}

#[test]
fn miss_in_body_center() {
    let r = rect(0.0, 0.0, 100.0, 80.0);
    assert_eq!(hit_test_handle(pt(50.0, 40.0), &r, &Transform::default()), None);
}

#[test]
fn corner_wins_over_overlapping_edge() {
    // 12 wide: top-left (0,0) and top (6,0) are both within 8px of (3,0).
    let r = rect(0.0, 0.0, 12.0, 40.0);
    let t = Transform::default();
    assert_eq!(hit_test_handle(pt(3.0, 0.0), &r, &t), Some(Handle::TopLeft));
}

#[test]
fn hit_radius_is_constant_in_screen_pixels() {
    let r = rect(0.0, 0.0, 100.0, 80.0);
    // At zoom 4, 8px on screen is 2 world units.
    let t = Transform { pan_x: 0.0, pan_y: 0.0, zoom: 4.0 };
    assert_eq!(hit_test_handle(pt(102.0, 80.0), &r, &t), Some(Handle::BottomRight));
    assert_eq!(hit_test_handle(pt(103.0, 80.0), &r, &t), None);

    // At zoom 0.5, 8px on screen is 16 world units.
    let t = Transform { pan_x: 0.0, pan_y: 0.0, zoom: 0.5 };
    assert_eq!(hit_test_handle(pt(115.0, 80.0), &r, &t), Some(Handle::BottomRight));
}

#[test]
fn hit_ignores_pan() {
    let r = rect(0.0, 0.0, 100.0, 80.0);
    let t = Transform { pan_x: 350.0, pan_y: -120.0, zoom: 1.0 };
    assert_eq!(hit_test_handle(pt(100.0, 80.0), &r, &t), Some(Handle::BottomRight));
}

// =============================================================
// hit_test_shape
// =============================================================

#[test]
fn hit_shape_first_in_creation_order_wins() {
    let a = rect(0.0, 0.0, 100.0, 100.0);
    let b = rect(50.0, 50.0, 100.0, 100.0);
    let state = EditorState::new().add_shape(a.clone()).add_shape(b.clone());
    assert_eq!(hit_test_shape(&state, pt(75.0, 75.0)), Some(a.id));
    assert_eq!(hit_test_shape(&state, pt(140.0, 140.0)), Some(b.id));
}

#[test]
fn hit_shape_miss_returns_none() {
    let state = EditorState::new().add_shape(rect(0.0, 0.0, 10.0, 10.0));
    assert_eq!(hit_test_shape(&state, pt(500.0, 500.0)), None);
    assert_eq!(hit_test_shape(&EditorState::new(), pt(0.0, 0.0)), None);
}

// =============================================================
// cursor_for_handle
// =============================================================

#[test]
fn cursors_match_handle_axes() {
    assert_eq!(cursor_for_handle(Handle::TopLeft), "nwse-resize");
    assert_eq!(cursor_for_handle(Handle::BottomRight), "nwse-resize");
    assert_eq!(cursor_for_handle(Handle::TopRight), "nesw-resize");
    assert_eq!(cursor_for_handle(Handle::BottomLeft), "nesw-resize");
    assert_eq!(cursor_for_handle(Handle::Top), "ns-resize");
    assert_eq!(cursor_for_handle(Handle::Bottom), "ns-resize");
    assert_eq!(cursor_for_handle(Handle::Left), "ew-resize");
    assert_eq!(cursor_for_handle(Handle::Right), "ew-resize");
}
