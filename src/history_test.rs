#![allow(clippy::float_cmp)]

use proptest::prelude::*;

use super::*;
use crate::camera::Point;
use crate::doc::{Rectangle, ShapeStyle};

fn state_with_shape_at(x: f64) -> EditorState {
    EditorState::new().add_shape(Rectangle::create(x, 0.0, 20.0, 20.0, ShapeStyle::default()))
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_history_has_nothing_to_undo_or_redo() {
    let h = History::default();
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert_eq!(h.present(), &EditorState::new());
}

#[test]
fn undo_on_empty_is_noop() {
    let mut h = History::new(state_with_shape_at(1.0));
    let before = h.clone();
    assert!(!h.undo());
    assert_eq!(h, before);
}

#[test]
fn redo_on_empty_is_noop() {
    let mut h = History::new(state_with_shape_at(1.0));
    let before = h.clone();
    assert!(!h.redo());
    assert_eq!(h, before);
}

// =============================================================
// push / undo / redo
// =============================================================

#[test]
fn push_moves_present_to_past() {
    let a = state_with_shape_at(1.0);
    let b = state_with_shape_at(2.0);
    let mut h = History::new(a.clone());
    h.push(b.clone());
    assert_eq!(h.present(), &b);
    assert_eq!(h.past(), &[a]);
    assert!(!h.can_redo());
}

#[test]
fn undo_then_redo_walks_the_stack() {
    let a = state_with_shape_at(1.0);
    let b = state_with_shape_at(2.0);
    let c = state_with_shape_at(3.0);
    let mut h = History::new(a.clone());
    h.push(b.clone());
    h.push(c.clone());

    assert!(h.undo());
    assert_eq!(h.present(), &b);
    assert!(h.undo());
    assert_eq!(h.present(), &a);
    assert!(!h.undo());

    let future: Vec<_> = h.future().cloned().collect();
    assert_eq!(future, vec![b.clone(), c.clone()]);

    assert!(h.redo());
    assert_eq!(h.present(), &b);
    assert!(h.redo());
    assert_eq!(h.present(), &c);
    assert!(!h.redo());
    assert_eq!(h.past(), &[a, b]);
}

#[test]
fn push_after_undo_discards_redo_branch() {
    let mut h = History::new(state_with_shape_at(1.0));
    h.push(state_with_shape_at(2.0));
    h.undo();
    assert!(h.can_redo());
    h.push(state_with_shape_at(3.0));
    assert!(!h.can_redo());
    assert!(!h.redo());
}

#[test]
fn snapshots_stay_frozen_after_later_edits() {
    let a = state_with_shape_at(1.0);
    let id = a.shapes[0].id;
    let mut h = History::new(a);
    let moved = h.present().update_shape(&id, &crate::doc::RectanglePatch::position(500.0, 500.0));
    h.push(moved);
    assert_eq!(h.past()[0].shape_by_id(&id).map(|r| r.origin()), Some(Point::new(1.0, 0.0)));
}

// =============================================================
// Limit / reset
// =============================================================

#[test]
fn limit_drops_oldest_entries() {
    let mut h = History::with_limit(state_with_shape_at(0.0), 3);
    for i in 1..=5 {
        h.push(state_with_shape_at(f64::from(i)));
    }
    assert_eq!(h.past().len(), 3);
    assert_eq!(h.past()[0].shapes[0].x, 2.0);
    assert_eq!(h.present().shapes[0].x, 5.0);
}

#[test]
fn zero_limit_is_unbounded() {
    let mut h = History::with_limit(EditorState::new(), 0);
    for i in 0..150 {
        h.push(state_with_shape_at(f64::from(i)));
    }
    assert_eq!(h.past().len(), 150);
}

#[test]
fn reset_starts_fresh() {
    let mut h = History::new(state_with_shape_at(1.0));
    h.push(state_with_shape_at(2.0));
    h.push(state_with_shape_at(3.0));
    h.undo();
    let fresh = state_with_shape_at(9.0);
    h.reset(fresh.clone());
    assert_eq!(h.present(), &fresh);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}

// =============================================================
// Properties
// =============================================================

proptest! {
    #[test]
    fn undo_after_push_restores_present(pushes in 0usize..8, x in -1_000.0f64..1_000.0) {
        let mut h = History::default();
        for i in 0..pushes {
            h.push(state_with_shape_at(f64::from(u32::try_from(i).unwrap_or(0))));
        }
        let before = h.present().clone();
        let s = state_with_shape_at(x);
        h.push(s.clone());
        prop_assert!(h.undo());
        prop_assert_eq!(h.present(), &before);
        prop_assert!(h.redo());
        prop_assert_eq!(h.present(), &s);
    }

    #[test]
    fn push_after_undo_always_clears_future(pushes in 1usize..8, undos in 1usize..8) {
        let mut h = History::default();
        for i in 0..pushes {
            h.push(state_with_shape_at(f64::from(u32::try_from(i).unwrap_or(0))));
        }
        for _ in 0..undos {
            h.undo();
        }
        h.push(state_with_shape_at(-1.0));
        prop_assert!(!h.can_redo());
    }
}
