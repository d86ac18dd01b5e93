//! Document model: rectangles, the editor state snapshot, and its pure update
//! operations.
//!
//! `EditorState` is a value. Every operation here borrows the current state and
//! returns a new one; the input is never touched. Shapes are held behind `Arc`
//! so a new state shares every rectangle it did not change with the state it
//! was derived from. This is what lets the history stack keep old snapshots
//! frozen while the live state keeps moving.
//!
//! Data flows into this layer from the input engine (mutations) and from
//! persistence (decoding, followed by [`EditorState::sanitized`]).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Point, Transform};
use crate::consts::{DEFAULT_FILL, DEFAULT_HEIGHT, DEFAULT_STROKE, DEFAULT_STROKE_WIDTH, DEFAULT_WIDTH, MIN_SIZE};

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// Raise a size below the minimum (or a non-finite one) to `MIN_SIZE`.
#[must_use]
pub fn clamp_size(size: f64) -> f64 {
    if size.is_finite() { size.max(MIN_SIZE) } else { MIN_SIZE }
}

/// Paint attributes for a rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Fill color as a CSS color string.
    pub fill: String,
    /// Stroke color as a CSS color string.
    pub stroke: String,
    /// Stroke width in world units.
    pub stroke_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL.to_owned(),
            stroke: DEFAULT_STROKE.to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// An axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    /// Unique identifier for this shape.
    pub id: ShapeId,
    /// Left edge in world coordinates.
    pub x: f64,
    /// Top edge in world coordinates.
    pub y: f64,
    /// Width in world units, never below `MIN_SIZE`.
    pub width: f64,
    /// Height in world units, never below `MIN_SIZE`.
    pub height: f64,
    /// Fill color as a CSS color string.
    pub fill: String,
    /// Stroke color as a CSS color string.
    pub stroke: String,
    /// Stroke width in world units.
    pub stroke_width: f64,
}

impl Rectangle {
    /// Create a rectangle with a fresh id. Sizes are raised to `MIN_SIZE`.
    #[must_use]
    pub fn create(x: f64, y: f64, width: f64, height: f64, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width: clamp_size(width),
            height: clamp_size(height),
            fill: style.fill,
            stroke: style.stroke,
            stroke_width: style.stroke_width,
        }
    }

    /// Create a default-sized (`100 x 60`) rectangle with its top-left at `origin`.
    #[must_use]
    pub fn create_default(origin: Point, style: ShapeStyle) -> Self {
        Self::create(origin.x, origin.y, DEFAULT_WIDTH, DEFAULT_HEIGHT, style)
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `pt` lies inside the rectangle or on its border.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }

    /// Finite position and stroke, sizes at or above `MIN_SIZE`.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.origin().is_finite()
            && self.stroke_width.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= MIN_SIZE
            && self.height >= MIN_SIZE
    }

    fn repaired(&self) -> Self {
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            x: finite_or(self.x, 0.0),
            y: finite_or(self.y, 0.0),
            width: clamp_size(self.width),
            height: clamp_size(self.height),
            stroke_width: finite_or(self.stroke_width, DEFAULT_STROKE_WIDTH),
            ..self.clone()
        }
    }

    /// Return a copy with the patch's present fields applied.
    #[must_use]
    pub fn patched(&self, patch: &RectanglePatch) -> Self {
        let mut next = self.clone();
        if let Some(x) = patch.x {
            next.x = x;
        }
        if let Some(y) = patch.y {
            next.y = y;
        }
        if let Some(w) = patch.width {
            next.width = clamp_size(w);
        }
        if let Some(h) = patch.height {
            next.height = clamp_size(h);
        }
        if let Some(ref fill) = patch.fill {
            next.fill.clone_from(fill);
        }
        if let Some(ref stroke) = patch.stroke {
            next.stroke.clone_from(stroke);
        }
        if let Some(sw) = patch.stroke_width {
            next.stroke_width = sw;
        }
        next
    }
}

/// Sparse update for a rectangle. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectanglePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl RectanglePatch {
    /// Patch that moves the origin.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    /// Patch that replaces the full geometry.
    #[must_use]
    pub fn geometry(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x: Some(x), y: Some(y), width: Some(width), height: Some(height), ..Default::default() }
    }
}

/// One editing session's shapes, selection, and viewport.
///
/// Shapes are kept in insertion order, which is also paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorState {
    /// All shapes, bottom first.
    pub shapes: Vec<Arc<Rectangle>>,
    /// The id of the selected shape, if any. Always refers to a shape in `shapes`.
    pub selected_shape_id: Option<ShapeId>,
    /// Current viewport.
    pub transform: Transform,
}

impl EditorState {
    /// An empty state with the identity viewport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape and select it.
    #[must_use]
    pub fn add_shape(&self, shape: Rectangle) -> Self {
        let mut shapes = self.shapes.clone();
        let id = shape.id;
        shapes.push(Arc::new(shape));
        Self { shapes, selected_shape_id: Some(id), transform: self.transform }
    }

    /// Remove a shape by id, clearing the selection if it pointed there.
    #[must_use]
    pub fn remove_shape(&self, id: &ShapeId) -> Self {
        let shapes = self.shapes.iter().filter(|s| s.id != *id).cloned().collect();
        let selected_shape_id = self.selected_shape_id.filter(|sel| sel != id);
        Self { shapes, selected_shape_id, transform: self.transform }
    }

    /// Merge `patch` into the shape with `id`. Unknown ids leave the state unchanged.
    #[must_use]
    pub fn update_shape(&self, id: &ShapeId, patch: &RectanglePatch) -> Self {
        let shapes = self
            .shapes
            .iter()
            .map(|s| if s.id == *id { Arc::new(s.patched(patch)) } else { Arc::clone(s) })
            .collect();
        Self { shapes, selected_shape_id: self.selected_shape_id, transform: self.transform }
    }

    /// Select a shape, or clear the selection with `None`.
    ///
    /// Selecting an id that is not in the document clears the selection.
    #[must_use]
    pub fn select_shape(&self, id: Option<ShapeId>) -> Self {
        let selected_shape_id = id.filter(|id| self.shape_by_id(id).is_some());
        Self { shapes: self.shapes.clone(), selected_shape_id, transform: self.transform }
    }

    /// Replace the viewport transform.
    #[must_use]
    pub fn set_transform(&self, transform: Transform) -> Self {
        Self { shapes: self.shapes.clone(), selected_shape_id: self.selected_shape_id, transform }
    }

    /// The selected shape, if any.
    #[must_use]
    pub fn selected_shape(&self) -> Option<&Rectangle> {
        self.selected_shape_id.as_ref().and_then(|id| self.shape_by_id(id))
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape_by_id(&self, id: &ShapeId) -> Option<&Rectangle> {
        self.shapes.iter().find(|s| s.id == *id).map(AsRef::as_ref)
    }

    /// Iterate shapes in paint order.
    pub fn shapes(&self) -> impl Iterator<Item = &Rectangle> {
        self.shapes.iter().map(AsRef::as_ref)
    }

    /// Number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if there are no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Repair a state decoded from outside the engine.
    ///
    /// Drops repeated ids (first wins), resets non-finite coordinates and
    /// stroke widths, raises undersized shapes, clamps the viewport, and
    /// clears a selection that points nowhere.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let mut seen = HashSet::with_capacity(self.shapes.len());
        let shapes: Vec<Arc<Rectangle>> = self
            .shapes
            .into_iter()
            .filter(|s| seen.insert(s.id))
            .map(|s| if s.is_well_formed() { s } else { Arc::new(s.repaired()) })
            .collect();
        let selected_shape_id = self.selected_shape_id.filter(|id| seen.contains(id));
        Self { shapes, selected_shape_id, transform: self.transform.clamped() }
    }
}
