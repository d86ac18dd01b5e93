//! Shared numeric constants for the editor core.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

// ── Geometry ────────────────────────────────────────────────────

/// Minimum width and height of a rectangle, in world units.
pub const MIN_SIZE: f64 = 10.0;

/// Width of a rectangle created without an explicit size.
pub const DEFAULT_WIDTH: f64 = 100.0;

/// Height of a rectangle created without an explicit size.
pub const DEFAULT_HEIGHT: f64 = 60.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Drawn size of a resize handle, in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 8.0;

/// Extra grab tolerance around a handle, in screen pixels.
pub const HIT_MARGIN_PX: f64 = 4.0;

/// Screen-space radius within which a pointer grabs a handle.
pub const HANDLE_HIT_RADIUS_PX: f64 = HANDLE_SIZE_PX / 2.0 + HIT_MARGIN_PX;

// ── Style ───────────────────────────────────────────────────────

/// Fill color for new rectangles.
pub const DEFAULT_FILL: &str = "#D94B4B";

/// Stroke color for new rectangles.
pub const DEFAULT_STROKE: &str = "#1F1A17";

/// Stroke width for new rectangles, in world units.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;
