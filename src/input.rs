//! Input model: buttons, modifier keys, raw input events, and the gesture
//! state machine.
//!
//! `InputEvent` is what the host feeds in. `Gesture` is the interaction in
//! flight between pointer-down and pointer-up, carrying everything needed to
//! recompute geometry from the gesture start on every move. It is owned by the
//! engine and never stored in an `EditorState`, so it cannot leak into history
//! or persisted snapshots.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{Rectangle, ShapeId};
use crate::hit::Handle;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the platform's primary shortcut modifier is held.
    #[must_use]
    pub fn primary(self, which: PrimaryModifier) -> bool {
        match which {
            PrimaryModifier::Ctrl => self.ctrl,
            PrimaryModifier::Meta => self.meta,
        }
    }

    /// Whether the modifier that turns a primary-button drag into a pan is held.
    #[must_use]
    pub fn pan(self) -> bool {
        self.alt
    }
}

/// The modifier that drives shortcuts on this platform (Ctrl, or Cmd on macOS).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryModifier {
    #[default]
    Ctrl,
    Meta,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key, named as the browser reports it (e.g. `"z"`, `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Editor command a key press resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Undo,
    Redo,
    DeleteSelection,
    CancelGesture,
}

/// Resolve a key press to a command, if it is bound to one.
#[must_use]
pub fn command_for_key(key: &Key, modifiers: Modifiers, primary: PrimaryModifier) -> Option<Command> {
    if modifiers.primary(primary) && key.is("z") {
        return Some(if modifiers.shift { Command::Redo } else { Command::Undo });
    }
    if key.is("Delete") || key.is("Backspace") {
        return Some(Command::DeleteSelection);
    }
    if key.is("Escape") {
        return Some(Command::CancelGesture);
    }
    None
}

/// A raw input event from the host, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    /// The pointer left the canvas; ends a gesture like a release.
    PointerLeave,
    DoubleClick {
        x: f64,
        y: f64,
    },
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        dy: f64,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

/// The gesture in flight between pointer-down and pointer-up.
///
/// Each active variant carries the gesture-start context; every move is
/// computed from that plus the total pointer delta, never from the previous
/// frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the viewport.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is moving a shape.
    Dragging {
        /// Id of the shape being dragged.
        shape_id: ShapeId,
        /// World-space pointer position at pointer-down.
        start_world: Point,
        /// Shape origin at pointer-down.
        start_shape_pos: Point,
    },
    /// The user is resizing a shape by one of its handles.
    Resizing {
        /// Id of the shape being resized.
        shape_id: ShapeId,
        /// Which handle is being dragged.
        handle: Handle,
        /// World-space pointer position at pointer-down.
        start_world: Point,
        /// The shape as it was at pointer-down.
        start_shape: Rectangle,
    },
}

impl Gesture {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The shape this gesture edits, if any.
    #[must_use]
    pub fn target(&self) -> Option<ShapeId> {
        match self {
            Self::Dragging { shape_id, .. } | Self::Resizing { shape_id, .. } => Some(*shape_id),
            Self::Idle | Self::Panning { .. } => None,
        }
    }

    /// Whether finishing this gesture writes a history entry.
    #[must_use]
    pub fn commits(&self) -> bool {
        self.target().is_some()
    }
}
