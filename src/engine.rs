//! Interaction engine: turns input events into state changes.
//!
//! DESIGN
//! ======
//! `EngineCore` holds two states. `History` owns the committed snapshots; the
//! live `EditorState` is what the renderer paints. Gesture frames, selection
//! clicks, and viewport moves only touch the live state. Commit points (end of
//! a drag or resize that changed something, creation, deletion) push a copy of
//! the live state into history as one undo step.
//!
//! Undo and redo restore shapes and selection from history but keep the live
//! viewport, since viewport changes are never undoable. Selection clicks and
//! viewport moves are saved without becoming undo steps.
//!
//! Frames whose pointer math leaves `f64` range are dropped, so the live state
//! only ever holds finite numbers.
//!
//! `Editor` wraps the core with the outside world: it forwards `Action`s to a
//! [`RenderSink`] and a [`StateStore`], loads the saved board at startup, and
//! accepts whole-state replacements from other tabs.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, error, warn};

use crate::camera::{Point, Transform};
use crate::config::EditorConfig;
use crate::doc::{EditorState, Rectangle, RectanglePatch, ShapeId};
use crate::hit;
use crate::history::History;
use crate::input::{Button, Command, Gesture, InputEvent, Key, Modifiers, WheelDelta, command_for_key};
use crate::persist::{self, StateStore};
use crate::resize::apply_resize;

const CURSOR_DEFAULT: &str = "default";
const CURSOR_MOVE: &str = "move";
const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The live state changed; repaint.
    RenderNeeded,
    /// Show this CSS cursor over the canvas.
    SetCursor(&'static str),
    /// The state at rest changed; save it.
    PersistNeeded,
}

/// Core engine state: all logic that does not depend on a host.
pub struct EngineCore {
    history: History,
    state: EditorState,
    pub gesture: Gesture,
    config: EditorConfig,
    cursor: &'static str,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self::from_state(config, EditorState::default())
    }

    /// Start a session from a saved state. The state becomes the history root.
    #[must_use]
    pub fn from_state(config: EditorConfig, state: EditorState) -> Self {
        let state = state.sanitized();
        Self {
            history: History::with_limit(state.clone(), config.history_limit),
            state,
            gesture: Gesture::Idle,
            config,
            cursor: CURSOR_DEFAULT,
        }
    }

    // --- Queries ---

    /// The live state, including in-progress gesture geometry.
    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The committed history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.state.selected_shape_id
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    /// Look up a shape by id in the live state.
    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Rectangle> {
        self.state.shape_by_id(id)
    }

    /// The cursor most recently requested.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.cursor
    }

    // --- Data inputs ---

    /// Replace everything with a state that arrived from elsewhere.
    ///
    /// History restarts from `state`. A gesture in flight keeps running; it
    /// falls back to idle on its next event if its shape is gone, otherwise
    /// its commit lands on top of the new state.
    pub fn replace_state(&mut self, state: EditorState) -> Vec<Action> {
        let state = state.sanitized();
        self.history.reset(state.clone());
        self.state = state;
        debug!(shapes = self.state.len(), "state replaced externally");
        vec![Action::RenderNeeded]
    }

    // --- Input dispatch ---

    /// Route a raw input event to its handler.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { x, y, button, modifiers } => self.on_pointer_down(Point::new(x, y), button, modifiers),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(Point::new(x, y)),
            InputEvent::PointerUp { x, y } => self.on_pointer_up(Point::new(x, y)),
            InputEvent::PointerLeave => self.on_pointer_leave(),
            InputEvent::DoubleClick { x, y } => self.on_double_click(Point::new(x, y)),
            InputEvent::Wheel { x, y, dx, dy } => self.on_wheel(Point::new(x, y), WheelDelta { dx, dy }),
            InputEvent::KeyDown { key, modifiers } => self.on_key_down(&Key(key), modifiers),
        }
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        // A lost pointer-up must not leave a stale gesture behind.
        let mut actions = self.finish_gesture();

        match button {
            Button::Middle => self.begin_pan(screen, &mut actions),
            Button::Primary if modifiers.pan() => self.begin_pan(screen, &mut actions),
            Button::Primary => self.begin_select(screen, &mut actions),
            Button::Secondary => {}
        }
        actions
    }

    fn begin_pan(&mut self, screen: Point, actions: &mut Vec<Action>) {
        self.gesture = Gesture::Panning { last_screen: screen };
        self.set_cursor(CURSOR_GRABBING, actions);
    }

    fn begin_select(&mut self, screen: Point, actions: &mut Vec<Action>) {
        let world = self.state.transform.screen_to_world(screen);

        if let Some(selected) = self.state.selected_shape() {
            if let Some(handle) = hit::hit_test_handle(world, selected, &self.state.transform) {
                debug!(shape_id = %selected.id, ?handle, "resize started");
                self.gesture = Gesture::Resizing {
                    shape_id: selected.id,
                    handle,
                    start_world: world,
                    start_shape: selected.clone(),
                };
                self.set_cursor(hit::cursor_for_handle(handle), actions);
                return;
            }
        }

        let previous = self.state.selected_shape_id;
        match hit::hit_test_shape(&self.state, world) {
            Some(id) => {
                let start_shape_pos = self.state.shape_by_id(&id).map_or(world, Rectangle::origin);
                self.state = self.state.select_shape(Some(id));
                self.gesture = Gesture::Dragging { shape_id: id, start_world: world, start_shape_pos };
                debug!(shape_id = %id, "drag started");
                if previous != Some(id) {
                    actions.extend([Action::RenderNeeded, Action::PersistNeeded]);
                }
                self.set_cursor(CURSOR_MOVE, actions);
            }
            None => {
                if previous.is_some() {
                    self.state = self.state.select_shape(None);
                    actions.extend([Action::RenderNeeded, Action::PersistNeeded]);
                }
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        match self.gesture.clone() {
            Gesture::Idle => {
                let cursor = self.hover_cursor(screen);
                self.set_cursor(cursor, &mut actions);
            }
            Gesture::Panning { last_screen } => {
                let transform = self.state.transform.apply_pan(screen.delta_from(last_screen));
                self.gesture = Gesture::Panning { last_screen: screen };
                if transform != self.state.transform {
                    self.state = self.state.set_transform(transform);
                    actions.push(Action::RenderNeeded);
                }
            }
            Gesture::Dragging { shape_id, start_world, start_shape_pos } => {
                if self.abandon_if_missing(shape_id) {
                    return actions;
                }
                let d = self.state.transform.screen_to_world(screen).delta_from(start_world);
                let target = Point::new(start_shape_pos.x + d.x, start_shape_pos.y + d.y);
                // Out-of-range frames are dropped; the shape stays at its last good spot.
                if !target.is_finite() {
                    return actions;
                }
                self.state = self.state.update_shape(&shape_id, &RectanglePatch::position(target.x, target.y));
                actions.push(Action::RenderNeeded);
            }
            Gesture::Resizing { shape_id, handle, start_world, start_shape } => {
                if self.abandon_if_missing(shape_id) {
                    return actions;
                }
                let world = self.state.transform.screen_to_world(screen);
                let r = apply_resize(&start_shape, handle, world, start_world);
                if !world.is_finite() || !r.is_well_formed() {
                    return actions;
                }
                self.state = self.state.update_shape(&shape_id, &RectanglePatch::geometry(r.x, r.y, r.width, r.height));
                actions.push(Action::RenderNeeded);
            }
        }
        actions
    }

    pub fn on_pointer_up(&mut self, screen: Point) -> Vec<Action> {
        let mut actions = if self.gesture.commits() { self.on_pointer_move(screen) } else { Vec::new() };
        actions.extend(self.finish_gesture());
        let cursor = self.hover_cursor(screen);
        self.set_cursor(cursor, &mut actions);
        actions
    }

    /// The pointer left the canvas. Ends the gesture exactly like a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let mut actions = self.finish_gesture();
        self.set_cursor(CURSOR_DEFAULT, &mut actions);
        actions
    }

    /// Create a default rectangle with its top-left under the pointer.
    pub fn on_double_click(&mut self, screen: Point) -> Vec<Action> {
        if !self.gesture.is_idle() {
            return Vec::new();
        }
        let origin = self.state.transform.screen_to_world(screen);
        if !origin.is_finite() {
            return Vec::new();
        }
        let shape = Rectangle::create_default(origin, self.config.style.clone());
        debug!(shape_id = %shape.id, x = origin.x, y = origin.y, "shape created");
        self.state = self.state.add_shape(shape);
        self.commit();
        vec![Action::RenderNeeded, Action::PersistNeeded]
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        let zoom_delta = -delta.dy * self.config.wheel_zoom_speed;
        let transform = self.state.transform.apply_zoom(zoom_delta, screen);
        if transform == self.state.transform {
            return Vec::new();
        }
        self.state = self.state.set_transform(transform);
        let mut actions = vec![Action::RenderNeeded];
        if self.gesture.is_idle() {
            actions.push(Action::PersistNeeded);
        }
        actions
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let Some(command) = command_for_key(key, modifiers, self.config.primary_modifier) else {
            return Vec::new();
        };
        match command {
            Command::CancelGesture => self.cancel_gesture(),
            // History never moves under a live gesture.
            _ if !self.gesture.is_idle() => Vec::new(),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::DeleteSelection => self.delete_selection(),
        }
    }

    /// Step back one commit. Empty when there is nothing to undo.
    pub fn undo(&mut self) -> Vec<Action> {
        if !self.gesture.is_idle() || !self.history.undo() {
            return Vec::new();
        }
        self.restore_from_history();
        debug!(past = self.history.past().len(), "undo");
        vec![Action::RenderNeeded, Action::PersistNeeded]
    }

    /// Step forward one undone commit. Empty when there is nothing to redo.
    pub fn redo(&mut self) -> Vec<Action> {
        if !self.gesture.is_idle() || !self.history.redo() {
            return Vec::new();
        }
        self.restore_from_history();
        debug!(past = self.history.past().len(), "redo");
        vec![Action::RenderNeeded, Action::PersistNeeded]
    }

    /// Remove the selected shape as one undo step.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        let Some(id) = self.state.selected_shape_id else {
            return Vec::new();
        };
        self.state = self.state.remove_shape(&id);
        self.commit();
        debug!(shape_id = %id, "shape deleted");
        vec![Action::RenderNeeded, Action::PersistNeeded]
    }

    /// Abort the gesture in flight, putting its shape back where it started.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => return actions,
            Gesture::Panning { .. } => {}
            Gesture::Dragging { shape_id, start_shape_pos, .. } => {
                let patch = RectanglePatch::position(start_shape_pos.x, start_shape_pos.y);
                self.state = self.state.update_shape(&shape_id, &patch);
                actions.push(Action::RenderNeeded);
            }
            Gesture::Resizing { shape_id, start_shape, .. } => {
                let patch = RectanglePatch::geometry(start_shape.x, start_shape.y, start_shape.width, start_shape.height);
                self.state = self.state.update_shape(&shape_id, &patch);
                actions.push(Action::RenderNeeded);
            }
        }
        debug!("gesture cancelled");
        self.set_cursor(CURSOR_DEFAULT, &mut actions);
        actions
    }

    // --- Internals ---

    /// End the gesture in flight, committing it if it changed its shape.
    fn finish_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => Vec::new(),
            // Viewport only: saved, never undoable.
            Gesture::Panning { .. } => vec![Action::PersistNeeded],
            Gesture::Dragging { shape_id, start_shape_pos, .. } => {
                let moved = self.state.shape_by_id(&shape_id).is_some_and(|s| s.origin() != start_shape_pos);
                self.commit_gesture(moved, shape_id)
            }
            Gesture::Resizing { shape_id, start_shape, .. } => {
                let resized = self.state.shape_by_id(&shape_id).is_some_and(|s| {
                    (s.x, s.y, s.width, s.height) != (start_shape.x, start_shape.y, start_shape.width, start_shape.height)
                });
                self.commit_gesture(resized, shape_id)
            }
        }
    }

    fn commit_gesture(&mut self, changed: bool, shape_id: ShapeId) -> Vec<Action> {
        if !changed {
            return Vec::new();
        }
        self.commit();
        debug!(shape_id = %shape_id, past = self.history.past().len(), "gesture committed");
        vec![Action::PersistNeeded]
    }

    fn commit(&mut self) {
        self.history.push(self.state.clone());
    }

    fn restore_from_history(&mut self) {
        self.state = self.history.present().set_transform(self.state.transform);
    }

    /// Drop to idle when the gesture's shape has vanished underneath it.
    fn abandon_if_missing(&mut self, shape_id: ShapeId) -> bool {
        if self.state.shape_by_id(&shape_id).is_some() {
            return false;
        }
        debug!(shape_id = %shape_id, "gesture target gone, returning to idle");
        self.gesture = Gesture::Idle;
        true
    }

    fn hover_cursor(&self, screen: Point) -> &'static str {
        let Some(selected) = self.state.selected_shape() else {
            return CURSOR_DEFAULT;
        };
        let world = self.state.transform.screen_to_world(screen);
        hit::hit_test_handle(world, selected, &self.state.transform).map_or(CURSOR_DEFAULT, hit::cursor_for_handle)
    }

    fn set_cursor(&mut self, cursor: &'static str, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }
}

/// Where the editor sends paint requests.
///
/// Implementations typically set a dirty flag and schedule one repaint for the
/// next frame, so several marks within a frame cost a single paint.
pub trait RenderSink {
    /// The live state changed.
    fn mark_dirty(&mut self, state: &EditorState);

    /// Show `cursor` over the canvas.
    fn set_cursor(&mut self, _cursor: &str) {}
}

/// The full editor: engine core plus its render sink and state store.
pub struct Editor<S, R> {
    core: EngineCore,
    store: S,
    sink: R,
}

impl<S: StateStore, R: RenderSink> Editor<S, R> {
    /// Open an editor on whatever `store` holds.
    ///
    /// An unreadable or corrupt store starts a fresh board.
    pub fn open(config: EditorConfig, store: S, mut sink: R) -> Self {
        let state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => EditorState::default(),
            Err(e) => {
                warn!(error = %e, "saved state unusable; starting fresh");
                EditorState::default()
            }
        };
        let core = EngineCore::from_state(config, state);
        sink.mark_dirty(core.state());
        Self { core, store, sink }
    }

    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    #[must_use]
    pub fn state(&self) -> &EditorState {
        self.core.state()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Feed one input event through the engine.
    pub fn handle(&mut self, event: InputEvent) {
        let actions = self.core.handle(event);
        self.dispatch(&actions);
    }

    /// Another tab saved a new state. Replaces ours wholesale.
    pub fn on_external_state(&mut self, state: EditorState) {
        let actions = self.core.replace_state(state);
        self.dispatch(&actions);
    }

    /// Raw snapshot text from a cross-tab storage event. Garbage is ignored.
    pub fn on_external_snapshot(&mut self, raw: &str) {
        match persist::decode_snapshot(raw) {
            Ok(state) => self.on_external_state(state),
            Err(e) => warn!(error = %e, "ignoring unreadable cross-tab state"),
        }
    }

    fn dispatch(&mut self, actions: &[Action]) {
        let mut render = false;
        let mut persist = false;
        for action in actions {
            match action {
                Action::RenderNeeded => render = true,
                Action::PersistNeeded => persist = true,
                Action::SetCursor(cursor) => self.sink.set_cursor(cursor),
            }
        }
        if render {
            self.sink.mark_dirty(self.core.state());
        }
        if persist {
            if let Err(e) = self.store.save(self.core.state()) {
                error!(error = %e, "failed to save state");
            }
        }
    }
}
