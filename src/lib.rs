//! Shape editor engine for an infinite, pannable, zoomable canvas.
//!
//! The crate owns everything between raw input and pixels: translating
//! pointer, wheel and keyboard events into document edits, tracking the
//! viewport, hit-testing rectangles and their resize handles, and keeping an
//! undo history of committed states. Hosts feed [`input::InputEvent`]s into an
//! [`engine::Editor`], paint whatever [`engine::RenderSink::mark_dirty`] hands
//! them, and pick a [`persist::StateStore`] to keep the board between sessions.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] and the [`engine::Editor`] wrapper |
//! | [`doc`] | Rectangle and editor state types, copy-on-write updates |
//! | [`camera`] | Viewport transform and coordinate conversions |
//! | [`input`] | Input event types, shortcuts, and the gesture state machine |
//! | [`hit`] | Hit-testing against shapes and resize handles |
//! | [`resize`] | Handle-driven resize geometry |
//! | [`history`] | Bounded undo/redo stacks |
//! | [`persist`] | Snapshot codec and state stores |
//! | [`config`] | Environment-driven editor configuration |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |
//! | `web` | Browser `localStorage` store (feature `web`) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod history;
pub mod input;
pub mod persist;
pub mod resize;
#[cfg(feature = "web")]
pub mod web;
