//! 2D room planner: place furniture in a room outline and flag bad placements.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interactive part of the store-layout editor: translating raw pointer, wheel,
//! and key events into item moves and viewport changes, validating every
//! committed layout against the room, and drawing the result. The host
//! application only wires DOM events to the engine and persists the
//! [`doc::Layout`] carried by [`engine::Action::LayoutCommitted`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Room, placed items, layout blob, and the item store |
//! | [`geometry`] | Overlap, wall/door, and clearance validation |
//! | [`seed`] | Initial layout from a package's product list |
//! | [`camera`] | Pan/zoom viewport and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against placed items |
//! | [`render`] | Scene rendering to a Canvas 2D context |
//! | [`config`] | Grid and zoom tuning |
//! | [`consts`] | Shared numeric constants (grid unit, zoom limits, etc.) |
//! | [`error`] | Error types |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod seed;
