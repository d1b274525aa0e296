//! Interaction core for the rectangle resizer.
//!
//! This crate owns everything between raw input and the remote store: the
//! pointer gesture state machine that turns drags on the body or a corner
//! handle into live geometry, the numeric field binding, the canonical
//! geometry store, and the debounced validate-then-persist pipeline. The
//! embedding UI is responsible only for wiring its events to the [`engine`]
//! and rendering the [`view`] it hands back.
//!
//! Everything runs on a single thread. Timers and remote round trips are
//! `spawn_local` tasks, so the engine must be driven from inside a
//! [`tokio::task::LocalSet`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Facade the host talks to; returns [`engine::Action`]s |
//! | [`geometry`] | Dimensions, positions, directions, and the delta math |
//! | [`hit`] | Hit-testing the body and corner handles |
//! | [`input`] | Pointer input types and the gesture session state |
//! | [`gesture`] | Gesture controller and the scoped pointer capture |
//! | [`store`] | Canonical geometry store |
//! | [`sync`] | Debounced validate/update pipeline |
//! | [`fields`] | Numeric width/height field binding |
//! | [`remote`] | Remote store trait and its HTTP implementation |
//! | [`view`] | Display model for the host renderer |
//! | [`config`] | Typed configuration loaded from the environment |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants (defaults, minimum sizes, etc.) |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod fields;
pub mod geometry;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod remote;
pub mod store;
pub mod sync;
pub mod view;
