//! Gridmark Server - marker registry, grid control, and frame broadcasting
//!
//! This crate provides the stateful services of the Gridmark system:
//! - Marker registry with pending mutations and commit-then-visible semantics
//! - Grid spawning, click feedback handling, and ad-hoc frame publishing
//! - The fixed-rate frame transform broadcaster

pub mod broadcaster;
pub mod controller;
pub mod registry;

pub use broadcaster::{FrameBroadcaster, DEFAULT_TICK_PERIOD};
pub use controller::{ControlError, GridSettings, MarkerController};
pub use registry::{MarkerServer, MarkerUpdate};
