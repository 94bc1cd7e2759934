//! Application layer: per-frame use cases built on `xr_input_core`.
//!
//! Code here orchestrates domain objects and talks to the outside world only
//! through traits (`InputEventSink`, `PlayspaceRoot`).  It performs no file
//! or platform I/O.
//!
//! # Sub-modules
//!
//! - **`dispatch`** – Drives one controller through one frame: validates its
//!   mapping registry, runs the extractors, and notifies the event sink of
//!   every change.  Runs once per controller per frame.
//!
//! - **`manage_controllers`** – Keeps the set of live controllers and routes
//!   each frame's samples to the right one by tracked node.
//!
//! - **`build_registry`** – Turns a controller profile (from configuration)
//!   into a ready-to-run `ControllerState`.

pub mod build_registry;
pub mod dispatch;
pub mod manage_controllers;
