//! xr-input-runtime library entry point.
//!
//! Exposes the module tree shared by the binary in `main.rs` and the
//! integration tests in `tests/`.

pub mod application;
pub mod infrastructure;
