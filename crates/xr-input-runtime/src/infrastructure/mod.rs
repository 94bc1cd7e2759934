//! Infrastructure layer: adapters around the application use cases.
//!
//! Contains event sinks, sample sources (replay files, in-memory mocks), the
//! shared playspace root, configuration storage, and the frame loop.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `xr_input_core`, but MUST NOT be imported by either of them.

pub mod event_sink;
pub mod frame_loop;
pub mod playspace;
pub mod sample_source;
pub mod storage;
