//! # xr-input-core
//!
//! Per-frame input canonicalisation for motion-tracked XR controllers.
//!
//! The crate turns a raw platform sample for one tracked node into a small
//! set of canonical values (pose, boolean, float, 2-D axis), detects which of
//! them actually changed since the previous frame, and tracks whether the
//! controller is currently being tracked.  It does not emit events itself;
//! the dispatch router in `xr-input-runtime` reads the dirty flags and
//! notifies an event sink.
//!
//! It has no dependencies on OS APIs, async runtimes, or rendering.
//!
//! - **`domain`** – capability kinds and mappings, canonical values and the
//!   change detector, raw samples, tracking state, coordinate transforms.
//! - **`signal`** – one extractor per signal family plus the kind → family
//!   dispatch table.
//! - **`recording`** – a compact binary format for capturing and replaying
//!   sample streams.

pub mod domain;
pub mod recording;
pub mod signal;

pub use domain::capability::{
    ActionId, CapabilityKind, CapabilityMapping, ConfigurationError, MappingRegistry, SignalFamily,
};
pub use domain::sample::{RawControllerInputs, RawTrackingSample, TrackedNode};
pub use domain::tracking::{Handedness, TrackingState, TrackingStateMachine, TrackingTransition};
pub use domain::transform::{to_parent_space, OrientationMode, ParentTransform};
pub use domain::value::{CanonicalValue, ChangeTolerance, Pose, ValueShape};
pub use signal::{extract, FrameContext, SignalChange};
