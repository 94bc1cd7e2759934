//! Domain entities for XR controller input.
//!
//! This module contains pure per-frame logic with no infrastructure dependencies.
//!
//! # How the pieces fit together (for beginners)
//!
//! A tracked controller exposes a handful of *capabilities*: a pointer pose,
//! a trigger, a grip, a thumbstick, and so on.  Each capability is bound to a
//! single *canonical value* shape (pose, boolean, float, or 2-D axis) and to an
//! *action identifier* that the application understands.
//!
//! Every frame the platform hands us a [`sample::RawTrackingSample`] for one
//! tracked node.  The signal extractors (see [`crate::signal`]) read that
//! sample and write new canonical values into the [`capability::MappingRegistry`].
//! The change detector in [`value`] decides whether the value really changed,
//! and the [`tracking::TrackingStateMachine`] decides whether the controller is
//! currently being tracked at all.
//!
//! None of this code talks to a headset, a file, or a thread.  It can be
//! compiled and tested on any machine.

/// Capability kinds, mappings, and the per-controller mapping registry.
pub mod capability;
/// Raw per-frame samples supplied by the platform tracking layer.
pub mod sample;
/// Handedness and the tracking-state machine.
pub mod tracking;
/// Device-local to parent-space coordinate conversion.
pub mod transform;
/// Canonical values and change detection.
pub mod value;
