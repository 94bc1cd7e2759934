//! Signal extractors: raw sample fields → canonical mapping values.
//!
//! There is one extractor per [`SignalFamily`].  [`extract`] is the dispatch
//! table: it looks up the family for a mapping's kind and calls that family's
//! extractor, which writes exactly one mapping's cached value.  Kinds without
//! a family are a configuration error.
//!
//! Extractors never emit anything themselves.  Whether the write produced a
//! change is recorded on the mapping's dirty flag, and [`SignalChange::of`]
//! turns a dirty mapping into the notification the event sink should receive.

pub mod grip;
pub mod menu;
pub mod pose;
pub mod thumbstick;
pub mod touchpad;
pub mod trigger;

use glam::Vec2;

use crate::domain::capability::{CapabilityMapping, ConfigurationError, SignalFamily};
use crate::domain::sample::RawTrackingSample;
use crate::domain::transform::{OrientationMode, ParentTransform};
use crate::domain::value::{CanonicalValue, ChangeTolerance, Pose};

/// Everything an extractor may read for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub sample: &'a RawTrackingSample,
    /// World transform of the tracking-space root, if one exists this frame.
    pub parent: Option<&'a ParentTransform>,
    pub orientation_mode: OrientationMode,
    pub tolerance: &'a ChangeTolerance,
}

impl<'a> FrameContext<'a> {
    pub fn new(sample: &'a RawTrackingSample, tolerance: &'a ChangeTolerance) -> Self {
        Self {
            sample,
            parent: None,
            orientation_mode: OrientationMode::default(),
            tolerance,
        }
    }

    pub fn with_parent(mut self, parent: Option<&'a ParentTransform>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_orientation_mode(mut self, mode: OrientationMode) -> Self {
        self.orientation_mode = mode;
        self
    }
}

/// The notification a dirty mapping produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalChange {
    PoseChanged(Pose),
    /// A boolean went from released to pressed.
    Pressed,
    /// A boolean went from pressed to released.
    Released,
    FloatChanged(f32),
    AxisChanged(Vec2),
}

impl SignalChange {
    /// Returns the notification for `mapping`, or `None` if it is not dirty.
    pub fn of(mapping: &CapabilityMapping) -> Option<Self> {
        if !mapping.is_changed() {
            return None;
        }
        match *mapping.value() {
            CanonicalValue::Empty => None,
            CanonicalValue::Pose(p) => Some(SignalChange::PoseChanged(p)),
            CanonicalValue::Bool(true) => Some(SignalChange::Pressed),
            CanonicalValue::Bool(false) => Some(SignalChange::Released),
            CanonicalValue::Float(v) => Some(SignalChange::FloatChanged(v)),
            CanonicalValue::Axis(v) => Some(SignalChange::AxisChanged(v)),
        }
    }
}

/// Routes `mapping` to its family extractor and writes the new value.
///
/// `index` is the mapping's position in its registry, used for error reports.
///
/// # Errors
///
/// Returns [`ConfigurationError::UnrecognizedCapability`] if the mapping's
/// kind has no extractor family.  The mapping is left untouched in that case.
pub fn extract(
    frame: &FrameContext<'_>,
    mapping: &mut CapabilityMapping,
    index: usize,
) -> Result<(), ConfigurationError> {
    let Some(family) = mapping.kind().family() else {
        return Err(ConfigurationError::UnrecognizedCapability {
            kind: mapping.kind().name().to_string(),
            index,
        });
    };

    match family {
        SignalFamily::Inert => {
            mapping.clear_changed();
            Ok(())
        }
        SignalFamily::Pose => pose::extract(frame, mapping),
        SignalFamily::Trigger => trigger::extract(frame, mapping),
        SignalFamily::Grip => grip::extract(frame, mapping),
        SignalFamily::Thumbstick => thumbstick::extract(frame, mapping),
        SignalFamily::Touchpad => touchpad::extract(frame, mapping),
        SignalFamily::Menu => menu::extract(frame, mapping),
    }
}

/// Error for a kind that reached an extractor outside its family.
pub(crate) fn wrong_family(
    mapping: &CapabilityMapping,
    family: SignalFamily,
) -> ConfigurationError {
    ConfigurationError::WrongFamily {
        kind: mapping.kind().name().to_string(),
        family,
    }
}

/// Clamps an axis to the unit square, mapping NaN to zero.
pub(crate) fn clamp_axis(v: Vec2) -> Vec2 {
    let v = if v.is_nan() { Vec2::ZERO } else { v };
    v.clamp(Vec2::splat(-1.0), Vec2::ONE)
}

/// Clamps a pressure amount to `0.0..=1.0`, mapping NaN to zero.
pub(crate) fn clamp_amount(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
