//! Canonical values and the change detector.
//!
//! All raw hardware data is normalised into one of four shapes: a [`Pose`], a
//! boolean, a float, or a 2-D axis.  [`is_dirty`] compares a freshly extracted
//! value against the cached one using shape-appropriate equality.
//!
//! By default every comparison is exact (no epsilon, no deadband).  Noisy
//! analog hardware can opt into per-shape tolerances via [`ChangeTolerance`].

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A position and orientation pair expressed in a single reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// The pose at the origin with no rotation.
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The shape a capability's value takes. Fixed per capability kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueShape {
    /// The capability carries no value (e.g. the `none` kind).
    Empty,
    Pose,
    Bool,
    Float,
    Axis,
}

/// A normalised input value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CanonicalValue {
    Empty,
    Pose(Pose),
    Bool(bool),
    /// Pressure or pull amount, `0.0..=1.0`.
    Float(f32),
    /// Stick or pad position, each component typically in `-1.0..=1.0`.
    Axis(Vec2),
}

impl CanonicalValue {
    /// Returns the resting value for `shape`: identity pose, released, zero.
    pub fn resting(shape: ValueShape) -> Self {
        match shape {
            ValueShape::Empty => CanonicalValue::Empty,
            ValueShape::Pose => CanonicalValue::Pose(Pose::IDENTITY),
            ValueShape::Bool => CanonicalValue::Bool(false),
            ValueShape::Float => CanonicalValue::Float(0.0),
            ValueShape::Axis => CanonicalValue::Axis(Vec2::ZERO),
        }
    }

    /// Returns the shape tag of this value.
    pub fn shape(&self) -> ValueShape {
        match self {
            CanonicalValue::Empty => ValueShape::Empty,
            CanonicalValue::Pose(_) => ValueShape::Pose,
            CanonicalValue::Bool(_) => ValueShape::Bool,
            CanonicalValue::Float(_) => ValueShape::Float,
            CanonicalValue::Axis(_) => ValueShape::Axis,
        }
    }
}

/// Opt-in tolerances for change detection.
///
/// A tolerance of `0.0` (the default) means exact equality.  A positive
/// tolerance means a change is only reported once the new value differs from
/// the cached one by *more* than the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChangeTolerance {
    /// Absolute tolerance for float values.
    #[serde(default)]
    pub float: f32,
    /// Per-component absolute tolerance for axis values.
    #[serde(default)]
    pub axis: f32,
    /// Per-component absolute tolerance for pose positions.
    #[serde(default)]
    pub pose_position: f32,
    /// Angular tolerance for pose rotations, in radians.
    #[serde(default)]
    pub pose_angle: f32,
}

impl ChangeTolerance {
    /// Exact equality for every shape.
    pub const EXACT: ChangeTolerance = ChangeTolerance {
        float: 0.0,
        axis: 0.0,
        pose_position: 0.0,
        pose_angle: 0.0,
    };
}

/// Returns `true` if `candidate` differs from `current` under `tolerance`.
///
/// Values of different shapes always compare as dirty; callers are expected
/// to reject shape changes before they get here.
pub fn is_dirty(
    current: &CanonicalValue,
    candidate: &CanonicalValue,
    tolerance: &ChangeTolerance,
) -> bool {
    match (current, candidate) {
        (CanonicalValue::Empty, CanonicalValue::Empty) => false,
        (CanonicalValue::Bool(a), CanonicalValue::Bool(b)) => a != b,
        (CanonicalValue::Float(a), CanonicalValue::Float(b)) => {
            exceeds(*a, *b, tolerance.float)
        }
        (CanonicalValue::Axis(a), CanonicalValue::Axis(b)) => {
            exceeds(a.x, b.x, tolerance.axis) || exceeds(a.y, b.y, tolerance.axis)
        }
        (CanonicalValue::Pose(a), CanonicalValue::Pose(b)) => pose_dirty(a, b, tolerance),
        _ => true,
    }
}

fn exceeds(a: f32, b: f32, tolerance: f32) -> bool {
    if tolerance > 0.0 {
        (a - b).abs() > tolerance
    } else {
        a != b
    }
}

fn pose_dirty(a: &Pose, b: &Pose, tolerance: &ChangeTolerance) -> bool {
    let moved = exceeds(a.position.x, b.position.x, tolerance.pose_position)
        || exceeds(a.position.y, b.position.y, tolerance.pose_position)
        || exceeds(a.position.z, b.position.z, tolerance.pose_position);
    if moved {
        return true;
    }
    if tolerance.pose_angle > 0.0 {
        a.rotation.angle_between(b.rotation) > tolerance.pose_angle
    } else {
        a.rotation != b.rotation
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
