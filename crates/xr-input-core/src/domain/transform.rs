//! Device-local to parent-space coordinate conversion.
//!
//! Controllers report poses relative to the tracking origin.  Applications
//! usually want them relative to the playspace rig (the parent of the user's
//! camera), which can be moved, turned, and scaled at runtime.
//!
//! # Orientation modes
//!
//! [`OrientationMode::LegacyEuler`] reproduces the historical behaviour: the
//! device rotation is decomposed into Euler angles (degrees, Y-X-Z order,
//! each in `[0, 360)`), that angle triple is rotated *as if it were a
//! direction vector* through the parent rotation, and the result is turned
//! back into a quaternion.  This is an approximation.  A pure yaw on the
//! parent, for instance, leaves a yaw-only device rotation unchanged.
//!
//! [`OrientationMode::Quaternion`] composes `parent.rotation * local.rotation`,
//! which is the mathematically correct parent-space rotation.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::value::Pose;

/// How device rotations are re-expressed in parent space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// Euler-angle rotation kept for behavioural parity with older rigs.
    #[default]
    LegacyEuler,
    /// Proper quaternion composition.
    Quaternion,
}

/// World transform of the tracking-space root (the camera rig's parent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParentTransform {
    pub position: Vec3,
    pub rotation: Quat,
    /// Lossy (world) scale of the root.
    pub scale: Vec3,
}

impl Default for ParentTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl ParentTransform {
    /// Builds a transform from a rotation given as Euler degrees `(x, y, z)`.
    pub fn from_euler_degrees(position: Vec3, euler_degrees: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation: quat_from_euler_degrees(euler_degrees),
            scale,
        }
    }

    /// Transforms a point from local into parent space (scale, rotate, translate).
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * point)
    }

    /// Rotates a direction into parent space, ignoring scale and translation.
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }
}

/// Re-expresses a device-local pose in parent space.
///
/// With no parent the local pose is returned unmodified.
pub fn to_parent_space(
    local: Pose,
    parent: Option<&ParentTransform>,
    mode: OrientationMode,
) -> Pose {
    let Some(parent) = parent else {
        return local;
    };

    let position = parent.transform_point(local.position);
    let rotation = match mode {
        OrientationMode::LegacyEuler => {
            let euler = euler_degrees(local.rotation);
            quat_from_euler_degrees(parent.transform_direction(euler))
        }
        OrientationMode::Quaternion => (parent.rotation * local.rotation).normalize(),
    };
    Pose::new(position, rotation)
}

/// Decomposes a rotation into Euler degrees `(x, y, z)`, each in `[0, 360)`.
///
/// Angles are applied in Z, then X, then Y order when recomposed.
pub fn euler_degrees(rotation: Quat) -> Vec3 {
    let (y, x, z) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(wrap_degrees(x), wrap_degrees(y), wrap_degrees(z))
}

/// Builds a rotation from Euler degrees `(x, y, z)` (inverse of [`euler_degrees`]).
pub fn quat_from_euler_degrees(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        degrees.y.to_radians(),
        degrees.x.to_radians(),
        degrees.z.to_radians(),
    )
}

fn wrap_degrees(radians: f32) -> f32 {
    let d = radians.to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
