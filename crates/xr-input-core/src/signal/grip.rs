//! Grip-family extractor: spatial grip, grip position, grip rotation, grip press.
//!
//! The grip pose follows the same parent-space rules as the pointer pose but
//! prefers the separately reported grip components when the platform has them.

use tracing::trace;

use crate::domain::capability::{
    CapabilityKind, CapabilityMapping, ConfigurationError, SignalFamily,
};
use crate::domain::transform::to_parent_space;
use crate::domain::value::CanonicalValue;

use super::{wrong_family, FrameContext};

pub fn extract(
    frame: &FrameContext<'_>,
    mapping: &mut CapabilityMapping,
) -> Result<(), ConfigurationError> {
    let sample = frame.sample;
    let value = match mapping.kind() {
        CapabilityKind::GripPress => CanonicalValue::Bool(sample.inputs.grasped.unwrap_or(false)),
        CapabilityKind::SpatialGrip
        | CapabilityKind::GripPosition
        | CapabilityKind::GripRotation => {
            if !sample.node.is_hand() {
                trace!(
                    node = ?sample.node,
                    kind = %mapping.kind(),
                    "node has no grip pose; keeping cached value"
                );
                mapping.clear_changed();
                return Ok(());
            }
            CanonicalValue::Pose(to_parent_space(
                sample.device_grip_pose(),
                frame.parent,
                frame.orientation_mode,
            ))
        }
        _ => return Err(wrong_family(mapping, SignalFamily::Grip)),
    };
    mapping.update_value(value, frame.tolerance)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
