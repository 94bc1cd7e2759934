//! Pose-family extractor: spatial pointer, pointer position, pointer rotation.

use tracing::trace;

use crate::domain::capability::{
    CapabilityKind, CapabilityMapping, ConfigurationError, SignalFamily,
};
use crate::domain::transform::to_parent_space;
use crate::domain::value::CanonicalValue;

use super::{wrong_family, FrameContext};

/// Writes the node's parent-space pose into `mapping`.
///
/// Samples from a node that cannot be tracked carry nothing to measure, so
/// the cached pose is kept as is and the mapping stays clean.
pub fn extract(
    frame: &FrameContext<'_>,
    mapping: &mut CapabilityMapping,
) -> Result<(), ConfigurationError> {
    match mapping.kind() {
        CapabilityKind::SpatialPointer
        | CapabilityKind::PointerPosition
        | CapabilityKind::PointerRotation => {}
        _ => return Err(wrong_family(mapping, SignalFamily::Pose)),
    }

    if !frame.sample.node.is_hand() {
        trace!(
            node = ?frame.sample.node,
            kind = %mapping.kind(),
            "node has no pointer pose; keeping cached value"
        );
        mapping.clear_changed();
        return Ok(());
    }

    let pose = to_parent_space(
        frame.sample.device_pose(),
        frame.parent,
        frame.orientation_mode,
    );
    mapping.update_value(CanonicalValue::Pose(pose), frame.tolerance)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
