//! Raw per-frame samples supplied by the platform tracking layer.
//!
//! A [`RawTrackingSample`] is an immutable snapshot for one tracked node.
//! Spatial data and button data are both optional: absence is the normal way
//! a platform says "I could not measure this", never an error.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::value::Pose;

/// The platform node a sample was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedNode {
    LeftHand,
    RightHand,
    Head,
    CenterEye,
    LeftEye,
    RightEye,
    GameController,
    TrackingReference,
    HardwareTracker,
}

impl TrackedNode {
    /// Hand nodes are the only ones a hand-held controller can be tracked through.
    pub fn is_hand(self) -> bool {
        matches!(self, TrackedNode::LeftHand | TrackedNode::RightHand)
    }
}

/// Button and analog readings reported alongside a node pose.
///
/// Every field is optional.  Extractors read an absent boolean as released,
/// an absent amount as `0.0`, and an absent axis as centred.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawControllerInputs {
    pub select_pressed: Option<bool>,
    /// Trigger pull, `0.0..=1.0`.
    pub select_amount: Option<f32>,
    pub grasped: Option<bool>,
    /// Grip pose position, when the platform reports it separately from the pointer.
    pub grip_position: Option<Vec3>,
    pub grip_rotation: Option<Quat>,
    pub thumbstick_position: Option<Vec2>,
    pub thumbstick_pressed: Option<bool>,
    pub touchpad_position: Option<Vec2>,
    pub touchpad_touched: Option<bool>,
    pub touchpad_pressed: Option<bool>,
    pub menu_pressed: Option<bool>,
}

/// An immutable per-frame snapshot of one tracked node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawTrackingSample {
    pub node: TrackedNode,
    /// Device-local position, `None` when unavailable this frame.
    pub position: Option<Vec3>,
    /// Device-local orientation, `None` when unavailable this frame.
    pub rotation: Option<Quat>,
    #[serde(default)]
    pub inputs: RawControllerInputs,
}

impl RawTrackingSample {
    /// Creates a sample for `node` with no spatial or button data.
    pub fn new(node: TrackedNode) -> Self {
        Self {
            node,
            position: None,
            rotation: None,
            inputs: RawControllerInputs::default(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_inputs(mut self, inputs: RawControllerInputs) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn is_position_available(&self) -> bool {
        self.position.is_some()
    }

    pub fn is_rotation_available(&self) -> bool {
        self.rotation.is_some()
    }

    /// The node pose in device-local space.
    ///
    /// Missing components read as the origin and identity rotation.
    pub fn device_pose(&self) -> Pose {
        Pose::new(
            self.position.unwrap_or(Vec3::ZERO),
            self.rotation.unwrap_or(Quat::IDENTITY),
        )
    }

    /// The grip pose in device-local space.
    ///
    /// Uses the separately reported grip components when present and falls
    /// back to the node pose component by component.
    pub fn device_grip_pose(&self) -> Pose {
        let node = self.device_pose();
        Pose::new(
            self.inputs.grip_position.unwrap_or(node.position),
            self.inputs.grip_rotation.unwrap_or(node.rotation),
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_hand_nodes_are_hands() {
        assert!(TrackedNode::LeftHand.is_hand());
        assert!(TrackedNode::RightHand.is_hand());
        assert!(!TrackedNode::Head.is_hand());
        assert!(!TrackedNode::HardwareTracker.is_hand());
    }

    #[test]
    fn test_new_sample_has_nothing_available() {
        let s = RawTrackingSample::new(TrackedNode::LeftHand);
        assert!(!s.is_position_available());
        assert!(!s.is_rotation_available());
        assert_eq!(s.device_pose(), Pose::IDENTITY);
    }

    #[test]
    fn test_device_pose_fills_missing_rotation_with_identity() {
        let s =
            RawTrackingSample::new(TrackedNode::RightHand).with_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            s.device_pose(),
            Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY)
        );
    }

    #[test]
    fn test_grip_pose_prefers_reported_grip_components() {
        // Arrange
        let node_rot = Quat::from_rotation_x(0.3);
        let s = RawTrackingSample::new(TrackedNode::RightHand)
            .with_position(Vec3::X)
            .with_rotation(node_rot)
            .with_inputs(RawControllerInputs {
                grip_position: Some(Vec3::Y),
                ..Default::default()
            });

        // Act
        let grip = s.device_grip_pose();

        // Assert – position from the grip, rotation falls back to the node
        assert_eq!(grip.position, Vec3::Y);
        assert_eq!(grip.rotation, node_rot);
    }
}
