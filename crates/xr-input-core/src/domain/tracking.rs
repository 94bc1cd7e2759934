//! Handedness and the tracking-state machine.
//!
//! ```text
//!                 hand node, position OR rotation
//!   NotTracked ───────────────────────────────────► Tracked
//!        ▲  ◄──────────────────────────────────────   │
//!        │          hand node, neither available       │
//!        │                                             │
//!        └──────────── NotApplicable ◄─────────────────┘
//!                    (any non-hand node, one frame is enough)
//! ```
//!
//! The state is re-derived from scratch every frame; there is no hysteresis.

use serde::{Deserialize, Serialize};

use super::sample::{RawTrackingSample, TrackedNode};

/// Which hand a controller is held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
    /// Devices that are not bound to a hand (trackers, remotes).
    Other,
}

impl Handedness {
    /// The node a controller of this handedness reads from unless configured otherwise.
    pub fn default_node(self) -> TrackedNode {
        match self {
            Handedness::Left => TrackedNode::LeftHand,
            Handedness::Right => TrackedNode::RightHand,
            Handedness::Other => TrackedNode::HardwareTracker,
        }
    }
}

/// Whether a controller's spatial pose is currently being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingState {
    #[default]
    NotTracked,
    Tracked,
    NotApplicable,
}

impl TrackingState {
    /// Derives the state a sample implies, independent of history.
    pub fn from_sample(sample: &RawTrackingSample) -> Self {
        if !sample.node.is_hand() {
            return TrackingState::NotApplicable;
        }
        // Tracked if we receive position OR rotation data.
        if sample.is_position_available() || sample.is_rotation_available() {
            TrackingState::Tracked
        } else {
            TrackingState::NotTracked
        }
    }
}

/// A change of tracking state between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingTransition {
    pub from: TrackingState,
    pub to: TrackingState,
}

/// Per-controller tracking state, advanced once per frame.
#[derive(Debug, Clone, Default)]
pub struct TrackingStateMachine {
    state: TrackingState,
}

impl TrackingStateMachine {
    /// Creates a machine in the given initial state (typically `NotTracked`).
    pub fn new(initial: TrackingState) -> Self {
        Self { state: initial }
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Computes the transition `sample` would cause without applying it.
    pub fn evaluate(&self, sample: &RawTrackingSample) -> Option<TrackingTransition> {
        let next = TrackingState::from_sample(sample);
        (next != self.state).then_some(TrackingTransition {
            from: self.state,
            to: next,
        })
    }

    /// Applies a previously evaluated transition.
    pub fn apply(&mut self, transition: TrackingTransition) {
        self.state = transition.to;
    }

    /// Evaluates and applies in one step, returning the transition if any.
    pub fn observe(&mut self, sample: &RawTrackingSample) -> Option<TrackingTransition> {
        let transition = self.evaluate(sample)?;
        self.apply(transition);
        Some(transition)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn test_default_node_follows_handedness() {
        assert_eq!(Handedness::Left.default_node(), TrackedNode::LeftHand);
        assert_eq!(Handedness::Right.default_node(), TrackedNode::RightHand);
        assert_eq!(Handedness::Other.default_node(), TrackedNode::HardwareTracker);
    }

    #[test]
    fn test_left_hand_with_position_only_is_tracked() {
        let s = RawTrackingSample::new(TrackedNode::LeftHand).with_position(Vec3::ONE);
        assert_eq!(TrackingState::from_sample(&s), TrackingState::Tracked);
    }

    #[test]
    fn test_right_hand_with_rotation_only_is_tracked() {
        let s = RawTrackingSample::new(TrackedNode::RightHand).with_rotation(Quat::IDENTITY);
        assert_eq!(TrackingState::from_sample(&s), TrackingState::Tracked);
    }

    #[test]
    fn test_hand_with_nothing_available_is_not_tracked() {
        let s = RawTrackingSample::new(TrackedNode::LeftHand);
        assert_eq!(TrackingState::from_sample(&s), TrackingState::NotTracked);
    }

    #[test]
    fn test_non_hand_node_is_not_applicable_regardless_of_data() {
        let s = RawTrackingSample::new(TrackedNode::Head)
            .with_position(Vec3::ONE)
            .with_rotation(Quat::IDENTITY);
        assert_eq!(TrackingState::from_sample(&s), TrackingState::NotApplicable);
    }

    #[test]
    fn test_observe_reports_each_transition_once() {
        // Arrange
        let mut machine = TrackingStateMachine::new(TrackingState::NotTracked);
        let tracked = RawTrackingSample::new(TrackedNode::LeftHand).with_position(Vec3::ONE);

        // Act
        let first = machine.observe(&tracked);
        let second = machine.observe(&tracked);

        // Assert
        assert_eq!(
            first,
            Some(TrackingTransition {
                from: TrackingState::NotTracked,
                to: TrackingState::Tracked,
            })
        );
        assert_eq!(second, None);
        assert_eq!(machine.state(), TrackingState::Tracked);
    }

    #[test]
    fn test_single_non_hand_frame_forces_not_applicable() {
        let mut machine = TrackingStateMachine::new(TrackingState::Tracked);
        let t = machine.observe(&RawTrackingSample::new(TrackedNode::GameController));
        assert_eq!(t.map(|t| t.to), Some(TrackingState::NotApplicable));
    }

    #[test]
    fn test_evaluate_does_not_mutate() {
        let machine = TrackingStateMachine::default();
        let s = RawTrackingSample::new(TrackedNode::LeftHand).with_position(Vec3::ONE);
        assert!(machine.evaluate(&s).is_some());
        assert_eq!(machine.state(), TrackingState::NotTracked);
    }
}
