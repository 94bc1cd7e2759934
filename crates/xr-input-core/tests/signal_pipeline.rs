//! Integration tests for the extraction pipeline across a whole registry.
//!
//! These exercise `MappingRegistry` + `signal::extract` + `TrackingStateMachine`
//! together, the same way the dispatch router drives them each frame.

use glam::{Quat, Vec2, Vec3};
use xr_input_core::{
    extract, ActionId, CapabilityKind, ChangeTolerance, FrameContext, MappingRegistry,
    RawControllerInputs, RawTrackingSample, SignalChange, TrackedNode, TrackingState,
    TrackingStateMachine,
};

/// Runs one frame over `registry` and returns the changes in registry order.
fn run_frame(
    registry: &mut MappingRegistry,
    sample: &RawTrackingSample,
) -> Vec<(ActionId, SignalChange)> {
    let tolerance = ChangeTolerance::EXACT;
    let frame = FrameContext::new(sample, &tolerance);
    let mut out = Vec::new();
    for (i, mapping) in registry.iter_mut().enumerate() {
        extract(&frame, mapping, i).expect("registry only holds recognized kinds");
        if let Some(change) = SignalChange::of(mapping) {
            out.push((mapping.action(), change));
        }
        mapping.clear_changed();
    }
    out
}

fn full_controller() -> MappingRegistry {
    use CapabilityKind as K;
    [
        (K::SpatialPointer, 1),
        (K::SpatialGrip, 2),
        (K::Select, 3),
        (K::Trigger, 4),
        (K::GripPress, 5),
        (K::Thumbstick, 6),
        (K::ThumbstickPress, 7),
        (K::Touchpad, 8),
        (K::TouchpadTouch, 9),
        (K::TouchpadPress, 10),
        (K::Menu, 11),
        (K::None, 12),
    ]
    .into_iter()
    .map(|(k, a)| (k, ActionId(a)))
    .collect()
}

#[test]
fn test_first_tracked_frame_reports_only_poses_and_active_inputs() {
    // Arrange
    let mut registry = full_controller();
    let sample = RawTrackingSample::new(TrackedNode::LeftHand)
        .with_position(Vec3::new(0.0, 1.0, 0.0))
        .with_rotation(Quat::IDENTITY)
        .with_inputs(RawControllerInputs {
            select_amount: Some(0.3),
            thumbstick_position: Some(Vec2::new(0.0, 1.0)),
            ..Default::default()
        });

    // Act
    let changes = run_frame(&mut registry, &sample);

    // Assert – pointer + grip poses, trigger amount, stick; nothing for idle buttons
    let actions: Vec<u32> = changes.iter().map(|(a, _)| a.0).collect();
    assert_eq!(actions, vec![1, 2, 4, 6]);
    assert_eq!(changes[2].1, SignalChange::FloatChanged(0.3));
}

#[test]
fn test_repeated_identical_frame_is_silent() {
    let mut registry = full_controller();
    let sample = RawTrackingSample::new(TrackedNode::RightHand)
        .with_position(Vec3::ONE)
        .with_inputs(RawControllerInputs {
            menu_pressed: Some(true),
            touchpad_touched: Some(true),
            ..Default::default()
        });

    assert!(!run_frame(&mut registry, &sample).is_empty());
    assert!(run_frame(&mut registry, &sample).is_empty());
}

#[test]
fn test_tracking_machine_and_extraction_agree_on_lost_tracking() {
    // Arrange
    let mut registry = full_controller();
    let mut machine = TrackingStateMachine::new(TrackingState::NotTracked);
    let tracked = RawTrackingSample::new(TrackedNode::LeftHand).with_position(Vec3::X);
    let lost = RawTrackingSample::new(TrackedNode::LeftHand);

    // Act
    machine.observe(&tracked);
    run_frame(&mut registry, &tracked);
    let transition = machine.observe(&lost);
    let changes = run_frame(&mut registry, &lost);

    // Assert – the pose falls back to the origin and tracking is lost
    assert_eq!(transition.map(|t| t.to), Some(TrackingState::NotTracked));
    assert!(changes.iter().any(|(a, c)| {
        a.0 == 1 && matches!(c, SignalChange::PoseChanged(p) if p.position == Vec3::ZERO)
    }));
}
