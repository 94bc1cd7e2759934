//! Touchpad-family extractor: touchpad position, touch, and click.

use crate::domain::capability::{
    CapabilityKind, CapabilityMapping, ConfigurationError, SignalFamily,
};
use crate::domain::value::CanonicalValue;

use super::{clamp_axis, wrong_family, FrameContext};

pub fn extract(
    frame: &FrameContext<'_>,
    mapping: &mut CapabilityMapping,
) -> Result<(), ConfigurationError> {
    let inputs = &frame.sample.inputs;
    let value = match mapping.kind() {
        CapabilityKind::Touchpad => {
            CanonicalValue::Axis(clamp_axis(inputs.touchpad_position.unwrap_or_default()))
        }
        CapabilityKind::TouchpadTouch => {
            CanonicalValue::Bool(inputs.touchpad_touched.unwrap_or(false))
        }
        CapabilityKind::TouchpadPress => {
            CanonicalValue::Bool(inputs.touchpad_pressed.unwrap_or(false))
        }
        _ => return Err(wrong_family(mapping, SignalFamily::Touchpad)),
    };
    mapping.update_value(value, frame.tolerance)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capability::ActionId;
    use crate::domain::sample::{RawControllerInputs, RawTrackingSample, TrackedNode};
    use crate::domain::value::ChangeTolerance;
    use crate::signal::SignalChange;
    use glam::Vec2;

    #[test]
    fn test_touch_and_press_are_independent_signals() {
        // Arrange – finger resting on the pad without clicking
        let tolerance = ChangeTolerance::EXACT;
        let inputs = RawControllerInputs {
            touchpad_touched: Some(true),
            touchpad_pressed: Some(false),
            touchpad_position: Some(Vec2::new(0.3, -0.6)),
            ..Default::default()
        };
        let sample = RawTrackingSample::new(TrackedNode::RightHand).with_inputs(inputs);
        let frame = FrameContext::new(&sample, &tolerance);
        let mut touch = CapabilityMapping::new(CapabilityKind::TouchpadTouch, ActionId(1));
        let mut press = CapabilityMapping::new(CapabilityKind::TouchpadPress, ActionId(2));
        let mut pad = CapabilityMapping::new(CapabilityKind::Touchpad, ActionId(3));

        // Act
        extract(&frame, &mut touch).unwrap();
        extract(&frame, &mut press).unwrap();
        extract(&frame, &mut pad).unwrap();

        // Assert
        assert_eq!(SignalChange::of(&touch), Some(SignalChange::Pressed));
        assert_eq!(SignalChange::of(&press), None);
        assert_eq!(
            SignalChange::of(&pad),
            Some(SignalChange::AxisChanged(Vec2::new(0.3, -0.6)))
        );
    }

    #[test]
    fn test_lifting_finger_recentres_the_pad() {
        let tolerance = ChangeTolerance::EXACT;
        let mut pad = CapabilityMapping::new(CapabilityKind::Touchpad, ActionId(3));
        let inputs = RawControllerInputs {
            touchpad_position: Some(Vec2::new(0.5, 0.5)),
            ..Default::default()
        };
        let touching = RawTrackingSample::new(TrackedNode::RightHand).with_inputs(inputs);
        let lifted = RawTrackingSample::new(TrackedNode::RightHand);

        extract(&FrameContext::new(&touching, &tolerance), &mut pad).unwrap();
        extract(&FrameContext::new(&lifted, &tolerance), &mut pad).unwrap();

        assert_eq!(SignalChange::of(&pad), Some(SignalChange::AxisChanged(Vec2::ZERO)));
    }
}
