//! Thumbstick-family extractor: thumbstick axis and thumbstick click.

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
        CapabilityKind::Thumbstick => {
            CanonicalValue::Axis(clamp_axis(inputs.thumbstick_position.unwrap_or_default()))
        }
        CapabilityKind::ThumbstickPress => {
            CanonicalValue::Bool(inputs.thumbstick_pressed.unwrap_or(false))
        }
        _ => return Err(wrong_family(mapping, SignalFamily::Thumbstick)),
    };
    mapping.update_value(value, frame.tolerance)?;
    Ok(())
}
