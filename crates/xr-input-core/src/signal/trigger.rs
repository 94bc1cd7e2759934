//! Trigger-family extractor: select, trigger, trigger-press, pointer-click.

use crate::domain::capability::{
    CapabilityKind, CapabilityMapping, ConfigurationError, SignalFamily,
};
use crate::domain::value::CanonicalValue;

use super::{clamp_amount, wrong_family, FrameContext};

pub fn extract(
    frame: &FrameContext<'_>,
    mapping: &mut CapabilityMapping,
) -> Result<(), ConfigurationError> {
    let inputs = &frame.sample.inputs;
    let value = match mapping.kind() {
        CapabilityKind::Select | CapabilityKind::TriggerPress | CapabilityKind::PointerClick => {
            CanonicalValue::Bool(inputs.select_pressed.unwrap_or(false))
        }
        CapabilityKind::Trigger => {
            CanonicalValue::Float(clamp_amount(inputs.select_amount.unwrap_or(0.0)))
        }
        _ => return Err(wrong_family(mapping, SignalFamily::Trigger)),
    };
    mapping.update_value(value, frame.tolerance)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
