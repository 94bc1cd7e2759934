//! Menu-family extractor.

use crate::domain::capability::{
    CapabilityKind, CapabilityMapping, ConfigurationError, SignalFamily,
};
use crate::domain::value::CanonicalValue;

use super::{wrong_family, FrameContext};

pub fn extract(
    frame: &FrameContext<'_>,
    mapping: &mut CapabilityMapping,
) -> Result<(), ConfigurationError> {
    if *mapping.kind() != CapabilityKind::Menu {
        return Err(wrong_family(mapping, SignalFamily::Menu));
    }
    let pressed = frame.sample.inputs.menu_pressed.unwrap_or(false);
    mapping.update_value(CanonicalValue::Bool(pressed), frame.tolerance)?;
    Ok(())
}
