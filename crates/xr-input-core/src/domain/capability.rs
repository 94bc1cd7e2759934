//! Capability kinds, mappings, and the per-controller mapping registry.
//!
//! A controller is configured with an ordered list of `{kind, action}` pairs.
//! Each pair becomes a [`CapabilityMapping`] holding the last canonical value
//! and a dirty flag.  The list order is caller-defined and never changes for
//! the lifetime of the controller.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::{is_dirty, CanonicalValue, ChangeTolerance, ValueShape};

/// Errors raised when a mapping registry is not valid for dispatch.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    /// A mapping names a capability kind that has no extractor.
    #[error("capability kind `{kind}` at mapping {index} has no extractor")]
    UnrecognizedCapability { kind: String, index: usize },

    /// A capability kind was routed to an extractor family that does not handle it.
    #[error("capability kind `{kind}` is not handled by the {family:?} extractor")]
    WrongFamily { kind: String, family: SignalFamily },

    /// An extractor produced a value whose shape differs from the mapping's.
    #[error("capability kind `{kind}` holds {expected:?} values, got {actual:?}")]
    ShapeMismatch {
        kind: String,
        expected: ValueShape,
        actual: ValueShape,
    },
}

/// Opaque identifier of the logical input action a mapping reports under.
///
/// The identifier is owned by the event sink; this layer only forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u32);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

/// The extractor family responsible for a capability kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalFamily {
    /// Kinds with nothing to extract (`none`).
    Inert,
    Pose,
    Trigger,
    Grip,
    Thumbstick,
    Touchpad,
    Menu,
}

/// An input capability a controller may expose.
///
/// Kinds are written in profiles as kebab-case names (`"spatial-pointer"`,
/// `"trigger-press"`, ...).  A name this layer does not know is kept as
/// [`CapabilityKind::Unrecognized`] so the failure surfaces at dispatch time
/// with the offending name attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CapabilityKind {
    None,
    SpatialPointer,
    PointerPosition,
    PointerRotation,
    Select,
    Trigger,
    TriggerPress,
    PointerClick,
    SpatialGrip,
    GripPosition,
    GripRotation,
    GripPress,
    Thumbstick,
    ThumbstickPress,
    Touchpad,
    TouchpadTouch,
    TouchpadPress,
    Menu,
    Unrecognized(String),
}

impl CapabilityKind {
    /// Every kind that has an extractor, in declaration order.
    pub const RECOGNIZED: [CapabilityKind; 18] = [
        CapabilityKind::None,
        CapabilityKind::SpatialPointer,
        CapabilityKind::PointerPosition,
        CapabilityKind::PointerRotation,
        CapabilityKind::Select,
        CapabilityKind::Trigger,
        CapabilityKind::TriggerPress,
        CapabilityKind::PointerClick,
        CapabilityKind::SpatialGrip,
        CapabilityKind::GripPosition,
        CapabilityKind::GripRotation,
        CapabilityKind::GripPress,
        CapabilityKind::Thumbstick,
        CapabilityKind::ThumbstickPress,
        CapabilityKind::Touchpad,
        CapabilityKind::TouchpadTouch,
        CapabilityKind::TouchpadPress,
        CapabilityKind::Menu,
    ];

    /// Parses a profile name.  Unknown names become [`CapabilityKind::Unrecognized`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "none" => CapabilityKind::None,
            "spatial-pointer" => CapabilityKind::SpatialPointer,
            "pointer-position" => CapabilityKind::PointerPosition,
            "pointer-rotation" => CapabilityKind::PointerRotation,
            "select" => CapabilityKind::Select,
            "trigger" => CapabilityKind::Trigger,
            "trigger-press" => CapabilityKind::TriggerPress,
            "pointer-click" => CapabilityKind::PointerClick,
            "spatial-grip" => CapabilityKind::SpatialGrip,
            "grip-position" => CapabilityKind::GripPosition,
            "grip-rotation" => CapabilityKind::GripRotation,
            "grip-press" => CapabilityKind::GripPress,
            "thumbstick" => CapabilityKind::Thumbstick,
            "thumbstick-press" => CapabilityKind::ThumbstickPress,
            "touchpad" => CapabilityKind::Touchpad,
            "touchpad-touch" => CapabilityKind::TouchpadTouch,
            "touchpad-press" => CapabilityKind::TouchpadPress,
            "menu" => CapabilityKind::Menu,
            other => CapabilityKind::Unrecognized(other.to_string()),
        }
    }

    /// Returns the profile name of this kind.
    pub fn name(&self) -> &str {
        match self {
            CapabilityKind::None => "none",
            CapabilityKind::SpatialPointer => "spatial-pointer",
            CapabilityKind::PointerPosition => "pointer-position",
            CapabilityKind::PointerRotation => "pointer-rotation",
            CapabilityKind::Select => "select",
            CapabilityKind::Trigger => "trigger",
            CapabilityKind::TriggerPress => "trigger-press",
            CapabilityKind::PointerClick => "pointer-click",
            CapabilityKind::SpatialGrip => "spatial-grip",
            CapabilityKind::GripPosition => "grip-position",
            CapabilityKind::GripRotation => "grip-rotation",
            CapabilityKind::GripPress => "grip-press",
            CapabilityKind::Thumbstick => "thumbstick",
            CapabilityKind::ThumbstickPress => "thumbstick-press",
            CapabilityKind::Touchpad => "touchpad",
            CapabilityKind::TouchpadTouch => "touchpad-touch",
            CapabilityKind::TouchpadPress => "touchpad-press",
            CapabilityKind::Menu => "menu",
            CapabilityKind::Unrecognized(name) => name,
        }
    }

    /// Returns the extractor family for this kind, or `None` if no extractor exists.
    pub fn family(&self) -> Option<SignalFamily> {
        let family = match self {
            CapabilityKind::None => SignalFamily::Inert,
            CapabilityKind::SpatialPointer
            | CapabilityKind::PointerPosition
            | CapabilityKind::PointerRotation => SignalFamily::Pose,
            CapabilityKind::Select
            | CapabilityKind::Trigger
            | CapabilityKind::TriggerPress
            | CapabilityKind::PointerClick => SignalFamily::Trigger,
            CapabilityKind::SpatialGrip
            | CapabilityKind::GripPosition
            | CapabilityKind::GripRotation
            | CapabilityKind::GripPress => SignalFamily::Grip,
            CapabilityKind::Thumbstick | CapabilityKind::ThumbstickPress => {
                SignalFamily::Thumbstick
            }
            CapabilityKind::Touchpad
            | CapabilityKind::TouchpadTouch
            | CapabilityKind::TouchpadPress => SignalFamily::Touchpad,
            CapabilityKind::Menu => SignalFamily::Menu,
            CapabilityKind::Unrecognized(_) => return None,
        };
        Some(family)
    }

    /// Returns the value shape this kind is permanently bound to.
    pub fn value_shape(&self) -> ValueShape {
        match self {
            CapabilityKind::SpatialPointer
            | CapabilityKind::PointerPosition
            | CapabilityKind::PointerRotation
            | CapabilityKind::SpatialGrip
            | CapabilityKind::GripPosition
            | CapabilityKind::GripRotation => ValueShape::Pose,
            CapabilityKind::Select
            | CapabilityKind::TriggerPress
            | CapabilityKind::PointerClick
            | CapabilityKind::GripPress
            | CapabilityKind::ThumbstickPress
            | CapabilityKind::TouchpadTouch
            | CapabilityKind::TouchpadPress
            | CapabilityKind::Menu => ValueShape::Bool,
            CapabilityKind::Trigger => ValueShape::Float,
            CapabilityKind::Thumbstick | CapabilityKind::Touchpad => ValueShape::Axis,
            CapabilityKind::None | CapabilityKind::Unrecognized(_) => ValueShape::Empty,
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for CapabilityKind {
    fn from(name: String) -> Self {
        CapabilityKind::from_name(&name)
    }
}

impl From<CapabilityKind> for String {
    fn from(kind: CapabilityKind) -> Self {
        kind.name().to_string()
    }
}

/// The live binding of one capability kind to its cached value and action.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityMapping {
    kind: CapabilityKind,
    action: ActionId,
    value: CanonicalValue,
    changed: bool,
}

impl CapabilityMapping {
    /// Creates a mapping holding the resting value for `kind`'s shape.
    pub fn new(kind: CapabilityKind, action: ActionId) -> Self {
        let value = CanonicalValue::resting(kind.value_shape());
        Self {
            kind,
            action,
            value,
            changed: false,
        }
    }

    pub fn kind(&self) -> &CapabilityKind {
        &self.kind
    }

    pub fn action(&self) -> ActionId {
        self.action
    }

    /// The cached value from the most recent dirty extraction.
    pub fn value(&self) -> &CanonicalValue {
        &self.value
    }

    /// `true` if the latest extraction differed from the previous cached value.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Clears the dirty flag once the change has been reported.
    pub fn clear_changed(&mut self) {
        self.changed = false;
    }

    /// Compares `candidate` with the cached value and, if dirty, replaces it.
    ///
    /// Returns whether the value changed.  Within-tolerance candidates leave
    /// the cached value untouched so slow drift is measured against the last
    /// reported value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ShapeMismatch`] if `candidate` has a
    /// different shape from the one this mapping's kind is bound to.
    pub fn update_value(
        &mut self,
        candidate: CanonicalValue,
        tolerance: &ChangeTolerance,
    ) -> Result<bool, ConfigurationError> {
        let expected = self.value.shape();
        if candidate.shape() != expected {
            return Err(ConfigurationError::ShapeMismatch {
                kind: self.kind.name().to_string(),
                expected,
                actual: candidate.shape(),
            });
        }

        let dirty = is_dirty(&self.value, &candidate, tolerance);
        if dirty {
            self.value = candidate;
        }
        self.changed = dirty;
        Ok(dirty)
    }
}

/// Ordered collection of one controller's capability mappings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingRegistry {
    mappings: Vec<CapabilityMapping>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a mapping; order of insertion is dispatch order.
    pub fn push(&mut self, kind: CapabilityKind, action: ActionId) {
        self.mappings.push(CapabilityMapping::new(kind, action));
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CapabilityMapping> {
        self.mappings.get(index)
    }

    /// Returns the first mapping reporting under `action`.
    pub fn find_by_action(&self, action: ActionId) -> Option<&CapabilityMapping> {
        self.mappings.iter().find(|m| m.action == action)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapabilityMapping> {
        self.mappings.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CapabilityMapping> {
        self.mappings.iter_mut()
    }

    /// Checks that every mapping has an extractor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnrecognizedCapability`] for the first
    /// mapping whose kind has no extractor family.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (index, mapping) in self.mappings.iter().enumerate() {
            if mapping.kind.family().is_none() {
                return Err(ConfigurationError::UnrecognizedCapability {
                    kind: mapping.kind.name().to_string(),
                    index,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(CapabilityKind, ActionId)> for MappingRegistry {
    fn from_iter<I: IntoIterator<Item = (CapabilityKind, ActionId)>>(iter: I) -> Self {
        Self {
            mappings: iter
                .into_iter()
                .map(|(kind, action)| CapabilityMapping::new(kind, action))
                .collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
