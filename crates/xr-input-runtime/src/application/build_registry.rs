//! Builds controllers from their configured profiles.
//!
//! The main entry point is [`build_controller`], which converts a
//! [`ControllerProfile`] (typically loaded from TOML) into a
//! [`ControllerState`] whose mapping registry preserves the configured order.
//!
//! Unrecognized capability kinds are accepted here with a warning.  They stay
//! in the registry so that the first dispatch reports exactly which entry is
//! wrong, and the controller is rejected before any of its state changes.

use thiserror::Error;
use tracing::warn;
use xr_input_core::{
    ActionId, CapabilityKind, Handedness, MappingRegistry, TrackedNode, TrackingState,
};

use super::dispatch::{ControllerState, SourceId};

/// Error type for profile conversion.
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("controller {source_id} has an empty name")]
    EmptyName { source_id: SourceId },
    #[error("controller '{name}' uses the nil source id")]
    NilSourceId { name: String },
}

/// One configured capability: what the device offers, and the action it drives.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingProfile {
    pub kind: CapabilityKind,
    pub action: ActionId,
}

/// Everything needed to bring one controller online.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerProfile {
    pub source_id: SourceId,
    pub name: String,
    pub handedness: Handedness,
    /// Tracked node to read from; `None` uses the handedness default.
    pub node: Option<TrackedNode>,
    pub initial_tracking: TrackingState,
    pub mappings: Vec<MappingProfile>,
}

/// Builds a mapping registry in profile order.
pub fn build_registry(mappings: &[MappingProfile]) -> MappingRegistry {
    mappings
        .iter()
        .map(|m| (m.kind.clone(), m.action))
        .collect()
}

/// Converts a profile into a controller ready for dispatch.
///
/// # Errors
///
/// Returns [`ProfileError`] if the profile cannot identify its controller.
pub fn build_controller(profile: &ControllerProfile) -> Result<ControllerState, ProfileError> {
    if profile.name.trim().is_empty() {
        return Err(ProfileError::EmptyName {
            source_id: profile.source_id,
        });
    }
    if profile.source_id.is_nil() {
        return Err(ProfileError::NilSourceId {
            name: profile.name.clone(),
        });
    }

    if profile.mappings.is_empty() {
        warn!(
            controller = %profile.name,
            "controller has no mappings and will only report tracking"
        );
    }
    for (index, mapping) in profile.mappings.iter().enumerate() {
        if mapping.kind.family().is_none() {
            warn!(
                controller = %profile.name,
                kind = %mapping.kind,
                index,
                "unrecognized capability kind; dispatch will fail for this controller"
            );
        }
    }

    let state = ControllerState::new(
        profile.source_id,
        profile.handedness,
        profile.initial_tracking,
        build_registry(&profile.mappings),
    );
    Ok(match profile.node {
        Some(node) => state.with_node(node),
        None => state,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
