//! Shared, mutable playspace root.
//!
//! The rig that parents the user's camera can be moved at runtime (teleport,
//! snap turn, recentre).  [`SharedPlayspace`] holds its current transform
//! behind a lock so the frame loop reads it while other tasks update it.

use std::sync::{PoisonError, RwLock};

use tracing::debug;
use xr_input_core::ParentTransform;

use crate::application::dispatch::PlayspaceRoot;

/// A [`PlayspaceRoot`] whose transform can be replaced at any time.
///
/// `None` means there is no rig and poses stay in device-local space.
#[derive(Debug, Default)]
pub struct SharedPlayspace {
    transform: RwLock<Option<ParentTransform>>,
}

impl SharedPlayspace {
    pub fn new(transform: Option<ParentTransform>) -> Self {
        Self {
            transform: RwLock::new(transform),
        }
    }

    /// Replaces the root transform; takes effect from the next frame.
    pub fn set(&self, transform: Option<ParentTransform>) {
        debug!(?transform, "playspace root updated");
        *self.transform.write().unwrap_or_else(PoisonError::into_inner) = transform;
    }
}

impl PlayspaceRoot for SharedPlayspace {
    fn parent_transform(&self) -> Option<ParentTransform> {
        *self.transform.read().unwrap_or_else(PoisonError::into_inner)
    }
}
