//! ControllerRegistry: the set of live controllers and per-frame routing.
//!
//! Each entry is a [`DispatchRouter`] owning one controller's state.  Entries
//! are kept in registration order so that, within a frame, controllers are
//! updated (and their events emitted) in a stable order.
//!
//! # Routing by node
//!
//! The platform reports one sample per tracked node.  Every controller is
//! bound to exactly one node (by default the one its handedness implies), and
//! [`ControllerRegistry::update_all`] hands each sample only to the
//! controllers bound to that node:
//!
//! ```text
//! LeftHand         ──► Left controllers (default)
//! RightHand        ──► Right controllers (default)
//! HardwareTracker  ──► Other controllers (default)
//! ```
//!
//! A node that appears twice in one frame is delivered once, so no controller
//! is updated more than once per frame.

use thiserror::Error;
use tracing::debug;
use xr_input_core::{Handedness, RawTrackingSample, TrackedNode, TrackingState};

use super::dispatch::{DispatchError, DispatchRouter, SourceId};

/// Error type for registry operations.
#[derive(Debug, Error, PartialEq)]
pub enum ControllerRegistryError {
    #[error("controller {0} is already registered")]
    AlreadyRegistered(SourceId),
    #[error("controller {0} is not registered")]
    UnknownController(SourceId),
    #[error("dispatch failed for controller {source_id}: {source}")]
    Dispatch {
        source_id: SourceId,
        #[source]
        source: DispatchError,
    },
}

/// Snapshot of one controller, for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSummary {
    pub source_id: SourceId,
    pub handedness: Handedness,
    pub node: TrackedNode,
    pub tracking: TrackingState,
    pub mappings: usize,
}

/// In-memory registry of live controllers.
#[derive(Default)]
pub struct ControllerRegistry {
    routers: Vec<DispatchRouter>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a controller.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerRegistryError::AlreadyRegistered`] if a controller
    /// with the same source id exists.
    pub fn add(&mut self, router: DispatchRouter) -> Result<(), ControllerRegistryError> {
        let id = router.state().source_id();
        if self.get(id).is_some() {
            return Err(ControllerRegistryError::AlreadyRegistered(id));
        }
        debug!(
            source = %id,
            handedness = ?router.state().handedness(),
            node = ?router.state().node(),
            "controller registered"
        );
        self.routers.push(router);
        Ok(())
    }

    /// Removes a controller, returning it if it was registered.
    pub fn remove(&mut self, id: SourceId) -> Option<DispatchRouter> {
        let index = self.routers.iter().position(|r| r.state().source_id() == id)?;
        Some(self.routers.remove(index))
    }

    pub fn get(&self, id: SourceId) -> Option<&DispatchRouter> {
        self.routers.iter().find(|r| r.state().source_id() == id)
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    /// Delivers one sample to one controller.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerRegistryError::UnknownController`] for an unknown id,
    /// or [`ControllerRegistryError::Dispatch`] if that controller's update fails.
    pub fn update(
        &mut self,
        id: SourceId,
        sample: RawTrackingSample,
    ) -> Result<(), ControllerRegistryError> {
        let router = self
            .routers
            .iter_mut()
            .find(|r| r.state().source_id() == id)
            .ok_or(ControllerRegistryError::UnknownController(id))?;
        router
            .update(sample)
            .map_err(|source| ControllerRegistryError::Dispatch { source_id: id, source })
    }

    /// Delivers a whole frame, routing each sample by node.
    ///
    /// Returns the number of controller updates performed.  Samples for a node
    /// no controller is bound to are skipped, and only the first sample for
    /// each node in the frame is delivered.
    ///
    /// # Errors
    ///
    /// Stops at the first failing controller and returns
    /// [`ControllerRegistryError::Dispatch`].  Controllers updated before it
    /// keep their new state.
    pub fn update_all(
        &mut self,
        frame: &[RawTrackingSample],
    ) -> Result<usize, ControllerRegistryError> {
        let mut delivered = 0;
        let mut seen: Vec<TrackedNode> = Vec::with_capacity(frame.len());
        for sample in frame {
            if seen.contains(&sample.node) {
                debug!(node = ?sample.node, "node already sampled this frame; sample skipped");
                continue;
            }
            seen.push(sample.node);

            let mut claimed = false;
            for router in self.routers.iter_mut().filter(|r| r.state().node() == sample.node) {
                claimed = true;
                let source_id = router.state().source_id();
                router
                    .update(*sample)
                    .map_err(|source| ControllerRegistryError::Dispatch { source_id, source })?;
                delivered += 1;
            }
            if !claimed {
                debug!(node = ?sample.node, "no controller is bound to this node; sample skipped");
            }
        }
        Ok(delivered)
    }

    /// Returns a snapshot of every controller in registration order.
    pub fn summaries(&self) -> Vec<ControllerSummary> {
        self.routers
            .iter()
            .map(|r| ControllerSummary {
                source_id: r.state().source_id(),
                handedness: r.state().handedness(),
                node: r.state().node(),
                tracking: r.state().tracking_state(),
                mappings: r.state().registry().len(),
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
