//! Dispatch router: drives one controller through one frame.
//!
//! For every new [`RawTrackingSample`] the router
//!
//! 1. validates the controller's mapping registry (fail fast, no mutation),
//! 2. evaluates the tracking-state machine,
//! 3. walks the registry in stored order, extracting each mapping's value and
//!    notifying the [`InputEventSink`] for every mapping that changed,
//! 4. reports a tracking-state transition, if any, after all value changes,
//! 5. stores the sample as the controller's last reading.
//!
//! # Architecture
//!
//! The router depends only on traits (`InputEventSink`, `PlayspaceRoot`) and
//! core domain types.  Sinks and playspace providers are injected at
//! construction time, so tests substitute recording doubles and nothing here
//! reaches for a global input system.

use std::sync::Arc;

use glam::Vec2;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;
use xr_input_core::{
    extract, ActionId, ChangeTolerance, ConfigurationError, FrameContext, Handedness,
    MappingRegistry, OrientationMode, ParentTransform, Pose, RawTrackingSample, SignalChange,
    TrackedNode, TrackingState, TrackingStateMachine,
};

/// Identifies an input source (one physical controller) to the event sink.
pub type SourceId = Uuid;

/// Error type for the dispatch use case.
#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    /// The controller's registry is not valid; the frame was aborted.
    #[error("controller configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Receiver of canonical input changes.
///
/// Notifications fire only on change; the sink is never polled.
/// Infrastructure implementations log or forward events; tests record them.
#[cfg_attr(test, mockall::automock)]
pub trait InputEventSink: Send + Sync {
    /// A pose capability moved or turned.
    fn pose_changed(&self, source: SourceId, handedness: Handedness, action: ActionId, pose: Pose);

    /// A boolean capability went from released to pressed.
    fn input_down(&self, source: SourceId, handedness: Handedness, action: ActionId);

    /// A boolean capability went from pressed to released.
    fn input_up(&self, source: SourceId, handedness: Handedness, action: ActionId);

    /// A float capability (trigger pull) changed.
    fn float_changed(&self, source: SourceId, handedness: Handedness, action: ActionId, value: f32);

    /// A 2-D axis capability (thumbstick, touchpad) changed.
    fn axis_changed(&self, source: SourceId, handedness: Handedness, action: ActionId, value: Vec2);

    /// The controller's tracking state changed.
    fn tracking_state_changed(
        &self,
        source: SourceId,
        handedness: Handedness,
        state: TrackingState,
    );
}

/// Provider of the tracking-space root transform (the camera rig's parent).
pub trait PlayspaceRoot: Send + Sync {
    /// Returns the current world transform of the root, or `None` if there is none.
    fn parent_transform(&self) -> Option<ParentTransform>;
}

/// Per-router behaviour knobs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DispatchSettings {
    pub orientation_mode: OrientationMode,
    pub tolerance: ChangeTolerance,
}

/// All per-controller state mutated by the router.
///
/// Exactly one exists per physical tracked device.
#[derive(Debug, Clone)]
pub struct ControllerState {
    source_id: SourceId,
    handedness: Handedness,
    /// The only node whose samples this controller consumes.
    node: TrackedNode,
    registry: MappingRegistry,
    tracking: TrackingStateMachine,
    /// Last sample received, kept for diagnostics only.
    last_sample: Option<RawTrackingSample>,
}

impl ControllerState {
    /// Creates a controller bound to its handedness' default node.
    pub fn new(
        source_id: SourceId,
        handedness: Handedness,
        initial_tracking: TrackingState,
        registry: MappingRegistry,
    ) -> Self {
        Self {
            source_id,
            handedness,
            node: handedness.default_node(),
            registry,
            tracking: TrackingStateMachine::new(initial_tracking),
            last_sample: None,
        }
    }

    /// Binds the controller to `node` instead of its default node.
    pub fn with_node(mut self, node: TrackedNode) -> Self {
        self.node = node;
        self
    }

    pub fn source_id(&self) -> SourceId {
        self.source_id
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn node(&self) -> TrackedNode {
        self.node
    }

    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    pub fn tracking_state(&self) -> TrackingState {
        self.tracking.state()
    }

    pub fn last_sample(&self) -> Option<&RawTrackingSample> {
        self.last_sample.as_ref()
    }
}

/// Routes one controller's per-frame samples to extractors and the event sink.
pub struct DispatchRouter {
    state: ControllerState,
    sink: Arc<dyn InputEventSink>,
    playspace: Option<Arc<dyn PlayspaceRoot>>,
    settings: DispatchSettings,
}

impl DispatchRouter {
    /// Creates a router with no playspace root; poses stay device-local.
    pub fn new(
        state: ControllerState,
        sink: Arc<dyn InputEventSink>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            state,
            sink,
            playspace: None,
            settings,
        }
    }

    /// Attaches a playspace root so poses are re-expressed in parent space.
    pub fn with_playspace(mut self, playspace: Arc<dyn PlayspaceRoot>) -> Self {
        self.playspace = Some(playspace);
        self
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Processes one frame's sample for this controller.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Configuration`] if the registry holds a kind
    /// with no extractor.  In that case nothing is mutated and nothing is
    /// emitted: mappings, tracking state, and the last sample are unchanged.
    pub fn update(&mut self, sample: RawTrackingSample) -> Result<(), DispatchError> {
        self.state.registry.validate()?;

        let transition = self.state.tracking.evaluate(&sample);
        let parent = self.playspace.as_ref().and_then(|p| p.parent_transform());
        let frame = FrameContext::new(&sample, &self.settings.tolerance)
            .with_parent(parent.as_ref())
            .with_orientation_mode(self.settings.orientation_mode);

        let source = self.state.source_id;
        let handedness = self.state.handedness;
        let sink = self.sink.as_ref();

        for (index, mapping) in self.state.registry.iter_mut().enumerate() {
            extract(&frame, mapping, index)?;
            if let Some(change) = SignalChange::of(mapping) {
                debug!(
                    %source,
                    ?handedness,
                    action = %mapping.action(),
                    kind = %mapping.kind(),
                    ?change,
                    "input changed"
                );
                raise(sink, source, handedness, mapping.action(), change);
            }
            mapping.clear_changed();
        }

        if let Some(transition) = transition {
            self.state.tracking.apply(transition);
            info!(
                %source,
                ?handedness,
                from = ?transition.from,
                to = ?transition.to,
                "tracking state changed"
            );
            sink.tracking_state_changed(source, handedness, transition.to);
        }

        self.state.last_sample = Some(sample);
        Ok(())
    }
}

fn raise(
    sink: &dyn InputEventSink,
    source: SourceId,
    handedness: Handedness,
    action: ActionId,
    change: SignalChange,
) {
    match change {
        SignalChange::PoseChanged(pose) => sink.pose_changed(source, handedness, action, pose),
        SignalChange::Pressed => sink.input_down(source, handedness, action),
        SignalChange::Released => sink.input_up(source, handedness, action),
        SignalChange::FloatChanged(value) => sink.float_changed(source, handedness, action, value),
        SignalChange::AxisChanged(value) => sink.axis_changed(source, handedness, action, value),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
