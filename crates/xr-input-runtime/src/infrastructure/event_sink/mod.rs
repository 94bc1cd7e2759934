//! Event sink adapters for the dispatch router.
//!
//! The application layer only knows the [`InputEventSink`] trait.  This module
//! provides the concrete receivers the runtime wires together:
//!
//! - [`tracing_sink::TracingEventSink`] logs every event.
//! - [`channel::ChannelEventSink`] forwards owned [`InputEvent`]s into a Tokio
//!   channel for asynchronous consumers.
//! - [`memory::MemoryEventSink`] stores events for inspection in tests.
//! - [`FanOutSink`] repeats every event to several sinks in order.
//!
//! All of them implement [`EventReceiver`], which turns the six sink calls
//! into one `receive(InputEvent)`.

use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use xr_input_core::{ActionId, Handedness, Pose, TrackingState};

use crate::application::dispatch::{InputEventSink, SourceId};

pub mod channel;
pub mod memory;
pub mod tracing_sink;

/// An owned record of one sink notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PoseChanged {
        source: SourceId,
        handedness: Handedness,
        action: ActionId,
        pose: Pose,
    },
    InputDown {
        source: SourceId,
        handedness: Handedness,
        action: ActionId,
    },
    InputUp {
        source: SourceId,
        handedness: Handedness,
        action: ActionId,
    },
    FloatChanged {
        source: SourceId,
        handedness: Handedness,
        action: ActionId,
        value: f32,
    },
    AxisChanged {
        source: SourceId,
        handedness: Handedness,
        action: ActionId,
        value: Vec2,
    },
    TrackingStateChanged {
        source: SourceId,
        handedness: Handedness,
        state: TrackingState,
    },
}

impl InputEvent {
    /// The controller that produced this event.
    pub fn source(&self) -> SourceId {
        match *self {
            InputEvent::PoseChanged { source, .. }
            | InputEvent::InputDown { source, .. }
            | InputEvent::InputUp { source, .. }
            | InputEvent::FloatChanged { source, .. }
            | InputEvent::AxisChanged { source, .. }
            | InputEvent::TrackingStateChanged { source, .. } => source,
        }
    }

    /// The action this event concerns; `None` for tracking changes.
    pub fn action(&self) -> Option<ActionId> {
        match *self {
            InputEvent::PoseChanged { action, .. }
            | InputEvent::InputDown { action, .. }
            | InputEvent::InputUp { action, .. }
            | InputEvent::FloatChanged { action, .. }
            | InputEvent::AxisChanged { action, .. } => Some(action),
            InputEvent::TrackingStateChanged { .. } => None,
        }
    }

    /// Replays this event into `sink`.
    pub fn deliver(&self, sink: &dyn InputEventSink) {
        match *self {
            InputEvent::PoseChanged {
                source,
                handedness,
                action,
                pose,
            } => sink.pose_changed(source, handedness, action, pose),
            InputEvent::InputDown {
                source,
                handedness,
                action,
            } => sink.input_down(source, handedness, action),
            InputEvent::InputUp {
                source,
                handedness,
                action,
            } => sink.input_up(source, handedness, action),
            InputEvent::FloatChanged {
                source,
                handedness,
                action,
                value,
            } => sink.float_changed(source, handedness, action, value),
            InputEvent::AxisChanged {
                source,
                handedness,
                action,
                value,
            } => sink.axis_changed(source, handedness, action, value),
            InputEvent::TrackingStateChanged {
                source,
                handedness,
                state,
            } => sink.tracking_state_changed(source, handedness, state),
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::PoseChanged { action, pose, .. } => write!(
                f,
                "{action} pose position={} rotation={}",
                pose.position, pose.rotation
            ),
            InputEvent::InputDown { action, .. } => write!(f, "{action} down"),
            InputEvent::InputUp { action, .. } => write!(f, "{action} up"),
            InputEvent::FloatChanged { action, value, .. } => write!(f, "{action} = {value:.3}"),
            InputEvent::AxisChanged { action, value, .. } => {
                write!(f, "{action} = ({:.3}, {:.3})", value.x, value.y)
            }
            InputEvent::TrackingStateChanged { state, .. } => write!(f, "tracking {state:?}"),
        }
    }
}

/// A receiver of owned [`InputEvent`]s.
///
/// Every `EventReceiver` is also an [`InputEventSink`]: each sink call is
/// packed into an `InputEvent` and handed to [`EventReceiver::receive`].
pub trait EventReceiver: Send + Sync {
    fn receive(&self, event: InputEvent);
}

impl<R: EventReceiver> InputEventSink for R {
    fn pose_changed(&self, source: SourceId, handedness: Handedness, action: ActionId, pose: Pose) {
        self.receive(InputEvent::PoseChanged {
            source,
            handedness,
            action,
            pose,
        });
    }

    fn input_down(&self, source: SourceId, handedness: Handedness, action: ActionId) {
        self.receive(InputEvent::InputDown {
            source,
            handedness,
            action,
        });
    }

    fn input_up(&self, source: SourceId, handedness: Handedness, action: ActionId) {
        self.receive(InputEvent::InputUp {
            source,
            handedness,
            action,
        });
    }

    fn float_changed(
        &self,
        source: SourceId,
        handedness: Handedness,
        action: ActionId,
        value: f32,
    ) {
        self.receive(InputEvent::FloatChanged {
            source,
            handedness,
            action,
            value,
        });
    }

    fn axis_changed(
        &self,
        source: SourceId,
        handedness: Handedness,
        action: ActionId,
        value: Vec2,
    ) {
        self.receive(InputEvent::AxisChanged {
            source,
            handedness,
            action,
            value,
        });
    }

    fn tracking_state_changed(
        &self,
        source: SourceId,
        handedness: Handedness,
        state: TrackingState,
    ) {
        self.receive(InputEvent::TrackingStateChanged {
            source,
            handedness,
            state,
        });
    }
}

/// Repeats every notification to each inner sink, in order.
#[derive(Default)]
pub struct FanOutSink {
    sinks: Vec<Arc<dyn InputEventSink>>,
}

impl FanOutSink {
    pub fn new(sinks: Vec<Arc<dyn InputEventSink>>) -> Self {
        Self { sinks }
    }
}

impl EventReceiver for FanOutSink {
    fn receive(&self, event: InputEvent) {
        for sink in &self.sinks {
            event.deliver(sink.as_ref());
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
