//! Event sink that writes every notification to the `tracing` log.

use tracing::{debug, info};

use super::{EventReceiver, InputEvent};

/// Log target for outbound events, so they can be filtered separately.
pub const EVENT_TARGET: &str = "xr_input::events";

/// Logs canonical input events.
///
/// Tracking changes are logged at `info`; value changes, which arrive every
/// frame while a control moves, at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventReceiver for TracingEventSink {
    fn receive(&self, event: InputEvent) {
        match event {
            InputEvent::TrackingStateChanged {
                source,
                handedness,
                state,
            } => info!(
                target: EVENT_TARGET,
                %source,
                ?handedness,
                ?state,
                "controller tracking changed"
            ),
            other => debug!(target: EVENT_TARGET, source = %other.source(), "{other}"),
        }
    }
}
