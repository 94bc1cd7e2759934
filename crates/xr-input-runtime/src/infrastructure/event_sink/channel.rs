//! Event sink that forwards notifications into a Tokio channel.
//!
//! The dispatch router runs synchronously inside the frame loop; consumers
//! that want to `await` events (network forwarders, statistics) read them
//! from the receiving half instead of blocking the frame.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use super::{EventReceiver, InputEvent};

/// Sends each notification as an owned [`InputEvent`].
pub struct ChannelEventSink {
    sender: UnboundedSender<InputEvent>,
    closed_reported: AtomicBool,
}

impl ChannelEventSink {
    pub fn new(sender: UnboundedSender<InputEvent>) -> Self {
        Self {
            sender,
            closed_reported: AtomicBool::new(false),
        }
    }

    /// Creates a sink together with the receiver that drains it.
    pub fn channel() -> (Self, UnboundedReceiver<InputEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl EventReceiver for ChannelEventSink {
    fn receive(&self, event: InputEvent) {
        if self.sender.send(event).is_err() && !self.closed_reported.swap(true, Ordering::Relaxed) {
            warn!("event receiver dropped; further events are discarded");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dispatch::InputEventSink;
    use uuid::Uuid;
    use xr_input_core::{ActionId, Handedness};

    #[tokio::test]
    async fn test_events_arrive_in_send_order() {
        // Arrange
        let (sink, mut rx) = ChannelEventSink::channel();
        let id = Uuid::new_v4();

        // Act
        sink.input_down(id, Handedness::Right, ActionId(1));
        sink.input_up(id, Handedness::Right, ActionId(1));
        drop(sink);

        // Assert
        assert!(matches!(rx.recv().await, Some(InputEvent::InputDown { .. })));
        assert!(matches!(rx.recv().await, Some(InputEvent::InputUp { .. })));
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_send_after_receiver_dropped_does_not_panic() {
        let (sink, rx) = ChannelEventSink::channel();
        drop(rx);

        sink.input_down(Uuid::nil(), Handedness::Left, ActionId(2));
        sink.input_down(Uuid::nil(), Handedness::Left, ActionId(2));

        assert!(sink.closed_reported.load(Ordering::Relaxed));
    }
}
