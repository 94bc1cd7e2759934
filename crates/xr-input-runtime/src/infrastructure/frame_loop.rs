//! Per-frame driver.
//!
//! Ticks a Tokio interval at the configured frame rate.  On each tick one
//! frame is pulled from the [`SampleSource`] and dispatched synchronously to
//! every controller through [`ControllerRegistry::update_all`].
//!
//! The loop ends when the source is exhausted, when the shared `running`
//! flag is cleared (Ctrl-C), or on the first configuration error, which is
//! returned to the caller.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::application::manage_controllers::{ControllerRegistry, ControllerRegistryError};
use crate::infrastructure::sample_source::SampleSource;

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames pulled from the source.
    pub frames: u64,
    /// Controller updates performed across all frames.
    pub updates: u64,
}

/// Runs the frame loop until the source ends or `running` is cleared.
///
/// A `frame_rate_hz` of zero is treated as one frame per second.
///
/// # Errors
///
/// Returns the first [`ControllerRegistryError`] raised while dispatching.
pub async fn run<S>(
    source: &mut S,
    controllers: &mut ControllerRegistry,
    frame_rate_hz: u32,
    running: Arc<AtomicBool>,
) -> Result<FrameStats, ControllerRegistryError>
where
    S: SampleSource + ?Sized,
{
    let period = Duration::from_secs_f64(1.0 / f64::from(frame_rate_hz.max(1)));
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut stats = FrameStats::default();
    info!(frame_rate_hz, controllers = controllers.len(), "frame loop started");

    loop {
        ticker.tick().await;
        if !running.load(Ordering::Relaxed) {
            debug!("shutdown flag cleared");
            break;
        }
        let Some(frame) = source.next_frame() else {
            info!("sample source exhausted");
            break;
        };
        stats.updates += controllers.update_all(&frame)? as u64;
        stats.frames += 1;
    }

    info!(frames = stats.frames, updates = stats.updates, "frame loop stopped");
    Ok(stats)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dispatch::{ControllerState, DispatchRouter, DispatchSettings};
    use crate::infrastructure::event_sink::memory::MemoryEventSink;
    use crate::infrastructure::event_sink::InputEvent;
    use crate::infrastructure::sample_source::idle::IdleSampleSource;
    use crate::infrastructure::sample_source::mock::MockSampleSource;
    use glam::Vec3;
    use uuid::Uuid;
    use xr_input_core::{
        ActionId, CapabilityKind, Handedness, MappingRegistry, RawTrackingSample, TrackedNode,
        TrackingState,
    };

    fn controllers_with(
        sink: Arc<MemoryEventSink>,
        registry: MappingRegistry,
    ) -> ControllerRegistry {
        let state = ControllerState::new(
            Uuid::new_v4(),
            Handedness::Left,
            TrackingState::NotTracked,
            registry,
        );
        let mut controllers = ControllerRegistry::new();
        controllers
            .add(DispatchRouter::new(state, sink, DispatchSettings::default()))
            .unwrap();
        controllers
    }

    #[tokio::test]
    async fn test_loop_dispatches_every_frame_until_source_ends() {
        // Arrange
        let sink = Arc::new(MemoryEventSink::new());
        let registry: MappingRegistry =
            [(CapabilityKind::SpatialPointer, ActionId(1))].into_iter().collect();
        let mut controllers = controllers_with(Arc::clone(&sink), registry);
        let mut source: MockSampleSource = [
            vec![RawTrackingSample::new(TrackedNode::LeftHand).with_position(Vec3::X)],
            vec![RawTrackingSample::new(TrackedNode::LeftHand).with_position(Vec3::Y)],
            vec![RawTrackingSample::new(TrackedNode::LeftHand).with_position(Vec3::Y)],
        ]
        .into_iter()
        .collect();

        // Act
        let stats = run(&mut source, &mut controllers, 1000, Arc::new(AtomicBool::new(true)))
            .await
            .unwrap();

        // Assert – two pose changes and one tracking transition
        assert_eq!(stats, FrameStats { frames: 3, updates: 3 });
        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[1],
            InputEvent::TrackingStateChanged {
                state: TrackingState::Tracked,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_cleared_flag_stops_before_first_frame() {
        let sink = Arc::new(MemoryEventSink::new());
        let mut controllers = controllers_with(sink, MappingRegistry::new());
        let mut source = IdleSampleSource::new(vec![TrackedNode::LeftHand]);

        let stats = run(&mut source, &mut controllers, 1000, Arc::new(AtomicBool::new(false)))
            .await
            .unwrap();

        assert_eq!(stats, FrameStats::default());
    }

    #[tokio::test]
    async fn test_configuration_error_aborts_loop() {
        // Arrange
        let sink = Arc::new(MemoryEventSink::new());
        let registry: MappingRegistry = [(CapabilityKind::from_name("hand-mesh"), ActionId(1))]
            .into_iter()
            .collect();
        let mut controllers = controllers_with(Arc::clone(&sink), registry);
        let mut source = IdleSampleSource::new(vec![TrackedNode::LeftHand]);

        // Act
        let running = Arc::new(AtomicBool::new(true));
        let result = run(&mut source, &mut controllers, 1000, running).await;

        // Assert
        assert!(matches!(result, Err(ControllerRegistryError::Dispatch { .. })));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_zero_frame_rate_does_not_panic() {
        let sink = Arc::new(MemoryEventSink::new());
        let mut controllers = controllers_with(sink, MappingRegistry::new());
        let mut source = MockSampleSource::new();
        source.push_frame(Vec::new());

        // The first tick of an interval completes immediately.
        let stats = run(&mut source, &mut controllers, 0, Arc::new(AtomicBool::new(true)))
            .await
            .unwrap();

        assert_eq!(stats.frames, 1);
    }
}
