//! Sample source used when no tracking data is available.

use xr_input_core::{RawTrackingSample, TrackedNode};

use super::SampleSource;

/// Reports the given nodes every frame with no spatial or button data.
///
/// Hands fed from this source settle into `NotTracked`.  The source never
/// ends; the frame loop runs until shutdown.
#[derive(Debug, Clone)]
pub struct IdleSampleSource {
    nodes: Vec<TrackedNode>,
}

impl IdleSampleSource {
    pub fn new(nodes: Vec<TrackedNode>) -> Self {
        Self { nodes }
    }
}

impl SampleSource for IdleSampleSource {
    fn next_frame(&mut self) -> Option<Vec<RawTrackingSample>> {
        Some(self.nodes.iter().map(|&node| RawTrackingSample::new(node)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_source_reports_empty_samples_forever() {
        let mut source = IdleSampleSource::new(vec![TrackedNode::LeftHand, TrackedNode::RightHand]);
        for _ in 0..3 {
            let frame = source.next_frame().unwrap();
            assert_eq!(frame.len(), 2);
            assert!(frame.iter().all(|s| !s.is_position_available() && !s.is_rotation_available()));
        }
    }
}
