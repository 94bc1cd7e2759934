//! Mock sample source for unit testing.
//!
//! Allows tests to queue synthetic frames without a recording file.

use std::collections::VecDeque;

use xr_input_core::RawTrackingSample;

use super::SampleSource;

/// A [`SampleSource`] that yields queued frames in order, then stops.
#[derive(Debug, Default)]
pub struct MockSampleSource {
    frames: VecDeque<Vec<RawTrackingSample>>,
    pulled: usize,
}

impl MockSampleSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a frame to be returned after those already queued.
    pub fn push_frame(&mut self, frame: Vec<RawTrackingSample>) {
        self.frames.push_back(frame);
    }

    /// Number of frames handed out so far.
    pub fn pulled(&self) -> usize {
        self.pulled
    }
}

impl FromIterator<Vec<RawTrackingSample>> for MockSampleSource {
    fn from_iter<I: IntoIterator<Item = Vec<RawTrackingSample>>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
            pulled: 0,
        }
    }
}

impl SampleSource for MockSampleSource {
    fn next_frame(&mut self) -> Option<Vec<RawTrackingSample>> {
        let frame = self.frames.pop_front()?;
        self.pulled += 1;
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xr_input_core::TrackedNode;

    #[test]
    fn test_mock_source_yields_frames_in_order_then_stops() {
        // Arrange
        let mut source = MockSampleSource::new();
        source.push_frame(vec![RawTrackingSample::new(TrackedNode::LeftHand)]);
        source.push_frame(vec![RawTrackingSample::new(TrackedNode::RightHand)]);

        // Act / Assert
        assert_eq!(source.next_frame().map(|f| f[0].node), Some(TrackedNode::LeftHand));
        assert_eq!(source.next_frame().map(|f| f[0].node), Some(TrackedNode::RightHand));
        assert!(source.next_frame().is_none());
        assert_eq!(source.pulled(), 2);
    }
}
