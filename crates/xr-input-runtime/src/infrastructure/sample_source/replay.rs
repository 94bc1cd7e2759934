//! Replays a recorded session frame by frame.
//!
//! A recording is a concatenation of sample records (see
//! `xr_input_core::recording`).  Consecutive records with the same frame
//! index form one frame.

use std::path::{Path, PathBuf};

use tracing::info;
use xr_input_core::recording::{decode_stream, group_frames, RecordingError};
use xr_input_core::RawTrackingSample;

use super::{SampleSource, SourceError};

/// A [`SampleSource`] backed by a decoded recording.
#[derive(Debug, Clone)]
pub struct ReplaySampleSource {
    frames: Vec<Vec<RawTrackingSample>>,
    cursor: usize,
    looping: bool,
}

impl ReplaySampleSource {
    /// Reads and decodes the recording at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be read and
    /// [`SourceError::Decode`] if any record is malformed.
    pub fn open(path: &Path, looping: bool) -> Result<Self, SourceError> {
        let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Self::from_bytes(&bytes, looping).map_err(|source| SourceError::Decode {
            path: PathBuf::from(path),
            source,
        })?;
        info!(path = %path.display(), frames = source.frame_count(), looping, "recording loaded");
        Ok(source)
    }

    /// Decodes a recording already held in memory.
    ///
    /// # Errors
    ///
    /// Returns the first [`RecordingError`] found in `bytes`.
    pub fn from_bytes(bytes: &[u8], looping: bool) -> Result<Self, RecordingError> {
        Ok(Self {
            frames: group_frames(decode_stream(bytes)?),
            cursor: 0,
            looping,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl SampleSource for ReplaySampleSource {
    fn next_frame(&mut self) -> Option<Vec<RawTrackingSample>> {
        if self.cursor >= self.frames.len() {
            if !self.looping || self.frames.is_empty() {
                return None;
            }
            self.cursor = 0;
        }
        let frame = self.frames[self.cursor].clone();
        self.cursor += 1;
        Some(frame)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
