//! Sources of per-frame raw tracking samples.
//!
//! The frame loop pulls one frame at a time through the [`SampleSource`]
//! trait.  A frame is every sample the platform reported for one display
//! frame, typically one per tracked node.
//!
//! # Implementations
//!
//! - [`replay::ReplaySampleSource`] plays back a recording file.
//! - [`idle::IdleSampleSource`] reports each configured hand as present but
//!   untracked, for running without any tracking hardware.
//! - [`mock::MockSampleSource`] yields frames queued by a test.

use std::path::PathBuf;

use thiserror::Error;
use xr_input_core::recording::RecordingError;
use xr_input_core::RawTrackingSample;

pub mod idle;
pub mod mock;
pub mod replay;

/// Error type for sample source construction.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The recording file could not be read.
    #[error("I/O error reading recording at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The recording file is not a valid sample stream.
    #[error("invalid recording at {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: RecordingError,
    },
}

/// A pull-based producer of frames.
pub trait SampleSource: Send {
    /// Returns the next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Option<Vec<RawTrackingSample>>;
}
