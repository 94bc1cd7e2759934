//! Capture format for streams of raw tracking samples.
//!
//! Recordings let a session be replayed frame by frame through the dispatch
//! router, which is how controller profiles are debugged without a headset.

pub mod codec;

pub use codec::{
    decode_sample, decode_stream, encode_sample, group_frames, RecordedSample, RecordingError,
    HEADER_SIZE, RECORDING_MAGIC, RECORDING_VERSION,
};
