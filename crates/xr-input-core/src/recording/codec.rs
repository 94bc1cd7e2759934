//! Binary codec for recorded tracking samples.
//!
//! Record format:
//! ```text
//! [magic:4 "XRIS"][version:1][reserved:3][frame_index:8][payload_len:4][payload:N]
//! ```
//! Header size: 20 bytes.  All multi-byte integers are big-endian.  The
//! payload is the `bincode` serialisation of a [`RawTrackingSample`].
//!
//! Samples sharing a `frame_index` were captured during the same frame.

use thiserror::Error;

use crate::domain::sample::RawTrackingSample;

/// Magic bytes at the start of every record.
pub const RECORDING_MAGIC: [u8; 4] = *b"XRIS";

/// Current record format version.
pub const RECORDING_VERSION: u8 = 1;

/// Size of the fixed record header in bytes.
pub const HEADER_SIZE: usize = 20;

/// Errors that can occur while encoding or decoding recordings.
#[derive(Debug, Error, PartialEq)]
pub enum RecordingError {
    /// The byte slice is shorter than the minimum required length.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The record does not start with the expected magic bytes.
    #[error("bad magic: {0:02X?}")]
    BadMagic([u8; 4]),

    /// The record version is not supported.
    #[error("unsupported recording version: {0}")]
    UnsupportedVersion(u8),

    /// The declared payload length runs past the end of the data.
    #[error("payload length mismatch: header says {declared}, available is {available}")]
    PayloadLengthMismatch { declared: usize, available: usize },

    /// The payload could not be (de)serialised.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// One decoded record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedSample {
    pub frame_index: u64,
    pub sample: RawTrackingSample,
}

/// Encodes `sample` as a single record tagged with `frame_index`.
///
/// # Errors
///
/// Returns [`RecordingError::MalformedPayload`] if serialisation fails.
///
/// # Examples
///
/// ```rust
/// use xr_input_core::recording::{decode_sample, encode_sample};
/// use xr_input_core::domain::sample::{RawTrackingSample, TrackedNode};
///
/// let sample = RawTrackingSample::new(TrackedNode::LeftHand);
/// let bytes = encode_sample(&sample, 7).unwrap();
/// let (record, consumed) = decode_sample(&bytes).unwrap();
/// assert_eq!(record.frame_index, 7);
/// assert_eq!(record.sample, sample);
/// assert_eq!(consumed, bytes.len());
/// ```
pub fn encode_sample(
    sample: &RawTrackingSample,
    frame_index: u64,
) -> Result<Vec<u8>, RecordingError> {
    let payload =
        bincode::serialize(sample).map_err(|e| RecordingError::MalformedPayload(e.to_string()))?;
    let payload_len = u32::try_from(payload.len())
        .map_err(|_| RecordingError::MalformedPayload("payload exceeds 4 GiB".to_string()))?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(&RECORDING_MAGIC);
    buf.push(RECORDING_VERSION);
    buf.extend_from_slice(&[0x00; 3]); // reserved
    buf.extend_from_slice(&frame_index.to_be_bytes());
    buf.extend_from_slice(&payload_len.to_be_bytes());
    buf.extend_from_slice(&payload);
    Ok(buf)
}

/// Decodes one record from the beginning of `bytes`.
///
/// Returns the record and the number of bytes consumed.
///
/// # Errors
///
/// Returns [`RecordingError`] if the bytes are truncated or malformed.
pub fn decode_sample(bytes: &[u8]) -> Result<(RecordedSample, usize), RecordingError> {
    if bytes.len() < HEADER_SIZE {
        return Err(RecordingError::InsufficientData {
            needed: HEADER_SIZE,
            available: bytes.len(),
        });
    }

    let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
    if magic != RECORDING_MAGIC {
        return Err(RecordingError::BadMagic(magic));
    }

    let version = bytes[4];
    if version != RECORDING_VERSION {
        return Err(RecordingError::UnsupportedVersion(version));
    }

    // bytes[5..8] are reserved – ignored on decode

    let mut index_bytes = [0u8; 8];
    index_bytes.copy_from_slice(&bytes[8..16]);
    let frame_index = u64::from_be_bytes(index_bytes);
    let payload_len = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]) as usize;

    let total = HEADER_SIZE + payload_len;
    if bytes.len() < total {
        return Err(RecordingError::PayloadLengthMismatch {
            declared: payload_len,
            available: bytes.len() - HEADER_SIZE,
        });
    }

    let sample: RawTrackingSample = bincode::deserialize(&bytes[HEADER_SIZE..total])
        .map_err(|e| RecordingError::MalformedPayload(e.to_string()))?;
    Ok((RecordedSample { frame_index, sample }, total))
}

/// Decodes every record in `bytes`.
///
/// # Errors
///
/// Fails on the first malformed or truncated record.
pub fn decode_stream(mut bytes: &[u8]) -> Result<Vec<RecordedSample>, RecordingError> {
    let mut out = Vec::new();
    while !bytes.is_empty() {
        let (record, consumed) = decode_sample(bytes)?;
        out.push(record);
        bytes = &bytes[consumed..];
    }
    Ok(out)
}

/// Groups consecutive records with the same `frame_index` into frames.
pub fn group_frames(records: Vec<RecordedSample>) -> Vec<Vec<RawTrackingSample>> {
    let mut frames: Vec<Vec<RawTrackingSample>> = Vec::new();
    let mut current: Option<u64> = None;
    for record in records {
        if current != Some(record.frame_index) {
            frames.push(Vec::new());
            current = Some(record.frame_index);
        }
        if let Some(frame) = frames.last_mut() {
            frame.push(record.sample);
        }
    }
    frames
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::{RawControllerInputs, TrackedNode};
    use glam::{Quat, Vec2, Vec3};

    fn busy_sample() -> RawTrackingSample {
        RawTrackingSample::new(TrackedNode::RightHand)
            .with_position(Vec3::new(0.1, 1.4, -0.3))
            .with_rotation(Quat::from_rotation_y(0.8))
            .with_inputs(RawControllerInputs {
                select_amount: Some(0.42),
                thumbstick_position: Some(Vec2::new(-0.2, 0.9)),
                menu_pressed: Some(true),
                ..Default::default()
            })
    }

    #[test]
    fn test_header_layout() {
        let bytes = encode_sample(&busy_sample(), 0x0102).unwrap();
        assert_eq!(&bytes[0..4], b"XRIS");
        assert_eq!(bytes[4], RECORDING_VERSION);
        assert_eq!(&bytes[5..8], &[0, 0, 0]);
        assert_eq!(&bytes[8..16], &0x0102u64.to_be_bytes());
        let len = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]) as usize;
        assert_eq!(len, bytes.len() - HEADER_SIZE);
    }

    #[test]
    fn test_decode_rejects_short_input() {
        assert_eq!(
            decode_sample(&[0u8; 5]),
            Err(RecordingError::InsufficientData {
                needed: HEADER_SIZE,
                available: 5,
            })
        );
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let mut bytes = encode_sample(&busy_sample(), 1).unwrap();
        bytes[0] = b'Q';
        assert!(matches!(decode_sample(&bytes), Err(RecordingError::BadMagic(_))));
    }

    #[test]
    fn test_decode_rejects_future_version() {
        let mut bytes = encode_sample(&busy_sample(), 1).unwrap();
        bytes[4] = 9;
        assert_eq!(decode_sample(&bytes), Err(RecordingError::UnsupportedVersion(9)));
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let bytes = encode_sample(&busy_sample(), 1).unwrap();
        let cut = &bytes[..bytes.len() - 3];
        assert!(matches!(
            decode_sample(cut),
            Err(RecordingError::PayloadLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_group_frames_splits_on_frame_index() {
        // Arrange
        let left = RawTrackingSample::new(TrackedNode::LeftHand);
        let right = RawTrackingSample::new(TrackedNode::RightHand);
        let mut bytes = Vec::new();
        bytes.extend(encode_sample(&left, 0).unwrap());
        bytes.extend(encode_sample(&right, 0).unwrap());
        bytes.extend(encode_sample(&left, 1).unwrap());

        // Act
        let frames = group_frames(decode_stream(&bytes).unwrap());

        // Assert
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], vec![left, right]);
        assert_eq!(frames[1], vec![left]);
    }
}
