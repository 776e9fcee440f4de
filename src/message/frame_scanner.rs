use tracing::{debug, trace};

use super::{checksum, Frame, FRAME_SIZE, RESPONSE_KIND, START_BYTE};
use crate::measurement::Measurement;

/// Scan the given bytes for response frames and decode them.
///
/// The bytes may contain any number of frames, garbage between them and a
/// truncated frame at the end. Accepted frames are decoded lazily as the
/// returned iterator is advanced.
pub fn decode(buffer: &[u8]) -> FrameScanner<'_> {
    FrameScanner::new(buffer)
}

/// Iterator over the measurements found in a byte buffer.
///
/// A candidate frame starts at any 0xA5 byte. It is accepted when the next byte
/// is the response kind and the checksum over its first 12 bytes matches byte
/// 12. A rejected candidate only moves the cursor one byte forward, so a real
/// frame that begins inside the rejected one is still found.
#[derive(Debug, Clone)]
pub struct FrameScanner<'a> {
    buffer: &'a [u8],
    cursor: usize,
}

impl<'a> FrameScanner<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Advance to the next frame which passes validation
    pub fn next_frame(&mut self) -> Option<&'a Frame> {
        loop {
            let offset = self.buffer[self.cursor..]
                .iter()
                .position(|&b| b == START_BYTE)?;
            let start = self.cursor + offset;

            let candidate: Option<&'a Frame> = self
                .buffer
                .get(start..start + FRAME_SIZE)
                .and_then(|bytes| bytes.try_into().ok());
            let Some(candidate) = candidate else {
                // The transport does not keep remainders, so this is lost
                debug!(
                    "Dropping truncated frame: {}",
                    hex::encode(&self.buffer[start..])
                );
                self.cursor = self.buffer.len();
                return None;
            };

            if candidate[1] != RESPONSE_KIND {
                trace!("Start byte at {start} is not followed by the response kind");
                self.cursor = start + 1;
                continue;
            }

            let expected = checksum(&candidate[..FRAME_SIZE - 1]);
            if expected != candidate[FRAME_SIZE - 1] {
                debug!(
                    "Checksum mismatch at {start}: expected 0x{expected:02x}: {}",
                    hex::encode(candidate)
                );
                self.cursor = start + 1;
                continue;
            }

            self.cursor = start + FRAME_SIZE;
            return Some(candidate);
        }
    }
}

impl Iterator for FrameScanner<'_> {
    type Item = Measurement;

    fn next(&mut self) -> Option<Measurement> {
        while let Some(frame) = self.next_frame() {
            if let Some(measurement) = Measurement::decode(frame) {
                return Some(measurement);
            }
        }
        None
    }
}

impl std::iter::FusedIterator for FrameScanner<'_> {}

#[test]
fn test_decode_empty() {
    assert_eq!(decode(&[]).count(), 0);
}

#[test]
fn test_decode_single_frame() {
    let buffer = hex::decode("a5019408100000000000000052").unwrap();
    let measurements: Vec<_> = decode(&buffer).collect();
    assert_eq!(
        measurements,
        vec![Measurement::PackStatus(super::PackStatus { cell_count: 16 })]
    );
}

#[test]
fn test_decode_leading_garbage() {
    let buffer = hex::decode("0011a5ff22a5019408100000000000000052").unwrap();
    assert_eq!(decode(&buffer).count(), 1);
}

#[test]
fn test_decode_spurious_start_byte() {
    let buffer = hex::decode("a5a5019408100000000000000052").unwrap();
    assert_eq!(decode(&buffer).count(), 1);
}

#[test]
fn test_decode_frame_inside_rejected_candidate() {
    // The first candidate has a valid kind byte but a bad checksum and
    // overlaps the real frame that starts two bytes later
    let buffer = hex::decode("a501a5019408100000000000000052").unwrap();
    assert_eq!(decode(&buffer).count(), 1);
}

#[test]
fn test_decode_bad_checksum() {
    let buffer = hex::decode("a5019408100000000000000053").unwrap();
    assert_eq!(decode(&buffer).count(), 0);
}

#[test]
fn test_decode_truncated_trailing_frame() {
    let buffer = hex::decode("a5019408100000000000000052a501900801f400").unwrap();
    let mut scanner = decode(&buffer);
    assert!(scanner.next().is_some());
    assert!(scanner.next().is_none());
    assert!(scanner.next().is_none());
}

#[test]
fn test_decode_skips_unknown_message_type() {
    let buffer =
        hex::decode("a5019508000000000000000043a5019408100000000000000052").unwrap();
    let measurements: Vec<_> = decode(&buffer).collect();
    assert_eq!(measurements.len(), 1);
    assert!(matches!(measurements[0], Measurement::PackStatus(_)));
}

#[test]
fn test_next_frame_yields_unknown_types() {
    let buffer = hex::decode("a5019508000000000000000043").unwrap();
    let mut scanner = FrameScanner::new(&buffer);
    assert_eq!(scanner.next_frame().map(|f| f[2]), Some(0x95));
    assert_eq!(scanner.next_frame(), None);
}
