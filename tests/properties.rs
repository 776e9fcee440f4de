//! Property tests for request building and frame scanning

use proptest::prelude::*;
use sbmsread::message::{build_request, checksum, decode, Frame, FrameScanner, MessageType};

fn response(message_type: MessageType, payload: [u8; 8]) -> Frame {
    let mut frame = [0u8; 13];
    frame[0] = 0xa5;
    frame[1] = 0x01;
    frame[2] = message_type.id();
    frame[3] = 0x08;
    frame[4..12].copy_from_slice(&payload);
    frame[12] = checksum(&frame[..12]);
    frame
}

fn message_type() -> impl Strategy<Value = MessageType> {
    prop::sample::select(MessageType::ALL.to_vec())
}

/// Bytes which can never start a candidate frame
fn noise(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>().prop_filter("start byte", |b| *b != 0xa5), 0..max_len)
}

proptest! {
    #[test]
    fn request_header_and_checksum(message_type in message_type()) {
        let frame = build_request(message_type);
        prop_assert_eq!(&frame[..4], &[0xa5, 0x80, message_type.id(), 0x08]);
        prop_assert!(frame[4..12].iter().all(|&b| b == 0));
        let sum = 0xa5u32 + 0x80 + message_type.id() as u32 + 0x08;
        prop_assert_eq!(frame[12] as u32, sum % 256);
    }

    #[test]
    fn valid_frame_found_between_noise(
        message_type in message_type(),
        payload in any::<[u8; 8]>(),
        before in noise(32),
        after in noise(12),
    ) {
        let frame = response(message_type, payload);
        let buffer = [before.as_slice(), frame.as_slice(), after.as_slice()].concat();
        let mut scanner = FrameScanner::new(&buffer);
        prop_assert_eq!(scanner.next_frame(), Some(&frame));
        prop_assert_eq!(scanner.next_frame(), None);
    }

    #[test]
    fn spurious_start_byte_is_skipped(message_type in message_type(), payload in any::<[u8; 8]>()) {
        let frame = response(message_type, payload);
        let buffer = [&[0xa5][..], frame.as_slice()].concat();
        let frames: Vec<_> = std::iter::from_fn({
            let mut scanner = FrameScanner::new(&buffer);
            move || scanner.next_frame().copied()
        })
        .collect();
        prop_assert_eq!(frames, vec![frame]);
    }

    #[test]
    fn single_bit_flip_is_rejected(
        message_type in message_type(),
        payload in any::<[u8; 8]>(),
        byte in 0usize..12,
        bit in 0u8..8,
    ) {
        let mut frame = response(message_type, payload);
        frame[byte] ^= 1 << bit;
        prop_assert_eq!(FrameScanner::new(&frame).next_frame(), None);
        prop_assert_eq!(decode(&frame).count(), 0);
    }

    #[test]
    fn concatenated_frames_in_order(
        first_type in message_type(),
        second_type in message_type(),
        first_payload in any::<[u8; 8]>(),
        second_payload in any::<[u8; 8]>(),
    ) {
        let first = response(first_type, first_payload);
        let second = response(second_type, second_payload);
        let buffer = [first, second].concat();
        let mut scanner = FrameScanner::new(&buffer);
        prop_assert_eq!(scanner.next_frame(), Some(&first));
        prop_assert_eq!(scanner.next_frame(), Some(&second));
        prop_assert_eq!(scanner.next_frame(), None);
    }

    #[test]
    fn truncated_frame_yields_nothing(
        message_type in message_type(),
        payload in any::<[u8; 8]>(),
        len in 0usize..13,
    ) {
        let frame = response(message_type, payload);
        prop_assert_eq!(decode(&frame[..len]).count(), 0);
    }

    #[test]
    fn arbitrary_bytes_terminate(buffer in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert!(decode(&buffer).count() <= buffer.len() / 13);
    }
}

#[test]
fn test_temperature_selector_other_than_one_yields_nothing() {
    for selector in [0u8, 2, 3, 0xff] {
        let frame = response(MessageType::Temperature, [selector, 65, 55, 0, 0, 0, 0, 0]);
        assert_eq!(decode(&frame).count(), 0);
    }
    let frame = response(MessageType::Temperature, [1, 65, 55, 0, 0, 0, 0, 0]);
    assert_eq!(decode(&frame).count(), 1);
}

#[test]
fn test_two_message_types_decode_in_order() {
    let battery = response(MessageType::BatteryLevel, [0x01, 0xf4, 0, 0, 0x73, 0x3c, 0, 0]);
    let pack = response(MessageType::PackStatus, [4, 0, 0, 0, 0, 0, 0, 0]);
    let buffer = [battery, pack].concat();
    let types: Vec<_> = decode(&buffer).map(|m| m.message_type()).collect();
    assert_eq!(types, vec![MessageType::BatteryLevel, MessageType::PackStatus]);
}
