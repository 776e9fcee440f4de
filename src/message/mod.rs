//! The SBMS wire protocol.
//!
//! Every message in either direction is a 13 byte frame:
//!
//! Start Byte | End Byte | Meaning
//! 0          | 0        | Start flag, always 0xA5
//! 1          | 1        | 0x80 (address) in requests, 0x01 (frame kind) in responses
//! 2          | 2        | The message type
//! 3          | 3        | Data length, always 0x08
//! 4          | 11       | The payload, all zeros in requests
//! 12         | 12       | Checksum, the low byte of the sum of the preceding bytes
//!
//! Requests only sum the four header bytes, which is the same thing since the
//! payload is always zero.

mod battery_level;
mod cell_voltage;
mod frame_scanner;
mod mos_status;
mod pack_status;
mod probe_temperature;
mod temperature_range;

use std::fmt;

use serde::Serialize;

pub use battery_level::BatteryLevel;
pub use cell_voltage::CellVoltageRange;
pub use frame_scanner::{decode, FrameScanner};
pub use mos_status::{MosStatus, PackState};
pub use pack_status::PackStatus;
pub use probe_temperature::ProbeTemperatures;
pub use temperature_range::TemperatureRange;

/// Length of every request and response frame
pub const FRAME_SIZE: usize = 13;
/// First byte of every frame
pub const START_BYTE: u8 = 0xA5;
/// Second byte of a request: the address of the communication module
pub const REQUEST_ADDRESS: u8 = 0x80;
/// Second byte of a response that may be accepted
pub const RESPONSE_KIND: u8 = 0x01;
/// Fourth byte of a request
pub const DATA_LENGTH: u8 = 0x08;

/// Raw temperatures are sent with this offset added so they are never negative
pub(crate) const TEMPERATURE_OFFSET: i16 = 40;

/// A single frame, either direction
pub type Frame = [u8; FRAME_SIZE];

/// The message types understood by the BMS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MessageType {
    /// Pack voltage, current and state of charge
    BatteryLevel = 0x90,
    /// Highest and lowest cell voltages
    MinMaxVoltage = 0x91,
    /// Highest and lowest temperatures
    MinMaxTemperature = 0x92,
    /// Charge state, MOSFETs and remaining capacity
    MosStatus = 0x93,
    /// Pack configuration
    PackStatus = 0x94,
    /// Individual temperature probes
    Temperature = 0x96,
}

impl MessageType {
    /// Every message type, in the order a polling cycle requests them
    pub const ALL: [MessageType; 6] = [
        MessageType::BatteryLevel,
        MessageType::MinMaxVoltage,
        MessageType::MinMaxTemperature,
        MessageType::MosStatus,
        MessageType::PackStatus,
        MessageType::Temperature,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Returned when a frame carries a message type this crate does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessageType(pub u8);

impl fmt::Display for UnknownMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown message type 0x{:02x}", self.0)
    }
}

impl std::error::Error for UnknownMessageType {}

impl TryFrom<u8> for MessageType {
    type Error = UnknownMessageType;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        MessageType::ALL
            .into_iter()
            .find(|t| t.id() == id)
            .ok_or(UnknownMessageType(id))
    }
}

/// Compute the checksum of the given bytes: the low byte of their sum
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// Build the request frame which asks the BMS for the given message type
pub fn build_request(message_type: MessageType) -> Frame {
    let mut frame = [0u8; FRAME_SIZE];
    frame[0] = START_BYTE;
    frame[1] = REQUEST_ADDRESS;
    frame[2] = message_type.id();
    frame[3] = DATA_LENGTH;
    frame[FRAME_SIZE - 1] = checksum(&frame[0..4]);
    frame
}

/// Read a big endian u16 starting at `offset`
pub(crate) fn be_u16(frame: &Frame, offset: usize) -> u16 {
    u16::from_be_bytes([frame[offset], frame[offset + 1]])
}

/// Read a big endian u32 starting at `offset`
pub(crate) fn be_u32(frame: &Frame, offset: usize) -> u32 {
    u32::from_be_bytes([
        frame[offset],
        frame[offset + 1],
        frame[offset + 2],
        frame[offset + 3],
    ])
}

/// Convert a raw temperature byte to degrees Celsius
pub(crate) fn temperature_c(raw: u8) -> i16 {
    raw as i16 - TEMPERATURE_OFFSET
}

#[test]
fn test_build_request_battery_level() {
    let expected = hex::decode("a58090080000000000000000bd").unwrap();
    assert_eq!(build_request(MessageType::BatteryLevel).to_vec(), expected);
}

#[test]
fn test_build_request_headers() {
    for message_type in MessageType::ALL {
        let frame = build_request(message_type);
        assert_eq!(frame[0], 0xa5);
        assert_eq!(frame[1], 0x80);
        assert_eq!(frame[2], message_type.id());
        assert_eq!(frame[3], 0x08);
        assert!(frame[4..12].iter().all(|&b| b == 0));
        let expected = ((0xa5u32 + 0x80 + message_type.id() as u32 + 0x08) % 256) as u8;
        assert_eq!(frame[12], expected);
    }
}

#[test]
fn test_message_type_from_id() {
    assert_eq!(MessageType::try_from(0x93), Ok(MessageType::MosStatus));
    assert_eq!(MessageType::try_from(0x96), Ok(MessageType::Temperature));
    assert_eq!(MessageType::try_from(0x95), Err(UnknownMessageType(0x95)));
}

#[test]
fn test_checksum_wraps() {
    assert_eq!(checksum(&[0xa5, 0x01, 0x90, 0x08]), 0x3e);
    assert_eq!(checksum(&[0xff, 0x02]), 0x01);
    assert_eq!(checksum(&[]), 0x00);
}

#[test]
fn test_temperature_offset() {
    assert_eq!(temperature_c(65), 25);
    assert_eq!(temperature_c(0), -40);
    assert_eq!(temperature_c(255), 215);
}
