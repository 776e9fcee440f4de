//! Polling cycles driven over a mock transport

use std::collections::VecDeque;
use std::io;

use sbmsread::message::{build_request, MessageType, PackState};
use sbmsread::{BatteryState, SbmsClient, Transport};

/// Mock transport which records writes and serves pre-loaded receive bytes
#[derive(Default)]
struct MockTransport {
    written: Vec<u8>,
    flushes: usize,
    received: VecDeque<u8>,
    fail_writes: bool,
}

impl MockTransport {
    fn with_received(hex_bytes: &str) -> Self {
        Self {
            received: hex::decode(hex_bytes).unwrap().into(),
            ..Default::default()
        }
    }
}

impl Transport for MockTransport {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "port gone"));
        }
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn available(&mut self) -> io::Result<usize> {
        Ok(self.received.len())
    }

    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        let n = buffer.len().min(self.received.len());
        for (slot, byte) in buffer.iter_mut().zip(self.received.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

#[test]
fn test_poll_sends_all_requests_in_order() {
    let mut transport = MockTransport::default();
    let mut state = BatteryState::default();
    let published = SbmsClient::new(&mut transport).poll(&mut state).unwrap();

    assert_eq!(published, 0);
    assert!(state.is_empty());
    let expected: Vec<u8> = MessageType::ALL
        .into_iter()
        .flat_map(build_request)
        .collect();
    assert_eq!(transport.written, expected);
    assert_eq!(transport.flushes, 6);
    assert_eq!(transport.written[2], 0x90);
    assert_eq!(transport.written[67], 0x96);
}

#[test]
fn test_poll_decodes_all_message_types() {
    let mut transport = MockTransport::with_received(concat!(
        "a501900801f40000772401f4c3",
        "a50191080cf3050ce40c00003f",
        "a50192084105370200000000bf",
        "a501930801010100000186a06b",
        "a5019408100000000000000052",
        "a50196080141370000000000bd",
    ));
    let mut state = BatteryState::default();
    let published = SbmsClient::new(&mut transport).poll(&mut state).unwrap();

    assert_eq!(published, 6);
    assert_eq!(
        state,
        BatteryState {
            voltage_v: Some(50.0),
            current_a: Some(50.0),
            battery_level_pct: Some(50.0),
            max_cell_voltage_v: Some(3.315),
            max_cell_index: Some(5),
            min_cell_voltage_v: Some(3.3),
            min_cell_index: Some(12),
            max_temperature_c: Some(25),
            max_temperature_probe: Some(5),
            min_temperature_c: Some(15),
            min_temperature_probe: Some(2),
            pack_state: Some(PackState::Charging),
            charge_mos_enabled: Some(true),
            discharge_mos_enabled: Some(true),
            remaining_capacity_ah: Some(100.0),
            cell_count: Some(16),
            temperature_1_c: Some(25),
            temperature_2_c: Some(15),
        }
    );
    assert_eq!(transport.available().unwrap(), 0);
}

#[test]
fn test_poll_leaves_short_input_unread() {
    let mut transport = MockTransport::with_received("a5019408100000");
    let mut state = BatteryState::default();
    let published = SbmsClient::new(&mut transport).poll(&mut state).unwrap();

    assert_eq!(published, 0);
    assert!(state.is_empty());
    assert_eq!(transport.available().unwrap(), 7);
}

#[test]
fn test_poll_recovers_from_noise() {
    let mut transport = MockTransport::with_received(concat!(
        "00a5ff",
        "a5019408100000000000000053",
        "a5019408100000000000000052",
        "a50196080241370000000000be",
        "a501900801f400",
    ));
    let mut state = BatteryState::default();
    let published = SbmsClient::new(&mut transport).poll(&mut state).unwrap();

    assert_eq!(published, 1);
    assert_eq!(state.cell_count, Some(16));
    assert_eq!(state.temperature_1_c, None);
    assert_eq!(state.voltage_v, None);
}

#[test]
fn test_poll_cycles_are_independent() {
    let mut transport = MockTransport::with_received("a5019408100000000000000052");
    let mut client = SbmsClient::new(&mut transport);

    let mut first = BatteryState::default();
    assert_eq!(client.poll(&mut first).unwrap(), 1);
    let mut second = BatteryState::default();
    assert_eq!(client.poll(&mut second).unwrap(), 0);
    assert!(second.is_empty());
}

#[test]
fn test_poll_reports_transport_errors() {
    let mut transport = MockTransport {
        fail_writes: true,
        ..Default::default()
    };
    let mut state = BatteryState::default();
    let err = SbmsClient::new(&mut transport).poll(&mut state).unwrap_err();
    assert!(err.to_string().contains("BatteryLevel"));
    assert!(state.is_empty());
}
