use serde::Serialize;
use tracing::debug;

use crate::message::{
    BatteryLevel, CellVoltageRange, Frame, MessageType, MosStatus, PackStatus,
    ProbeTemperatures, TemperatureRange,
};
use crate::sink::Sink;

/// The data decoded from one accepted response frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Measurement {
    BatteryLevel(BatteryLevel),
    MinMaxVoltage(CellVoltageRange),
    MinMaxTemperature(TemperatureRange),
    MosStatus(MosStatus),
    PackStatus(PackStatus),
    Temperature(ProbeTemperatures),
}

impl Measurement {
    /// Decode a frame which has already passed validation.
    ///
    /// Returns `None` for message types this crate does not know and for
    /// temperature frames that do not carry the first probe block.
    pub fn decode(frame: &Frame) -> Option<Self> {
        let message_type = match MessageType::try_from(frame[2]) {
            Ok(message_type) => message_type,
            Err(err) => {
                debug!("Ignoring frame: {err}");
                return None;
            }
        };

        let measurement = match message_type {
            MessageType::BatteryLevel => Self::BatteryLevel(BatteryLevel::from_frame(frame)),
            MessageType::MinMaxVoltage => Self::MinMaxVoltage(CellVoltageRange::from_frame(frame)),
            MessageType::MinMaxTemperature => {
                Self::MinMaxTemperature(TemperatureRange::from_frame(frame))
            }
            MessageType::MosStatus => Self::MosStatus(MosStatus::from_frame(frame)),
            MessageType::PackStatus => Self::PackStatus(PackStatus::from_frame(frame)),
            MessageType::Temperature => match ProbeTemperatures::from_frame(frame) {
                Some(probes) => Self::Temperature(probes),
                None => {
                    debug!("Ignoring temperature frame with probe selector {}", frame[4]);
                    return None;
                }
            },
        };
        Some(measurement)
    }

    /// The message type this measurement was decoded from
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::BatteryLevel(_) => MessageType::BatteryLevel,
            Self::MinMaxVoltage(_) => MessageType::MinMaxVoltage,
            Self::MinMaxTemperature(_) => MessageType::MinMaxTemperature,
            Self::MosStatus(_) => MessageType::MosStatus,
            Self::PackStatus(_) => MessageType::PackStatus,
            Self::Temperature(_) => MessageType::Temperature,
        }
    }

    /// Send every field of this measurement to its channel on the sink
    pub fn publish<S: Sink + ?Sized>(&self, sink: &mut S) {
        match self {
            Self::BatteryLevel(m) => {
                sink.voltage(m.voltage_v);
                sink.current(m.current_a);
                sink.battery_level(m.level_pct);
            }
            Self::MinMaxVoltage(m) => {
                sink.max_cell_voltage(m.max_cell_voltage_v);
                sink.max_cell_index(m.max_cell_index);
                sink.min_cell_voltage(m.min_cell_voltage_v);
                sink.min_cell_index(m.min_cell_index);
            }
            Self::MinMaxTemperature(m) => {
                sink.max_temperature(m.max_temperature_c);
                sink.max_temperature_probe(m.max_probe);
                sink.min_temperature(m.min_temperature_c);
                sink.min_temperature_probe(m.min_probe);
            }
            Self::MosStatus(m) => {
                if let Some(state) = m.state {
                    sink.pack_state(state);
                }
                sink.charge_mos_enabled(m.charge_mos_enabled);
                sink.discharge_mos_enabled(m.discharge_mos_enabled);
                sink.remaining_capacity(m.remaining_capacity_ah);
            }
            Self::PackStatus(m) => sink.cell_count(m.cell_count),
            Self::Temperature(m) => {
                sink.temperature_1(m.probe_1_c);
                sink.temperature_2(m.probe_2_c);
            }
        }
    }
}

#[cfg(test)]
fn frame(hex_frame: &str) -> Frame {
    hex::decode(hex_frame).unwrap().try_into().unwrap()
}

#[test]
fn test_decode_dispatches_on_message_type() {
    let cases = [
        ("a501900801f40000772401f4c3", MessageType::BatteryLevel),
        ("a50191080cf3050ce40c00003f", MessageType::MinMaxVoltage),
        ("a50192084105370200000000bf", MessageType::MinMaxTemperature),
        ("a501930801010100000186a06b", MessageType::MosStatus),
        ("a5019408100000000000000052", MessageType::PackStatus),
        ("a50196080141370000000000bd", MessageType::Temperature),
    ];
    for (hex_frame, expected) in cases {
        let measurement = Measurement::decode(&frame(hex_frame)).unwrap();
        assert_eq!(measurement.message_type(), expected);
    }
}

#[test]
fn test_decode_ignores_unknown_and_unselected() {
    assert_eq!(Measurement::decode(&frame("a5019508000000000000000043")), None);
    assert_eq!(Measurement::decode(&frame("a50196080241370000000000be")), None);
}

#[test]
fn test_publish_skips_unrecognised_pack_state() {
    #[derive(Default)]
    struct Calls(Vec<&'static str>);

    impl Sink for Calls {
        fn pack_state(&mut self, _: crate::message::PackState) {
            self.0.push("pack_state");
        }
        fn charge_mos_enabled(&mut self, _: bool) {
            self.0.push("charge_mos_enabled");
        }
        fn remaining_capacity(&mut self, _: f32) {
            self.0.push("remaining_capacity");
        }
    }

    let mut calls = Calls::default();
    Measurement::decode(&frame("a501930807000000000186a06f"))
        .unwrap()
        .publish(&mut calls);
    assert_eq!(calls.0, vec!["charge_mos_enabled", "remaining_capacity"]);

    let mut calls = Calls::default();
    Measurement::decode(&frame("a501930801010100000186a06b"))
        .unwrap()
        .publish(&mut calls);
    assert_eq!(
        calls.0,
        vec!["pack_state", "charge_mos_enabled", "remaining_capacity"]
    );
}
