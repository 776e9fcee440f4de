use serde::Serialize;

use super::{be_u16, Frame};

/// The current is sent with this offset added so it is never negative
const CURRENT_OFFSET: i32 = 30000;

/// Pack voltage, current and state of charge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryLevel {
    /// Pack voltage in V
    pub voltage_v: f32,
    /// Pack current in A. Positive while charging, negative while discharging.
    pub current_a: f32,
    /// State of charge in %
    pub level_pct: f32,
}

impl BatteryLevel {
    pub(crate) fn from_frame(frame: &Frame) -> Self {
        Self {
            voltage_v: be_u16(frame, 4) as f32 / 10.0,
            current_a: (be_u16(frame, 8) as i32 - CURRENT_OFFSET) as f32 / 10.0,
            level_pct: be_u16(frame, 10) as f32 / 10.0,
        }
    }
}

#[cfg(test)]
fn frame(hex_frame: &str) -> Frame {
    hex::decode(hex_frame).unwrap().try_into().unwrap()
}

#[test]
fn test_battery_level_charging() {
    let level = BatteryLevel::from_frame(&frame("a501900801f40000772401f4c3"));
    assert_eq!(
        level,
        BatteryLevel { voltage_v: 50.0, current_a: 50.0, level_pct: 50.0 }
    );
}

#[test]
fn test_battery_level_discharging() {
    let level = BatteryLevel::from_frame(&frame("a501900801f40000733c0000e2"));
    assert_eq!(level.current_a, -50.0);
    assert_eq!(level.level_pct, 0.0);
}
