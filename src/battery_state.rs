use serde::Serialize;

use crate::message::PackState;
use crate::sink::Sink;

/// The reported state of the battery, collected over one polling cycle.
///
/// Fields the BMS did not report in the cycle are `None`.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct BatteryState {
    /// The battery voltage in V
    pub voltage_v: Option<f32>,
    /// The battery current in A, negative while discharging
    pub current_a: Option<f32>,
    /// The state of charge of the battery in %
    pub battery_level_pct: Option<f32>,
    /// The highest cell voltage in V
    pub max_cell_voltage_v: Option<f32>,
    pub max_cell_index: Option<u8>,
    /// The lowest cell voltage in V
    pub min_cell_voltage_v: Option<f32>,
    pub min_cell_index: Option<u8>,
    /// The highest temperature in °C
    pub max_temperature_c: Option<i16>,
    pub max_temperature_probe: Option<u8>,
    /// The lowest temperature in °C
    pub min_temperature_c: Option<i16>,
    pub min_temperature_probe: Option<u8>,
    pub pack_state: Option<PackState>,
    pub charge_mos_enabled: Option<bool>,
    pub discharge_mos_enabled: Option<bool>,
    /// The residual capacity of the battery in Ah
    pub remaining_capacity_ah: Option<f32>,
    pub cell_count: Option<u8>,
    /// Temperature probe 1 in °C
    pub temperature_1_c: Option<i16>,
    /// Temperature probe 2 in °C
    pub temperature_2_c: Option<i16>,
}

impl BatteryState {
    /// True when nothing was reported
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Sink for BatteryState {
    fn voltage(&mut self, volts: f32) {
        self.voltage_v = Some(volts);
    }
    fn current(&mut self, amps: f32) {
        self.current_a = Some(amps);
    }
    fn battery_level(&mut self, percent: f32) {
        self.battery_level_pct = Some(percent);
    }
    fn max_cell_voltage(&mut self, volts: f32) {
        self.max_cell_voltage_v = Some(volts);
    }
    fn max_cell_index(&mut self, index: u8) {
        self.max_cell_index = Some(index);
    }
    fn min_cell_voltage(&mut self, volts: f32) {
        self.min_cell_voltage_v = Some(volts);
    }
    fn min_cell_index(&mut self, index: u8) {
        self.min_cell_index = Some(index);
    }
    fn max_temperature(&mut self, celsius: i16) {
        self.max_temperature_c = Some(celsius);
    }
    fn max_temperature_probe(&mut self, probe: u8) {
        self.max_temperature_probe = Some(probe);
    }
    fn min_temperature(&mut self, celsius: i16) {
        self.min_temperature_c = Some(celsius);
    }
    fn min_temperature_probe(&mut self, probe: u8) {
        self.min_temperature_probe = Some(probe);
    }
    fn pack_state(&mut self, state: PackState) {
        self.pack_state = Some(state);
    }
    fn charge_mos_enabled(&mut self, enabled: bool) {
        self.charge_mos_enabled = Some(enabled);
    }
    fn discharge_mos_enabled(&mut self, enabled: bool) {
        self.discharge_mos_enabled = Some(enabled);
    }
    fn remaining_capacity(&mut self, amp_hours: f32) {
        self.remaining_capacity_ah = Some(amp_hours);
    }
    fn cell_count(&mut self, cells: u8) {
        self.cell_count = Some(cells);
    }
    fn temperature_1(&mut self, celsius: i16) {
        self.temperature_1_c = Some(celsius);
    }
    fn temperature_2(&mut self, celsius: i16) {
        self.temperature_2_c = Some(celsius);
    }
}

#[test]
fn test_battery_state_collects_measurements() {
    let buffer = hex::decode(concat!(
        "a501900801f40000772401f4c3",
        "a50196080141370000000000bd",
    ))
    .unwrap();
    let mut state = BatteryState::default();
    assert!(state.is_empty());
    for measurement in crate::message::decode(&buffer) {
        measurement.publish(&mut state);
    }
    assert_eq!(state.voltage_v, Some(50.0));
    assert_eq!(state.current_a, Some(50.0));
    assert_eq!(state.battery_level_pct, Some(50.0));
    assert_eq!(state.temperature_1_c, Some(25));
    assert_eq!(state.temperature_2_c, Some(15));
    assert_eq!(state.cell_count, None);
    assert!(!state.is_empty());
}

#[test]
fn test_battery_state_json() {
    let state = BatteryState {
        cell_count: Some(16),
        pack_state: Some(PackState::Discharging),
        ..Default::default()
    };
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["cell_count"], 16);
    assert_eq!(json["pack_state"], "discharging");
    assert!(json["voltage_v"].is_null());
}
