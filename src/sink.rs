//! Destinations for decoded measurements.
//!
//! A [`Sink`] has one method per measurement channel. Every method has an empty
//! default, so a sink only implements the channels it is interested in and the
//! decoder never needs to know which those are.

use tracing::info;

use crate::message::PackState;

#[allow(unused_variables)]
pub trait Sink {
    /// Pack voltage in V
    fn voltage(&mut self, volts: f32) {}
    /// Pack current in A, negative while discharging
    fn current(&mut self, amps: f32) {}
    /// State of charge in %
    fn battery_level(&mut self, percent: f32) {}

    fn max_cell_voltage(&mut self, volts: f32) {}
    fn max_cell_index(&mut self, index: u8) {}
    fn min_cell_voltage(&mut self, volts: f32) {}
    fn min_cell_index(&mut self, index: u8) {}

    fn max_temperature(&mut self, celsius: i16) {}
    fn max_temperature_probe(&mut self, probe: u8) {}
    fn min_temperature(&mut self, celsius: i16) {}
    fn min_temperature_probe(&mut self, probe: u8) {}

    fn pack_state(&mut self, state: PackState) {}
    fn charge_mos_enabled(&mut self, enabled: bool) {}
    fn discharge_mos_enabled(&mut self, enabled: bool) {}
    /// Remaining capacity in Ah
    fn remaining_capacity(&mut self, amp_hours: f32) {}

    fn cell_count(&mut self, cells: u8) {}

    fn temperature_1(&mut self, celsius: i16) {}
    fn temperature_2(&mut self, celsius: i16) {}
}

/// Writes every channel to the `tracing` log at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl Sink for LogSink {
    fn voltage(&mut self, volts: f32) {
        info!("voltage: {volts:.1} V");
    }
    fn current(&mut self, amps: f32) {
        info!("current: {amps:.1} A");
    }
    fn battery_level(&mut self, percent: f32) {
        info!("battery level: {percent:.1} %");
    }
    fn max_cell_voltage(&mut self, volts: f32) {
        info!("max cell voltage: {volts:.3} V");
    }
    fn max_cell_index(&mut self, index: u8) {
        info!("max cell: {index}");
    }
    fn min_cell_voltage(&mut self, volts: f32) {
        info!("min cell voltage: {volts:.3} V");
    }
    fn min_cell_index(&mut self, index: u8) {
        info!("min cell: {index}");
    }
    fn max_temperature(&mut self, celsius: i16) {
        info!("max temperature: {celsius} °C");
    }
    fn max_temperature_probe(&mut self, probe: u8) {
        info!("max temperature probe: {probe}");
    }
    fn min_temperature(&mut self, celsius: i16) {
        info!("min temperature: {celsius} °C");
    }
    fn min_temperature_probe(&mut self, probe: u8) {
        info!("min temperature probe: {probe}");
    }
    fn pack_state(&mut self, state: PackState) {
        info!("status: {state}");
    }
    fn charge_mos_enabled(&mut self, enabled: bool) {
        info!("charging MOS enabled: {enabled}");
    }
    fn discharge_mos_enabled(&mut self, enabled: bool) {
        info!("discharging MOS enabled: {enabled}");
    }
    fn remaining_capacity(&mut self, amp_hours: f32) {
        info!("remaining capacity: {amp_hours:.3} Ah");
    }
    fn cell_count(&mut self, cells: u8) {
        info!("cells: {cells}");
    }
    fn temperature_1(&mut self, celsius: i16) {
        info!("temperature 1: {celsius} °C");
    }
    fn temperature_2(&mut self, celsius: i16) {
        info!("temperature 2: {celsius} °C");
    }
}

/// Forwards every channel to both sinks
impl<A: Sink, B: Sink> Sink for (A, B) {
    fn voltage(&mut self, volts: f32) {
        self.0.voltage(volts);
        self.1.voltage(volts);
    }
    fn current(&mut self, amps: f32) {
        self.0.current(amps);
        self.1.current(amps);
    }
    fn battery_level(&mut self, percent: f32) {
        self.0.battery_level(percent);
        self.1.battery_level(percent);
    }
    fn max_cell_voltage(&mut self, volts: f32) {
        self.0.max_cell_voltage(volts);
        self.1.max_cell_voltage(volts);
    }
    fn max_cell_index(&mut self, index: u8) {
        self.0.max_cell_index(index);
        self.1.max_cell_index(index);
    }
    fn min_cell_voltage(&mut self, volts: f32) {
        self.0.min_cell_voltage(volts);
        self.1.min_cell_voltage(volts);
    }
    fn min_cell_index(&mut self, index: u8) {
        self.0.min_cell_index(index);
        self.1.min_cell_index(index);
    }
    fn max_temperature(&mut self, celsius: i16) {
        self.0.max_temperature(celsius);
        self.1.max_temperature(celsius);
    }
    fn max_temperature_probe(&mut self, probe: u8) {
        self.0.max_temperature_probe(probe);
        self.1.max_temperature_probe(probe);
    }
    fn min_temperature(&mut self, celsius: i16) {
        self.0.min_temperature(celsius);
        self.1.min_temperature(celsius);
    }
    fn min_temperature_probe(&mut self, probe: u8) {
        self.0.min_temperature_probe(probe);
        self.1.min_temperature_probe(probe);
    }
    fn pack_state(&mut self, state: PackState) {
        self.0.pack_state(state);
        self.1.pack_state(state);
    }
    fn charge_mos_enabled(&mut self, enabled: bool) {
        self.0.charge_mos_enabled(enabled);
        self.1.charge_mos_enabled(enabled);
    }
    fn discharge_mos_enabled(&mut self, enabled: bool) {
        self.0.discharge_mos_enabled(enabled);
        self.1.discharge_mos_enabled(enabled);
    }
    fn remaining_capacity(&mut self, amp_hours: f32) {
        self.0.remaining_capacity(amp_hours);
        self.1.remaining_capacity(amp_hours);
    }
    fn cell_count(&mut self, cells: u8) {
        self.0.cell_count(cells);
        self.1.cell_count(cells);
    }
    fn temperature_1(&mut self, celsius: i16) {
        self.0.temperature_1(celsius);
        self.1.temperature_1(celsius);
    }
    fn temperature_2(&mut self, celsius: i16) {
        self.0.temperature_2(celsius);
        self.1.temperature_2(celsius);
    }
}
