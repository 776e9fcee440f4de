use serde::Serialize;

use super::{temperature_c, Frame};

/// The only probe selector the BMS answers with that this crate can read
const PROBE_SELECTOR: u8 = 1;

/// Readings of the first two temperature probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeTemperatures {
    /// Probe 1 in °C
    pub probe_1_c: i16,
    /// Probe 2 in °C
    pub probe_2_c: i16,
}

impl ProbeTemperatures {
    /// Returns `None` unless byte 4 selects the first probe block
    pub(crate) fn from_frame(frame: &Frame) -> Option<Self> {
        if frame[4] != PROBE_SELECTOR {
            return None;
        }
        Some(Self {
            probe_1_c: temperature_c(frame[5]),
            probe_2_c: temperature_c(frame[6]),
        })
    }
}

#[test]
fn test_probe_temperatures() {
    let frame: Frame = hex::decode("a50196080141370000000000bd")
        .unwrap()
        .try_into()
        .unwrap();
    assert_eq!(
        ProbeTemperatures::from_frame(&frame),
        Some(ProbeTemperatures { probe_1_c: 25, probe_2_c: 15 })
    );
}

#[test]
fn test_probe_temperatures_other_selector() {
    let frame: Frame = hex::decode("a50196080241370000000000be")
        .unwrap()
        .try_into()
        .unwrap();
    assert_eq!(ProbeTemperatures::from_frame(&frame), None);
}
