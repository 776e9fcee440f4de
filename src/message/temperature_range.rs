use serde::Serialize;

use super::{temperature_c, Frame};

/// The highest and lowest temperatures and which probes measured them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemperatureRange {
    /// Highest temperature in °C
    pub max_temperature_c: i16,
    pub max_probe: u8,
    /// Lowest temperature in °C
    pub min_temperature_c: i16,
    pub min_probe: u8,
}

impl TemperatureRange {
    pub(crate) fn from_frame(frame: &Frame) -> Self {
        Self {
            max_temperature_c: temperature_c(frame[4]),
            max_probe: frame[5],
            min_temperature_c: temperature_c(frame[6]),
            min_probe: frame[7],
        }
    }
}

#[test]
fn test_temperature_range() {
    let frame: Frame = hex::decode("a50192084105370200000000bf")
        .unwrap()
        .try_into()
        .unwrap();
    assert_eq!(
        TemperatureRange::from_frame(&frame),
        TemperatureRange {
            max_temperature_c: 25,
            max_probe: 5,
            min_temperature_c: 15,
            min_probe: 2,
        }
    );
}
