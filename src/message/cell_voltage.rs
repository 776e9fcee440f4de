use serde::Serialize;

use super::{be_u16, Frame};

/// The highest and lowest cell voltages and which cells they belong to
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellVoltageRange {
    /// Highest cell voltage in V
    pub max_cell_voltage_v: f32,
    pub max_cell_index: u8,
    /// Lowest cell voltage in V
    pub min_cell_voltage_v: f32,
    pub min_cell_index: u8,
}

impl CellVoltageRange {
    pub(crate) fn from_frame(frame: &Frame) -> Self {
        Self {
            max_cell_voltage_v: be_u16(frame, 4) as f32 / 1000.0,
            max_cell_index: frame[6],
            min_cell_voltage_v: be_u16(frame, 7) as f32 / 1000.0,
            min_cell_index: frame[9],
        }
    }
}

#[test]
fn test_cell_voltage_range() {
    let frame: Frame = hex::decode("a50191080cf3050ce40c00003f")
        .unwrap()
        .try_into()
        .unwrap();
    let range = CellVoltageRange::from_frame(&frame);
    assert_eq!(range.max_cell_voltage_v, 3.315);
    assert_eq!(range.max_cell_index, 5);
    assert_eq!(range.min_cell_voltage_v, 3.3);
    assert_eq!(range.min_cell_index, 12);
}
