use std::fmt;

use serde::Serialize;

use super::{be_u32, Frame};

/// What the pack is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackState {
    Idle,
    Charging,
    Discharging,
}

impl PackState {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(PackState::Idle),
            1 => Some(PackState::Charging),
            2 => Some(PackState::Discharging),
            _ => None,
        }
    }
}

impl fmt::Display for PackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PackState::Idle => "Stationary",
            PackState::Charging => "Charging",
            PackState::Discharging => "Discharging",
        };
        f.write_str(text)
    }
}

/// Charge state, MOSFET switches and remaining capacity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MosStatus {
    /// `None` when the BMS reports a state this crate does not recognise
    pub state: Option<PackState>,
    pub charge_mos_enabled: bool,
    pub discharge_mos_enabled: bool,
    /// Remaining capacity in Ah
    pub remaining_capacity_ah: f32,
}

impl MosStatus {
    pub(crate) fn from_frame(frame: &Frame) -> Self {
        Self {
            state: PackState::from_raw(frame[4]),
            charge_mos_enabled: frame[5] != 0,
            discharge_mos_enabled: frame[6] != 0,
            remaining_capacity_ah: be_u32(frame, 8) as f32 / 1000.0,
        }
    }
}

#[test]
fn test_mos_status() {
    let frame: Frame = hex::decode("a501930801010100000186a06b")
        .unwrap()
        .try_into()
        .unwrap();
    assert_eq!(
        MosStatus::from_frame(&frame),
        MosStatus {
            state: Some(PackState::Charging),
            charge_mos_enabled: true,
            discharge_mos_enabled: true,
            remaining_capacity_ah: 100.0,
        }
    );
}

#[test]
fn test_mos_status_unrecognised_state() {
    let frame: Frame = hex::decode("a501930807000000000186a06f")
        .unwrap()
        .try_into()
        .unwrap();
    let status = MosStatus::from_frame(&frame);
    assert_eq!(status.state, None);
    assert!(!status.charge_mos_enabled);
    assert!(!status.discharge_mos_enabled);
    assert_eq!(status.remaining_capacity_ah, 100.0);
}

#[test]
fn test_pack_state_display() {
    assert_eq!(PackState::Idle.to_string(), "Stationary");
    assert_eq!(PackState::Discharging.to_string(), "Discharging");
}
