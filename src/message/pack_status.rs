use serde::Serialize;

use super::Frame;

/// Pack configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackStatus {
    pub cell_count: u8,
}

impl PackStatus {
    pub(crate) fn from_frame(frame: &Frame) -> Self {
        Self { cell_count: frame[4] }
    }
}

#[test]
fn test_pack_status() {
    let frame: Frame = hex::decode("a5019408100000000000000052")
        .unwrap()
        .try_into()
        .unwrap();
    assert_eq!(PackStatus::from_frame(&frame).cell_count, 16);
}
