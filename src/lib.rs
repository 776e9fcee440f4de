//! Read status data from SBMS battery management systems over a serial link
//!
//! The BMS speaks a request/response protocol of fixed 13 byte frames. A request
//! is sent for each message type, and the BMS answers each one with a frame of
//! the same type. Responses arrive on an undelimited byte stream which may
//! hold partial frames, garbage and several frames at once, so they are located
//! by scanning for the start byte and validated by checksum.
//!
//! Currently the following data can be accessed:
//!
//! - Battery voltage (V), current (A) and state of charge (%)
//! - Highest and lowest cell voltages (V) and their cells
//! - Highest and lowest temperatures (°C) and their probes
//! - Charge state, charging and discharging MOSFETs, remaining capacity (Ah)
//! - Number of cells
//! - Temperature probes 1 and 2 (°C)
//!
//! # Example
//!
//! ```no_run
//! # use std::time::Duration;
//! # fn main() -> anyhow::Result<()> {
//! let config = sbmsread::SerialConfig::new("/dev/ttyUSB0");
//! let mut client = sbmsread::SbmsClient::open(&config)?;
//! loop {
//!     let mut battery_state = sbmsread::BatteryState::default();
//!     client.poll(&mut battery_state)?;
//!     println!("{battery_state:?}");
//!     std::thread::sleep(Duration::from_secs(30));
//! }
//! # }
//! ```
//!
//! The codec can also be used on its own:
//!
//! ```
//! let rsp = hex::decode("a5019408100000000000000052").unwrap();
//! let measurements: Vec<_> = sbmsread::message::decode(&rsp).collect();
//! assert_eq!(measurements.len(), 1);
//! ```

mod battery_state;
mod measurement;
pub mod message;
mod sbms_client;
pub mod sink;
mod transport;

pub use battery_state::BatteryState;
pub use measurement::Measurement;
pub use sbms_client::SbmsClient;
pub use sink::{LogSink, Sink};
pub use transport::{SerialConfig, SerialTransport, Transport};
