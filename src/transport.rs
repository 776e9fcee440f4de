//! The byte stream the BMS is attached to

use std::io::{self, Read, Write};
use std::time::Duration;

use anyhow::Context;
use serialport::{DataBits, Parity, SerialPort, StopBits};

/// A blocking, byte reliable link to the BMS
pub trait Transport {
    /// Queue bytes for sending
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
    /// Block until queued bytes have been sent
    fn flush(&mut self) -> io::Result<()>;
    /// The number of received bytes which can be read without blocking
    fn available(&mut self) -> io::Result<usize>;
    /// Read up to `buffer.len()` received bytes, returning how many were read
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }
    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
    fn available(&mut self) -> io::Result<usize> {
        (**self).available()
    }
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        (**self).read(buffer)
    }
}

/// Serial port settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// e.g. `/dev/ttyUSB0` or `COM3`
    pub port: String,
    pub baud_rate: u32,
    /// How long a read or write may block
    pub timeout: Duration,
}

impl SerialConfig {
    /// The SBMS talks 8N1 at this rate
    pub const DEFAULT_BAUD_RATE: u32 = 9600;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);

    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: Self::DEFAULT_BAUD_RATE,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// A [`Transport`] over a local serial port
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open the serial port described by `config`
    pub fn open(config: &SerialConfig) -> anyhow::Result<Self> {
        let port = serialport::new(&config.port, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(config.timeout)
            .open()
            .with_context(|| format!("Cannot open serial port {}", config.port))?;
        Ok(Self { port })
    }

    /// The names of the serial ports present on this machine
    pub fn available_ports() -> anyhow::Result<Vec<String>> {
        let ports = serialport::available_ports()?;
        Ok(ports.into_iter().map(|p| p.port_name).collect())
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.port.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut self.port)
    }

    fn available(&mut self) -> io::Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        Read::read(&mut self.port, buffer)
    }
}

#[test]
fn test_serial_config_defaults() {
    let config = SerialConfig::new("/dev/ttyUSB0");
    assert_eq!(config.port, "/dev/ttyUSB0");
    assert_eq!(config.baud_rate, 9600);
    assert_eq!(config.timeout, Duration::from_millis(100));
}
