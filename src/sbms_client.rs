use anyhow::Context;
use tracing::{debug, trace};

use crate::message::{build_request, decode, MessageType, FRAME_SIZE};
use crate::sink::Sink;
use crate::transport::{SerialConfig, SerialTransport, Transport};

/// Polls a BMS over a [`Transport`].
///
/// Each call to [`SbmsClient::poll`] is one self contained cycle: every
/// message type is requested, whatever has arrived so far is read and decoded
/// and the results are handed to a [`Sink`]. Responses usually arrive after
/// the read, so in practice a cycle publishes what the previous cycle asked
/// for.
pub struct SbmsClient<T> {
    transport: T,
}

impl SbmsClient<SerialTransport> {
    /// Open a serial port and create a client on it
    pub fn open(config: &SerialConfig) -> anyhow::Result<Self> {
        Ok(Self::new(SerialTransport::open(config)?))
    }
}

impl<T: Transport> SbmsClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Run one polling cycle, returning the number of measurements published
    pub fn poll<S: Sink + ?Sized>(&mut self, sink: &mut S) -> anyhow::Result<usize> {
        for message_type in MessageType::ALL {
            self.request_data(message_type)?;
        }

        let Some(rsp) = self.read_available()? else {
            return Ok(0);
        };

        let mut published = 0;
        for measurement in decode(&rsp) {
            debug!("Decoded {measurement:?}");
            measurement.publish(sink);
            published += 1;
        }
        Ok(published)
    }

    fn request_data(&mut self, message_type: MessageType) -> anyhow::Result<()> {
        let rq = build_request(message_type);
        trace!("TX: {}", hex::encode(rq));

        self.transport
            .write(&rq)
            .with_context(|| format!("Failed to send {message_type:?} request"))?;
        self.transport
            .flush()
            .with_context(|| format!("Failed to flush {message_type:?} request"))?;
        Ok(())
    }

    /// Read everything received so far.
    ///
    /// Nothing is read while less than a whole frame is available; those bytes
    /// stay with the transport.
    fn read_available(&mut self) -> anyhow::Result<Option<Vec<u8>>> {
        let available = self
            .transport
            .available()
            .context("Failed to query received bytes")?;
        if available < FRAME_SIZE {
            debug!("Only {available} bytes available, skipping decode");
            return Ok(None);
        }

        let mut rsp = vec![0u8; available];
        let read = self
            .transport
            .read(&mut rsp)
            .context("Failed to read response")?;
        rsp.truncate(read);
        trace!("RX: {}", hex::encode(&rsp));

        Ok(Some(rsp))
    }
}
