use crate::transport::{Endpoint, Transport};
use log::trace;
use rusb::{DeviceHandle, UsbContext};
use std::time::Duration;

const WRITE_TIMEOUT: Duration = Duration::from_millis(1_000);

/// [`Transport`] over an opened `rusb` handle using bulk transfers.
///
/// The handle must already have its configuration, interface and alternate
/// setting selected; this type only moves bytes.
pub struct UsbTransport<T: UsbContext> {
    handle: DeviceHandle<T>,
}

impl<T: UsbContext> UsbTransport<T> {
    pub fn new(handle: DeviceHandle<T>) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &DeviceHandle<T> {
        &self.handle
    }

    pub fn into_handle(self) -> DeviceHandle<T> {
        self.handle
    }
}

impl<T: UsbContext> Transport for UsbTransport<T> {
    fn write(&mut self, endpoint: Endpoint, data: &[u8]) -> Result<(), rusb::Error> {
        bulk_write(&self.handle, endpoint, data)
    }

    fn read(
        &mut self,
        endpoint: Endpoint,
        max_len: usize,
        timeout: Duration,
    ) -> Result<Vec<u8>, rusb::Error> {
        let mut buffer = vec![0u8; max_len];
        let bytes_read = self
            .handle
            .read_bulk(endpoint.address(), &mut buffer, timeout)?;
        buffer.truncate(bytes_read);
        trace!("{endpoint:?}: read {bytes_read} bytes");
        Ok(buffer)
    }
}

fn bulk_write<T: UsbContext>(
    handle: &DeviceHandle<T>,
    endpoint: Endpoint,
    buffer: &[u8],
) -> Result<(), rusb::Error> {
    let mut offset = 0;
    while offset < buffer.len() {
        let chunk = &buffer[offset..];
        let bytes_written = handle.write_bulk(endpoint.address(), chunk, WRITE_TIMEOUT)?;

        if bytes_written == 0 {
            return Err(rusb::Error::Io);
        }

        offset += bytes_written;
    }
    trace!("{endpoint:?}: wrote {} bytes", buffer.len());
    Ok(())
}
