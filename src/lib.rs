//! # fx2-hist
//!
//! Driver for FPGA boards bridged to USB through a Cypress FX2. The crate
//! speaks the board's register protocol (16-bit READ/WRITE with sequence
//! matching) and collects histogram captures from the bulk data endpoint.
//!
//! Discovery and interface setup are left to the caller: open the board, pick
//! its configuration and alternate setting, then hand the handle to a
//! [`UsbTransport`] and wrap that in a [`Device`].
//!
//! ```no_run
//! use fx2_hist::constants::{FX2_PID, FX2_VID};
//! use fx2_hist::{Device, UsbTransport};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut handle = rusb::open_device_with_vid_pid(FX2_VID, FX2_PID).ok_or("board not found")?;
//!     handle.set_active_configuration(1)?;
//!     handle.claim_interface(0)?;
//!     handle.set_alternate_setting(0, 1)?;
//!
//!     let mut device = Device::new(UsbTransport::new(handle));
//!     device.clear_bus();
//!
//!     device.write_register(0x0010, 0x00ff)?;
//!     let value = device.read_register(0x0010)?;
//!     println!("READ address(0x0010) = {value:#06x}");
//!
//!     let histogram = device.read_histogram()?;
//!     println!(
//!         "{} bins, {} events, dead time {:.6}s",
//!         histogram.bins.len(),
//!         histogram.num_events,
//!         histogram.dead_time
//!     );
//!     Ok(())
//! }
//! ```
//!
//! Any [`Transport`] works in place of [`UsbTransport`], which keeps the
//! protocol testable without hardware.
pub mod constants;

mod config;
mod device;
mod error;
mod frame;
mod histogram;
mod transport;
mod usb;

pub use config::Config;
pub use device::Device;
pub use error::{Error, Result};
pub use frame::{
    Opcode, RegisterAddress, RegisterValue, Sequence, decode_read_response,
    decode_write_response, encode_read, encode_write,
};
pub use histogram::HistogramBlock;
pub use transport::{Endpoint, Transport};
pub use usb::UsbTransport;
