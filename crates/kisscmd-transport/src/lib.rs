//! Serial link transport for KISS TNCs.
//!
//! This is the lowest layer of kisscmd. It opens the serial device with the
//! fixed 8N1, no-flow-control line settings TNCs expect, and hands back a
//! [`SerialLink`] that implements `Read + Write` and closes the port when
//! dropped.

pub mod error;
pub mod serial;

pub use error::{Result, TransportError};
pub use serial::{SerialConfig, SerialLink, DEFAULT_READ_TIMEOUT};
