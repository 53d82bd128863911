//! Send configuration and query commands to a KISS TNC over a serial port.
//!
//! # Crate Structure
//!
//! - [`transport`] — Serial device transport
//! - [`frame`] — KISS framing codec and incremental decoder
//! - [`tnc`] — Command table and one-shot request/response exchange

/// Re-export transport types.
pub mod transport {
    pub use kisscmd_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use kisscmd_frame::*;
}

/// Re-export TNC command and exchange types.
pub mod tnc {
    pub use kisscmd_tnc::*;
}
