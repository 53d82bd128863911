//! TNC command table and one-shot request/response exchange.
//!
//! This is the layer the CLI talks to. Look a command up by name, build its
//! payload from the user's value, then hand it to an [`Exchange`] that owns
//! the serial link for exactly one send and optional reply.

pub mod command;
pub mod error;
pub mod exchange;

pub use command::{Request, TncCommand, ValueArity, SERIAL_NUMBER_LEN};
pub use error::{Result, TncError};
pub use exchange::{frame_time, Exchange, ExchangeConfig, Reply};
