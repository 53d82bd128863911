//! The TNC command table.
//!
//! Each command carries its opcode bytes, the shape of the value it takes and
//! whether the TNC answers it. Opcodes are the NinoTNC `SetHardware`
//! sub-commands; the first byte doubles as the KISS command byte.

use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::error::{Result, TncError};

/// Length of a TNC serial number in ASCII characters.
pub const SERIAL_NUMBER_LEN: usize = 8;

/// What a command appends after its opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueArity {
    /// Nothing.
    None,
    /// A single `0` byte, ignoring any value.
    Placeholder,
    /// Exactly this many ASCII characters, taken verbatim.
    FixedAscii(usize),
    /// One integer in `0..=255`.
    Byte,
    /// This many zero bytes, ignoring any value.
    ZeroFill(usize),
}

impl ValueArity {
    /// Whether the user must supply a value.
    pub fn takes_value(self) -> bool {
        matches!(self, ValueArity::FixedAscii(_) | ValueArity::Byte)
    }
}

/// A command understood by the TNC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TncCommand {
    ClearSerialNumber,
    SetSerialNumber,
    GetSerialNumber,
    SetBeaconInterval,
    GetVersion,
    StopTransmit,
    GetAll,
    SetPersist,
    SetSlotTime,
    SetTxDelay,
    SetTxTail,
    SetHardware,
}

impl TncCommand {
    /// Every command, in usage order.
    pub const ALL: [TncCommand; 12] = [
        TncCommand::ClearSerialNumber,
        TncCommand::SetSerialNumber,
        TncCommand::GetSerialNumber,
        TncCommand::SetBeaconInterval,
        TncCommand::GetVersion,
        TncCommand::StopTransmit,
        TncCommand::GetAll,
        TncCommand::SetPersist,
        TncCommand::SetSlotTime,
        TncCommand::SetTxDelay,
        TncCommand::SetTxTail,
        TncCommand::SetHardware,
    ];

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            TncCommand::ClearSerialNumber => "CLRSERNO",
            TncCommand::SetSerialNumber => "SETSERNO",
            TncCommand::GetSerialNumber => "GETSERNO",
            TncCommand::SetBeaconInterval => "SETBCNINT",
            TncCommand::GetVersion => "GETVER",
            TncCommand::StopTransmit => "STOPTX",
            TncCommand::GetAll => "GETALL",
            TncCommand::SetPersist => "SETPERSIST",
            TncCommand::SetSlotTime => "SETSLOT",
            TncCommand::SetTxDelay => "SETTXD",
            TncCommand::SetTxTail => "SETTXTAIL",
            TncCommand::SetHardware => "SETHW",
        }
    }

    /// Opcode bytes that start the payload.
    pub fn opcode(self) -> &'static [u8] {
        match self {
            TncCommand::ClearSerialNumber | TncCommand::SetSerialNumber => &[0x0A],
            TncCommand::GetSerialNumber => &[0x0E],
            TncCommand::SetBeaconInterval => &[0x09, 0xF0],
            TncCommand::GetVersion => &[0x08],
            TncCommand::StopTransmit => &[0x09, 0x00],
            TncCommand::GetAll => &[0x0B],
            TncCommand::SetPersist => &[0x02],
            TncCommand::SetSlotTime => &[0x03],
            TncCommand::SetTxDelay => &[0x01],
            TncCommand::SetTxTail => &[0x04],
            TncCommand::SetHardware => &[0x06],
        }
    }

    /// Value shape appended after the opcode.
    pub fn arity(self) -> ValueArity {
        match self {
            TncCommand::ClearSerialNumber => ValueArity::ZeroFill(SERIAL_NUMBER_LEN),
            TncCommand::SetSerialNumber => ValueArity::FixedAscii(SERIAL_NUMBER_LEN),
            TncCommand::GetSerialNumber | TncCommand::GetVersion | TncCommand::GetAll => {
                ValueArity::Placeholder
            }
            TncCommand::StopTransmit => ValueArity::None,
            TncCommand::SetBeaconInterval
            | TncCommand::SetPersist
            | TncCommand::SetSlotTime
            | TncCommand::SetTxDelay
            | TncCommand::SetTxTail
            | TncCommand::SetHardware => ValueArity::Byte,
        }
    }

    /// Whether the TNC answers with one frame.
    pub fn expects_reply(self) -> bool {
        matches!(
            self,
            TncCommand::GetSerialNumber | TncCommand::GetVersion | TncCommand::GetAll
        )
    }

    /// One-line description for usage text.
    pub fn description(self) -> &'static str {
        match self {
            TncCommand::ClearSerialNumber => {
                "Erases the stored TNC serial number. Perform before SETSERNO."
            }
            TncCommand::SetSerialNumber => {
                "Sets the TNC serial number, value is 8 ASCII characters."
            }
            TncCommand::GetSerialNumber => "Queries and displays the TNC serial number.",
            TncCommand::SetBeaconInterval => {
                "Sets the beacon interval, value is minutes 0 to 255. 0 disables."
            }
            TncCommand::GetVersion => "Queries and displays the TNC firmware version.",
            TncCommand::StopTransmit => "Stop the current transmission and flush queues.",
            TncCommand::GetAll => "Dump diagnostic data.",
            TncCommand::SetPersist => "Set CSMA persistence value, 0 to 255.",
            TncCommand::SetSlotTime => "Set CSMA slot time in 10 ms units, 0 to 255.",
            TncCommand::SetTxDelay => {
                "Set TX_DELAY in 10 ms units, 0 to 255, if TX_DELAY pot set to zero."
            }
            TncCommand::SetTxTail => "Set TX_TAIL in 10 ms units, 0 to 255. Not on NinoTNC.",
            TncCommand::SetHardware => "Issue SetHardware KISS command, passing one byte.",
        }
    }

    /// Placeholder shown for the value in usage text.
    pub fn value_hint(self) -> &'static str {
        match self.arity() {
            ValueArity::FixedAscii(_) => "xxxxxxxx",
            ValueArity::Byte => "nnn",
            ValueArity::None | ValueArity::Placeholder | ValueArity::ZeroFill(_) => "",
        }
    }

    /// Look a command up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| TncError::UnknownCommand(name.to_string()))
    }

    /// Validate `value` and build the raw payload (opcode + value bytes).
    pub fn build(self, value: Option<&str>) -> Result<Request> {
        let arity = self.arity();
        let opcode = self.opcode();
        let mut payload = BytesMut::with_capacity(opcode.len() + SERIAL_NUMBER_LEN);
        payload.put_slice(opcode);

        match (arity, value) {
            (ValueArity::FixedAscii(_) | ValueArity::Byte, None) => {
                return Err(TncError::MissingValue(self));
            }
            (ValueArity::FixedAscii(len), Some(value)) => {
                if !value.is_ascii() {
                    return Err(self.invalid(value, "must be ASCII characters"));
                }
                if value.len() != len {
                    return Err(self.invalid(value, format!("must be exactly {len} characters")));
                }
                payload.put_slice(value.as_bytes());
            }
            (ValueArity::Byte, Some(value)) => payload.put_u8(self.parse_byte(value)?),
            (ValueArity::ZeroFill(len), _) => payload.put_bytes(0, len),
            (ValueArity::Placeholder, _) => payload.put_u8(0),
            (ValueArity::None, _) => {}
        }

        if let Some(value) = value.filter(|_| !arity.takes_value()) {
            debug!(command = %self, value, "ignoring value for command that takes none");
        }

        Ok(Request {
            command: self,
            payload: payload.freeze(),
            expects_reply: self.expects_reply(),
        })
    }

    fn parse_byte(self, value: &str) -> Result<u8> {
        let parsed: i64 = value
            .trim()
            .parse()
            .map_err(|_| self.invalid(value, "must be an integer"))?;
        u8::try_from(parsed).map_err(|_| self.invalid(value, "must be 0 to 255"))
    }

    fn invalid(self, value: &str, reason: impl Into<String>) -> TncError {
        TncError::InvalidValue {
            command: self,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TncCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TncCommand {
    type Err = TncError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// A validated command, ready to frame and send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The command this payload was built from.
    pub command: TncCommand,
    /// Opcode followed by value bytes, unframed.
    pub payload: Bytes,
    /// Whether to wait for one reply frame.
    pub expects_reply: bool,
}
