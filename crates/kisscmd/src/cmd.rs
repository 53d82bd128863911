use std::time::Duration;

use clap::Args;
use kisscmd_tnc::{Exchange, ExchangeConfig, TncCommand};
use tracing::debug;

use crate::exit::{tnc_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_outcome, OutputFormat};

#[derive(Args, Debug)]
pub struct ExchangeArgs {
    /// Serial device the TNC is attached to (e.g. /dev/ttyACM0).
    pub device: String,
    /// Serial baud rate.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub baud: u32,
    /// Command name, case-insensitive (see table below).
    pub command: String,
    /// Value for commands that take one.
    #[arg(allow_negative_numbers = true)]
    pub value: Option<String>,
    /// Maximum time to wait for a reply (e.g. 2s, 500ms).
    #[arg(long, default_value = "2s")]
    pub reply_timeout: String,
}

/// Validate the command, then run one exchange against the device.
///
/// The command is validated before the port is opened, so argument and
/// value errors never touch the device.
pub fn run(args: ExchangeArgs, format: OutputFormat) -> CliResult<i32> {
    let reply_timeout = parse_duration(&args.reply_timeout)?;
    let request = TncCommand::from_name(&args.command)
        .and_then(|cmd| cmd.build(args.value.as_deref()))
        .map_err(|err| tnc_error("request rejected", err))?;
    debug!(
        command = %request.command,
        description = request.command.description(),
        "built request"
    );

    let config = ExchangeConfig::new(args.baud).with_reply_timeout(reply_timeout);
    let exchange = Exchange::open(&args.device, config)
        .map_err(|err| tnc_error("unable to open serial port", err))?;
    let reply = exchange
        .run(&request)
        .map_err(|err| tnc_error("exchange failed", err))?;

    print_outcome(&request, reply.as_ref(), format);
    Ok(SUCCESS)
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    Ok(match unit {
        "ms" => Duration::from_millis(value),
        _ => Duration::from_secs(value),
    })
}
