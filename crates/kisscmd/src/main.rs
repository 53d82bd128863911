mod cmd;
mod exit;
mod logging;
mod output;
mod usage;

use clap::{CommandFactory, FromArgMatches, Parser};

use crate::cmd::ExchangeArgs;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "kisscmd",
    version,
    about = "Send a command to a KISS TNC over a serial port",
    arg_required_else_help = true
)]
struct Cli {
    /// Reply output format (stdout).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: OutputFormat,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", env = "KISSCMD_LOG_LEVEL")]
    log_level: LogLevel,

    #[command(flatten)]
    exchange: ExchangeArgs,
}

fn main() {
    let matches = Cli::command()
        .after_help(usage::command_table())
        .get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    init_logging(cli.log_format, cli.log_level);

    match cmd::run(cli.exchange, cli.format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
