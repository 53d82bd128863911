use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use kisscmd_frame::{encode, to_hex};
use kisscmd_tnc::{Reply, Request};
use serde::Serialize;

#[derive(Clone, Debug, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Outgoing frame as hex, then the reply body as text if there is one.
    #[default]
    Text,
    /// One JSON object per exchange.
    Json,
    /// Reply body bytes, unmodified.
    Raw,
}

#[derive(Serialize)]
struct ExchangeOutput<'a> {
    command: &'a str,
    payload: String,
    frame: String,
    reply: Option<ReplyOutput>,
    timestamp: String,
}

#[derive(Serialize)]
struct ReplyOutput {
    tag: u8,
    text: String,
    hex: String,
}

pub fn print_outcome(request: &Request, reply: Option<&Reply>, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", render_text(request, reply)),
        OutputFormat::Json => println!("{}", render_json(request, reply)),
        OutputFormat::Raw => {
            if let Some(reply) = reply {
                print_raw(reply.body());
            }
        }
    }
}

pub fn render_text(request: &Request, reply: Option<&Reply>) -> String {
    let mut out = format!("{}\n", to_hex(&encode(&request.payload)));
    if let Some(reply) = reply {
        out.push_str(&reply.text());
        out.push('\n');
    }
    out
}

pub fn render_json(request: &Request, reply: Option<&Reply>) -> String {
    let out = ExchangeOutput {
        command: request.command.name(),
        payload: to_hex(&request.payload),
        frame: to_hex(&encode(&request.payload)),
        reply: reply.map(|reply| ReplyOutput {
            tag: reply.tag(),
            text: reply.text(),
            hex: to_hex(reply.body()),
        }),
        timestamp: now_unix_seconds(),
    };
    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
}

fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
