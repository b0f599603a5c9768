/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! `boe-roundtrip`: decode a hex payload, re-encode it, and compare.
//!
//! ```text
//! boe-roundtrip <message-type> <payload-file> [--json]
//! ```
//!
//! The message type is a number (`2`) or a name (`new-order-cross`).
//! Set `RUST_LOG=debug` to log the decoded message.

use anyhow::{Context, Result};
use boe::prelude::MessageType;
use boe_tools::{init_logging, payload, report, roundtrip};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(name = "boe-roundtrip")]
#[command(about = "Decode a BOE payload, re-encode it, and compare the bytes")]
struct Cli {
    /// Message type, by number or name
    message_type: MessageType,

    /// File holding the payload as hex text
    payload: PathBuf,

    /// Print the decoded message as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("Round trip failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let bytes = payload::read_hex_payload(&cli.payload)?;
    info!(
        "Loaded {} bytes from {} for {}",
        bytes.len(),
        cli.payload.display(),
        cli.message_type
    );

    let rt = roundtrip::run(cli.message_type, &bytes)
        .with_context(|| format!("payload {}", cli.payload.display()))?;
    info!("Time taken by decoder: {} us", rt.decode_time.as_micros());
    info!("Time taken by encoder: {} us", rt.encode_time.as_micros());
    debug!("Decoded message: {:?}", rt.message);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rt.message)?);
    }

    let comparison = report::compare(&bytes, &rt.encoded);
    println!("{comparison}");
    match comparison.first_mismatch {
        None => info!("Payload reproduced exactly"),
        Some(offset) => error!("Payload differs at byte {}", offset),
    }
    Ok(comparison.is_match())
}
