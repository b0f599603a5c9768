/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Hex payload files.
//!
//! A payload file holds one message as hexadecimal text. Whitespace and line
//! breaks are ignored, so long payloads can be wrapped.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The file could not be read.
    #[error("cannot open payload file {}: {source}", path.display())]
    Io {
        /// Path of the payload file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The payload has an odd number of hex digits.
    #[error("payload has an odd number of hex characters ({0})")]
    OddLength(usize),

    /// The payload contains a character that is not a hex digit.
    #[error("invalid hex payload: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Parses hexadecimal text into bytes, ignoring whitespace.
///
/// # Errors
/// Returns `PayloadError::OddLength` or `PayloadError::Hex` for malformed text.
pub fn parse_hex_payload(text: &str) -> Result<Vec<u8>, PayloadError> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(PayloadError::OddLength(digits.len()));
    }
    Ok(hex::decode(digits)?)
}

/// Reads a hex payload file.
///
/// # Arguments
/// * `path` - Path of the payload file
///
/// # Errors
/// Returns `PayloadError::Io` if the file cannot be read, or a parse error.
pub fn read_hex_payload(path: impl AsRef<Path>) -> Result<Vec<u8>, PayloadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PayloadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_hex_payload(&text)
}
