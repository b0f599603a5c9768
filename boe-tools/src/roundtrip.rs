/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Timed decode and re-encode of a single payload.

use boe::prelude::{Cursor, DecodeError, Decoder, EncodeError, Encoder, Message, MessageType};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors raised by a round trip.
#[derive(Debug, Error)]
pub enum RoundTripError {
    /// The payload could not be decoded.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The decoded message could not be re-encoded.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// The payload holds a different message type than requested.
    #[error("payload is {actual}, expected {expected}")]
    TypeMismatch {
        /// Requested message type.
        expected: MessageType,
        /// Message type found in the payload.
        actual: MessageType,
    },
}

/// Result of decoding and re-encoding one payload.
#[derive(Debug, Clone)]
pub struct RoundTrip {
    /// The decoded message.
    pub message: Message,
    /// The re-encoded bytes.
    pub encoded: Vec<u8>,
    /// Time spent decoding.
    pub decode_time: Duration,
    /// Time spent encoding.
    pub encode_time: Duration,
}

/// Decodes `payload`, checks its type, and encodes it again.
///
/// The encode buffer is sized like the input, so a payload that decodes to
/// a larger message fails with `EncodeError::BufferTooSmall`.
///
/// # Arguments
/// * `expected` - Message type the payload should hold
/// * `payload` - Raw message bytes
///
/// # Errors
/// Returns `RoundTripError` if decoding or encoding fails or the message
/// type differs from `expected`.
pub fn run(expected: MessageType, payload: &[u8]) -> Result<RoundTrip, RoundTripError> {
    let started = Instant::now();
    let message = Decoder::new().decode_slice(payload)?;
    let decode_time = started.elapsed();

    let actual = message.message_type();
    if actual != expected {
        return Err(RoundTripError::TypeMismatch { expected, actual });
    }

    let mut cursor = Cursor::new(vec![0u8; payload.len()]);
    let started = Instant::now();
    let written = Encoder::new().encode(&mut cursor, &message)?;
    let encode_time = started.elapsed();

    let mut encoded = cursor.into_inner();
    encoded.truncate(written);

    Ok(RoundTrip {
        message,
        encoded,
        decode_time,
        encode_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::read_hex_payload;
    use crate::report::compare;
    use std::path::Path;

    fn sample(name: &str) -> Vec<u8> {
        read_hex_payload(Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)).unwrap()
    }

    #[test]
    fn test_login_request_sample() {
        let payload = sample("login_request.hex");
        let rt = run(MessageType::LoginRequest, &payload).unwrap();
        let Message::LoginRequest(login) = &rt.message else {
            panic!("unexpected message {:?}", rt.message);
        };
        assert_eq!(login.username, "TRADER1");
        assert_eq!(login.password, "secret");
        assert!(compare(&payload, &rt.encoded).is_match());
    }

    #[test]
    fn test_new_order_cross_sample() {
        let payload = sample("new_order_cross.hex");
        let rt = run(MessageType::NewOrderCross, &payload).unwrap();
        let Message::NewOrderCross(cross) = &rt.message else {
            panic!("unexpected message {:?}", rt.message);
        };
        assert_eq!(cross.allocations.len(), 2);
        assert_eq!(cross.allocations[1].clearing_account, "AC22");
        assert_eq!(rt.encoded, payload);
    }

    #[test]
    fn test_type_mismatch() {
        let payload = sample("login_request.hex");
        assert!(matches!(
            run(MessageType::NewOrder, &payload),
            Err(RoundTripError::TypeMismatch {
                expected: MessageType::NewOrder,
                actual: MessageType::LoginRequest
            })
        ));
    }

    #[test]
    fn test_trailing_bytes_show_as_mismatch() {
        let mut payload = sample("login_request.hex");
        payload.extend_from_slice(&[0, 0]);
        let rt = run(MessageType::LoginRequest, &payload).unwrap();
        assert_eq!(rt.encoded.len(), 46);
        assert_eq!(compare(&payload, &rt.encoded).first_mismatch, Some(46));
    }

    #[test]
    fn test_truncated_payload() {
        let payload = sample("login_request.hex");
        assert!(matches!(
            run(MessageType::LoginRequest, &payload[..40]),
            Err(RoundTripError::Decode(DecodeError::TruncatedMessage { .. }))
        ));
    }
}
