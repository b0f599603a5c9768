/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the BOE binary codec.
//!
//! Decoding and encoding each have their own error enum so callers can match
//! on the direction that failed. [`BoeError`] unifies both for code that does
//! not care, and [`BufferOverrun`] is the low-level cursor failure that the
//! codecs translate into a direction-specific error.

use crate::types::MessageType;
use thiserror::Error;

/// Result type alias using [`BoeError`] as the error type.
pub type Result<T> = std::result::Result<T, BoeError>;

/// Top-level error type for all BOE codec operations.
#[derive(Debug, Error)]
pub enum BoeError {
    /// Error during message decoding.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error during message encoding.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// I/O error from the surrounding reader or writer.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A cursor was asked to move past its limit.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("buffer overrun: {requested} bytes requested at position {position}, limit {limit}")]
pub struct BufferOverrun {
    /// Cursor position when the request was made.
    pub position: usize,
    /// Number of bytes requested.
    pub requested: usize,
    /// Cursor limit.
    pub limit: usize,
}

impl BufferOverrun {
    /// Number of bytes that were available when the request failed.
    #[must_use]
    pub const fn available(&self) -> usize {
        self.limit.saturating_sub(self.position)
    }
}

/// Failure raised by a handler hook.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", describe_validation(.field, .reason))]
pub struct ValidationError {
    /// Field that failed validation, if the failure is field-specific.
    pub field: Option<&'static str>,
    /// Human-readable reason.
    pub reason: String,
}

fn describe_validation(field: &Option<&'static str>, reason: &str) -> String {
    match field {
        Some(field) => format!("{field}: {reason}"),
        None => reason.to_string(),
    }
}

impl ValidationError {
    /// Creates a message-level validation error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            field: None,
            reason: reason.into(),
        }
    }

    /// Creates a validation error tied to a field.
    #[must_use]
    pub fn for_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            reason: reason.into(),
        }
    }
}

/// Errors that occur while decoding a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The header names a message type with no registered schema.
    #[error("unknown message type: {0}")]
    UnknownMessageType(u16),

    /// The buffer holds fewer bytes than the message requires.
    #[error("truncated message: need {needed} bytes, have {available}")]
    TruncatedMessage {
        /// Bytes needed to finish the read that failed.
        needed: usize,
        /// Bytes that were available.
        available: usize,
    },

    /// The header length disagrees with the length derived from the schema.
    #[error("length mismatch: header declares {declared} bytes, structure has {actual}")]
    LengthMismatch {
        /// Length declared in the header.
        declared: usize,
        /// Length derived from the decoded structure.
        actual: usize,
    },

    /// The header declares a message larger than the configured maximum.
    #[error("message too large: {size} bytes exceeds maximum {max_size}")]
    MessageTooLarge {
        /// Declared size in bytes.
        size: usize,
        /// Maximum allowed size in bytes.
        max_size: usize,
    },

    /// A character field holds bytes that are not valid UTF-8.
    #[error("invalid utf-8 in field {field}")]
    InvalidUtf8 {
        /// Field name.
        field: &'static str,
    },

    /// An enumerated field holds a code with no matching variant.
    #[error("invalid value {value:#04x} for enumerated field {field}")]
    InvalidEnumValue {
        /// Field name.
        field: &'static str,
        /// The raw code byte.
        value: u8,
    },

    /// The decoded record does not have the shape the typed message expects.
    #[error("schema mismatch for {message_type} at field {field}")]
    SchemaMismatch {
        /// Message being built.
        message_type: MessageType,
        /// Field where the mismatch was found.
        field: &'static str,
    },

    /// A handler rejected the message.
    #[error("validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

impl From<BufferOverrun> for DecodeError {
    fn from(err: BufferOverrun) -> Self {
        Self::TruncatedMessage {
            needed: err.requested,
            available: err.available(),
        }
    }
}

/// Errors that occur while encoding a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A character value is longer than its field.
    #[error("field value too long for {field}: {length} exceeds max {max_length}")]
    FieldTooLong {
        /// Field name.
        field: &'static str,
        /// Length of the value in bytes.
        length: usize,
        /// Width of the field.
        max_length: usize,
    },

    /// A repeating group has more entries than its count field can represent.
    #[error("group {group} too large: {count} entries exceeds max {max_count}")]
    GroupTooLarge {
        /// Group name.
        group: &'static str,
        /// Number of entries in the group.
        count: usize,
        /// Largest count the field can hold.
        max_count: u64,
    },

    /// The destination cannot hold the encoded message.
    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes needed.
        needed: usize,
        /// Bytes available.
        available: usize,
    },

    /// An integer does not fit the width of its field.
    #[error("value {value} out of range for {field} ({width} bytes)")]
    ValueOutOfRange {
        /// Field name.
        field: &'static str,
        /// The offending value.
        value: i128,
        /// Field width in bytes.
        width: usize,
    },

    /// A value cannot be written to its field for another reason.
    #[error("invalid field value for {field}: {reason}")]
    InvalidFieldValue {
        /// Field name.
        field: &'static str,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// The encoded message exceeds the configured maximum size.
    #[error("message too large: {size} bytes exceeds maximum {max_size}")]
    MessageTooLarge {
        /// Encoded size in bytes.
        size: usize,
        /// Maximum allowed size in bytes.
        max_size: usize,
    },

    /// No schema is registered for the message type.
    #[error("no schema registered for {0}")]
    UnregisteredMessageType(MessageType),

    /// The message record does not have the shape its schema describes.
    #[error("schema mismatch for {message_type} at field {field}")]
    SchemaMismatch {
        /// Message being encoded.
        message_type: MessageType,
        /// Field where the mismatch was found.
        field: &'static str,
    },

    /// A handler rejected the message.
    #[error("validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

impl From<BufferOverrun> for EncodeError {
    fn from(err: BufferOverrun) -> Self {
        Self::BufferTooSmall {
            needed: err.requested,
            available: err.available(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::LengthMismatch {
            declared: 40,
            actual: 46,
        };
        assert_eq!(
            err.to_string(),
            "length mismatch: header declares 40 bytes, structure has 46"
        );
    }

    #[test]
    fn test_overrun_into_truncated() {
        let overrun = BufferOverrun {
            position: 10,
            requested: 20,
            limit: 16,
        };
        let err: DecodeError = overrun.into();
        assert_eq!(
            err,
            DecodeError::TruncatedMessage {
                needed: 20,
                available: 6
            }
        );
    }

    #[test]
    fn test_overrun_into_buffer_too_small() {
        let overrun = BufferOverrun {
            position: 4,
            requested: 8,
            limit: 6,
        };
        let err: EncodeError = overrun.into();
        assert_eq!(
            err,
            EncodeError::BufferTooSmall {
                needed: 8,
                available: 2
            }
        );
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::for_field("order_qty", "must be positive").to_string(),
            "order_qty: must be positive"
        );
        assert_eq!(ValidationError::new("rejected").to_string(), "rejected");
    }

    #[test]
    fn test_boe_error_from_encode() {
        let err: BoeError = EncodeError::UnregisteredMessageType(MessageType::NewOrder).into();
        assert!(matches!(
            err,
            BoeError::Encode(EncodeError::UnregisteredMessageType(MessageType::NewOrder))
        ));
    }
}
