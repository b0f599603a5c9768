/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! BOE message decoder.
//!
//! This module provides decoding of binary BOE messages into typed
//! [`Message`] values by walking the registered schema of the message type.

use crate::config::CodecConfig;
use crate::cursor::Cursor;
use crate::field::decode_field;
use crate::handler::{Handler, NoOpHandler};
use crate::header::Header;
use boe_core::{DecodeError, FieldValue, Message, MessageType, Record};
use boe_schema::{FieldDef, FieldKind, SchemaRegistry};

/// BOE message decoder.
///
/// A decoder borrows a schema registry, owns a handler, and is reusable
/// across messages. It keeps no state between calls.
#[derive(Debug)]
pub struct Decoder<'s, H = NoOpHandler> {
    schemas: &'s SchemaRegistry,
    handler: H,
    config: CodecConfig,
}

impl Decoder<'static> {
    /// Creates a decoder over the built-in schemas with a no-op handler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: SchemaRegistry::global(),
            handler: NoOpHandler,
            config: CodecConfig::default(),
        }
    }
}

impl Default for Decoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, H: Handler> Decoder<'s, H> {
    /// Replaces the handler.
    ///
    /// # Arguments
    /// * `handler` - Hooks invoked during decoding
    #[must_use]
    pub fn with_handler<H2: Handler>(self, handler: H2) -> Decoder<'s, H2> {
        Decoder {
            schemas: self.schemas,
            handler,
            config: self.config,
        }
    }

    /// Decodes against another schema registry.
    #[must_use]
    pub fn with_registry<'r>(self, schemas: &'r SchemaRegistry) -> Decoder<'r, H> {
        Decoder {
            schemas,
            handler: self.handler,
            config: self.config,
        }
    }

    /// Sets the codec configuration.
    #[must_use]
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Returns the handler.
    #[must_use]
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// Returns the handler mutably.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consumes the decoder, returning the handler.
    #[must_use]
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Decodes one message starting at the cursor position.
    ///
    /// On success the cursor sits exactly `header.length` bytes past where it
    /// started. On failure it is moved back to where it started.
    ///
    /// # Arguments
    /// * `cursor` - Cursor positioned at a message header
    ///
    /// # Returns
    /// The decoded message.
    ///
    /// # Errors
    /// Returns `DecodeError::TruncatedMessage` if the buffer ends before the
    /// message does, `DecodeError::LengthMismatch` if the header length
    /// disagrees with the decoded structure, `DecodeError::MessageTooLarge`
    /// if the header length exceeds the configured maximum, and
    /// `DecodeError::UnknownMessageType` if no schema is registered for the
    /// message type. Field and handler failures are passed through.
    pub fn decode<B: AsRef<[u8]>>(
        &mut self,
        cursor: &mut Cursor<B>,
    ) -> Result<Message, DecodeError> {
        let start = cursor.position();
        let result = self.decode_at(cursor, start);
        if result.is_err() {
            cursor.set_position(start)?;
        }
        result
    }

    /// Decodes the message at the start of `bytes`.
    ///
    /// Bytes after the message are ignored.
    ///
    /// # Errors
    /// Same as [`Decoder::decode`].
    pub fn decode_slice(&mut self, bytes: &[u8]) -> Result<Message, DecodeError> {
        self.decode(&mut Cursor::new(bytes))
    }

    fn decode_at<B: AsRef<[u8]>>(
        &mut self,
        cursor: &mut Cursor<B>,
        start: usize,
    ) -> Result<Message, DecodeError> {
        let header = Header::decode(cursor)?;
        let declared = header.length as usize;

        if declared < Header::LEN {
            return Err(DecodeError::LengthMismatch {
                declared,
                actual: Header::LEN,
            });
        }
        if declared > self.config.max_message_len {
            return Err(DecodeError::MessageTooLarge {
                size: declared,
                max_size: self.config.max_message_len,
            });
        }
        let available = cursor.limit() - start;
        if declared > available {
            return Err(DecodeError::TruncatedMessage {
                needed: declared,
                available,
            });
        }

        let schemas = self.schemas;
        let schema = MessageType::from_u16(header.message_type)
            .and_then(|ty| schemas.get(ty))
            .ok_or(DecodeError::UnknownMessageType(header.message_type))?;

        // Body reads stop at the declared end of the message.
        let outer = cursor.set_limit(start + declared)?;
        let walked = self.decode_fields(schema.message_type, &schema.fields, cursor);
        cursor.set_limit(outer)?;
        let record = walked.map_err(|err| match err {
            DecodeError::TruncatedMessage { needed, available } => DecodeError::LengthMismatch {
                declared,
                actual: (declared - available).saturating_add(needed),
            },
            other => other,
        })?;

        let consumed = cursor.position() - start;
        if consumed < declared && self.config.validate_length {
            return Err(DecodeError::LengthMismatch {
                declared,
                actual: consumed,
            });
        }
        cursor.advance(declared - consumed)?;

        let message = Message::from_record(schema.message_type, record)?;
        self.handler.on_message_decoded(&message)?;
        Ok(message)
    }

    fn decode_fields<B: AsRef<[u8]>>(
        &mut self,
        message_type: MessageType,
        defs: &[FieldDef],
        cursor: &mut Cursor<B>,
    ) -> Result<Record, DecodeError> {
        let mut record = Record::with_capacity(defs.len());

        for def in defs {
            let value = match (&def.kind, decode_field(def, cursor)?) {
                (FieldKind::Group { fields, .. }, FieldValue::UInt(count)) => {
                    self.decode_group(message_type, fields, count, cursor)?
                }
                (_, value) => value,
            };
            self.handler.on_field_decoded(message_type, def, &value)?;
            record.push(value);
        }

        Ok(record)
    }

    fn decode_group<B: AsRef<[u8]>>(
        &mut self,
        message_type: MessageType,
        fields: &[FieldDef],
        count: u64,
        cursor: &mut Cursor<B>,
    ) -> Result<FieldValue, DecodeError> {
        let entry_len = fields.iter().map(|f| f.kind.fixed_len()).sum::<usize>();
        let available = cursor.remaining();
        let count = usize::try_from(count).ok();
        let needed = count.and_then(|n| n.checked_mul(entry_len));

        let n = match (count, needed) {
            (Some(n), Some(needed)) if needed <= available => n,
            _ => {
                return Err(DecodeError::TruncatedMessage {
                    needed: needed.unwrap_or(usize::MAX),
                    available,
                });
            }
        };

        let mut entries = Vec::with_capacity(n);
        for _ in 0..n {
            entries.push(self.decode_fields(message_type, fields, cursor)?);
        }
        Ok(FieldValue::Group(entries))
    }
}
