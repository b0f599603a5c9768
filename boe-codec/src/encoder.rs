/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! BOE message encoder.
//!
//! This module provides encoding of typed [`Message`] values into the binary
//! BOE layout described by the registered schema of the message type.

use crate::config::CodecConfig;
use crate::cursor::Cursor;
use crate::field::encode_field;
use crate::handler::{Handler, NoOpHandler};
use crate::header::Header;
use boe_core::{EncodeError, FieldValue, Message, MessageType};
use boe_schema::{FieldDef, FieldKind, MessageSchema, SchemaRegistry};
use bytes::{Bytes, BytesMut};

/// BOE message encoder.
///
/// The encoder computes the full message size up front, writes a placeholder
/// header, walks the schema, and back-patches the header length.
#[derive(Debug)]
pub struct Encoder<'s, H = NoOpHandler> {
    schemas: &'s SchemaRegistry,
    handler: H,
    config: CodecConfig,
}

impl Encoder<'static> {
    /// Creates an encoder over the built-in schemas with a no-op handler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: SchemaRegistry::global(),
            handler: NoOpHandler,
            config: CodecConfig::default(),
        }
    }
}

impl Default for Encoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, H: Handler> Encoder<'s, H> {
    /// Replaces the handler.
    ///
    /// # Arguments
    /// * `handler` - Hooks invoked before encoding
    #[must_use]
    pub fn with_handler<H2: Handler>(self, handler: H2) -> Encoder<'s, H2> {
        Encoder {
            schemas: self.schemas,
            handler,
            config: self.config,
        }
    }

    /// Encodes against another schema registry.
    #[must_use]
    pub fn with_registry<'r>(self, schemas: &'r SchemaRegistry) -> Encoder<'r, H> {
        Encoder {
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

    /// Consumes the encoder, returning the handler.
    #[must_use]
    pub fn into_handler(self) -> H {
        self.handler
    }

    fn schema(&self, message_type: MessageType) -> Result<&'s MessageSchema, EncodeError> {
        self.schemas
            .get(message_type)
            .ok_or(EncodeError::UnregisteredMessageType(message_type))
    }

    /// Computes the encoded size of a message, header included.
    ///
    /// # Errors
    /// Returns `EncodeError::UnregisteredMessageType` if no schema is
    /// registered, or `EncodeError::SchemaMismatch` if the message shape
    /// disagrees with its schema.
    pub fn encoded_len(&self, message: &Message) -> Result<usize, EncodeError> {
        let schema = self.schema(message.message_type())?;
        let body = measure(schema.message_type, &schema.fields, &message.to_record())?;
        Ok(Header::LEN + body)
    }

    /// Encodes a message at the cursor position.
    ///
    /// On failure the cursor is moved back to where it started and any bytes
    /// already written must be discarded.
    ///
    /// # Arguments
    /// * `cursor` - Cursor over the destination buffer
    /// * `message` - The message to encode
    ///
    /// # Returns
    /// The number of bytes written.
    ///
    /// # Errors
    /// Returns `EncodeError::BufferTooSmall` if the cursor cannot hold the
    /// message, `EncodeError::MessageTooLarge` if it exceeds the configured
    /// maximum, and passes through field, schema, and handler failures.
    pub fn encode<B: AsMut<[u8]>>(
        &mut self,
        cursor: &mut Cursor<B>,
        message: &Message,
    ) -> Result<usize, EncodeError> {
        let start = cursor.position();
        let result = self.encode_at(cursor, message);
        if result.is_err() {
            cursor.set_position(start)?;
        }
        result
    }

    /// Encodes a message into a newly allocated vector.
    ///
    /// # Errors
    /// Same as [`Encoder::encode`].
    pub fn encode_to_vec(&mut self, message: &Message) -> Result<Vec<u8>, EncodeError> {
        let len = self.encoded_len(message)?;
        let mut cursor = Cursor::new(vec![0u8; len]);
        self.encode(&mut cursor, message)?;
        Ok(cursor.into_inner())
    }

    /// Encodes a message into an immutable `Bytes` buffer.
    ///
    /// # Errors
    /// Same as [`Encoder::encode`].
    pub fn encode_to_bytes(&mut self, message: &Message) -> Result<Bytes, EncodeError> {
        let len = self.encoded_len(message)?;
        let mut cursor = Cursor::new(BytesMut::zeroed(len));
        self.encode(&mut cursor, message)?;
        Ok(cursor.into_inner().freeze())
    }

    fn encode_at<B: AsMut<[u8]>>(
        &mut self,
        cursor: &mut Cursor<B>,
        message: &Message,
    ) -> Result<usize, EncodeError> {
        self.handler.on_before_encode(message)?;

        let schema = self.schema(message.message_type())?;
        let record = message.to_record();
        let total = Header::LEN + measure(schema.message_type, &schema.fields, &record)?;

        let max_size = self.config.max_message_len.min(u32::MAX as usize);
        if total > max_size {
            return Err(EncodeError::MessageTooLarge {
                size: total,
                max_size,
            });
        }
        if total > cursor.remaining() {
            return Err(EncodeError::BufferTooSmall {
                needed: total,
                available: cursor.remaining(),
            });
        }

        let start = cursor.position();
        Header {
            length: 0,
            message_type: schema.message_type.as_u16(),
        }
        .encode(cursor)?;
        encode_fields(&schema.fields, &record, cursor)?;

        let written = cursor.position() - start;
        cursor.patch(start, &(written as u32).to_le_bytes())?;
        Ok(written)
    }
}

/// Body size of `values` laid out by `defs`, checking the record shape.
fn measure(
    message_type: MessageType,
    defs: &[FieldDef],
    values: &[FieldValue],
) -> Result<usize, EncodeError> {
    if values.len() != defs.len() {
        return Err(EncodeError::SchemaMismatch {
            message_type,
            field: defs.get(values.len()).map_or("<trailing>", |d| d.name),
        });
    }

    let mut len = 0;
    for (def, value) in defs.iter().zip(values) {
        len += def.kind.fixed_len();
        if let (FieldKind::Group { fields, .. }, FieldValue::Group(entries)) = (&def.kind, value) {
            for entry in entries {
                len += measure(message_type, fields, entry)?;
            }
        }
    }
    Ok(len)
}

fn encode_fields<B: AsMut<[u8]>>(
    defs: &[FieldDef],
    values: &[FieldValue],
    cursor: &mut Cursor<B>,
) -> Result<(), EncodeError> {
    for (def, value) in defs.iter().zip(values) {
        encode_field(def, value, cursor)?;
        if let (FieldKind::Group { fields, .. }, FieldValue::Group(entries)) = (&def.kind, value) {
            for entry in entries {
                encode_fields(fields, entry, cursor)?;
            }
        }
    }
    Ok(())
}
