/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema definitions for BOE messages.
//!
//! This module defines the structures that describe the binary layout of
//! a message body:
//! - [`IntWidth`]: Byte width of integer, price, and group count fields
//! - [`TextPad`]: Padding rule of fixed-width character fields
//! - [`FieldKind`]: Wire representation of a field
//! - [`FieldDef`]: Named field with its kind
//! - [`MessageSchema`]: Ordered field list for one message type
//! - [`SchemaRegistry`]: Message type to schema lookup

use crate::error::SchemaError;
use boe_core::{MessageType, Price};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Size of the message header in bytes.
pub const HEADER_LEN: usize = 6;

/// Byte width of an integer-backed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IntWidth {
    /// One byte.
    W1,
    /// Two bytes.
    W2,
    /// Four bytes.
    W4,
    /// Eight bytes.
    W8,
}

impl IntWidth {
    /// Returns the width in bytes.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::W1 => 1,
            Self::W2 => 2,
            Self::W4 => 4,
            Self::W8 => 8,
        }
    }

    /// Largest unsigned value representable in this width.
    #[must_use]
    pub const fn max_unsigned(self) -> u64 {
        match self {
            Self::W1 => u8::MAX as u64,
            Self::W2 => u16::MAX as u64,
            Self::W4 => u32::MAX as u64,
            Self::W8 => u64::MAX,
        }
    }

    /// Smallest signed value representable in this width.
    #[must_use]
    pub const fn min_signed(self) -> i64 {
        match self {
            Self::W1 => i8::MIN as i64,
            Self::W2 => i16::MIN as i64,
            Self::W4 => i32::MIN as i64,
            Self::W8 => i64::MIN,
        }
    }

    /// Largest signed value representable in this width.
    #[must_use]
    pub const fn max_signed(self) -> i64 {
        match self {
            Self::W1 => i8::MAX as i64,
            Self::W2 => i16::MAX as i64,
            Self::W4 => i32::MAX as i64,
            Self::W8 => i64::MAX,
        }
    }
}

/// Padding rule of a fixed-width character field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TextPad {
    /// Value first, pad bytes after it.
    Right(u8),
    /// Pad bytes first, value after them.
    Left(u8),
}

impl TextPad {
    /// Returns the pad byte.
    #[inline]
    #[must_use]
    pub const fn byte(self) -> u8 {
        match self {
            Self::Right(b) | Self::Left(b) => b,
        }
    }
}

impl Default for TextPad {
    fn default() -> Self {
        Self::Right(0x00)
    }
}

/// Wire representation of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Unsigned little-endian integer.
    UInt(IntWidth),
    /// Signed two's complement little-endian integer.
    Int(IntWidth),
    /// Fixed-width character field.
    Text {
        /// Width in bytes.
        width: usize,
        /// Padding rule.
        pad: TextPad,
    },
    /// Fixed-point decimal stored as a signed mantissa.
    Price {
        /// Mantissa width.
        width: IntWidth,
        /// Number of implied decimal digits.
        scale: u8,
    },
    /// Single-byte enumerated code.
    Code,
    /// Count-prefixed repeating group.
    Group {
        /// Width of the count field.
        count: IntWidth,
        /// Fields of each entry.
        fields: Vec<FieldDef>,
    },
}

impl FieldKind {
    /// Bytes the field occupies on the wire, or the count width for groups.
    #[must_use]
    pub const fn fixed_len(&self) -> usize {
        match self {
            Self::UInt(w) | Self::Int(w) => w.bytes(),
            Self::Text { width, .. } => *width,
            Self::Price { width, .. } => width.bytes(),
            Self::Code => 1,
            Self::Group { count, .. } => count.bytes(),
        }
    }

    /// Returns true for repeating groups.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }
}

/// Definition of one field of a message body or group entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    /// Field name.
    pub name: &'static str,
    /// Wire representation.
    pub kind: FieldKind,
}

impl FieldDef {
    /// Creates a field definition.
    ///
    /// # Arguments
    /// * `name` - The field name
    /// * `kind` - The wire representation
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    /// Unsigned integer field.
    #[must_use]
    pub const fn uint(name: &'static str, width: IntWidth) -> Self {
        Self::new(name, FieldKind::UInt(width))
    }

    /// Signed integer field.
    #[must_use]
    pub const fn int(name: &'static str, width: IntWidth) -> Self {
        Self::new(name, FieldKind::Int(width))
    }

    /// Character field right-padded with NUL bytes.
    #[must_use]
    pub const fn text(name: &'static str, width: usize) -> Self {
        Self::text_padded(name, width, TextPad::Right(0x00))
    }

    /// Character field with an explicit padding rule.
    #[must_use]
    pub const fn text_padded(name: &'static str, width: usize, pad: TextPad) -> Self {
        Self::new(name, FieldKind::Text { width, pad })
    }

    /// Fixed-point decimal field.
    #[must_use]
    pub const fn price(name: &'static str, width: IntWidth, scale: u8) -> Self {
        Self::new(name, FieldKind::Price { width, scale })
    }

    /// Single-byte enumerated code field.
    #[must_use]
    pub const fn code(name: &'static str) -> Self {
        Self::new(name, FieldKind::Code)
    }

    /// Repeating group with a count field of the given width.
    #[must_use]
    pub const fn group(name: &'static str, count: IntWidth, fields: Vec<FieldDef>) -> Self {
        Self::new(name, FieldKind::Group { count, fields })
    }
}

/// Ordered field layout of one message type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSchema {
    /// Message type the schema describes.
    pub message_type: MessageType,
    /// Message name.
    pub name: &'static str,
    /// Body fields in wire order.
    pub fields: Vec<FieldDef>,
}

impl MessageSchema {
    /// Creates a schema.
    ///
    /// # Arguments
    /// * `message_type` - The message type identifier
    /// * `name` - The message name
    /// * `fields` - Body fields in wire order
    #[must_use]
    pub fn new(message_type: MessageType, name: &'static str, fields: Vec<FieldDef>) -> Self {
        Self {
            message_type,
            name,
            fields,
        }
    }

    /// Smallest encoded size including the header, with every group empty.
    #[must_use]
    pub fn min_len(&self) -> usize {
        HEADER_LEN
            + self
                .fields
                .iter()
                .map(|f| f.kind.fixed_len())
                .sum::<usize>()
    }

    /// Returns true if the body has no repeating group, so every encoding
    /// has the same size.
    #[must_use]
    pub fn is_fixed_size(&self) -> bool {
        !self.fields.iter().any(|f| f.kind.is_group())
    }

    /// Gets a top-level field definition by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks that every field, nested ones included, can be encoded and
    /// decoded.
    ///
    /// # Errors
    /// Returns `SchemaError::PriceScale` for a price scale above
    /// [`Price::MAX_SCALE`] and `SchemaError::ZeroWidthGroup` for a group
    /// whose entries occupy no bytes.
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_fields(self.message_type, &self.fields)
    }
}

fn validate_fields(message_type: MessageType, defs: &[FieldDef]) -> Result<(), SchemaError> {
    for def in defs {
        match &def.kind {
            FieldKind::Price { scale, .. } if *scale > Price::MAX_SCALE => {
                return Err(SchemaError::PriceScale {
                    message_type,
                    field: def.name,
                    scale: *scale,
                    max_scale: Price::MAX_SCALE,
                });
            }
            FieldKind::Group { fields, .. } => {
                if fields.iter().map(|f| f.kind.fixed_len()).sum::<usize>() == 0 {
                    return Err(SchemaError::ZeroWidthGroup {
                        message_type,
                        group: def.name,
                    });
                }
                validate_fields(message_type, fields)?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Lookup table from message type to schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<MessageType, MessageSchema>,
}

static BUILTIN: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::builtin);

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in message schema.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for schema in crate::builtin::schemas() {
            registry.schemas.insert(schema.message_type, schema);
        }
        registry
    }

    /// Returns the process-wide registry of built-in schemas.
    ///
    /// The registry is built on first use and never changes afterwards.
    #[must_use]
    pub fn global() -> &'static Self {
        &BUILTIN
    }

    /// Adds a schema, returning the one it replaced.
    ///
    /// # Errors
    /// Returns the [`MessageSchema::validate`] failure; the registry is left
    /// unchanged.
    pub fn register(
        &mut self,
        schema: MessageSchema,
    ) -> Result<Option<MessageSchema>, SchemaError> {
        schema.validate()?;
        Ok(self.schemas.insert(schema.message_type, schema))
    }

    /// Gets the schema for a message type.
    #[must_use]
    pub fn get(&self, message_type: MessageType) -> Option<&MessageSchema> {
        self.schemas.get(&message_type)
    }

    /// Returns true if a schema is registered for the message type.
    #[must_use]
    pub fn contains(&self, message_type: MessageType) -> bool {
        self.schemas.contains_key(&message_type)
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if no schema is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Returns an iterator over all registered schemas.
    pub fn schemas(&self) -> impl Iterator<Item = &MessageSchema> {
        self.schemas.values()
    }
}
