/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field values for BOE message bodies.
//!
//! This module provides:
//! - [`FieldValue`]: Enumeration of the values a field can hold
//! - [`Record`]: Schema-ordered sequence of field values for one body or group entry
//! - [`RecordReader`]: Typed, in-order extraction of values from a record

use crate::error::DecodeError;
use crate::types::{MessageType, Price, WireCode};
use smallvec::SmallVec;
use std::fmt;

/// Schema-ordered field values of a message body or a group entry.
pub type Record = SmallVec<[FieldValue; 8]>;

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Unsigned integer of any width.
    UInt(u64),
    /// Signed integer of any width.
    Int(i64),
    /// Character field with padding removed.
    Text(String),
    /// Fixed-point decimal.
    Price(Price),
    /// Single-byte enumerated code.
    Code(u8),
    /// Entries of a repeating group.
    Group(Vec<Record>),
}

impl FieldValue {
    /// Returns the value as a string slice if it is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an unsigned integer if it is one.
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a signed integer if it is one.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a price if it is one.
    #[must_use]
    pub const fn as_price(&self) -> Option<Price> {
        match self {
            Self::Price(p) => Some(*p),
            _ => None,
        }
    }

    /// Returns the raw code byte if the value is an enumerated code.
    #[must_use]
    pub const fn as_code(&self) -> Option<u8> {
        match self {
            Self::Code(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns the group entries if the value is a repeating group.
    #[must_use]
    pub fn as_group(&self) -> Option<&[Record]> {
        match self {
            Self::Group(entries) => Some(entries),
            _ => None,
        }
    }

    /// Short name of the value kind, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::UInt(_) => "unsigned integer",
            Self::Int(_) => "signed integer",
            Self::Text(_) => "text",
            Self::Price(_) => "price",
            Self::Code(_) => "code",
            Self::Group(_) => "group",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Price(p) => write!(f, "{p}"),
            Self::Code(c) => write!(f, "{}", *c as char),
            Self::Group(entries) => write!(f, "[{} entries]", entries.len()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Price> for FieldValue {
    fn from(value: Price) -> Self {
        Self::Price(value)
    }
}

/// Pulls values out of a [`Record`] in schema order.
///
/// Typed messages use the reader to rebuild themselves from a decoded record.
/// Every accessor names the field it expects so that a record whose shape
/// disagrees with the typed message fails with [`DecodeError::SchemaMismatch`].
#[derive(Debug)]
pub struct RecordReader {
    message_type: MessageType,
    values: smallvec::IntoIter<[FieldValue; 8]>,
}

impl RecordReader {
    /// Creates a reader over a record of the given message type.
    #[must_use]
    pub fn new(message_type: MessageType, record: Record) -> Self {
        Self {
            message_type,
            values: record.into_iter(),
        }
    }

    fn mismatch(&self, field: &'static str) -> DecodeError {
        DecodeError::SchemaMismatch {
            message_type: self.message_type,
            field,
        }
    }

    fn take(&mut self, field: &'static str) -> Result<FieldValue, DecodeError> {
        self.values.next().ok_or_else(|| self.mismatch(field))
    }

    /// Takes the next value as text.
    ///
    /// # Errors
    /// Returns `DecodeError::SchemaMismatch` if the next value is not text.
    pub fn text(&mut self, field: &'static str) -> Result<String, DecodeError> {
        match self.take(field)? {
            FieldValue::Text(s) => Ok(s),
            _ => Err(self.mismatch(field)),
        }
    }

    /// Takes the next value as an unsigned integer narrowed to `T`.
    ///
    /// # Errors
    /// Returns `DecodeError::SchemaMismatch` if the next value is not an
    /// unsigned integer or does not fit in `T`.
    pub fn uint<T: TryFrom<u64>>(&mut self, field: &'static str) -> Result<T, DecodeError> {
        match self.take(field)? {
            FieldValue::UInt(v) => T::try_from(v).map_err(|_| self.mismatch(field)),
            _ => Err(self.mismatch(field)),
        }
    }

    /// Takes the next value as a signed integer narrowed to `T`.
    ///
    /// # Errors
    /// Returns `DecodeError::SchemaMismatch` if the next value is not a
    /// signed integer or does not fit in `T`.
    pub fn int<T: TryFrom<i64>>(&mut self, field: &'static str) -> Result<T, DecodeError> {
        match self.take(field)? {
            FieldValue::Int(v) => T::try_from(v).map_err(|_| self.mismatch(field)),
            _ => Err(self.mismatch(field)),
        }
    }

    /// Takes the next value as a price.
    ///
    /// # Errors
    /// Returns `DecodeError::SchemaMismatch` if the next value is not a price.
    pub fn price(&mut self, field: &'static str) -> Result<Price, DecodeError> {
        match self.take(field)? {
            FieldValue::Price(p) => Ok(p),
            _ => Err(self.mismatch(field)),
        }
    }

    /// Takes the next value as an enumerated code.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidEnumValue` if the byte names no variant of
    /// `T`, or `DecodeError::SchemaMismatch` if the value is not a code.
    pub fn code<T: WireCode>(&mut self, field: &'static str) -> Result<T, DecodeError> {
        match self.take(field)? {
            FieldValue::Code(c) => {
                T::from_code(c).ok_or(DecodeError::InvalidEnumValue { field, value: c })
            }
            _ => Err(self.mismatch(field)),
        }
    }

    /// Takes the next value as a repeating group and converts every entry.
    ///
    /// # Errors
    /// Returns `DecodeError::SchemaMismatch` if the value is not a group, or
    /// whatever `entry` returns for a malformed entry.
    pub fn group<T, F>(&mut self, field: &'static str, mut entry: F) -> Result<Vec<T>, DecodeError>
    where
        F: FnMut(&mut RecordReader) -> Result<T, DecodeError>,
    {
        let entries = match self.take(field)? {
            FieldValue::Group(entries) => entries,
            _ => return Err(self.mismatch(field)),
        };

        let message_type = self.message_type;
        entries
            .into_iter()
            .map(|record| {
                let mut reader = RecordReader::new(message_type, record);
                let value = entry(&mut reader)?;
                reader.finish()?;
                Ok(value)
            })
            .collect()
    }

    /// Checks that every value has been consumed.
    ///
    /// # Errors
    /// Returns `DecodeError::SchemaMismatch` if values remain.
    pub fn finish(mut self) -> Result<(), DecodeError> {
        match self.values.next() {
            None => Ok(()),
            Some(_) => Err(self.mismatch("<trailing>")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use smallvec::smallvec;

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::UInt(7).as_u64(), Some(7));
        assert_eq!(FieldValue::Int(-7).as_i64(), Some(-7));
        assert_eq!(FieldValue::from("ABC").as_str(), Some("ABC"));
        assert_eq!(FieldValue::Code(b'1').as_code(), Some(b'1'));
        assert_eq!(FieldValue::UInt(7).as_str(), None);
        assert!(FieldValue::Group(vec![]).as_group().unwrap().is_empty());
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Price(Price::from_mantissa(15_000)).to_string(), "1.5000");
        assert_eq!(FieldValue::Code(b'C').to_string(), "C");
        assert_eq!(FieldValue::Group(vec![Record::new()]).to_string(), "[1 entries]");
    }

    #[test]
    fn test_record_reader_in_order() {
        let record: Record = smallvec![
            FieldValue::from("ORD1"),
            FieldValue::Code(b'2'),
            FieldValue::UInt(100),
        ];
        let mut reader = RecordReader::new(MessageType::NewOrder, record);
        assert_eq!(reader.text("cl_ord_id").unwrap(), "ORD1");
        assert_eq!(reader.code::<Side>("side").unwrap(), Side::Sell);
        assert_eq!(reader.uint::<u32>("order_qty").unwrap(), 100);
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_record_reader_mismatch() {
        let record: Record = smallvec![FieldValue::UInt(1)];
        let mut reader = RecordReader::new(MessageType::CancelOrder, record);
        assert_eq!(
            reader.text("orig_cl_ord_id"),
            Err(DecodeError::SchemaMismatch {
                message_type: MessageType::CancelOrder,
                field: "orig_cl_ord_id"
            })
        );
    }

    #[test]
    fn test_record_reader_invalid_code() {
        let record: Record = smallvec![FieldValue::Code(b'Z')];
        let mut reader = RecordReader::new(MessageType::NewOrder, record);
        assert_eq!(
            reader.code::<Side>("side"),
            Err(DecodeError::InvalidEnumValue {
                field: "side",
                value: b'Z'
            })
        );
    }

    #[test]
    fn test_record_reader_narrowing() {
        let record: Record = smallvec![FieldValue::UInt(u64::from(u32::MAX) + 1)];
        let mut reader = RecordReader::new(MessageType::NewOrder, record);
        assert!(reader.uint::<u32>("order_qty").is_err());
    }

    #[test]
    fn test_record_reader_trailing_values() {
        let record: Record = smallvec![FieldValue::UInt(1), FieldValue::UInt(2)];
        let mut reader = RecordReader::new(MessageType::NewOrder, record);
        let _ = reader.uint::<u32>("order_qty").unwrap();
        assert!(reader.finish().is_err());
    }
}
