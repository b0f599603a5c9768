/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field codecs.
//!
//! Each function reads or writes exactly one field at the cursor position.
//! Integers are little-endian; signed values are two's complement. For a
//! repeating group only the count prefix is handled here, the entries are
//! walked by the decoder and encoder.

use crate::cursor::Cursor;
use boe_core::{BufferOverrun, DecodeError, EncodeError, FieldValue, Price};
use boe_schema::{FieldDef, FieldKind, IntWidth, TextPad};
use memchr::memchr;

/// Reads an unsigned integer of the given width.
///
/// # Errors
/// Returns `BufferOverrun` if the cursor holds fewer than `width` bytes.
#[inline]
pub fn read_uint<B: AsRef<[u8]>>(
    cursor: &mut Cursor<B>,
    width: IntWidth,
) -> Result<u64, BufferOverrun> {
    let bytes = cursor.read_bytes(width.bytes())?;
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    Ok(u64::from_le_bytes(buf))
}

/// Reads a signed integer of the given width, sign-extending it.
///
/// # Errors
/// Returns `BufferOverrun` if the cursor holds fewer than `width` bytes.
#[inline]
pub fn read_int<B: AsRef<[u8]>>(
    cursor: &mut Cursor<B>,
    width: IntWidth,
) -> Result<i64, BufferOverrun> {
    let raw = read_uint(cursor, width)?;
    let shift = 64 - 8 * width.bytes() as u32;
    Ok(((raw << shift) as i64) >> shift)
}

/// Writes the low `width` bytes of `value`.
///
/// The caller is responsible for range checking.
///
/// # Errors
/// Returns `BufferOverrun` if the cursor has fewer than `width` bytes left.
#[inline]
pub fn write_uint<B: AsMut<[u8]>>(
    cursor: &mut Cursor<B>,
    width: IntWidth,
    value: u64,
) -> Result<(), BufferOverrun> {
    cursor.write_bytes(&value.to_le_bytes()[..width.bytes()])
}

/// Writes the low `width` bytes of a two's complement `value`.
///
/// # Errors
/// Returns `BufferOverrun` if the cursor has fewer than `width` bytes left.
#[inline]
pub fn write_int<B: AsMut<[u8]>>(
    cursor: &mut Cursor<B>,
    width: IntWidth,
    value: i64,
) -> Result<(), BufferOverrun> {
    cursor.write_bytes(&value.to_le_bytes()[..width.bytes()])
}

/// Reads a fixed-width character field and strips its padding.
///
/// A right-padded value ends at the first pad byte; a left-padded value
/// starts after the leading pad bytes. A field with no pad byte yields all
/// `width` bytes.
///
/// # Errors
/// Returns `DecodeError::TruncatedMessage` if the field is cut short, or
/// `DecodeError::InvalidUtf8` if the value is not UTF-8.
pub fn read_text<B: AsRef<[u8]>>(
    cursor: &mut Cursor<B>,
    field: &'static str,
    width: usize,
    pad: TextPad,
) -> Result<String, DecodeError> {
    let raw = cursor.read_bytes(width)?;
    let value = match pad {
        TextPad::Right(p) => &raw[..memchr(p, raw).unwrap_or(raw.len())],
        TextPad::Left(p) => {
            let start = raw.iter().position(|b| *b != p).unwrap_or(raw.len());
            &raw[start..]
        }
    };
    std::str::from_utf8(value)
        .map(str::to_owned)
        .map_err(|_| DecodeError::InvalidUtf8 { field })
}

/// Writes a character field, padding it to `width`.
///
/// # Errors
/// Returns `EncodeError::FieldTooLong` if `value` is longer than `width`, or
/// `EncodeError::BufferTooSmall` if the cursor runs out of room.
pub fn write_text<B: AsMut<[u8]>>(
    cursor: &mut Cursor<B>,
    field: &'static str,
    value: &str,
    width: usize,
    pad: TextPad,
) -> Result<(), EncodeError> {
    let bytes = value.as_bytes();
    if bytes.len() > width {
        return Err(EncodeError::FieldTooLong {
            field,
            length: bytes.len(),
            max_length: width,
        });
    }

    let padding = width - bytes.len();
    match pad {
        TextPad::Right(p) => {
            cursor.write_bytes(bytes)?;
            cursor.fill(p, padding)?;
        }
        TextPad::Left(p) => {
            cursor.fill(p, padding)?;
            cursor.write_bytes(bytes)?;
        }
    }
    Ok(())
}

/// Decodes one field.
///
/// For a repeating group this reads only the count and returns it as
/// `FieldValue::UInt`.
///
/// # Errors
/// Returns `DecodeError::TruncatedMessage` if the field is cut short, or
/// `DecodeError::InvalidUtf8` for a malformed character field.
pub fn decode_field<B: AsRef<[u8]>>(
    def: &FieldDef,
    cursor: &mut Cursor<B>,
) -> Result<FieldValue, DecodeError> {
    Ok(match &def.kind {
        FieldKind::UInt(width) => FieldValue::UInt(read_uint(cursor, *width)?),
        FieldKind::Int(width) => FieldValue::Int(read_int(cursor, *width)?),
        FieldKind::Text { width, pad } => {
            FieldValue::Text(read_text(cursor, def.name, *width, *pad)?)
        }
        FieldKind::Price { width, scale } => {
            FieldValue::Price(Price::new(read_int(cursor, *width)?, *scale))
        }
        FieldKind::Code => FieldValue::Code(cursor.read_array::<1>()?[0]),
        FieldKind::Group { count, .. } => FieldValue::UInt(read_uint(cursor, *count)?),
    })
}

fn expected(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::UInt(_) => "unsigned integer",
        FieldKind::Int(_) => "signed integer",
        FieldKind::Text { .. } => "text",
        FieldKind::Price { .. } => "price",
        FieldKind::Code => "code",
        FieldKind::Group { .. } => "group",
    }
}

fn wrong_kind(def: &FieldDef, value: &FieldValue) -> EncodeError {
    EncodeError::InvalidFieldValue {
        field: def.name,
        reason: format!("expected {}, got {}", expected(&def.kind), value.kind_name()),
    }
}

fn check_signed(field: &'static str, width: IntWidth, value: i64) -> Result<(), EncodeError> {
    if value < width.min_signed() || value > width.max_signed() {
        return Err(EncodeError::ValueOutOfRange {
            field,
            value: i128::from(value),
            width: width.bytes(),
        });
    }
    Ok(())
}

/// Encodes one field.
///
/// For a repeating group this writes only the count, taken from the number
/// of entries in `value`.
///
/// # Errors
/// Returns `EncodeError::ValueOutOfRange` if an integer does not fit its
/// width, `EncodeError::FieldTooLong` for an oversized character value,
/// `EncodeError::GroupTooLarge` if the entry count does not fit the count
/// field, or `EncodeError::InvalidFieldValue` if the value kind or price
/// scale disagrees with the definition.
pub fn encode_field<B: AsMut<[u8]>>(
    def: &FieldDef,
    value: &FieldValue,
    cursor: &mut Cursor<B>,
) -> Result<(), EncodeError> {
    match (&def.kind, value) {
        (FieldKind::UInt(width), FieldValue::UInt(v)) => {
            if *v > width.max_unsigned() {
                return Err(EncodeError::ValueOutOfRange {
                    field: def.name,
                    value: i128::from(*v),
                    width: width.bytes(),
                });
            }
            write_uint(cursor, *width, *v)?;
        }
        (FieldKind::Int(width), FieldValue::Int(v)) => {
            check_signed(def.name, *width, *v)?;
            write_int(cursor, *width, *v)?;
        }
        (FieldKind::Text { width, pad }, FieldValue::Text(s)) => {
            write_text(cursor, def.name, s, *width, *pad)?;
        }
        (FieldKind::Price { width, scale }, FieldValue::Price(p)) => {
            if p.scale() != *scale {
                return Err(EncodeError::InvalidFieldValue {
                    field: def.name,
                    reason: format!("price scale {} does not match field scale {scale}", p.scale()),
                });
            }
            check_signed(def.name, *width, p.mantissa())?;
            write_int(cursor, *width, p.mantissa())?;
        }
        (FieldKind::Code, FieldValue::Code(c)) => cursor.write_bytes(&[*c])?,
        (FieldKind::Group { count, .. }, FieldValue::Group(entries)) => {
            let n = entries.len();
            let fits = u64::try_from(n).is_ok_and(|n| n <= count.max_unsigned());
            if !fits {
                return Err(EncodeError::GroupTooLarge {
                    group: def.name,
                    count: n,
                    max_count: count.max_unsigned(),
                });
            }
            write_uint(cursor, *count, n as u64)?;
        }
        _ => return Err(wrong_kind(def, value)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_uint_widths() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(read_uint(&mut cursor, IntWidth::W1).unwrap(), 0x01);
        assert_eq!(read_uint(&mut cursor, IntWidth::W2).unwrap(), 0x0302);
        assert_eq!(read_uint(&mut cursor, IntWidth::W4).unwrap(), 0x0706_0504);
        assert!(read_uint(&mut cursor, IntWidth::W2).is_err());
        assert_eq!(cursor.position(), 7);
    }

    #[test]
    fn test_read_int_sign_extends() {
        let data = [0xff, 0xfe, 0xff, 0x80];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(read_int(&mut cursor, IntWidth::W1).unwrap(), -1);
        assert_eq!(read_int(&mut cursor, IntWidth::W2).unwrap(), -2);
        assert_eq!(read_int(&mut cursor, IntWidth::W1).unwrap(), -128);
    }

    #[test]
    fn test_write_int_twos_complement() {
        let mut cursor = Cursor::new([0u8; 4]);
        write_int(&mut cursor, IntWidth::W2, -2).unwrap();
        write_uint(&mut cursor, IntWidth::W2, 0x0102).unwrap();
        assert_eq!(cursor.into_inner(), [0xfe, 0xff, 0x02, 0x01]);
    }

    #[test]
    fn test_read_text_right_padded() {
        let data = b"USER\0\0\0\0";
        let mut cursor = Cursor::new(&data[..]);
        let value = read_text(&mut cursor, "username", 8, TextPad::Right(0)).unwrap();
        assert_eq!(value, "USER");
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_read_text_left_padded() {
        let data = b"  A1";
        let mut cursor = Cursor::new(&data[..]);
        let value = read_text(&mut cursor, "account", 4, TextPad::Left(b' ')).unwrap();
        assert_eq!(value, "A1");
    }

    #[test]
    fn test_read_text_unpadded_and_empty() {
        let mut cursor = Cursor::new(&b"ABCD    "[..]);
        assert_eq!(
            read_text(&mut cursor, "a", 4, TextPad::Right(b' ')).unwrap(),
            "ABCD"
        );
        assert_eq!(read_text(&mut cursor, "b", 4, TextPad::Right(b' ')).unwrap(), "");
    }

    #[test]
    fn test_read_text_invalid_utf8() {
        let data = [0xff, 0xfe, 0x00, 0x00];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(
            read_text(&mut cursor, "symbol", 4, TextPad::Right(0)),
            Err(DecodeError::InvalidUtf8 { field: "symbol" })
        );
    }

    #[test]
    fn test_write_text_pads() {
        let mut cursor = Cursor::new([0xaau8; 8]);
        write_text(&mut cursor, "a", "AB", 4, TextPad::Right(b' ')).unwrap();
        write_text(&mut cursor, "b", "CD", 4, TextPad::Left(b' ')).unwrap();
        assert_eq!(&cursor.into_inner(), b"AB    CD");
    }

    #[test]
    fn test_write_text_too_long() {
        let mut cursor = Cursor::new([0u8; 8]);
        let err = write_text(&mut cursor, "symbol", "TOOLONG", 4, TextPad::Right(0)).unwrap_err();
        assert_eq!(
            err,
            EncodeError::FieldTooLong {
                field: "symbol",
                length: 7,
                max_length: 4
            }
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_decode_field_price_and_code() {
        let mut data = Vec::new();
        data.extend_from_slice(&1_234_500i64.to_le_bytes());
        data.push(b'2');
        let mut cursor = Cursor::new(&data[..]);

        let price = decode_field(&FieldDef::price("price", IntWidth::W8, 4), &mut cursor).unwrap();
        assert_eq!(price, FieldValue::Price(Price::new(1_234_500, 4)));
        let side = decode_field(&FieldDef::code("side"), &mut cursor).unwrap();
        assert_eq!(side, FieldValue::Code(b'2'));
    }

    #[test]
    fn test_decode_field_group_reads_count() {
        let data = [0x03, 0x00];
        let mut cursor = Cursor::new(&data[..]);
        let def = FieldDef::group("legs", IntWidth::W2, vec![FieldDef::code("side")]);
        assert_eq!(decode_field(&def, &mut cursor).unwrap(), FieldValue::UInt(3));
    }

    #[test]
    fn test_decode_field_truncated() {
        let data = [0x01, 0x02];
        let mut cursor = Cursor::new(&data[..]);
        let err = decode_field(&FieldDef::uint("qty", IntWidth::W4), &mut cursor).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedMessage {
                needed: 4,
                available: 2
            }
        );
    }

    #[test]
    fn test_encode_field_out_of_range() {
        let mut cursor = Cursor::new([0u8; 8]);
        let err = encode_field(
            &FieldDef::uint("qty", IntWidth::W1),
            &FieldValue::UInt(256),
            &mut cursor,
        )
        .unwrap_err();
        assert!(matches!(err, EncodeError::ValueOutOfRange { width: 1, .. }));

        let err = encode_field(
            &FieldDef::int("offset", IntWidth::W1),
            &FieldValue::Int(-129),
            &mut cursor,
        )
        .unwrap_err();
        assert!(matches!(err, EncodeError::ValueOutOfRange { value: -129, .. }));
    }

    #[test]
    fn test_encode_field_price_scale_mismatch() {
        let mut cursor = Cursor::new([0u8; 8]);
        let err = encode_field(
            &FieldDef::price("price", IntWidth::W8, 4),
            &FieldValue::Price(Price::new(125, 2)),
            &mut cursor,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvalidFieldValue { field: "price", .. }
        ));
    }

    #[test]
    fn test_encode_field_wrong_kind() {
        let mut cursor = Cursor::new([0u8; 8]);
        let err = encode_field(&FieldDef::code("side"), &FieldValue::from("B"), &mut cursor)
            .unwrap_err();
        assert_eq!(
            err,
            EncodeError::InvalidFieldValue {
                field: "side",
                reason: "expected code, got text".to_string()
            }
        );
    }

    #[test]
    fn test_encode_field_group_count_limit() {
        let def = FieldDef::group("legs", IntWidth::W1, vec![FieldDef::code("side")]);
        let entries = vec![boe_core::Record::new(); 256];
        let mut cursor = Cursor::new([0u8; 4]);
        let err = encode_field(&def, &FieldValue::Group(entries), &mut cursor).unwrap_err();
        assert_eq!(
            err,
            EncodeError::GroupTooLarge {
                group: "legs",
                count: 256,
                max_count: 255
            }
        );

        let entries = vec![boe_core::Record::new(); 3];
        encode_field(&def, &FieldValue::Group(entries), &mut cursor).unwrap();
        assert_eq!(cursor.written(), &[3]);
    }
}
