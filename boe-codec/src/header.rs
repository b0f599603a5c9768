/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message header.
//!
//! Every message starts with `[length u32 LE][message_type u16 LE]`, where
//! `length` counts the whole message including these six bytes.

use crate::cursor::Cursor;
use boe_core::BufferOverrun;

/// Decoded message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Total message length in bytes, header included.
    pub length: u32,
    /// Raw message type identifier.
    pub message_type: u16,
}

impl Header {
    /// Encoded size of the header.
    pub const LEN: usize = boe_schema::HEADER_LEN;

    /// Reads a header at the cursor position.
    ///
    /// # Errors
    /// Returns `BufferOverrun` if fewer than six bytes remain.
    pub fn decode<B: AsRef<[u8]>>(cursor: &mut Cursor<B>) -> Result<Self, BufferOverrun> {
        let bytes: [u8; Self::LEN] = cursor.read_array()?;
        Ok(Self {
            length: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            message_type: u16::from_le_bytes([bytes[4], bytes[5]]),
        })
    }

    /// Writes the header at the cursor position.
    ///
    /// # Errors
    /// Returns `BufferOverrun` if fewer than six bytes remain.
    pub fn encode<B: AsMut<[u8]>>(&self, cursor: &mut Cursor<B>) -> Result<(), BufferOverrun> {
        cursor.write_bytes(&self.to_bytes())
    }

    /// Returns the wire representation.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[..4].copy_from_slice(&self.length.to_le_bytes());
        out[4..].copy_from_slice(&self.message_type.to_le_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_decode() {
        let data = [0x2e, 0x00, 0x00, 0x00, 0x01, 0x00, 0xff];
        let mut cursor = Cursor::new(&data[..]);
        let header = Header::decode(&mut cursor).unwrap();
        assert_eq!(header.length, 46);
        assert_eq!(header.message_type, 1);
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_header_short_buffer() {
        let data = [0x2e, 0x00, 0x00];
        let mut cursor = Cursor::new(&data[..]);
        assert!(Header::decode(&mut cursor).is_err());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_header_encode() {
        let header = Header {
            length: 0x0102_0304,
            message_type: 5,
        };
        let mut cursor = Cursor::new([0u8; 6]);
        header.encode(&mut cursor).unwrap();
        assert_eq!(cursor.into_inner(), [0x04, 0x03, 0x02, 0x01, 0x05, 0x00]);
    }
}
