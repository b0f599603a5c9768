/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # BOE
//!
//! A schema-driven codec for binary order-entry (BOE) messages.
//!
//! Messages are little-endian, densely packed records behind a six-byte
//! header. The codec decodes them into typed [`prelude::Message`] values and
//! encodes them back to the exact same bytes.
//!
//! ## Features
//!
//! - **Typed messages**: One struct per message type, grouped in a tagged enum
//! - **Schema registry**: Wire layouts declared once and shared read-only
//! - **Bounded cursor**: No read or write escapes its buffer
//! - **Handlers**: Statically dispatched decode and encode hooks
//!
//! ## Quick Start
//!
//! ```rust
//! use boe::prelude::*;
//!
//! let login = Message::from(LoginRequest {
//!     username: "TRADER1".to_string(),
//!     password: "secret".to_string(),
//! });
//!
//! let bytes = Encoder::new().encode_to_vec(&login)?;
//! assert_eq!(bytes.len(), 46);
//!
//! let decoded = Decoder::new().decode_slice(&bytes)?;
//! assert_eq!(decoded, login);
//! # Ok::<(), BoeError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Message types, field values, and error definitions
//! - [`schema`]: Message schemas and the schema registry
//! - [`codec`]: Cursor, field codecs, decoder, encoder, and handlers

pub mod core {
    //! Message types, field values, and error definitions.
    pub use boe_core::*;
}

pub mod schema {
    //! Message schemas and the schema registry.
    pub use boe_schema::*;
}

pub mod codec {
    //! Cursor, field codecs, decoder, encoder, and handlers.
    pub use boe_codec::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use boe_core::{
        BoeError, BoeMessage, CancelOrder, Capacity, ClientHeartbeat, CrossAllocation,
        CrossPrioritization, CrossType, DecodeError, EncodeError, FieldValue, LoginRequest,
        Message, MessageType, NewOrder, NewOrderCross, OrdType, Price, Record, Result, Side,
        TimeInForce, ValidationError,
    };

    // Schema
    pub use boe_schema::{
        FieldDef, FieldKind, IntWidth, MessageSchema, SchemaError, SchemaRegistry, TextPad,
    };

    // Codec
    pub use boe_codec::{CodecConfig, Cursor, Decoder, Encoder, Handler, Header, NoOpHandler};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let _config = CodecConfig::new();
        let _price = Price::from_mantissa(10_000);
        let _side = Side::Buy;
        assert_eq!(SchemaRegistry::global().len(), MessageType::ALL.len());
    }

    #[test]
    fn test_heartbeat_through_facade() {
        let bytes = Encoder::new()
            .encode_to_vec(&Message::from(ClientHeartbeat))
            .unwrap();
        let header = Header::decode(&mut Cursor::new(&bytes[..])).unwrap();
        assert_eq!(header.length, 6);
        assert_eq!(header.message_type, MessageType::ClientHeartbeat.as_u16());
    }
}
