/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # BOE Codec
//!
//! Schema-driven binary decoding and encoding of BOE order-entry messages.
//!
//! Every message is `[length u32 LE][message_type u16 LE][fields...]`, densely
//! packed, with the field layout taken from the registered schema of the
//! message type.
//!
//! ## Features
//!
//! - **Bounded cursor**: All reads and writes go through a position-tracking cursor
//! - **Field codecs**: Fixed-width integers, padded text, prices, codes, group counts
//! - **Strict framing**: Header length checked against the decoded structure
//! - **Handlers**: Statically dispatched hooks for validation and observation
//! - **Exact round trip**: Re-encoding a decoded message reproduces its bytes

pub mod config;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod field;
pub mod handler;
pub mod header;

pub use config::CodecConfig;
pub use cursor::Cursor;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use handler::{Handler, NoOpHandler};
pub use header::Header;
