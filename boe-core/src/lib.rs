/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # BOE Core
//!
//! Core types, messages, and error definitions for the BOE binary codec.
//!
//! This crate provides the building blocks shared by the other BOE crates:
//! - **Error types**: Decode and encode errors built with `thiserror`
//! - **Field values**: `FieldValue`, `Record`, and the `RecordReader`
//! - **Messages**: One struct per message type and the `Message` tagged union
//! - **Core types**: `MessageType`, `Price`, and the enumerated codes
//!
//! ## Records
//!
//! The codec works on schema-ordered records of field values. Typed messages
//! convert to and from records, so the codec never needs to know about any
//! particular message struct.

pub mod error;
pub mod field;
pub mod message;
pub mod types;

pub use error::{BoeError, BufferOverrun, DecodeError, EncodeError, Result, ValidationError};
pub use field::{FieldValue, Record, RecordReader};
pub use message::{
    BoeMessage, CancelOrder, ClientHeartbeat, CrossAllocation, LoginRequest, Message, NewOrder,
    NewOrderCross,
};
pub use types::{
    Capacity, CrossPrioritization, CrossType, MessageType, OrdType, ParseMessageTypeError, Price,
    Side, TimeInForce, WireCode,
};
