/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # BOE Schema
//!
//! Message schema definitions and the schema registry for the BOE codec.
//!
//! This crate provides:
//! - **Schema definitions**: Field kinds, field definitions, and message schemas
//! - **Registry**: Message type to schema lookup, with a process-wide built-in table
//! - **Built-in schemas**: Login, order entry, cancel, and heartbeat messages
//! - **Validation**: Schemas are checked before they are registered

pub mod builtin;
pub mod error;
pub mod schema;

pub use error::SchemaError;
pub use schema::{
    FieldDef, FieldKind, HEADER_LEN, IntWidth, MessageSchema, SchemaRegistry, TextPad,
};
