/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema error types.

use boe_core::MessageType;
use thiserror::Error;

/// Errors that prevent a schema from being registered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A price field has a scale with no exact decimal form.
    #[error("price field {field} of {message_type} has scale {scale}, max {max_scale}")]
    PriceScale {
        /// Message type of the schema.
        message_type: MessageType,
        /// Price field name.
        field: &'static str,
        /// Declared scale.
        scale: u8,
        /// Largest supported scale.
        max_scale: u8,
    },

    /// A repeating group whose entries occupy no bytes.
    #[error("group {group} of {message_type} has zero-width entries")]
    ZeroWidthGroup {
        /// Message type of the schema.
        message_type: MessageType,
        /// Group field name.
        group: &'static str,
    },
}
