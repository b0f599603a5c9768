/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Decode and encode hooks.
//!
//! A [`Handler`] is a type parameter of the decoder and encoder, so hooks are
//! dispatched statically. Every hook has a no-op default; implement only the
//! ones you need.

use boe_core::{FieldValue, Message, MessageType, ValidationError};
use boe_schema::FieldDef;

/// Callbacks invoked while decoding and encoding.
///
/// Returning an error from any hook aborts the operation with
/// `ValidationFailed`.
pub trait Handler {
    /// Called after each field is decoded, nested group fields included.
    ///
    /// A repeating group is reported once all of its entries are decoded,
    /// after the calls for the fields inside it.
    ///
    /// # Arguments
    /// * `message_type` - The message being decoded
    /// * `def` - The field definition
    /// * `value` - The decoded value
    fn on_field_decoded(
        &mut self,
        message_type: MessageType,
        def: &FieldDef,
        value: &FieldValue,
    ) -> Result<(), ValidationError> {
        let _ = (message_type, def, value);
        Ok(())
    }

    /// Called once the whole message is decoded.
    ///
    /// # Arguments
    /// * `message` - The decoded message
    fn on_message_decoded(&mut self, message: &Message) -> Result<(), ValidationError> {
        let _ = message;
        Ok(())
    }

    /// Called before a message is encoded.
    ///
    /// # Arguments
    /// * `message` - The message about to be encoded
    fn on_before_encode(&mut self, message: &Message) -> Result<(), ValidationError> {
        let _ = message;
        Ok(())
    }
}

/// Handler that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpHandler;

impl Handler for NoOpHandler {}

impl<H: Handler + ?Sized> Handler for &mut H {
    fn on_field_decoded(
        &mut self,
        message_type: MessageType,
        def: &FieldDef,
        value: &FieldValue,
    ) -> Result<(), ValidationError> {
        (**self).on_field_decoded(message_type, def, value)
    }

    fn on_message_decoded(&mut self, message: &Message) -> Result<(), ValidationError> {
        (**self).on_message_decoded(message)
    }

    fn on_before_encode(&mut self, message: &Message) -> Result<(), ValidationError> {
        (**self).on_before_encode(message)
    }
}

/// Runs `A` first, then `B`.
impl<A: Handler, B: Handler> Handler for (A, B) {
    fn on_field_decoded(
        &mut self,
        message_type: MessageType,
        def: &FieldDef,
        value: &FieldValue,
    ) -> Result<(), ValidationError> {
        self.0.on_field_decoded(message_type, def, value)?;
        self.1.on_field_decoded(message_type, def, value)
    }

    fn on_message_decoded(&mut self, message: &Message) -> Result<(), ValidationError> {
        self.0.on_message_decoded(message)?;
        self.1.on_message_decoded(message)
    }

    fn on_before_encode(&mut self, message: &Message) -> Result<(), ValidationError> {
        self.0.on_before_encode(message)?;
        self.1.on_before_encode(message)
    }
}
