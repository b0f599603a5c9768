/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Codec configuration.

/// Limits and strictness settings shared by the decoder and encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Largest message, header included, that will be decoded or encoded.
    pub max_message_len: usize,
    /// Reject messages whose header length exceeds their structure.
    pub validate_length: bool,
}

impl CodecConfig {
    /// Default maximum message length.
    pub const DEFAULT_MAX_MESSAGE_LEN: usize = 65_535;

    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum message length.
    #[must_use]
    pub const fn with_max_message_len(mut self, len: usize) -> Self {
        self.max_message_len = len;
        self
    }

    /// Enables or disables strict length validation.
    ///
    /// When disabled, a header length larger than the decoded structure is
    /// accepted and the extra bytes are skipped. A header length smaller
    /// than the structure is always rejected.
    #[must_use]
    pub const fn with_validate_length(mut self, validate: bool) -> Self {
        self.validate_length = validate;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_message_len: Self::DEFAULT_MAX_MESSAGE_LEN,
            validate_length: true,
        }
    }
}
