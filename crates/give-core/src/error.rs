//! Error types for Give settings.
//!
//! All errors implement the standard `std::error::Error` trait via
//! `thiserror`. The read API of the settings cache never returns these:
//! lookups fall back to caller-supplied defaults. Errors surface from the
//! collaborators (the option store, configuration loading and value
//! encoding) and are handled at those boundaries.
//!
//! # Example
//!
//! ```
//! use give_core::{GiveError, Result};
//!
//! fn read_version(raw: Option<&str>) -> Result<String> {
//!     raw.map(str::to_string)
//!         .ok_or_else(|| GiveError::store("memory", "give_version has no row"))
//! }
//!
//! assert!(read_version(None).unwrap_err().is_store_error());
//! ```

use thiserror::Error;

/// Main error type for Give settings operations.
#[derive(Debug, Error)]
pub enum GiveError {
    /// The option store failed to serve a request.
    #[error("Option store '{store}' failed: {message}")]
    Store {
        /// Name of the store that failed
        store: String,
        /// Description of what went wrong
        message: String,
        /// Underlying error
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Raw text could not be decoded as the given format.
    #[error("Failed to decode {format} value: {message}")]
    Decode {
        /// Format the text was read as
        format: String,
        /// Description of the decode failure
        message: String,
    },

    /// A value could not be encoded for storage.
    #[error("Failed to encode {format} value: {message}")]
    Encode {
        /// Format the value was written as
        format: String,
        /// Description of the encode failure
        message: String,
    },

    /// Cache configuration is invalid or could not be loaded.
    #[error("Invalid configuration for '{field}': {message}")]
    Config {
        /// Field (or source) that is wrong
        field: String,
        /// Why it's wrong
        message: String,
    },
}

impl GiveError {
    // ============================================
    // Convenience constructors
    // ============================================

    /// Creates a Store error without a cause.
    pub fn store(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            store: store.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a Store error with a cause.
    pub fn store_with_cause<E>(
        store: impl Into<String>,
        message: impl Into<String>,
        cause: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store {
            store: store.into(),
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates a Decode error.
    pub fn decode(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates an Encode error.
    pub fn encode(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error.
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    // ============================================
    // Query methods
    // ============================================

    /// Returns true if this is an option store error.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Store { .. })
    }

    /// Returns true if this is a decode error.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns true if this is an encode error.
    pub fn is_encode_error(&self) -> bool {
        matches!(self, Self::Encode { .. })
    }

    /// Returns true if this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Type alias for Results with GiveError.
pub type Result<T> = std::result::Result<T, GiveError>;
