//! Errors raised while decoding wire values.

/// Errors that can occur when decoding kassa wire values.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// A variant's discriminator did not carry the value the variant requires.
    ///
    /// Raised when a variant is decoded directly from a value that carries
    /// another variant's tag.
    #[error("incorrect type: expected {expected}, found {found}")]
    IncorrectType {
        /// The tag the variant accepts.
        expected: &'static str,
        /// The tag found on the wire.
        found: String,
    },

    /// A monetary value was not an exact decimal string.
    #[error("cannot convert {0:?} to a decimal")]
    DecimalConversion(String),

    /// A closed tag set received a value it does not know.
    #[error("unknown {kind}: {value:?}")]
    UnknownTag {
        /// Name of the tag set, e.g. `"currency code"`.
        kind: &'static str,
        /// The rejected wire value.
        value: String,
    },

    /// JSON deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProtocolError {
    /// Builds an [`ProtocolError::IncorrectType`] from the expected tag and the one found.
    #[must_use]
    pub fn incorrect_type(expected: &'static str, found: impl Into<String>) -> Self {
        Self::IncorrectType {
            expected,
            found: found.into(),
        }
    }
}
