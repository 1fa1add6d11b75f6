//! Error types for envelope resolution and header output.

use kassa_proto::ProtocolError;

/// Errors raised while resolving, decoding or encoding an envelope.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum KassaError {
    /// No variant of the hierarchy, not even its open base, accepts the value.
    #[error("unsupported {hierarchy}{}", .tag.as_deref().map(|t| format!(": {t}")).unwrap_or_default())]
    UnsupportedVariant {
        /// The hierarchy being resolved, e.g. `"payment method data"`.
        hierarchy: &'static str,
        /// The discriminator found on the wire, if there was one.
        tag: Option<String>,
    },

    /// The variant selected by the discriminator could not be decoded.
    #[error("malformed {variant}: {source}")]
    Malformed {
        /// Name of the selected variant.
        variant: &'static str,
        /// Why decoding failed.
        #[source]
        source: ProtocolError,
    },

    /// The input bytes are not a JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A credential could not be written as an HTTP header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
}
