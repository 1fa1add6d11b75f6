//! Error responses returned by the payments API.
//!
//! Any non-2xx response carries a body of the shape
//!
//! ```json
//! {
//!   "id": "ecf255db-cce8-4f15-8fc2-3d7a4678c867",
//!   "type": "error",
//!   "description": "Invalid API key provided",
//!   "parameter": "payment_method",
//!   "retry_after": "1800",
//!   "code": "invalid_request"
//! }
//! ```
//!
//! When the body itself cannot be decoded the client reports a locally built
//! [`PaymentsApiError`] with [`PaymentErrorCode::MappingError`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

/// Machine-readable error code of a [`PaymentsApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentErrorCode {
    /// Malformed request (HTTP 400).
    InvalidRequest,
    /// The operation is not supported for this request (HTTP 400).
    NotSupported,
    /// Authentication failed (HTTP 401).
    InvalidCredentials,
    /// Not allowed for these credentials (HTTP 403).
    Forbidden,
    /// Server-side failure (HTTP 500).
    InternalServerError,
    /// The response body could not be decoded; produced by the client only.
    MappingError,
}

impl PaymentErrorCode {
    /// Returns the `snake_case` string representation matching the wire format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::NotSupported => "not_supported",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Forbidden => "forbidden",
            Self::InternalServerError => "internal_server_error",
            Self::MappingError => "mapping_error",
        }
    }

    /// Returns the HTTP status band the code belongs to.
    ///
    /// [`Self::MappingError`] is local to the client and has no status.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::InvalidRequest | Self::NotSupported => Some(400),
            Self::InvalidCredentials => Some(401),
            Self::Forbidden => Some(403),
            Self::InternalServerError => Some(500),
            Self::MappingError => None,
        }
    }
}

// `mapping_error` is never accepted from the wire; only
// `PaymentsApiError::mapping_error` builds it.
impl FromStr for PaymentErrorCode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalid_request" => Ok(Self::InvalidRequest),
            "not_supported" => Ok(Self::NotSupported),
            "invalid_credentials" => Ok(Self::InvalidCredentials),
            "forbidden" => Ok(Self::Forbidden),
            "internal_server_error" => Ok(Self::InternalServerError),
            other => Err(ProtocolError::UnknownTag {
                kind: "error code",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Kind of an error response. The API only sends `"error"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorType {
    /// An error.
    #[default]
    Error,
}

/// Error response of the payments API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentsApiError {
    /// Identifier of the error occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Kind of the response.
    #[serde(rename = "type")]
    pub error_type: PaymentErrorType,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Request parameter that caused the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Seconds to wait before retrying, as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<String>,
    /// Machine-readable error code.
    #[serde(rename = "code")]
    pub error_code: PaymentErrorCode,
}

impl PaymentsApiError {
    /// Creates an error with the given code and no details.
    #[must_use]
    pub const fn new(error_code: PaymentErrorCode) -> Self {
        Self {
            id: None,
            error_type: PaymentErrorType::Error,
            description: None,
            parameter: None,
            retry_after: None,
            error_code,
        }
    }

    /// Creates the client-side error reported when a response body cannot be decoded.
    #[must_use]
    pub fn mapping_error(detail: impl Into<String>) -> Self {
        Self {
            description: Some(detail.into()),
            ..Self::new(PaymentErrorCode::MappingError)
        }
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the HTTP status band of [`Self::error_code`].
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        self.error_code.http_status()
    }
}

impl fmt::Display for PaymentsApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(description) = &self.description {
            write!(f, "{}: {}", self.error_code, description)
        } else {
            write!(f, "{}", self.error_code)
        }
    }
}

impl std::error::Error for PaymentsApiError {}
