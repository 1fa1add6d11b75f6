//! Supplementary request headers derived from envelopes.
//!
//! Wallet-family payment method data needs the payer's wallet token on the
//! tokenization request. The token is never part of the JSON body; the
//! transport merges these headers with its own authorization headers.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;

use crate::KassaError;
use crate::constants::BEARER_PREFIX;

/// The payer's wallet authorization token.
///
/// Only present on payment method data built by the caller for sending;
/// data decoded from the wire never carries one.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletAuthorization(String);

impl WalletAuthorization {
    /// Wraps a wallet token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the `Wallet-Authorization: Bearer <token>` header.
    ///
    /// # Errors
    ///
    /// Returns [`KassaError::InvalidHeader`] if the token contains characters
    /// not allowed in a header value.
    pub fn to_headers(&self) -> Result<HeaderMap, KassaError> {
        let mut value = HeaderValue::from_str(&format!("{BEARER_PREFIX}{}", self.0))?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(HeaderName::from_static(WALLET_AUTHORIZATION_NAME), value);
        Ok(headers)
    }
}

// `HeaderName::from_static` only accepts lowercase names.
const WALLET_AUTHORIZATION_NAME: &str = "wallet-authorization";

impl fmt::Debug for WalletAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WalletAuthorization(***)")
    }
}

/// Returns the headers for an optional wallet token, empty when there is none.
pub(crate) fn wallet_headers(
    authorization: Option<&WalletAuthorization>,
) -> Result<HeaderMap, KassaError> {
    authorization.map_or_else(|| Ok(HeaderMap::new()), WalletAuthorization::to_headers)
}
