//! Tokenization requests.
//!
//! A [`TokensRequest`] exchanges payment data for a one-time payment token.
//! The payer pays either with fresh [`PaymentMethodData`], with a saved
//! payment method, or with a saved payment instrument. No discriminator field
//! tells these apart on the wire: the selector key that is present does.

use http::HeaderMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use kassa_proto::{Confirmation, MonetaryAmount};

use crate::KassaError;
use crate::method_data::PaymentMethodData;
use crate::resolve::{Candidate, OnDecodeFailure, Resolver, decode_as};

/// Fields shared by every tokenization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokensRequestBase {
    /// Payment amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<MonetaryAmount>,
    /// Anti-fraud session identifier.
    pub tmx_session_id: String,
    /// Requested confirmation scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
    /// Whether to save the payment method for recurring payments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_payment_method: Option<bool>,
}

impl TokensRequestBase {
    /// Creates a base with only the session identifier set.
    #[must_use]
    pub fn new(tmx_session_id: impl Into<String>) -> Self {
        Self {
            amount: None,
            tmx_session_id: tmx_session_id.into(),
            confirmation: None,
            save_payment_method: None,
        }
    }

    /// Sets the payment amount.
    #[must_use]
    pub const fn with_amount(mut self, amount: MonetaryAmount) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the confirmation scenario.
    #[must_use]
    pub fn with_confirmation(mut self, confirmation: Confirmation) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    /// Sets whether the payment method is saved.
    #[must_use]
    pub const fn with_save_payment_method(mut self, save: bool) -> Self {
        self.save_payment_method = Some(save);
        self
    }
}

/// Tokenize fresh payment method data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDataRequest {
    /// Shared fields.
    #[serde(flatten)]
    pub base: TokensRequestBase,
    /// The data to tokenize.
    pub payment_method_data: PaymentMethodData,
}

/// Tokenize a saved payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodIdRequest {
    /// Shared fields.
    #[serde(flatten)]
    pub base: TokensRequestBase,
    /// Identifier of the saved payment method.
    pub payment_method_id: String,
    /// CVC2 or CVV2 code, when the saved method requires it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csc: Option<String>,
}

/// Tokenize a saved payment instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentIdRequest {
    /// Shared fields.
    #[serde(flatten)]
    pub base: TokensRequestBase,
    /// Identifier of the saved payment instrument.
    pub payment_instrument_id: String,
    /// CVC2 or CVV2 code, when the saved instrument requires it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csc: Option<String>,
}

/// A tokenization request, resolved by which selector key is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokensRequest {
    /// Pay with fresh payment method data.
    PaymentMethodData(MethodDataRequest),
    /// Pay with a saved payment method.
    PaymentMethodId(MethodIdRequest),
    /// Pay with a saved payment instrument.
    PaymentInstrumentId(InstrumentIdRequest),
}

/// Which selector keys an object carries.
#[derive(Debug, Clone, Copy)]
struct Selectors {
    method_data: bool,
    method_id: bool,
    instrument_id: bool,
}

impl Selectors {
    fn peek(object: &Map<String, Value>) -> Self {
        Self {
            method_data: object.contains_key("payment_method_data"),
            method_id: object.contains_key("payment_method_id"),
            instrument_id: object.contains_key("payment_instrument_id"),
        }
    }
}

const TOKENS_CANDIDATES: &[Candidate<TokensRequest, Selectors>] = &[
    Candidate {
        name: "payment_method_data",
        accepts: |selectors| selectors.method_data,
        decode: |value| decode_as(value).map(TokensRequest::PaymentMethodData),
    },
    Candidate {
        name: "payment_method_id",
        accepts: |selectors| selectors.method_id,
        decode: |value| decode_as(value).map(TokensRequest::PaymentMethodId),
    },
    Candidate {
        name: "payment_instrument_id",
        accepts: |selectors| selectors.instrument_id,
        decode: |value| decode_as(value).map(TokensRequest::PaymentInstrumentId),
    },
];

const TOKENS_RESOLVER: Resolver<TokensRequest, Selectors> = Resolver {
    hierarchy: "tokens request",
    discriminator: None,
    peek: Selectors::peek,
    on_decode_failure: OnDecodeFailure::Fail,
    candidates: TOKENS_CANDIDATES,
};

impl TokensRequest {
    /// Requests a token for fresh payment method data.
    #[must_use]
    pub const fn with_method_data(
        base: TokensRequestBase,
        payment_method_data: PaymentMethodData,
    ) -> Self {
        Self::PaymentMethodData(MethodDataRequest {
            base,
            payment_method_data,
        })
    }

    /// Requests a token for a saved payment method.
    #[must_use]
    pub fn with_method_id(
        base: TokensRequestBase,
        payment_method_id: impl Into<String>,
        csc: Option<String>,
    ) -> Self {
        Self::PaymentMethodId(MethodIdRequest {
            base,
            payment_method_id: payment_method_id.into(),
            csc,
        })
    }

    /// Requests a token for a saved payment instrument.
    #[must_use]
    pub fn with_instrument_id(
        base: TokensRequestBase,
        payment_instrument_id: impl Into<String>,
        csc: Option<String>,
    ) -> Self {
        Self::PaymentInstrumentId(InstrumentIdRequest {
            base,
            payment_instrument_id: payment_instrument_id.into(),
            csc,
        })
    }

    /// Resolves a JSON object by its selector key.
    ///
    /// # Errors
    ///
    /// Returns [`KassaError::UnsupportedVariant`] if no selector key is
    /// present, and [`KassaError::Malformed`] if the selected shape does not
    /// decode, including when its payment method data is unsupported.
    pub fn from_value(value: Value) -> Result<Self, KassaError> {
        TOKENS_RESOLVER.resolve(value)
    }

    /// Parses and resolves a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`KassaError::Json`] if `bytes` is not JSON, otherwise as
    /// [`Self::from_value`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KassaError> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    /// The shared fields.
    #[must_use]
    pub const fn base(&self) -> &TokensRequestBase {
        match self {
            Self::PaymentMethodData(request) => &request.base,
            Self::PaymentMethodId(request) => &request.base,
            Self::PaymentInstrumentId(request) => &request.base,
        }
    }

    /// Returns the supplementary headers this request needs.
    ///
    /// Only requests carrying wallet-family payment method data built with a
    /// wallet token produce any.
    ///
    /// # Errors
    ///
    /// Returns [`KassaError::InvalidHeader`] if the token is not a valid
    /// header value.
    pub fn custom_headers(&self) -> Result<HeaderMap, KassaError> {
        match self {
            Self::PaymentMethodData(request) => request.payment_method_data.custom_headers(),
            Self::PaymentMethodId(_) | Self::PaymentInstrumentId(_) => Ok(HeaderMap::new()),
        }
    }
}

impl Serialize for TokensRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::PaymentMethodData(request) => request.serialize(serializer),
            Self::PaymentMethodId(request) => request.serialize(serializer),
            Self::PaymentInstrumentId(request) => request.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TokensRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
