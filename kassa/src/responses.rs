//! Response bodies of the payments API.
//!
//! [`decode_response`] is the boundary where a raw response turns into either
//! a typed body or a [`PaymentsApiError`]. Bodies that cannot be decoded at
//! all, on either side, become a local `mapping_error`.

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use kassa_proto::{PaymentMethodBankCard, PaymentMethodType, PaymentsApiError};

use crate::option::PaymentOption;

/// Payment options available for a shop and amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOptions {
    /// The options, in the order the API listed them.
    ///
    /// Elements that resolve to no known option are dropped.
    #[serde(deserialize_with = "skip_unsupported")]
    pub items: Vec<PaymentOption>,
}

// Not `VecSkipError`: that drops elements silently, and each skip here is
// traced with its index and cause.
#[cfg_attr(not(feature = "telemetry"), allow(unused_variables))]
fn skip_unsupported<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<PaymentOption>, D::Error> {
    let values = Vec::<Value>::deserialize(deserializer)?;
    let total = values.len();
    let items: Vec<PaymentOption> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            PaymentOption::from_value(value)
                .inspect_err(|err| {
                    #[cfg(feature = "telemetry")]
                    tracing::debug!(index, error = %err, "Skipping payment option");
                })
                .ok()
        })
        .collect();
    #[cfg(feature = "telemetry")]
    if items.len() < total {
        tracing::debug!(
            decoded = items.len(),
            total,
            "Payment options list had unsupported elements"
        );
    }
    Ok(items)
}

/// A one-time payment token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    /// The token, to be passed to the merchant's server.
    pub payment_token: String,
}

/// A saved payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// The payment method type.
    #[serde(rename = "type")]
    pub payment_method_type: PaymentMethodType,
    /// Identifier of the saved method.
    pub id: String,
    /// Whether the method is saved for recurring payments.
    pub saved: bool,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether paying with this method requires the card's CVC.
    pub csc_required: bool,
    /// The saved card, for `bank_card` methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<PaymentMethodBankCard>,
}

/// Decodes a response body by its status.
///
/// A success status decodes `body` as `T`. Any other status decodes it as a
/// [`PaymentsApiError`].
///
/// # Errors
///
/// Returns the server's [`PaymentsApiError`] for a non-success status, and a
/// `mapping_error` if the body does not decode as expected.
pub fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, PaymentsApiError> {
    if status.is_success() {
        return serde_json::from_slice(body).map_err(|err| mapping_error(status, &err));
    }
    match serde_json::from_slice::<PaymentsApiError>(body) {
        Ok(error) => {
            #[cfg(feature = "telemetry")]
            tracing::debug!(
                status = status.as_u16(),
                code = %error.error_code,
                "Payments API returned an error"
            );
            Err(error)
        }
        Err(err) => Err(mapping_error(status, &err)),
    }
}

fn mapping_error(status: StatusCode, err: &serde_json::Error) -> PaymentsApiError {
    #[cfg(feature = "telemetry")]
    tracing::warn!(status = status.as_u16(), error = %err, "Undecodable response body");
    PaymentsApiError::mapping_error(format!("HTTP {status}: {err}"))
}
