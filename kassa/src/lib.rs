#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Polymorphic request and response envelopes for the kassa payments API.
//!
//! The payments API describes what funds a payment, what the server offers as
//! a payable method and what is submitted for tokenization as three families
//! of JSON objects that share a base shape and differ by discriminator. This
//! crate models each family as a closed enum and resolves inbound JSON to the
//! one matching variant by peeking its discriminators, then re-encodes it as a
//! single flat object carrying the same tags.
//!
//! Leaf wire types live in [`kassa_proto`] and are re-exported here.
//!
//! # Modules
//!
//! - [`method_data`] - [`PaymentMethodData`] submitted for tokenization
//! - [`option`] - [`PaymentOption`] offered by the payment options listing
//! - [`tokens`] - [`TokensRequest`] and its three selector shapes
//! - [`responses`] - Response bodies and [`decode_response`]
//! - [`headers`] - Wallet authorization and supplementary headers
//! - [`tag`] - Fixed discriminator fields
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing of variant resolution and skipped list elements

pub mod constants;
pub mod error;
pub mod headers;
pub mod method_data;
pub mod option;
mod resolve;
pub mod responses;
pub mod tag;
pub mod tokens;

pub use error::KassaError;
pub use headers::WalletAuthorization;
pub use method_data::{
    ApplePayData, BankCardData, GenericMethodData, LinkedBankCardData, PaymentMethodData,
    SberbankData, WalletData,
};
pub use option::{
    InstrumentOption, LinkedBankCardOption, PaymentOption, PaymentOptionBase, WalletOption,
};
pub use responses::{PaymentMethod, PaymentOptions, Tokens, decode_response};
pub use tokens::{
    InstrumentIdRequest, MethodDataRequest, MethodIdRequest, TokensRequest, TokensRequestBase,
};

pub use kassa_proto;
pub use kassa_proto::{
    BankCard, BankCardType, Confirmation, ConfirmationType, ConfirmationTypes, CounterpartyFee,
    CurrencyCode, Decimal, Fee, IdentificationRequirement, MonetaryAmount,
    PaymentErrorCode, PaymentErrorType, PaymentInstrumentBankCard, PaymentMethodBankCard,
    PaymentMethodType, PaymentsApiError, ProtocolError, SavePaymentMethod, ServiceFee,
    YooMoneyInstrumentType,
};
