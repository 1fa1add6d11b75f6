//! Wire format types for the kassa payments API.
//!
//! This crate defines the leaf data structures shared by every request and
//! response: monetary amounts, bank card records, confirmation scenarios,
//! fees, the discriminator tag sets and the API error model. It has minimal
//! dependencies (`serde`, `serde_json`, `rust_decimal`) and knows nothing
//! about the polymorphic envelopes built on top of it in the `kassa` crate.
//!
//! # Modules
//!
//! - [`amount`] - [`MonetaryAmount`] and [`CurrencyCode`]
//! - [`card`] - raw and saved bank card records
//! - [`confirmation`] - open-ended confirmation scenarios
//! - [`fee`] - fee breakdown of a payment option
//! - [`tags`] - closed discriminator sets
//! - [`api_error`] - [`PaymentsApiError`] and its codes

pub mod amount;
pub mod api_error;
pub mod card;
pub mod confirmation;
pub mod error;
pub mod fee;
pub mod tags;

pub use amount::{CurrencyCode, MonetaryAmount, parse_decimal};
pub use api_error::{PaymentErrorCode, PaymentErrorType, PaymentsApiError};
pub use card::{BankCard, BankCardType, PaymentInstrumentBankCard, PaymentMethodBankCard};
pub use confirmation::{Confirmation, ConfirmationType, ConfirmationTypes};
pub use error::ProtocolError;
pub use fee::{CounterpartyFee, Fee, ServiceFee};
pub use rust_decimal::Decimal;
pub use tags::{IdentificationRequirement, PaymentMethodType, SavePaymentMethod, YooMoneyInstrumentType};
