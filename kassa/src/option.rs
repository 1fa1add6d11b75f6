//! Payment options offered by the API.
//!
//! A payment option describes one way the payer can pay: the payment method
//! type, its charge and the confirmation scenarios it supports. Options are
//! decoded from the payment options listing and are never sent back, so
//! resolution here is lenient: if the most specific variant cannot decode an
//! option, the next one is tried, down to the plain [`PaymentOptionBase`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use serde_with::{VecSkipError, serde_as};

use kassa_proto::{
    BankCardType, ConfirmationTypes, Fee, IdentificationRequirement, MonetaryAmount,
    PaymentInstrumentBankCard, PaymentMethodType, ProtocolError, SavePaymentMethod,
    YooMoneyInstrumentType,
};

use crate::KassaError;
use crate::resolve::{Candidate, MethodTags, OnDecodeFailure, Resolver, decode_as};
use crate::tag::{Fixed, LinkedBankCardTag, WalletTag};

/// Fields shared by every payment option.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOptionBase {
    /// The payment method type.
    pub payment_method_type: PaymentMethodType,
    /// Supported confirmation scenarios.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_types: Option<ConfirmationTypes>,
    /// Amount the payer is charged, fees included.
    pub charge: MonetaryAmount,
    /// Identification the payer must have passed to use this option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification_requirement: Option<IdentificationRequirement>,
    /// Fee breakdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Fee>,
    /// Whether the payment method can be saved for recurring payments.
    pub save_payment_method: SavePaymentMethod,
    /// Whether the payment instrument can be saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_payment_instrument: Option<bool>,
    /// Cards the payer saved earlier, offered with a `bank_card` option.
    ///
    /// A saved card that fails to decode is dropped from the list.
    #[serde_as(as = "Option<VecSkipError<_>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_instruments: Option<Vec<PaymentInstrumentBankCard>>,
}

impl PaymentOptionBase {
    /// Creates a base with the required fields only.
    #[must_use]
    pub const fn new(
        payment_method_type: PaymentMethodType,
        charge: MonetaryAmount,
        save_payment_method: SavePaymentMethod,
    ) -> Self {
        Self {
            payment_method_type,
            confirmation_types: None,
            charge,
            identification_requirement: None,
            fee: None,
            save_payment_method,
            save_payment_instrument: None,
            payment_instruments: None,
        }
    }

    fn require_yoo_money(&self) -> Result<(), ProtocolError> {
        if self.payment_method_type == PaymentMethodType::YooMoney {
            Ok(())
        } else {
            Err(ProtocolError::incorrect_type(
                PaymentMethodType::YooMoney.as_str(),
                self.payment_method_type.as_str(),
            ))
        }
    }
}

/// Payment from the payer's wallet balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WalletOptionWire")]
pub struct WalletOption {
    /// Shared fields; `payment_method_type` is always `yoo_money`.
    #[serde(flatten)]
    pub base: PaymentOptionBase,
    /// Always `wallet`.
    pub instrument_type: Fixed<WalletTag>,
    /// Wallet account number.
    #[serde(rename = "id")]
    pub account_id: String,
    /// Current wallet balance.
    pub balance: MonetaryAmount,
}

#[derive(Deserialize)]
struct WalletOptionWire {
    #[serde(flatten)]
    base: PaymentOptionBase,
    instrument_type: Fixed<WalletTag>,
    id: String,
    balance: MonetaryAmount,
}

impl TryFrom<WalletOptionWire> for WalletOption {
    type Error = ProtocolError;

    fn try_from(wire: WalletOptionWire) -> Result<Self, Self::Error> {
        wire.base.require_yoo_money()?;
        Ok(Self {
            base: wire.base,
            instrument_type: wire.instrument_type,
            account_id: wire.id,
            balance: wire.balance,
        })
    }
}

/// Payment with a card linked to the payer's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LinkedBankCardOptionWire")]
pub struct LinkedBankCardOption {
    /// Shared fields; `payment_method_type` is always `yoo_money`.
    #[serde(flatten)]
    pub base: PaymentOptionBase,
    /// Always `linked_bank_card`.
    pub instrument_type: Fixed<LinkedBankCardTag>,
    /// Identifier of the linked card.
    #[serde(rename = "id")]
    pub card_id: String,
    /// Name the payer gave the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
    /// Masked card number, e.g. `518901******0446`.
    pub card_mask: String,
    /// Card brand.
    pub card_type: BankCardType,
}

#[derive(Deserialize)]
struct LinkedBankCardOptionWire {
    #[serde(flatten)]
    base: PaymentOptionBase,
    instrument_type: Fixed<LinkedBankCardTag>,
    id: String,
    #[serde(default)]
    card_name: Option<String>,
    card_mask: String,
    card_type: BankCardType,
}

impl TryFrom<LinkedBankCardOptionWire> for LinkedBankCardOption {
    type Error = ProtocolError;

    fn try_from(wire: LinkedBankCardOptionWire) -> Result<Self, Self::Error> {
        wire.base.require_yoo_money()?;
        Ok(Self {
            base: wire.base,
            instrument_type: wire.instrument_type,
            card_id: wire.id,
            card_name: wire.card_name,
            card_mask: wire.card_mask,
            card_type: wire.card_type,
        })
    }
}

/// A wallet-family option with no instrument-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InstrumentOptionWire")]
pub struct InstrumentOption {
    /// Shared fields; `payment_method_type` is always `yoo_money`.
    #[serde(flatten)]
    pub base: PaymentOptionBase,
    /// The wallet-family instrument.
    pub instrument_type: YooMoneyInstrumentType,
}

#[derive(Deserialize)]
struct InstrumentOptionWire {
    #[serde(flatten)]
    base: PaymentOptionBase,
    instrument_type: YooMoneyInstrumentType,
}

impl TryFrom<InstrumentOptionWire> for InstrumentOption {
    type Error = ProtocolError;

    fn try_from(wire: InstrumentOptionWire) -> Result<Self, Self::Error> {
        wire.base.require_yoo_money()?;
        Ok(Self {
            base: wire.base,
            instrument_type: wire.instrument_type,
        })
    }
}

/// A payment option, resolved by `payment_method_type` and `instrument_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOption {
    /// The payer's wallet.
    YooMoneyWallet(WalletOption),
    /// A card linked to the payer's wallet.
    YooMoneyLinkedBankCard(LinkedBankCardOption),
    /// Any other wallet-family instrument.
    YooMoneyInstrument(InstrumentOption),
    /// Every other option.
    Generic(PaymentOptionBase),
}

const OPTION_CANDIDATES: &[Candidate<PaymentOption, MethodTags>] = &[
    Candidate {
        name: "yoo_money wallet",
        accepts: |tags| tags.is_instrument(YooMoneyInstrumentType::Wallet),
        decode: |value| decode_as(value).map(PaymentOption::YooMoneyWallet),
    },
    Candidate {
        name: "yoo_money linked_bank_card",
        accepts: |tags| tags.is_instrument(YooMoneyInstrumentType::LinkedBankCard),
        decode: |value| decode_as(value).map(PaymentOption::YooMoneyLinkedBankCard),
    },
    Candidate {
        name: "yoo_money instrument",
        accepts: |tags| tags.is(PaymentMethodType::YooMoney) && tags.instrument.is_some(),
        decode: |value| decode_as(value).map(PaymentOption::YooMoneyInstrument),
    },
    Candidate {
        name: "generic",
        accepts: |tags| tags.kind.is_some(),
        decode: |value| decode_as(value).map(PaymentOption::Generic),
    },
];

const OPTION_RESOLVER: Resolver<PaymentOption, MethodTags> = Resolver {
    hierarchy: "payment option",
    discriminator: Some("payment_method_type"),
    peek: |object| MethodTags::peek(object, "payment_method_type"),
    on_decode_failure: OnDecodeFailure::TryNext,
    candidates: OPTION_CANDIDATES,
};

impl PaymentOption {
    /// Resolves a JSON object to the most specific variant that decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`KassaError::UnsupportedVariant`] if `payment_method_type` is
    /// missing or unknown, or if not even the base fields decode.
    pub fn from_value(value: Value) -> Result<Self, KassaError> {
        OPTION_RESOLVER.resolve(value)
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
    pub const fn base(&self) -> &PaymentOptionBase {
        match self {
            Self::YooMoneyWallet(option) => &option.base,
            Self::YooMoneyLinkedBankCard(option) => &option.base,
            Self::YooMoneyInstrument(option) => &option.base,
            Self::Generic(base) => base,
        }
    }

    /// The payment method type.
    #[must_use]
    pub const fn payment_method_type(&self) -> PaymentMethodType {
        self.base().payment_method_type
    }

    /// Amount the payer is charged.
    #[must_use]
    pub const fn charge(&self) -> &MonetaryAmount {
        &self.base().charge
    }

    /// The wallet-family instrument, if this is a wallet-family option.
    #[must_use]
    pub const fn instrument_type(&self) -> Option<YooMoneyInstrumentType> {
        match self {
            Self::YooMoneyWallet(_) => Some(YooMoneyInstrumentType::Wallet),
            Self::YooMoneyLinkedBankCard(_) => Some(YooMoneyInstrumentType::LinkedBankCard),
            Self::YooMoneyInstrument(option) => Some(option.instrument_type),
            Self::Generic(_) => None,
        }
    }
}

impl Serialize for PaymentOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::YooMoneyWallet(option) => option.serialize(serializer),
            Self::YooMoneyLinkedBankCard(option) => option.serialize(serializer),
            Self::YooMoneyInstrument(option) => option.serialize(serializer),
            Self::Generic(base) => base.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
