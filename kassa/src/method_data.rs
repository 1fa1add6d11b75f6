//! Payment method data submitted for tokenization.
//!
//! [`PaymentMethodData`] is a closed enum over the concrete kinds of data a
//! payer can submit. Each variant struct carries its discriminator as a
//! [`Fixed`] field, so it re-validates its own `type` (and `instrument_type`)
//! when decoded directly. Decoding the enum peeks the discriminators once and
//! resolves the variant strictly: a value whose tags select a variant but
//! whose fields don't fit it is an error, not a silent fallback.
//!
//! Wallet-family variants additionally hold the payer's wallet token. It
//! never appears on the wire and is excluded from equality; it is surfaced
//! through [`PaymentMethodData::custom_headers`] instead.

use http::HeaderMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use kassa_proto::{BankCard, PaymentMethodType, ProtocolError, YooMoneyInstrumentType};

use crate::headers::{WalletAuthorization, wallet_headers};
use crate::resolve::{Candidate, MethodTags, OnDecodeFailure, Resolver, decode_as};
use crate::tag::{
    ApplePayTag, BankCardTag, Fixed, LinkedBankCardTag, SberbankTag, WalletTag, YooMoneyTag,
};
use crate::KassaError;

/// Raw bank card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankCardData {
    /// Always `bank_card`.
    #[serde(rename = "type")]
    pub kind: Fixed<BankCardTag>,
    /// The card.
    pub card: BankCard,
}

impl BankCardData {
    /// Wraps card data.
    #[must_use]
    pub const fn new(card: BankCard) -> Self {
        Self {
            kind: Fixed::new(),
            card,
        }
    }
}

/// An Apple Pay payment token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplePayData {
    /// Always `apple_pay`.
    #[serde(rename = "type")]
    pub kind: Fixed<ApplePayTag>,
    /// Opaque payment data produced by the device.
    pub payment_data: String,
}

impl ApplePayData {
    /// Wraps device payment data.
    #[must_use]
    pub fn new(payment_data: impl Into<String>) -> Self {
        Self {
            kind: Fixed::new(),
            payment_data: payment_data.into(),
        }
    }
}

/// Payment through the bank's SMS confirmation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SberbankData {
    /// Always `sberbank`.
    #[serde(rename = "type")]
    pub kind: Fixed<SberbankTag>,
    /// Payer phone number, digits only.
    pub phone: String,
}

impl SberbankData {
    /// Creates data for the given phone number.
    #[must_use]
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            kind: Fixed::new(),
            phone: phone.into(),
        }
    }
}

/// Payment from the payer's wallet balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletData {
    /// Always `yoo_money`.
    #[serde(rename = "type")]
    pub kind: Fixed<YooMoneyTag>,
    /// Always `wallet`.
    pub instrument_type: Fixed<WalletTag>,
    #[serde(skip)]
    authorization: Option<WalletAuthorization>,
}

impl WalletData {
    /// Creates wallet data authorized by the payer's wallet token.
    #[must_use]
    pub const fn new(authorization: WalletAuthorization) -> Self {
        Self {
            kind: Fixed::new(),
            instrument_type: Fixed::new(),
            authorization: Some(authorization),
        }
    }

    /// The wallet token, absent on data decoded from the wire.
    #[must_use]
    pub const fn authorization(&self) -> Option<&WalletAuthorization> {
        self.authorization.as_ref()
    }
}

impl PartialEq for WalletData {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for WalletData {}

/// Payment with a bank card linked to the payer's wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedBankCardData {
    /// Always `yoo_money`.
    #[serde(rename = "type")]
    pub kind: Fixed<YooMoneyTag>,
    /// Always `linked_bank_card`.
    pub instrument_type: Fixed<LinkedBankCardTag>,
    /// Identifier of the linked card.
    #[serde(rename = "id")]
    pub card_id: String,
    /// CVC2 or CVV2 code of the linked card.
    pub csc: String,
    #[serde(skip)]
    authorization: Option<WalletAuthorization>,
}

impl LinkedBankCardData {
    /// Creates linked card data authorized by the payer's wallet token.
    #[must_use]
    pub fn new(
        card_id: impl Into<String>,
        csc: impl Into<String>,
        authorization: WalletAuthorization,
    ) -> Self {
        Self {
            kind: Fixed::new(),
            instrument_type: Fixed::new(),
            card_id: card_id.into(),
            csc: csc.into(),
            authorization: Some(authorization),
        }
    }

    /// The wallet token, absent on data decoded from the wire.
    #[must_use]
    pub const fn authorization(&self) -> Option<&WalletAuthorization> {
        self.authorization.as_ref()
    }
}

impl PartialEq for LinkedBankCardData {
    fn eq(&self, other: &Self) -> bool {
        self.card_id == other.card_id && self.csc == other.csc
    }
}

impl Eq for LinkedBankCardData {}

/// Data for a payment method type with no dedicated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GenericMethodDataWire")]
pub struct GenericMethodData {
    #[serde(rename = "type")]
    kind: PaymentMethodType,
}

impl GenericMethodData {
    /// Creates data carrying only a type.
    ///
    /// Returns `None` for types that cannot be submitted without their own
    /// fields (`bank_card`, `apple_pay`, `sberbank`); use their variants.
    #[must_use]
    pub const fn new(kind: PaymentMethodType) -> Option<Self> {
        match kind {
            PaymentMethodType::BankCard
            | PaymentMethodType::ApplePay
            | PaymentMethodType::Sberbank => None,
            _ => Some(Self { kind }),
        }
    }

    /// The payment method type.
    #[must_use]
    pub const fn kind(&self) -> PaymentMethodType {
        self.kind
    }
}

#[derive(Deserialize)]
struct GenericMethodDataWire {
    #[serde(rename = "type")]
    kind: PaymentMethodType,
}

impl TryFrom<GenericMethodDataWire> for GenericMethodData {
    type Error = ProtocolError;

    fn try_from(wire: GenericMethodDataWire) -> Result<Self, Self::Error> {
        Self::new(wire.kind).ok_or_else(|| {
            ProtocolError::incorrect_type("a type without its own fields", wire.kind.as_str())
        })
    }
}

/// Payment method data, resolved by its `type` and `instrument_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethodData {
    /// A card linked to the payer's wallet.
    YooMoneyLinkedBankCard(LinkedBankCardData),
    /// The payer's wallet balance.
    YooMoneyWallet(WalletData),
    /// An Apple Pay token.
    ApplePay(ApplePayData),
    /// A phone number for the bank's SMS flow.
    Sberbank(SberbankData),
    /// Raw card data.
    BankCard(BankCardData),
    /// Any other known payment method type.
    Other(GenericMethodData),
}

const METHOD_DATA_CANDIDATES: &[Candidate<PaymentMethodData, MethodTags>] = &[
    Candidate {
        name: "yoo_money linked_bank_card",
        accepts: |tags| tags.is_instrument(YooMoneyInstrumentType::LinkedBankCard),
        decode: |value| decode_as(value).map(PaymentMethodData::YooMoneyLinkedBankCard),
    },
    Candidate {
        name: "yoo_money wallet",
        accepts: |tags| tags.is_instrument(YooMoneyInstrumentType::Wallet),
        decode: |value| decode_as(value).map(PaymentMethodData::YooMoneyWallet),
    },
    Candidate {
        name: "apple_pay",
        accepts: |tags| tags.is(PaymentMethodType::ApplePay),
        decode: |value| decode_as(value).map(PaymentMethodData::ApplePay),
    },
    Candidate {
        name: "sberbank",
        accepts: |tags| tags.is(PaymentMethodType::Sberbank),
        decode: |value| decode_as(value).map(PaymentMethodData::Sberbank),
    },
    Candidate {
        name: "bank_card",
        accepts: |tags| tags.is(PaymentMethodType::BankCard),
        decode: |value| decode_as(value).map(PaymentMethodData::BankCard),
    },
    Candidate {
        name: "other",
        accepts: |tags| tags.kind.is_some(),
        decode: |value| decode_as(value).map(PaymentMethodData::Other),
    },
];

const METHOD_DATA_RESOLVER: Resolver<PaymentMethodData, MethodTags> = Resolver {
    hierarchy: "payment method data",
    discriminator: Some("type"),
    peek: |object| MethodTags::peek(object, "type"),
    on_decode_failure: OnDecodeFailure::Fail,
    candidates: METHOD_DATA_CANDIDATES,
};

impl PaymentMethodData {
    /// Resolves a JSON object to its variant.
    ///
    /// # Errors
    ///
    /// Returns [`KassaError::UnsupportedVariant`] if `type` is missing or
    /// unknown, and [`KassaError::Malformed`] if the selected variant's
    /// fields are missing or ill-typed.
    pub fn from_value(value: Value) -> Result<Self, KassaError> {
        METHOD_DATA_RESOLVER.resolve(value)
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

    /// Returns the payment method type written on the wire.
    #[must_use]
    pub const fn payment_method_type(&self) -> PaymentMethodType {
        match self {
            Self::YooMoneyLinkedBankCard(_) | Self::YooMoneyWallet(_) => {
                PaymentMethodType::YooMoney
            }
            Self::ApplePay(_) => PaymentMethodType::ApplePay,
            Self::Sberbank(_) => PaymentMethodType::Sberbank,
            Self::BankCard(_) => PaymentMethodType::BankCard,
            Self::Other(data) => data.kind(),
        }
    }

    /// Returns the supplementary headers the tokenization request needs.
    ///
    /// Wallet-family data built with a token yields `Wallet-Authorization`;
    /// everything else yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`KassaError::InvalidHeader`] if the token is not a valid
    /// header value.
    pub fn custom_headers(&self) -> Result<HeaderMap, KassaError> {
        match self {
            Self::YooMoneyLinkedBankCard(data) => wallet_headers(data.authorization()),
            Self::YooMoneyWallet(data) => wallet_headers(data.authorization()),
            Self::ApplePay(_) | Self::Sberbank(_) | Self::BankCard(_) | Self::Other(_) => {
                Ok(HeaderMap::new())
            }
        }
    }
}

impl Serialize for PaymentMethodData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::YooMoneyLinkedBankCard(data) => data.serialize(serializer),
            Self::YooMoneyWallet(data) => data.serialize(serializer),
            Self::ApplePay(data) => data.serialize(serializer),
            Self::Sberbank(data) => data.serialize(serializer),
            Self::BankCard(data) => data.serialize(serializer),
            Self::Other(data) => data.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentMethodData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($data:ty)),* $(,)?) => {
        $(
            impl From<$data> for PaymentMethodData {
                fn from(data: $data) -> Self {
                    Self::$variant(data)
                }
            }
        )*
    };
}

impl_from_variant!(
    YooMoneyLinkedBankCard(LinkedBankCardData),
    YooMoneyWallet(WalletData),
    ApplePay(ApplePayData),
    Sberbank(SberbankData),
    BankCard(BankCardData),
    Other(GenericMethodData),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WALLET_AUTHORIZATION_HEADER;
    use serde_json::json;

    fn bank_card_json() -> Value {
        json!({
            "type": "bank_card",
            "card": {
                "number": "5555555555554477",
                "expiry_year": "2025",
                "expiry_month": "12",
                "csc": "123"
            }
        })
    }

    #[test]
    fn test_decode_bank_card() {
        let data = PaymentMethodData::from_value(bank_card_json()).unwrap();
        let PaymentMethodData::BankCard(data) = data else {
            panic!("expected bank card, got {data:?}");
        };
        assert_eq!(data.card.number, "5555555555554477");
        assert_eq!(data.card.expiry_year, "2025");
        assert_eq!(data.card.expiry_month, "12");
        assert_eq!(data.card.csc, "123");
        assert_eq!(data.card.cardholder, None);
    }

    #[test]
    fn test_bank_card_without_card_is_malformed() {
        let err = PaymentMethodData::from_value(json!({"type": "bank_card"})).unwrap_err();
        assert!(matches!(err, KassaError::Malformed { variant: "bank_card", .. }));
    }

    #[test]
    fn test_decode_wallet_family() {
        let data: PaymentMethodData =
            serde_json::from_value(json!({"type": "yoo_money", "instrument_type": "wallet"}))
                .unwrap();
        let PaymentMethodData::YooMoneyWallet(wallet) = &data else {
            panic!("expected wallet, got {data:?}");
        };
        assert!(wallet.authorization().is_none());
        assert!(data.custom_headers().unwrap().is_empty());

        let data = PaymentMethodData::from_value(json!({
            "type": "yoo_money",
            "instrument_type": "linked_bank_card",
            "id": "card-1",
            "csc": "321"
        }))
        .unwrap();
        assert_eq!(
            data,
            PaymentMethodData::YooMoneyLinkedBankCard(LinkedBankCardData::new(
                "card-1",
                "321",
                WalletAuthorization::new("ignored"),
            ))
        );
    }

    #[test]
    fn test_yoo_money_without_instrument_is_other() {
        let data = PaymentMethodData::from_value(json!({"type": "yoo_money"})).unwrap();
        assert_eq!(
            data,
            PaymentMethodData::Other(GenericMethodData::new(PaymentMethodType::YooMoney).unwrap())
        );
    }

    #[test]
    fn test_known_type_without_variant_is_other() {
        let data = PaymentMethodData::from_value(json!({"type": "google_pay"})).unwrap();
        assert_eq!(data.payment_method_type(), PaymentMethodType::GooglePay);
        assert!(matches!(data, PaymentMethodData::Other(_)));
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let err = PaymentMethodData::from_value(json!({"type": "dogecoin"})).unwrap_err();
        match err {
            KassaError::UnsupportedVariant { hierarchy, tag } => {
                assert_eq!(hierarchy, "payment method data");
                assert_eq!(tag.as_deref(), Some("dogecoin"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = PaymentMethodData::from_value(json!({"card": {}})).unwrap_err();
        assert!(matches!(err, KassaError::UnsupportedVariant { tag: None, .. }));
    }

    #[test]
    fn test_from_slice() {
        let body = br#"{"type": "sberbank", "phone": "79001234567"}"#;
        let data = PaymentMethodData::from_slice(body).unwrap();
        assert_eq!(data, SberbankData::new("79001234567").into());

        let err = PaymentMethodData::from_slice(b"{\"type\": ").unwrap_err();
        assert!(matches!(err, KassaError::Json(_)));
        assert!(err.to_string().starts_with("JSON error: "));
    }

    #[test]
    fn test_round_trip_all_variants() {
        let all: Vec<PaymentMethodData> = vec![
            LinkedBankCardData::new("card-1", "321", WalletAuthorization::new("t")).into(),
            WalletData::new(WalletAuthorization::new("t")).into(),
            ApplePayData::new("opaque").into(),
            SberbankData::new("79001234567").into(),
            BankCardData::new(BankCard::new("4111111111111111", "2030", "01", "000")).into(),
            GenericMethodData::new(PaymentMethodType::Sbp).unwrap().into(),
        ];
        for data in all {
            let json = serde_json::to_value(&data).unwrap();
            assert_eq!(json["type"], data.payment_method_type().as_str());
            assert!(json.get("wallet_authorization").is_none());
            let decoded = PaymentMethodData::from_value(json).unwrap();
            assert_eq!(decoded, data);
        }
    }

    #[test]
    fn test_encode_is_flat() {
        let data: PaymentMethodData =
            LinkedBankCardData::new("card-1", "321", WalletAuthorization::new("t")).into();
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "type": "yoo_money",
                "instrument_type": "linked_bank_card",
                "id": "card-1",
                "csc": "321"
            })
        );
    }

    #[test]
    fn test_variant_rejects_foreign_tag() {
        let err = serde_json::from_value::<SberbankData>(json!({"type": "bank_card", "phone": "7"}))
            .unwrap_err();
        assert!(err.to_string().contains("incorrect type"));
    }

    #[test]
    fn test_other_round_trips_for_every_accepted_type() {
        let all = [
            PaymentMethodType::BankCard,
            PaymentMethodType::YooMoney,
            PaymentMethodType::Sberbank,
            PaymentMethodType::ApplePay,
            PaymentMethodType::GooglePay,
            PaymentMethodType::MobileBalance,
            PaymentMethodType::Cash,
            PaymentMethodType::Qiwi,
            PaymentMethodType::Webmoney,
            PaymentMethodType::Alfabank,
            PaymentMethodType::Installments,
            PaymentMethodType::Sbp,
        ];
        let accepted: Vec<_> = all.into_iter().filter_map(GenericMethodData::new).collect();
        assert_eq!(accepted.len(), all.len() - 3);
        for generic in accepted {
            let data = PaymentMethodData::Other(generic);
            let json = serde_json::to_value(&data).unwrap();
            assert_eq!(json, json!({"type": generic.kind().as_str()}));
            assert_eq!(PaymentMethodData::from_value(json).unwrap(), data);
        }
    }

    #[test]
    fn test_generic_rejects_types_with_own_fields() {
        let err = serde_json::from_value::<GenericMethodData>(json!({"type": "bank_card"}))
            .unwrap_err();
        assert!(err.to_string().contains("incorrect type"));
        assert!(GenericMethodData::new(PaymentMethodType::BankCard).is_none());
        assert!(GenericMethodData::new(PaymentMethodType::Cash).is_some());
    }

    #[test]
    fn test_custom_headers_for_wallet_token() {
        let data: PaymentMethodData = WalletData::new(WalletAuthorization::new("abc")).into();
        let headers = data.custom_headers().unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[WALLET_AUTHORIZATION_HEADER], "Bearer abc");

        let data: PaymentMethodData = ApplePayData::new("opaque").into();
        assert!(data.custom_headers().unwrap().is_empty());
    }
}
