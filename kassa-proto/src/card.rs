//! Bank card records.
//!
//! [`BankCard`] is raw card data the payer types in and the client submits
//! for tokenization. [`PaymentMethodBankCard`] and [`PaymentInstrumentBankCard`]
//! are the masked descriptions the API returns for cards it has saved.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Card brand as reported by the API.
///
/// Brands this crate does not know are kept verbatim in
/// [`BankCardType::Other`] and written back unchanged, since a new brand
/// must not break a saved-card listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BankCardType {
    /// Mastercard.
    MasterCard,
    /// Visa.
    Visa,
    /// Mir.
    Mir,
    /// American Express.
    AmericanExpress,
    /// JCB.
    Jcb,
    /// China `UnionPay`.
    Cup,
    /// Diners Club.
    DinersClub,
    /// Discover.
    DiscoverCard,
    /// Maestro.
    Maestro,
    /// A brand this crate does not know, kept verbatim.
    Other(String),
}

impl BankCardType {
    /// Returns the wire representation of this brand.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::MasterCard => "MasterCard",
            Self::Visa => "Visa",
            Self::Mir => "Mir",
            Self::AmericanExpress => "AmericanExpress",
            Self::Jcb => "JCB",
            Self::Cup => "CUP",
            Self::DinersClub => "DinersClub",
            Self::DiscoverCard => "DiscoverCard",
            Self::Maestro => "Maestro",
            Self::Other(brand) => brand,
        }
    }
}

impl From<String> for BankCardType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "MasterCard" => Self::MasterCard,
            "Visa" => Self::Visa,
            "Mir" => Self::Mir,
            "AmericanExpress" => Self::AmericanExpress,
            "JCB" => Self::Jcb,
            "CUP" => Self::Cup,
            "DinersClub" => Self::DinersClub,
            "DiscoverCard" => Self::DiscoverCard,
            "Maestro" => Self::Maestro,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for BankCardType {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl fmt::Display for BankCardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BankCardType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BankCardType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Raw bank card data entered by the payer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankCard {
    /// Card number.
    pub number: String,
    /// Expiry year, `YYYY`.
    pub expiry_year: String,
    /// Expiry month, `MM`.
    pub expiry_month: String,
    /// CVC2 or CVV2 code, 3 or 4 digits.
    pub csc: String,
    /// Name of the card holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardholder: Option<String>,
}

impl BankCard {
    /// Creates card data without a card holder name.
    #[must_use]
    pub fn new(
        number: impl Into<String>,
        expiry_year: impl Into<String>,
        expiry_month: impl Into<String>,
        csc: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            expiry_year: expiry_year.into(),
            expiry_month: expiry_month.into(),
            csc: csc.into(),
            cardholder: None,
        }
    }

    /// Sets the card holder name.
    #[must_use]
    pub fn with_cardholder(mut self, cardholder: impl Into<String>) -> Self {
        self.cardholder = Some(cardholder.into());
        self
    }
}

// Card numbers and security codes must not end up in logs.
impl fmt::Debug for BankCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last4 = self
            .number
            .get(self.number.len().saturating_sub(4)..)
            .unwrap_or_default();
        f.debug_struct("BankCard")
            .field("number", &format_args!("****{last4}"))
            .field("expiry_year", &self.expiry_year)
            .field("expiry_month", &self.expiry_month)
            .field("csc", &"***")
            .field("cardholder", &self.cardholder)
            .finish()
    }
}

/// Masked description of a saved bank card payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodBankCard {
    /// First six digits of the card number.
    pub first6: String,
    /// Last four digits of the card number.
    pub last4: String,
    /// Expiry year, `YYYY`.
    pub expiry_year: String,
    /// Expiry month, `MM`.
    pub expiry_month: String,
    /// Card brand.
    pub card_type: BankCardType,
}

/// A bank card saved as a payment instrument of the payer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInstrumentBankCard {
    /// Identifier to pay with this card later.
    pub payment_instrument_id: String,
    /// First six digits of the card number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first6: Option<String>,
    /// Last four digits of the card number.
    pub last4: String,
    /// Whether the CVC must be entered when paying with this card.
    pub csc_required: bool,
    /// Card brand.
    pub card_type: BankCardType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bank_card_wire_names() {
        let card = BankCard::new("5555555555554477", "2025", "12", "123");
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(
            value,
            json!({
                "number": "5555555555554477",
                "expiry_year": "2025",
                "expiry_month": "12",
                "csc": "123"
            })
        );
    }

    #[test]
    fn test_bank_card_debug_is_masked() {
        let card = BankCard::new("5555555555554477", "2025", "12", "123").with_cardholder("IVAN");
        let debug = format!("{card:?}");
        assert!(debug.contains("****4477"));
        assert!(!debug.contains("5555555555554477"));
        assert!(!debug.contains("123\""));
    }

    #[test]
    fn test_payment_method_bank_card_decode() {
        let card: PaymentMethodBankCard = serde_json::from_value(json!({
            "first6": "427918",
            "last4": "7918",
            "expiry_year": "2017",
            "expiry_month": "07",
            "card_type": "MasterCard"
        }))
        .unwrap();
        assert_eq!(
            card,
            PaymentMethodBankCard {
                first6: "427918".into(),
                last4: "7918".into(),
                expiry_year: "2017".into(),
                expiry_month: "07".into(),
                card_type: BankCardType::MasterCard,
            }
        );
    }

    #[test]
    fn test_unknown_brand_is_kept_verbatim() {
        let brand: BankCardType = serde_json::from_str("\"Troy\"").unwrap();
        assert_eq!(brand, BankCardType::Other("Troy".into()));
        assert_eq!(serde_json::to_string(&brand).unwrap(), "\"Troy\"");
        let brand: BankCardType = serde_json::from_str("\"JCB\"").unwrap();
        assert_eq!(brand, BankCardType::Jcb);
        assert_eq!(serde_json::to_string(&brand).unwrap(), "\"JCB\"");
    }

    #[test]
    fn test_payment_instrument_bank_card_optional_first6() {
        let card: PaymentInstrumentBankCard = serde_json::from_value(json!({
            "payment_instrument_id": "pi-1",
            "last4": "0026",
            "csc_required": true,
            "card_type": "Visa"
        }))
        .unwrap();
        assert!(card.first6.is_none());
        assert!(card.csc_required);
        let encoded = serde_json::to_value(&card).unwrap();
        assert!(encoded.get("first6").is_none());
    }
}
