//! Monetary amounts and currency codes.
//!
//! Amounts travel as decimal strings (`"10.37"`), never as JSON numbers, so
//! the value survives the round trip without binary floating point drift.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

/// ISO-4217 currency accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrencyCode {
    /// Russian ruble.
    Rub,
    /// US dollar.
    Usd,
    /// Euro.
    Eur,
}

impl CurrencyCode {
    /// Returns the three-letter code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rub => "RUB",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }

    /// Returns the currency sign, e.g. `₽` for rubles.
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Rub => '₽',
            Self::Usd => '$',
            Self::Eur => '€',
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RUB" => Ok(Self::Rub),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            other => Err(ProtocolError::UnknownTag {
                kind: "currency code",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An exact decimal amount in a given currency.
///
/// # Serialization
///
/// ```json
/// { "value": "10.37", "currency": "RUB" }
/// ```
///
/// The scale of the decimal is kept as received, so `"10.370"` is written
/// back as `"10.370"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonetaryAmount {
    /// The amount.
    pub value: Decimal,
    /// The currency of [`Self::value`].
    pub currency: CurrencyCode,
}

impl MonetaryAmount {
    /// Creates an amount from a decimal magnitude and a currency.
    #[must_use]
    pub const fn new(value: Decimal, currency: CurrencyCode) -> Self {
        Self { value, currency }
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// Parses a wire decimal string.
///
/// Only plain decimal notation, `-?digits(.digits)?`, is accepted. Signs,
/// separators, surrounding whitespace and exponents all fail, so every
/// accepted string is written back exactly as received.
///
/// # Errors
///
/// Returns [`ProtocolError::DecimalConversion`] if `s` is not an exact decimal.
pub fn parse_decimal(s: &str) -> Result<Decimal, ProtocolError> {
    let conversion_error = || ProtocolError::DecimalConversion(s.to_owned());
    if !is_plain_decimal(s) {
        return Err(conversion_error());
    }
    Decimal::from_str_exact(s).map_err(|_| conversion_error())
}

fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    digits(integer) && fraction.is_none_or(digits)
}

#[derive(Serialize, Deserialize)]
struct MonetaryAmountWire {
    value: String,
    currency: CurrencyCode,
}

impl Serialize for MonetaryAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MonetaryAmountWire {
            value: self.value.to_string(),
            currency: self.currency,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MonetaryAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = MonetaryAmountWire::deserialize(deserializer)?;
        let value = parse_decimal(&wire.value).map_err(serde::de::Error::custom)?;
        Ok(Self::new(value, wire.currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_monetary_amount_decode() {
        let amount: MonetaryAmount =
            serde_json::from_value(json!({"value": "10.37", "currency": "RUB"})).unwrap();
        assert_eq!(amount.value, Decimal::new(1037, 2));
        assert_eq!(amount.currency, CurrencyCode::Rub);
    }

    #[test]
    fn test_monetary_amount_reencodes_identical_json() {
        let source = json!({"value": "10.37", "currency": "RUB"});
        let amount: MonetaryAmount = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(amount).unwrap(), source);
    }

    #[test]
    fn test_monetary_amount_keeps_scale() {
        let amount = MonetaryAmount::new(Decimal::new(10370, 3), CurrencyCode::Eur);
        let encoded = serde_json::to_value(amount).unwrap();
        assert_eq!(encoded["value"], "10.370");
        let decoded: MonetaryAmount = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, amount);
    }

    #[test]
    fn test_monetary_amount_large_value_has_no_exponent() {
        let amount = MonetaryAmount::new(Decimal::new(123_456_789_012_345_678, 2), CurrencyCode::Usd);
        let encoded = serde_json::to_value(amount).unwrap();
        assert_eq!(encoded["value"], "1234567890123456.78");
    }

    #[test]
    fn test_monetary_amount_rejects_non_decimal_string() {
        let err = serde_json::from_value::<MonetaryAmount>(json!({"value": "ten", "currency": "RUB"}))
            .unwrap_err();
        assert!(err.to_string().contains("cannot convert"));
        assert!(
            serde_json::from_value::<MonetaryAmount>(json!({"value": "1e3", "currency": "RUB"}))
                .is_err()
        );
    }

    #[test]
    fn test_monetary_amount_rejects_number_literal() {
        let result = serde_json::from_value::<MonetaryAmount>(json!({"value": 10.37, "currency": "RUB"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_currency_fails() {
        let result = serde_json::from_value::<MonetaryAmount>(json!({"value": "1.00", "currency": "GBP"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("0").unwrap(), Decimal::ZERO);
        assert!(matches!(
            parse_decimal("12,5"),
            Err(ProtocolError::DecimalConversion(s)) if s == "12,5"
        ));
    }

    #[test]
    fn test_parse_decimal_rejects_non_plain_notation() {
        for input in ["1_000.50", " 10.37 ", "+5", "", "-", ".5", "5.", "1.2.3", "--1"] {
            assert!(
                matches!(
                    parse_decimal(input),
                    Err(ProtocolError::DecimalConversion(ref s)) if s == input
                ),
                "accepted {input:?}"
            );
        }
        assert_eq!(parse_decimal("-0.01").unwrap(), Decimal::new(-1, 2));
    }

    #[test]
    fn test_monetary_amount_accepts_only_exact_wire_strings() {
        for value in ["1_000.50", " 10.37 ", "+5"] {
            let result = serde_json::from_value::<MonetaryAmount>(
                json!({"value": value, "currency": "RUB"}),
            );
            assert!(result.is_err(), "accepted {value:?}");
        }
        let source = json!({"value": "1000.50", "currency": "RUB"});
        let amount: MonetaryAmount = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(amount).unwrap(), source);
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(CurrencyCode::Rub.symbol(), '₽');
        assert_eq!(CurrencyCode::Eur.symbol(), '€');
        assert_eq!(CurrencyCode::Usd.symbol(), '$');
    }
}
