//! Fixed discriminator fields.
//!
//! Provides [`Fixed<T>`], a zero-sized field that serializes as one constant
//! tag string and rejects every other value on deserialization. Envelope
//! variants embed it for their `type` (and `instrument_type`) fields so a
//! variant can never be decoded from, or encoded with, someone else's tag.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use kassa_proto::{PaymentMethodType, ProtocolError, YooMoneyInstrumentType};

/// The constant wire value carried by a [`Fixed`] field.
pub trait TagValue {
    /// The tag string written to and required on the wire.
    const VALUE: &'static str;
}

/// A discriminator field whose value is fixed by `T`.
///
/// Serializes as [`TagValue::VALUE`]. Deserializing any other string fails
/// with [`ProtocolError::IncorrectType`].
pub struct Fixed<T>(PhantomData<T>);

impl<T> Fixed<T> {
    /// Creates the tag.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Fixed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Fixed<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Fixed<T> {}

impl<T> PartialEq for Fixed<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for Fixed<T> {}

impl<T> Hash for Fixed<T> {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

impl<T: TagValue> fmt::Debug for Fixed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({:?})", T::VALUE)
    }
}

impl<T: TagValue> Serialize for Fixed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(T::VALUE)
    }
}

impl<'de, T: TagValue> Deserialize<'de> for Fixed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let found = String::deserialize(deserializer)?;
        if found == T::VALUE {
            Ok(Self::new())
        } else {
            Err(serde::de::Error::custom(ProtocolError::incorrect_type(
                T::VALUE,
                found,
            )))
        }
    }
}

macro_rules! tag_value {
    ($(#[$meta:meta])* $name:ident => $value:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {}

        impl TagValue for $name {
            const VALUE: &'static str = $value;
        }
    };
}

tag_value!(
    /// `type` = `bank_card`.
    BankCardTag => PaymentMethodType::BankCard.as_str()
);
tag_value!(
    /// `type` = `apple_pay`.
    ApplePayTag => PaymentMethodType::ApplePay.as_str()
);
tag_value!(
    /// `type` = `sberbank`.
    SberbankTag => PaymentMethodType::Sberbank.as_str()
);
tag_value!(
    /// `type` = `yoo_money`.
    YooMoneyTag => PaymentMethodType::YooMoney.as_str()
);
tag_value!(
    /// `instrument_type` = `wallet`.
    WalletTag => YooMoneyInstrumentType::Wallet.as_str()
);
tag_value!(
    /// `instrument_type` = `linked_bank_card`.
    LinkedBankCardTag => YooMoneyInstrumentType::LinkedBankCard.as_str()
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_serializes_as_value() {
        let json = serde_json::to_string(&Fixed::<BankCardTag>::new()).unwrap();
        assert_eq!(json, "\"bank_card\"");
    }

    #[test]
    fn test_fixed_accepts_its_value() {
        let tag: Fixed<WalletTag> = serde_json::from_str("\"wallet\"").unwrap();
        assert_eq!(tag, Fixed::new());
    }

    #[test]
    fn test_fixed_rejects_other_value() {
        let err = serde_json::from_str::<Fixed<SberbankTag>>("\"bank_card\"").unwrap_err();
        assert!(err.to_string().contains("incorrect type: expected sberbank, found bank_card"));
    }
}
