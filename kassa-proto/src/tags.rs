//! Closed discriminator sets used for variant dispatch.
//!
//! Every tag serializes as its wire string and rejects unknown strings with
//! [`ProtocolError::UnknownTag`]. Resolvers peek at raw JSON and call
//! [`FromStr`] directly, so the conversion lives outside of serde too.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

macro_rules! wire_tag {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Returns the wire representation of this tag.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = ProtocolError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(ProtocolError::UnknownTag {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_tag! {
    /// Type of the source of funds for a payment, the `type` discriminator of
    /// payment method data and the `payment_method_type` of payment options.
    PaymentMethodType, "payment method type" {
        /// Bank card.
        BankCard => "bank_card",
        /// `YooMoney` wallet or a card linked to it.
        YooMoney => "yoo_money",
        /// Sberbank Online, confirmed by phone.
        Sberbank => "sberbank",
        /// Apple Pay device token.
        ApplePay => "apple_pay",
        /// Google Pay token.
        GooglePay => "google_pay",
        /// Mobile phone balance.
        MobileBalance => "mobile_balance",
        /// Cash through a payment terminal.
        Cash => "cash",
        /// QIWI wallet.
        Qiwi => "qiwi",
        /// `WebMoney` purse.
        Webmoney => "webmoney",
        /// Alfa-Click.
        Alfabank => "alfabank",
        /// Installment plan.
        Installments => "installments",
        /// Faster Payments System.
        Sbp => "sbp",
    }
}

wire_tag! {
    /// Secondary discriminator of the wallet family, sent as `instrument_type`.
    YooMoneyInstrumentType, "instrument type" {
        /// Pay from the wallet balance.
        Wallet => "wallet",
        /// Pay with a bank card linked to the wallet.
        LinkedBankCard => "linked_bank_card",
    }
}

wire_tag! {
    /// Whether a payment option may be saved for recurring payments.
    SavePaymentMethod, "save payment method" {
        /// Saving is offered.
        Allowed => "allowed",
        /// Saving is not possible.
        Forbidden => "forbidden",
        /// The payer decides.
        UserSelects => "user_selects",
    }
}

wire_tag! {
    /// Level of payer identification a payment option requires.
    IdentificationRequirement, "identification requirement" {
        /// Simplified identification.
        Simplified => "simplified",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_type_wire_names() {
        let json = serde_json::to_string(&PaymentMethodType::BankCard).unwrap();
        assert_eq!(json, "\"bank_card\"");
        let parsed: PaymentMethodType = serde_json::from_str("\"yoo_money\"").unwrap();
        assert_eq!(parsed, PaymentMethodType::YooMoney);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = "bitcoin".parse::<PaymentMethodType>().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnknownTag { kind: "payment method type", ref value } if value == "bitcoin"
        ));
        assert!(serde_json::from_str::<YooMoneyInstrumentType>("\"card\"").is_err());
    }

    #[test]
    fn test_save_payment_method_from_str() {
        assert_eq!(
            "user_selects".parse::<SavePaymentMethod>().unwrap(),
            SavePaymentMethod::UserSelects
        );
        assert_eq!(SavePaymentMethod::Forbidden.to_string(), "forbidden");
    }
}
