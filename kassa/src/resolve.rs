//! Variant resolution for envelope hierarchies.
//!
//! A [`Resolver`] is a static, ordered table of candidates. The discriminators
//! of an inbound JSON object are peeked once; each candidate then answers
//! from those peeked tags whether it accepts the object, and the accepted
//! candidate decodes it. The table order is the priority order, most
//! specific variant first and the open base last.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::str::FromStr;

use kassa_proto::{PaymentMethodType, ProtocolError, YooMoneyInstrumentType};

use crate::KassaError;

/// What a resolver does when an accepted candidate fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnDecodeFailure {
    /// The failure is reported as [`KassaError::Malformed`].
    Fail,
    /// The next accepting candidate is tried.
    TryNext,
}

/// One entry of a resolver table.
pub(crate) struct Candidate<T, P> {
    /// Variant name used in errors and traces.
    pub name: &'static str,
    /// Whether this variant accepts an object with the peeked tags.
    pub accepts: fn(&P) -> bool,
    /// Decodes the whole object into the variant.
    pub decode: fn(Value) -> Result<T, ProtocolError>,
}

/// An ordered table of candidates over peeked discriminators `P`.
pub(crate) struct Resolver<T: 'static, P: 'static> {
    /// Hierarchy name used in errors and traces.
    pub hierarchy: &'static str,
    /// Key reported as the tag of unsupported values.
    pub discriminator: Option<&'static str>,
    /// Extracts the discriminators from the object.
    pub peek: fn(&Map<String, Value>) -> P,
    pub on_decode_failure: OnDecodeFailure,
    pub candidates: &'static [Candidate<T, P>],
}

impl<T: 'static, P: 'static> Resolver<T, P> {
    /// Resolves `value` to the first accepting variant.
    ///
    /// # Errors
    ///
    /// Returns [`KassaError::UnsupportedVariant`] if `value` is not an object or
    /// no candidate accepts it, and [`KassaError::Malformed`] if a candidate
    /// accepts it but cannot decode it under [`OnDecodeFailure::Fail`].
    pub(crate) fn resolve(&self, value: Value) -> Result<T, KassaError> {
        let Value::Object(object) = &value else {
            return Err(self.unsupported(None));
        };
        let tags = (self.peek)(object);
        let tag = self
            .discriminator
            .and_then(|key| object.get(key))
            .and_then(Value::as_str)
            .map(str::to_owned);

        for candidate in self.candidates {
            if !(candidate.accepts)(&tags) {
                continue;
            }
            match (candidate.decode)(value.clone()) {
                Ok(resolved) => {
                    #[cfg(feature = "telemetry")]
                    tracing::trace!(
                        hierarchy = self.hierarchy,
                        variant = candidate.name,
                        "Resolved variant"
                    );
                    return Ok(resolved);
                }
                Err(source) if self.on_decode_failure == OnDecodeFailure::Fail => {
                    return Err(KassaError::Malformed {
                        variant: candidate.name,
                        source,
                    });
                }
                #[allow(unused_variables)]
                Err(source) => {
                    #[cfg(feature = "telemetry")]
                    tracing::debug!(
                        hierarchy = self.hierarchy,
                        variant = candidate.name,
                        error = %source,
                        "Variant did not decode, trying next candidate"
                    );
                }
            }
        }

        Err(self.unsupported(tag))
    }

    const fn unsupported(&self, tag: Option<String>) -> KassaError {
        KassaError::UnsupportedVariant {
            hierarchy: self.hierarchy,
            tag,
        }
    }
}

/// Decodes a whole object into one variant struct.
pub(crate) fn decode_as<T: DeserializeOwned>(value: Value) -> Result<T, ProtocolError> {
    Ok(serde_json::from_value(value)?)
}

/// Parses the string at `key` as a tag, if present and known.
pub(crate) fn peek_tag<T: FromStr>(object: &Map<String, Value>, key: &str) -> Option<T> {
    object.get(key)?.as_str()?.parse().ok()
}

/// Discriminators of the payment-method-shaped hierarchies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MethodTags {
    /// The payment method type, if present and known.
    pub kind: Option<PaymentMethodType>,
    /// The wallet-family `instrument_type`, if present and known.
    pub instrument: Option<YooMoneyInstrumentType>,
}

impl MethodTags {
    pub(crate) fn peek(object: &Map<String, Value>, kind_key: &str) -> Self {
        Self {
            kind: peek_tag(object, kind_key),
            instrument: peek_tag(object, "instrument_type"),
        }
    }

    pub(crate) fn is(&self, kind: PaymentMethodType) -> bool {
        self.kind == Some(kind)
    }

    pub(crate) fn is_instrument(&self, instrument: YooMoneyInstrumentType) -> bool {
        self.is(PaymentMethodType::YooMoney) && self.instrument == Some(instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum Shape {
        Circle(u64),
        Any(String),
    }

    fn circle(value: Value) -> Result<Shape, ProtocolError> {
        let radius = value
            .get("radius")
            .and_then(Value::as_u64)
            .ok_or_else(|| ProtocolError::incorrect_type("radius", "none"))?;
        Ok(Shape::Circle(radius))
    }

    fn any(value: Value) -> Result<Shape, ProtocolError> {
        Ok(Shape::Any(value["kind"].as_str().unwrap_or_default().to_owned()))
    }

    fn peek_kind(object: &Map<String, Value>) -> Option<String> {
        object.get("kind").and_then(Value::as_str).map(str::to_owned)
    }

    const CANDIDATES: &[Candidate<Shape, Option<String>>] = &[
        Candidate {
            name: "circle",
            accepts: |kind| kind.as_deref() == Some("circle"),
            decode: circle,
        },
        Candidate {
            name: "any",
            accepts: Option::is_some,
            decode: any,
        },
    ];

    fn resolver(on_decode_failure: OnDecodeFailure) -> Resolver<Shape, Option<String>> {
        Resolver {
            hierarchy: "shape",
            discriminator: Some("kind"),
            peek: peek_kind,
            on_decode_failure,
            candidates: CANDIDATES,
        }
    }

    #[test]
    fn test_resolve_picks_first_accepting_candidate() {
        let shape = resolver(OnDecodeFailure::Fail)
            .resolve(json!({"kind": "circle", "radius": 3}))
            .unwrap();
        assert_eq!(shape, Shape::Circle(3));
    }

    #[test]
    fn test_resolve_falls_back_to_open_base() {
        let shape = resolver(OnDecodeFailure::Fail)
            .resolve(json!({"kind": "square"}))
            .unwrap();
        assert_eq!(shape, Shape::Any("square".into()));
    }

    #[test]
    fn test_strict_resolver_reports_malformed_variant() {
        let err = resolver(OnDecodeFailure::Fail)
            .resolve(json!({"kind": "circle"}))
            .unwrap_err();
        assert!(matches!(err, KassaError::Malformed { variant: "circle", .. }));
    }

    #[test]
    fn test_lenient_resolver_tries_next_candidate() {
        let shape = resolver(OnDecodeFailure::TryNext)
            .resolve(json!({"kind": "circle"}))
            .unwrap();
        assert_eq!(shape, Shape::Any("circle".into()));
    }

    #[test]
    fn test_resolve_without_discriminator_is_unsupported() {
        let err = resolver(OnDecodeFailure::Fail)
            .resolve(json!({"radius": 3}))
            .unwrap_err();
        assert!(matches!(
            err,
            KassaError::UnsupportedVariant { hierarchy: "shape", tag: None }
        ));
        let err = resolver(OnDecodeFailure::Fail).resolve(json!([1, 2])).unwrap_err();
        assert!(matches!(err, KassaError::UnsupportedVariant { .. }));
    }

    #[test]
    fn test_method_tags_peek() {
        let object = json!({"type": "yoo_money", "instrument_type": "wallet"});
        let tags = MethodTags::peek(object.as_object().unwrap(), "type");
        assert!(tags.is(PaymentMethodType::YooMoney));
        assert!(tags.is_instrument(YooMoneyInstrumentType::Wallet));
        assert!(!tags.is_instrument(YooMoneyInstrumentType::LinkedBankCard));

        let object = json!({"type": "dogecoin"});
        let tags = MethodTags::peek(object.as_object().unwrap(), "type");
        assert_eq!(tags.kind, None);
    }
}
