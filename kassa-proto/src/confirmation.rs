//! Payment confirmation scenarios.
//!
//! The set of confirmation types is open-ended on the wire: the API adds new
//! scenarios over time, so unknown tags are kept as [`ConfirmationType::Other`]
//! and written back unchanged instead of failing the whole payload.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// A single confirmation scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfirmationType {
    /// The payer is redirected to a confirmation page.
    Redirect,
    /// A scenario this crate does not know, kept verbatim.
    Other(String),
}

impl ConfirmationType {
    /// Returns the wire representation of this scenario.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Redirect => "redirect",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for ConfirmationType {
    fn from(value: &str) -> Self {
        match value {
            "redirect" => Self::Redirect,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ConfirmationType {
    fn from(value: String) -> Self {
        if value == "redirect" {
            Self::Redirect
        } else {
            Self::Other(value)
        }
    }
}

impl fmt::Display for ConfirmationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConfirmationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConfirmationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// A set of confirmation scenarios, as offered by a payment option.
///
/// Behaves like a set over tags: union, intersection and symmetric
/// difference are defined over whatever tags are present, known or not.
/// Serializes as a JSON array of strings in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConfirmationTypes(BTreeSet<ConfirmationType>);

impl ConfirmationTypes {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a scenario. Returns `false` if it was already present.
    pub fn insert(&mut self, confirmation_type: ConfirmationType) -> bool {
        self.0.insert(confirmation_type)
    }

    /// Returns `true` if the set contains `confirmation_type`.
    #[must_use]
    pub fn contains(&self, confirmation_type: &ConfirmationType) -> bool {
        self.0.contains(confirmation_type)
    }

    /// Returns the scenarios present in either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }

    /// Returns the scenarios present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    /// Returns the scenarios present in exactly one of the sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        Self(self.0.symmetric_difference(&other.0).cloned().collect())
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the scenarios in wire order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfirmationType> {
        self.0.iter()
    }
}

impl FromIterator<ConfirmationType> for ConfirmationTypes {
    fn from_iter<I: IntoIterator<Item = ConfirmationType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ConfirmationTypes {
    type Item = &'a ConfirmationType;
    type IntoIter = std::collections::btree_set::Iter<'a, ConfirmationType>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<ConfirmationType> for ConfirmationTypes {
    fn from(value: ConfirmationType) -> Self {
        Self(BTreeSet::from([value]))
    }
}

impl Serialize for ConfirmationTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for ConfirmationTypes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tags = Vec::<ConfirmationType>::deserialize(deserializer)?;
        Ok(tags.into_iter().collect())
    }
}

/// Confirmation scenario requested for a tokenized payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// The scenario.
    #[serde(rename = "type")]
    pub confirmation_type: ConfirmationType,
    /// Where to send the payer once the payment is confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

impl Confirmation {
    /// Creates a redirect confirmation returning to `return_url`.
    #[must_use]
    pub fn redirect(return_url: impl Into<String>) -> Self {
        Self {
            confirmation_type: ConfirmationType::Redirect,
            return_url: Some(return_url.into()),
        }
    }
}
