//! Fee breakdown attached to a payment option.

use serde::{Deserialize, Serialize};

use crate::MonetaryAmount;

/// Commission charged by the payment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFee {
    /// The commission amount.
    pub charge: MonetaryAmount,
}

/// Commission charged by the counterparty, e.g. the payer's bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartyFee {
    /// The commission amount.
    pub charge: MonetaryAmount,
}

/// Commission the payer pays on top of the charge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    /// Service commission, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceFee>,
    /// Counterparty commission, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<CounterpartyFee>,
}
