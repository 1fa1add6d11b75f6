//! Header names and prefixes used by the supplementary request headers.

/// Header carrying the payer's wallet authorization for wallet-family payments.
pub const WALLET_AUTHORIZATION_HEADER: &str = "Wallet-Authorization";

/// Prefix of bearer credentials.
pub const BEARER_PREFIX: &str = "Bearer ";
