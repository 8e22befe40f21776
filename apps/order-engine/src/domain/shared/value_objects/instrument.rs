//! Instrument token value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broker-assigned numeric token for a tradeable instrument.
///
/// Tokens come from the exchange instrument dump (NSE.json) and are what the
/// broker API expects in place of human-readable symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentToken(i64);

impl InstrumentToken {
    /// Create a new instrument token.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the numeric token value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for InstrumentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for InstrumentToken {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<InstrumentToken> for i64 {
    fn from(token: InstrumentToken) -> Self {
        token.0
    }
}
