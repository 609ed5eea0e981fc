//! Directional trading signal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A strategy's directional advice. Interpreted by the engine against the
/// current position: `Buy` while flat opens, `Sell` while long closes,
/// anything else holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}
