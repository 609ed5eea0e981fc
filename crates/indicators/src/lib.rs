//! Technical indicators over price/volume series.
//!
//! All functions are pure and return only the *valid* points: an indicator
//! with a `window`-sized warm-up omits the leading entries a spreadsheet
//! would show as NaN. The last element of every output vector always
//! corresponds to the most recent input candle.

mod atr;
mod moving;
mod rsi;
mod vortex;

pub use atr::atr;
pub use moving::{rolling_std, sma};
pub use rsi::rsi;
pub use vortex::vortex;
