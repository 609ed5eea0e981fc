//! One module per strategy variant.

pub(crate) mod ma_rsi_volume;
pub(crate) mod moving_average;
pub(crate) mod moving_average_anticipation;
pub(crate) mod rsi;
pub(crate) mod ut_bot;
pub(crate) mod vortex;
