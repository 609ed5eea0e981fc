//! Simple moving average and rolling standard deviation.

use rust_decimal::{Decimal, MathematicalOps};

/// Simple moving average over `window` points.
///
/// Returns one value per full window; empty when the input is shorter than
/// the window or the window is zero.
pub fn sma(values: &[Decimal], window: usize) -> Vec<Decimal> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }

    let divisor = Decimal::from(window as u64);
    let mut out = Vec::with_capacity(values.len() - window + 1);
    let mut sum: Decimal = values[..window].iter().copied().sum();
    out.push(sum / divisor);

    for i in window..values.len() {
        sum += values[i] - values[i - window];
        out.push(sum / divisor);
    }

    out
}

/// Rolling sample standard deviation over `window` points.
///
/// Matches the usual spreadsheet convention (n-1 divisor). Requires a window
/// of at least 2; shorter windows or inputs yield an empty vector.
pub fn rolling_std(values: &[Decimal], window: usize) -> Vec<Decimal> {
    if window < 2 || values.len() < window {
        return Vec::new();
    }

    let n = Decimal::from(window as u64);
    let n_minus_one = Decimal::from((window - 1) as u64);
    let mut out = Vec::with_capacity(values.len() - window + 1);

    for slice in values.windows(window) {
        let mean: Decimal = slice.iter().copied().sum::<Decimal>() / n;
        let sq_dev: Decimal = slice
            .iter()
            .map(|v| {
                let d = *v - mean;
                d * d
            })
            .sum();
        let variance = sq_dev / n_minus_one;
        out.push(variance.sqrt().unwrap_or(Decimal::ZERO));
    }

    out
}
