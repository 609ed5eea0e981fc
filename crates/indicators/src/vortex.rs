//! Vortex indicator (VI+ / VI−).

use model::PriceSeries;
use rust_decimal::Decimal;

/// Vortex indicator over `window` periods.
///
/// Returns `(vi_plus, vi_minus)` as rolling `window`-sums of the positive and
/// negative vortex movements divided by the rolling true-range sum. The last
/// elements correspond to the latest candle; both vectors are empty when
/// there is not enough history (`window + 1` candles are needed).
pub fn vortex(series: &PriceSeries, window: usize) -> (Vec<Decimal>, Vec<Decimal>) {
    let candles = series.candles();
    if window == 0 || candles.len() < window + 1 {
        return (Vec::new(), Vec::new());
    }

    let n = candles.len() - 1;
    let mut tr = Vec::with_capacity(n);
    let mut vm_plus = Vec::with_capacity(n);
    let mut vm_minus = Vec::with_capacity(n);

    for pair in candles.windows(2) {
        let prev = &pair[0];
        let c = &pair[1];
        tr.push(
            (c.high - c.low)
                .max((c.high - prev.close).abs())
                .max((c.low - prev.close).abs()),
        );
        vm_plus.push((c.high - prev.low).abs());
        vm_minus.push((c.low - prev.high).abs());
    }

    let mut vi_plus = Vec::with_capacity(n - window + 1);
    let mut vi_minus = Vec::with_capacity(n - window + 1);

    for i in window..=n {
        let sum_tr: Decimal = tr[i - window..i].iter().copied().sum();
        let sum_plus: Decimal = vm_plus[i - window..i].iter().copied().sum();
        let sum_minus: Decimal = vm_minus[i - window..i].iter().copied().sum();

        if sum_tr.is_zero() {
            vi_plus.push(Decimal::ZERO);
            vi_minus.push(Decimal::ZERO);
        } else {
            vi_plus.push(sum_plus / sum_tr);
            vi_minus.push(sum_minus / sum_tr);
        }
    }

    (vi_plus, vi_minus)
}
