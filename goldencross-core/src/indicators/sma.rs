//! Trailing simple moving average.
//!
//! Rolling mean of closes over a fixed window.
//! Lookback: window - 1 (first defined value at index window-1).

use super::IndicatorError;

/// Trailing arithmetic mean of `prices` over `window` observations.
///
/// The output is aligned 1:1 with the input. Element `i` is `Some(mean)` of
/// `prices[i + 1 - window..=i]` once `i >= window - 1`, `None` before that.
///
/// Fails when `window` is zero or longer than the series; callers treat that
/// as "no tradable signal", not as a crash.
pub fn compute_trailing_average(
    prices: &[f64],
    window: usize,
) -> Result<Vec<Option<f64>>, IndicatorError> {
    let n = prices.len();
    if window == 0 || window > n {
        return Err(IndicatorError::InvalidWindow { window, len: n });
    }

    let mut result = vec![None; n];
    let divisor = window as f64;

    // Initial window sum
    let mut sum: f64 = prices[..window].iter().sum();
    result[window - 1] = Some(sum / divisor);

    // Roll the window forward
    for i in window..n {
        sum += prices[i] - prices[i - window];
        result[i] = Some(sum / divisor);
    }

    Ok(result)
}
