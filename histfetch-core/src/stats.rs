use serde::{Deserialize, Serialize};

use histfetch_types::Records;

/// Count, moments, and quartiles of one price column.
///
/// Quartiles use linear interpolation between closest ranks; `std` is the sample
/// standard deviation and is `None` for fewer than two values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Number of finite values described.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub std: Option<f64>,
    /// Smallest value.
    pub min: f64,
    /// First quartile.
    pub p25: f64,
    /// Median.
    pub p50: f64,
    /// Third quartile.
    pub p75: f64,
    /// Largest value.
    pub max: f64,
}

impl SeriesStats {
    /// Describe arbitrary values. Non-finite values are skipped.
    ///
    /// Returns `None` when nothing finite remains.
    #[must_use]
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut xs: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if xs.is_empty() {
            return None;
        }
        xs.sort_by(f64::total_cmp);

        #[allow(clippy::cast_precision_loss)]
        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let std = (xs.len() > 1).then(|| {
            let ss: f64 = xs.iter().map(|x| (x - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        });

        Some(Self {
            count: xs.len(),
            mean,
            std,
            min: xs[0],
            p25: quantile(&xs, 0.25),
            p50: quantile(&xs, 0.50),
            p75: quantile(&xs, 0.75),
            max: xs[xs.len() - 1],
        })
    }

    /// Describe the representative price of fetched records.
    ///
    /// Bars use the close, trades the print price, quotes the bid/ask midpoint.
    #[must_use]
    pub fn describe(records: &Records) -> Option<Self> {
        match records {
            Records::Bars(v) => Self::from_values(v.iter().map(|b| b.close)),
            Records::Trades(v) => Self::from_values(v.iter().map(|t| t.price)),
            Records::Quotes(v) => {
                Self::from_values(v.iter().map(|q| (q.ask_price + q.bid_price) / 2.0))
            }
        }
    }
}

// `xs` is sorted and non-empty.
fn quantile(xs: &[f64], q: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let pos = q * (xs.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(xs.len() - 1);
    let frac = pos - pos.floor();
    xs[lo] + (xs[hi] - xs[lo]) * frac
}
