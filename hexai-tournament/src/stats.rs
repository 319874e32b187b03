//! Summary statistics for match reports
//!
//! Level 4 - Utilities

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Significance level of the Mann-Whitney test
pub const SIGNIFICANCE: f64 = 0.05;

/// Arithmetic mean; NaN for an empty sample
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; NaN for an empty sample
pub fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Outcome of a Mann-Whitney U test
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MannWhitney {
    /// U statistic of the first sample
    pub u: f64,
    /// One-sided p-value
    pub p_value: f64,
}

impl MannWhitney {
    pub fn verdict(&self) -> Verdict {
        if self.p_value > SIGNIFICANCE {
            Verdict::SamePerformances
        } else {
            Verdict::DifferentPerformances
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    SamePerformances,
    DifferentPerformances,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::SamePerformances => write!(f, "same performances"),
            Verdict::DifferentPerformances => write!(f, "different performances"),
        }
    }
}

/// One-sided Mann-Whitney U test of "`x` tends to be smaller than `y`".
///
/// Uses the normal approximation with tie correction and continuity
/// correction. None if either sample is empty.
pub fn mann_whitney_less(x: &[f64], y: &[f64]) -> Option<MannWhitney> {
    if x.is_empty() || y.is_empty() {
        return None;
    }
    let (n1, n2) = (x.len() as f64, y.len() as f64);

    let mut pooled: Vec<f64> = x.iter().chain(y).copied().collect();
    pooled.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let (ranks, tie_term) = average_ranks(&pooled);

    let rank_sum: f64 = x.iter().map(|v| rank_of(&pooled, &ranks, *v)).sum();
    let u1 = rank_sum - n1 * (n1 + 1.0) / 2.0;
    let u2 = n1 * n2 - u1;

    let n = n1 + n2;
    let mu = n1 * n2 / 2.0;
    let sigma = (n1 * n2 / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)))).sqrt();

    let p_value = if sigma > 0.0 {
        let z = (u2 - mu - 0.5) / sigma;
        normal_sf(z).clamp(0.0, 1.0)
    } else {
        // Every observation tied
        1.0
    };

    Some(MannWhitney { u: u1, p_value })
}

/// Average rank of every sorted position and the tie term sum(t^3 - t)
fn average_ranks(sorted: &[f64]) -> (Vec<f64>, f64) {
    let mut ranks = vec![0.0; sorted.len()];
    let mut tie_term = 0.0;
    let mut start = 0;
    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && sorted[end] == sorted[start] {
            end += 1;
        }
        let rank = (start + end + 1) as f64 / 2.0;
        ranks[start..end].fill(rank);
        let t = (end - start) as f64;
        tie_term += t * t * t - t;
        start = end;
    }
    (ranks, tie_term)
}

fn rank_of(sorted: &[f64], ranks: &[f64], value: f64) -> f64 {
    let idx = sorted.partition_point(|v| *v < value);
    ranks[idx]
}

/// Upper tail of the standard normal distribution
fn normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / std::f64::consts::SQRT_2)
}

/// Complementary error function (Numerical Recipes `erfcc`, |error| < 1.2e-7)
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87 + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let r = t * poly.exp();
    if x >= 0.0 {
        r
    } else {
        2.0 - r
    }
}
