//! Smoothed and fitted one-dimensional curves derived from aggregated data.

use std::collections::BTreeMap;
use std::fmt::Write;

use tracing::warn;

use crate::aggregate::{MetricData, Scenario, TrendSeries};
use crate::fit::fitted_curve;
use crate::smoothing::{sparse_data, sparse_values};

/// The folded sweep after bucket means, smoothing and polynomial fitting.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedTrend {
    pub xs: Vec<f64>,
    pub means: Vec<f64>,
    pub smoothed: Vec<f64>,
    /// `None` when the fit could not be computed (no data, non-finite values).
    pub fitted: Option<Vec<f64>>,
}

impl FittedTrend {
    pub fn from_series(trend: &TrendSeries, k: f64, degree: usize) -> Self {
        let means = trend.means();
        let smoothed = sparse_data(&means, k);
        let xs: Vec<f64> = means.iter().map(|&(x, _)| x).collect();
        let fitted = match fitted_curve(&xs, &smoothed, degree) {
            Ok(fitted) => Some(fitted),
            Err(err) => {
                warn!(degree, error = %err, "trend fit skipped");
                None
            }
        };
        Self {
            xs,
            means: means.into_iter().map(|(_, m)| m).collect(),
            smoothed,
            fitted,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn smoothed_points(&self) -> Vec<(f64, f64)> {
        self.xs.iter().copied().zip(self.smoothed.iter().copied()).collect()
    }

    pub fn fitted_points(&self) -> Option<Vec<(f64, f64)>> {
        self.fitted
            .as_ref()
            .map(|fitted| self.xs.iter().copied().zip(fitted.iter().copied()).collect())
    }

    pub fn to_csv(&self) -> String {
        let mut csv = String::from("x,mean,smoothed,fitted\n");
        for (i, x) in self.xs.iter().enumerate() {
            let fitted = self
                .fitted
                .as_ref()
                .map(|f| format!("{:.6}", f[i]))
                .unwrap_or_default();
            let _ = writeln!(
                csv,
                "{x:.1},{:.6},{:.6},{fitted}",
                self.means[i], self.smoothed[i]
            );
        }
        csv
    }
}

/// Smooth a scenario sweep by position and place it at its percentage keys.
pub fn smooth_scenario(series: &BTreeMap<u32, f64>, k: f64) -> Vec<(f64, f64)> {
    let values: Vec<f64> = series.values().copied().collect();
    series
        .keys()
        .map(|&key| key as f64)
        .zip(sparse_values(&values, k))
        .collect()
}

/// Curves drawn on the scenario comparison plot.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioCurves {
    pub baseline: Option<Vec<(f64, f64)>>,
    pub honest: Option<f64>,
    pub bad: Vec<(f64, f64)>,
    pub random: Vec<(f64, f64)>,
    pub probability: Vec<(f64, f64)>,
}

impl ScenarioCurves {
    pub fn new(data: &MetricData, trend: &FittedTrend, k: f64) -> Self {
        Self {
            baseline: trend.fitted_points(),
            honest: data.honest_baseline,
            bad: smooth_scenario(data.scenarios.get(Scenario::Bad), k),
            random: smooth_scenario(data.scenarios.get(Scenario::Random), k),
            probability: smooth_scenario(data.scenarios.get(Scenario::Probability), k),
        }
    }
}
