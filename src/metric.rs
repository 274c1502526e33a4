//! The eight plotted metrics and their output table.

use crate::record::ResultRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    InvalidAcceptRate,
    ValidRejectRate,
    AverageAdjacency,
    MaxAdjacency,
    AcceptRate,
    CoinSatisfaction,
    TraderSatisfaction,
    MaxCooperation,
}

/// Everything needed to derive, label and save one metric's plots.
#[derive(Clone, Copy, Debug)]
pub struct MetricSpec {
    pub metric: Metric,
    pub title: &'static str,
    pub axis_label: &'static str,
    /// Image file stem; the three plots add nothing, `-2d` and `-scenario`.
    pub stem: &'static str,
    pub fit_degree: usize,
}

impl MetricSpec {
    pub fn surface_file(&self) -> String {
        format!("{}.png", self.stem)
    }

    pub fn trend_file(&self) -> String {
        format!("{}-2d.png", self.stem)
    }

    pub fn scenario_file(&self) -> String {
        format!("{}-scenario.png", self.stem)
    }

    pub fn derive(&self, record: &ResultRecord) -> f64 {
        self.metric.derive(record)
    }
}

/// Plot order of the full battery.
pub const METRICS: [MetricSpec; 8] = [
    MetricSpec {
        metric: Metric::InvalidAcceptRate,
        title: "Percentage of Invalid Accepted Fractal Rings",
        axis_label: "Invalid Accepted Fractal Rings (%)",
        stem: "invalid-accepted",
        fit_degree: 12,
    },
    MetricSpec {
        metric: Metric::ValidRejectRate,
        title: "Percentage of Valid Rejected Fractal Rings",
        axis_label: "Valid Rejected Fractal Rings (%)",
        stem: "valid-rejected",
        fit_degree: 12,
    },
    MetricSpec {
        metric: Metric::AverageAdjacency,
        title: "Average Number of Communication Complexity",
        axis_label: "Average No. of Communications",
        stem: "average-communication",
        fit_degree: 5,
    },
    MetricSpec {
        metric: Metric::MaxAdjacency,
        title: "Maximum Number of Communication Complexity",
        axis_label: "Max No. of Communications",
        stem: "maximum-communication",
        fit_degree: 5,
    },
    MetricSpec {
        metric: Metric::AcceptRate,
        title: "Average Fractal Ring Acceptance Rate",
        axis_label: "Fractal Ring Acceptance Rate (%)",
        stem: "fractal-acceptance",
        fit_degree: 7,
    },
    MetricSpec {
        metric: Metric::CoinSatisfaction,
        title: "Average Coin Satisfaction",
        axis_label: "Coin Satisfaction (%)",
        stem: "coin-satisfaction",
        fit_degree: 12,
    },
    MetricSpec {
        metric: Metric::TraderSatisfaction,
        title: "Average Trader Satisfaction",
        axis_label: "Trader Satisfaction (%)",
        stem: "trader-satisfaction",
        fit_degree: 12,
    },
    MetricSpec {
        metric: Metric::MaxCooperation,
        title: "Maximum Cooperation",
        axis_label: "ℓ (Maximum Cooperation)",
        stem: "max-cooperation",
        fit_degree: 5,
    },
];

impl Metric {
    /// Metric value of one record. The two rates are per fractal ring, in
    /// percent; a run without fractal rings yields NaN or infinity.
    pub fn derive(self, record: &ResultRecord) -> f64 {
        let per_fractal = |count: i64| count as f64 / record.fractals as f64 * 100.0;
        match self {
            Self::InvalidAcceptRate => per_fractal(record.invalid_accept_fractal),
            Self::ValidRejectRate => per_fractal(record.valid_reject_fractal),
            Self::AverageAdjacency => record.average_adjacency,
            Self::MaxAdjacency => record.max_adjacency as f64,
            Self::AcceptRate => record.accept_fractal,
            Self::CoinSatisfaction => record.coin_satisfaction,
            Self::TraderSatisfaction => record.trader_satisfaction,
            Self::MaxCooperation => record.max_cooperation as f64,
        }
    }

    /// Entry of this metric in [`METRICS`], which lists variants in
    /// declaration order.
    pub fn spec(self) -> &'static MetricSpec {
        let index = match self {
            Self::InvalidAcceptRate => 0,
            Self::ValidRejectRate => 1,
            Self::AverageAdjacency => 2,
            Self::MaxAdjacency => 3,
            Self::AcceptRate => 4,
            Self::CoinSatisfaction => 5,
            Self::TraderSatisfaction => 6,
            Self::MaxCooperation => 7,
        };
        &METRICS[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn record() -> ResultRecord {
        ResultRecord {
            coins: 100,
            fractals: 50,
            run_coins: 80,
            submit_fractal: 2.5,
            accept_fractal: 91.25,
            invalid_accept_fractal: 5,
            valid_reject_fractal: 2,
            coin_satisfaction: 72.1,
            trader_satisfaction: 60.0,
            average_adjacency: 12.75,
            max_adjacency: 40,
            max_cooperation: 7,
        }
    }

    #[test]
    fn rates_are_percent_of_fractals() {
        let r = record();
        assert_eq!(Metric::InvalidAcceptRate.derive(&r), 10.0);
        assert_eq!(Metric::ValidRejectRate.derive(&r), 4.0);
    }

    #[test]
    fn plain_metrics_are_verbatim() {
        let r = record();
        assert_eq!(Metric::AverageAdjacency.derive(&r), 12.75);
        assert_eq!(Metric::MaxAdjacency.derive(&r), 40.0);
        assert_eq!(Metric::AcceptRate.derive(&r), 91.25);
        assert_eq!(Metric::CoinSatisfaction.derive(&r), 72.1);
        assert_eq!(Metric::TraderSatisfaction.derive(&r), 60.0);
        assert_eq!(Metric::MaxCooperation.derive(&r), 7.0);
    }

    #[test]
    fn zero_fractals_does_not_panic() {
        let mut r = record();
        r.fractals = 0;
        assert!(Metric::InvalidAcceptRate.derive(&r).is_infinite());
        r.invalid_accept_fractal = 0;
        assert!(Metric::InvalidAcceptRate.derive(&r).is_nan());
    }

    #[test]
    fn table_yields_24_distinct_files() {
        let files: HashSet<String> = METRICS
            .iter()
            .flat_map(|m| [m.surface_file(), m.trend_file(), m.scenario_file()])
            .collect();
        assert_eq!(files.len(), 24);
        assert!(files.contains("invalid-accepted.png"));
        assert!(files.contains("invalid-accepted-2d.png"));
        assert!(files.contains("max-cooperation-scenario.png"));
    }

    #[test]
    fn spec_lookup_round_trips() {
        for spec in &METRICS {
            assert_eq!(spec.metric.spec().metric, spec.metric);
            assert_eq!(spec.metric.spec().stem, spec.stem);
        }
        assert_eq!(Metric::AcceptRate.spec().fit_degree, 7);
    }
}
