//! Reshaping loaded records into grids, trend buckets and scenario series.

use std::collections::BTreeMap;

use tracing::warn;

use crate::loader::LoadReport;
use crate::metric::Metric;

/// Cells per sweep axis: 0% to 100% in steps of 5.
pub const GRID_SIZE: usize = 21;
pub const GRID_STEP: u32 = 5;

/// Experiment key of grid cell `(i, j)`.
pub fn grid_key(i: usize, j: usize) -> String {
    format!("{}-{}", i * GRID_STEP as usize, j * GRID_STEP as usize)
}

/// Metric values over the two-parameter sweep. `cells[i][j]` belongs to
/// experiment `"{i*5}-{j*5}"`; missing experiments stay at zero.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentGrid {
    pub cells: [[f64; GRID_SIZE]; GRID_SIZE],
}

impl Default for ExperimentGrid {
    fn default() -> Self {
        Self {
            cells: [[0.0; GRID_SIZE]; GRID_SIZE],
        }
    }
}

impl ExperimentGrid {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i][j]
    }

    /// Percentage coordinate of grid index `i`.
    pub fn percent(i: usize) -> f64 {
        (i as u32 * GRID_STEP) as f64
    }
}

/// The sweep folded onto one axis at `x = i/2 + j*5`.
///
/// Keys are held in half units (`i + 10*j`) so bucketing is exact; distinct
/// cells that land on the same coordinate share a bucket and are averaged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrendSeries {
    buckets: BTreeMap<u32, Vec<f64>>,
}

impl TrendSeries {
    pub fn half_units(i: usize, j: usize) -> u32 {
        (i + 10 * j) as u32
    }

    pub fn push(&mut self, i: usize, j: usize, value: f64) {
        self.buckets
            .entry(Self::half_units(i, j))
            .or_default()
            .push(value);
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Raw values collected at coordinate `x`.
    pub fn bucket(&self, x: f64) -> Option<&[f64]> {
        let half = (x * 2.0).round();
        if half < 0.0 || (half / 2.0 - x).abs() > f64::EPSILON * x.abs().max(1.0) {
            return None;
        }
        self.buckets.get(&(half as u32)).map(Vec::as_slice)
    }

    /// `(x, mean)` pairs in ascending `x`.
    pub fn means(&self) -> Vec<(f64, f64)> {
        self.buckets
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(&half, values)| {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                (half as f64 / 2.0, mean)
            })
            .collect()
    }
}

/// Which single-parameter sweep a linear result belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// Malicious probability, files `"{p}-p"`.
    Probability,
    /// Bad behaviour, files `"{n}-num-bad"`.
    Bad,
    /// Random behaviour, files `"{n}-num-random"`.
    Random,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Probability, Scenario::Bad, Scenario::Random];

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Probability => "-p",
            Self::Bad => "-num-bad",
            Self::Random => "-num-random",
        }
    }

    /// Split an experiment key into its scenario and percentage.
    pub fn classify(key: &str) -> Option<(Scenario, Option<u32>)> {
        Self::ALL.into_iter().find_map(|scenario| {
            key.strip_suffix(scenario.suffix())
                .map(|prefix| (scenario, prefix.parse::<u32>().ok()))
        })
    }
}

/// Single-parameter sweeps read from the linear directory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenarioSeries {
    pub probability: BTreeMap<u32, f64>,
    pub bad: BTreeMap<u32, f64>,
    pub random: BTreeMap<u32, f64>,
}

impl ScenarioSeries {
    pub fn get(&self, scenario: Scenario) -> &BTreeMap<u32, f64> {
        match scenario {
            Scenario::Probability => &self.probability,
            Scenario::Bad => &self.bad,
            Scenario::Random => &self.random,
        }
    }

    fn get_mut(&mut self, scenario: Scenario) -> &mut BTreeMap<u32, f64> {
        match scenario {
            Scenario::Probability => &mut self.probability,
            Scenario::Bad => &mut self.bad,
            Scenario::Random => &mut self.random,
        }
    }
}

/// Everything plotted for one metric.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricData {
    pub metric: Metric,
    pub grid: ExperimentGrid,
    pub trend: TrendSeries,
    pub scenarios: ScenarioSeries,
    /// Value of experiment `0-0`, the honest-behaviour reference.
    pub honest_baseline: Option<f64>,
}

pub fn build_grid(metric: Metric, sweep: &LoadReport) -> (ExperimentGrid, TrendSeries) {
    let mut grid = ExperimentGrid::default();
    let mut trend = TrendSeries::default();
    for i in 0..GRID_SIZE {
        for j in 0..GRID_SIZE {
            if let Some(record) = sweep.get(&grid_key(i, j)) {
                let value = metric.derive(record);
                grid.cells[i][j] = value;
                trend.push(i, j, value);
            }
        }
    }
    (grid, trend)
}

pub fn build_scenarios(metric: Metric, linear: &LoadReport) -> ScenarioSeries {
    let mut series = ScenarioSeries::default();
    for (key, record) in &linear.records {
        match Scenario::classify(key) {
            Some((scenario, Some(percent))) => {
                series
                    .get_mut(scenario)
                    .insert(percent, metric.derive(record));
            }
            Some((_, None)) => {
                warn!(experiment = %key, "linear result without a numeric prefix; skipped");
            }
            None => {}
        }
    }
    series
}

pub fn aggregate(metric: Metric, sweep: &LoadReport, linear: &LoadReport) -> MetricData {
    let (grid, trend) = build_grid(metric, sweep);
    let scenarios = build_scenarios(metric, linear);
    let honest_baseline = sweep.get(&grid_key(0, 0)).map(|r| metric.derive(r));
    MetricData {
        metric,
        grid,
        trend,
        scenarios,
        honest_baseline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_keys_use_percent_steps() {
        assert_eq!(grid_key(0, 0), "0-0");
        assert_eq!(grid_key(1, 0), "5-0");
        assert_eq!(grid_key(20, 3), "100-15");
    }

    #[test]
    fn colliding_cells_share_a_bucket() {
        let mut trend = TrendSeries::default();
        // (10, 0) and (0, 1) both fold to x = 5.0.
        trend.push(10, 0, 2.0);
        trend.push(0, 1, 6.0);
        trend.push(1, 0, 9.0);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend.bucket(5.0), Some(&[2.0, 6.0][..]));
        assert_eq!(trend.means(), vec![(0.5, 9.0), (5.0, 4.0)]);
    }

    #[test]
    fn half_unit_keys_cover_the_composite_range() {
        assert_eq!(TrendSeries::half_units(0, 0), 0);
        assert_eq!(TrendSeries::half_units(1, 0), 1);
        assert_eq!(TrendSeries::half_units(20, 20), 220);
        let mut trend = TrendSeries::default();
        trend.push(20, 20, 1.0);
        assert_eq!(trend.means(), vec![(110.0, 1.0)]);
        assert_eq!(trend.bucket(0.25), None);
    }

    #[test]
    fn scenario_keys_are_classified_by_suffix() {
        assert_eq!(
            Scenario::classify("35-p"),
            Some((Scenario::Probability, Some(35)))
        );
        assert_eq!(Scenario::classify("10-num-bad"), Some((Scenario::Bad, Some(10))));
        assert_eq!(
            Scenario::classify("0-num-random"),
            Some((Scenario::Random, Some(0)))
        );
        assert_eq!(Scenario::classify("x-num-bad"), Some((Scenario::Bad, None)));
        assert_eq!(Scenario::classify("10-20"), None);
    }
}
