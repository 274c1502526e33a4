//! The two batch runs behind the binaries.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::aggregate::{MetricData, aggregate};
use crate::config::{AppConfig, LoaderConfig};
use crate::curves::{FittedTrend, ScenarioCurves};
use crate::loader::{LoadReport, load_results};
use crate::metric::{METRICS, MetricSpec};
use crate::render::{self, render_scenarios, render_surface, render_trend};
use crate::viewer::PlotViewer;

const SEPARATOR_WIDTH: usize = 20;

/// Per-directory counts reported by [`validate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirSummary {
    pub loaded: usize,
    pub failed: usize,
}

/// Load both directories, printing a banner before each pass and one line
/// per file that failed to parse.
pub fn validate(
    dir: &Path,
    linear_dir: &Path,
    loader: &LoaderConfig,
    out: &mut impl Write,
) -> Result<(DirSummary, DirSummary)> {
    writeln!(out, "Data loading...")?;
    let sweep = check_dir(dir, loader, out)?;
    writeln!(out, "{}", "= ".repeat(SEPARATOR_WIDTH))?;
    writeln!(out, "Linear data loading...")?;
    let linear = check_dir(linear_dir, loader, out)?;
    Ok((sweep, linear))
}

fn check_dir(dir: &Path, loader: &LoaderConfig, out: &mut impl Write) -> Result<DirSummary> {
    let report = load_results(dir, loader)?;
    for failure in &report.failures {
        writeln!(out, "Error reading file {failure}")?;
    }
    let summary = DirSummary {
        loaded: report.len(),
        failed: report.failures.len(),
    };
    info!(
        dir = %dir.display(),
        loaded = summary.loaded,
        failed = summary.failed,
        "checked results"
    );
    Ok(summary)
}

/// One metric, aggregated and curve-fitted, ready to draw.
#[derive(Clone, Debug)]
pub struct MetricAnalysis {
    pub spec: MetricSpec,
    pub data: MetricData,
    pub trend: FittedTrend,
    pub scenarios: ScenarioCurves,
}

pub fn analyze(spec: &MetricSpec, sweep: &LoadReport, linear: &LoadReport, k: f64) -> MetricAnalysis {
    let data = aggregate(spec.metric, sweep, linear);
    let trend = FittedTrend::from_series(&data.trend, k, spec.fit_degree);
    let scenarios = ScenarioCurves::new(&data, &trend, k);
    if scenarios.honest.is_none() {
        warn!(metric = spec.stem, "no 0-0 result; honest reference line omitted");
    }
    MetricAnalysis {
        spec: *spec,
        data,
        trend,
        scenarios,
    }
}

/// Load both directories and render the full plot battery into the images
/// directory. Returns the written image paths in plot order.
pub fn plot_all(
    dir: &Path,
    linear_dir: &Path,
    config: &AppConfig,
    viewer: &mut dyn PlotViewer,
) -> Result<Vec<PathBuf>> {
    let sweep = load_results(dir, &config.loader)?;
    let linear = load_results(linear_dir, &config.loader)?;
    for failure in sweep.failures.iter().chain(&linear.failures) {
        warn!(error = %failure, "Error reading file");
    }
    info!(
        sweep = sweep.len(),
        linear = linear.len(),
        "loaded results"
    );

    let images_dir = &config.output.images_dir;
    fs::create_dir_all(images_dir)
        .with_context(|| format!("failed to create {}", images_dir.display()))?;

    let mut written = Vec::with_capacity(METRICS.len() * 3);
    for spec in &METRICS {
        let analysis = analyze(spec, &sweep, &linear, config.analysis.smoothing_k);
        written.extend(plot_metric(&analysis, config, viewer)?);
    }
    info!(count = written.len(), dir = %images_dir.display(), "saved plots");
    Ok(written)
}

fn plot_metric(
    analysis: &MetricAnalysis,
    config: &AppConfig,
    viewer: &mut dyn PlotViewer,
) -> Result<[PathBuf; 3]> {
    let spec = &analysis.spec;
    let plot = &config.plot;
    let images_dir = &config.output.images_dir;

    let surface_path = images_dir.join(spec.surface_file());
    render::emit(plot, spec.title, Some(&surface_path), viewer, |root, title| {
        render_surface(root, plot, title, spec.axis_label, &analysis.data.grid)
    })
    .with_context(|| format!("failed to render {}", surface_path.display()))?;

    let trend_path = images_dir.join(spec.trend_file());
    render::emit(plot, spec.title, Some(&trend_path), viewer, |root, title| {
        render_trend(root, plot, title, spec.axis_label, &analysis.trend)
    })
    .with_context(|| format!("failed to render {}", trend_path.display()))?;

    if config.output.export_csv {
        let csv_path = trend_path.with_extension("csv");
        fs::write(&csv_path, analysis.trend.to_csv())
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
    }

    let scenario_path = images_dir.join(spec.scenario_file());
    render::emit(plot, spec.title, Some(&scenario_path), viewer, |root, title| {
        render_scenarios(root, plot, title, spec.axis_label, &analysis.scenarios)
    })
    .with_context(|| format!("failed to render {}", scenario_path.display()))?;

    Ok([surface_path, trend_path, scenario_path])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_fatal() {
        let mut out = Vec::new();
        let missing = Path::new("/nonexistent/lor-results/sweep");
        let result = validate(missing, missing, &LoaderConfig::default(), &mut out);
        assert!(result.is_err());
        assert_eq!(String::from_utf8(out).unwrap(), "Data loading...\n");
    }
}
