//! Bitmap renderers for the three plot kinds.
//!
//! Each renderer only draws already-aggregated data. [`emit`] runs a
//! renderer once untitled into the saved file (trimmed afterwards) and once
//! titled into a buffer handed to the viewer.

pub mod colormap;
pub mod scenario;
pub mod surface;
pub mod trend;
pub mod trim;

use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::config::PlotConfig;
use crate::viewer::{PlotViewer, RenderedFrame};

pub use scenario::render_scenarios;
pub use surface::render_surface;
pub use trend::render_trend;
pub use trim::trim_image;

pub type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub const FONT: &str = "sans-serif";
pub const PURPLE: RGBColor = RGBColor(128, 0, 128);
pub const ORANGE: RGBColor = RGBColor(255, 165, 0);
pub const DARK_GREEN: RGBColor = RGBColor(0, 128, 0);

/// Render one figure: saved untitled and trimmed when `save_as` is given,
/// then shown titled when the viewer is active.
pub fn emit<F>(
    plot: &PlotConfig,
    title: &str,
    save_as: Option<&Path>,
    viewer: &mut dyn PlotViewer,
    draw: F,
) -> Result<()>
where
    F: Fn(&Area<'_>, Option<&str>) -> Result<()>,
{
    let size = (plot.width, plot.height);

    if let Some(path) = save_as {
        {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE)?;
            draw(&root, None)?;
            root.present()
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        trim_image(path)?;
        debug!(path = %path.display(), "saved plot");
    }

    if viewer.enabled() {
        let mut rgb = vec![0u8; plot.width as usize * plot.height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut rgb, size).into_drawing_area();
            root.fill(&WHITE)?;
            draw(&root, Some(title))?;
            root.present()?;
        }
        viewer.show(RenderedFrame {
            title: title.to_string(),
            width: plot.width,
            height: plot.height,
            rgb,
        })?;
    }
    Ok(())
}

/// Padded axis range over the finite values; `0..1` when there are none.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < 1e-9 {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

/// Drop points that cannot be placed on a chart.
pub fn finite_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}
