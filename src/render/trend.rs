use anyhow::Result;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use super::colormap::{coolwarm, normalize};
use super::{Area, FONT, PURPLE, finite_points, padded_range};
use crate::config::PlotConfig;
use crate::curves::FittedTrend;

/// Smoothed trend as gradient-colored segments with the dashed fit on top.
pub fn render_trend(
    root: &Area<'_>,
    plot: &PlotConfig,
    title: Option<&str>,
    y_label: &str,
    trend: &FittedTrend,
) -> Result<()> {
    let points = finite_points(&trend.smoothed_points());
    let fitted = trend
        .fitted_points()
        .map(|pts| finite_points(&pts))
        .unwrap_or_default();

    let x_range = padded_range(points.iter().map(|p| p.0));
    let y_range = padded_range(points.iter().chain(&fitted).map(|p| p.1));

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80);
    if let Some(title) = title {
        builder.caption(title, (FONT, plot.font_size + 2));
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("γ (%)")
        .y_desc(y_label)
        .axis_desc_style((FONT, plot.font_size))
        .draw()?;

    // Color by position along the reliability axis, capped at 100%.
    let gradient: Vec<f64> = points
        .iter()
        .map(|&(x, _)| if x > 100.0 { 0.0 } else { x })
        .collect();
    let shades = normalize(&gradient);
    chart.draw_series(points.windows(2).zip(&shades).map(|(pair, &t)| {
        PathElement::new(vec![pair[0], pair[1]], coolwarm(t).stroke_width(2))
    }))?;

    if !fitted.is_empty() {
        chart.draw_series(DashedLineSeries::new(
            fitted,
            10,
            6,
            PURPLE.stroke_width(2),
        ))?;
    }

    Ok(())
}
