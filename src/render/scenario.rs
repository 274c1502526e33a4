use anyhow::Result;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use super::{Area, DARK_GREEN, FONT, ORANGE, PURPLE, finite_points, padded_range};
use crate::config::PlotConfig;
use crate::curves::ScenarioCurves;

/// Legend position of each curve, by drawing order: the honest reference
/// is drawn second but listed last.
pub const LEGEND_ORDER: [usize; 5] = [0, 2, 3, 4, 1];

const X_RANGE: std::ops::Range<f64> = -5.0..105.0;

struct Curve {
    label: &'static str,
    color: RGBColor,
    dashed: bool,
    points: Vec<(f64, f64)>,
}

fn curves(data: &ScenarioCurves) -> [Curve; 5] {
    let honest = data
        .honest
        .filter(|v| v.is_finite())
        .map(|v| vec![(X_RANGE.start, v), (X_RANGE.end, v)])
        .unwrap_or_default();
    [
        Curve {
            label: "Reliability Level (γ)",
            color: PURPLE,
            dashed: true,
            points: data.baseline.as_deref().map(finite_points).unwrap_or_default(),
        },
        Curve {
            label: "Honest Behavior (α=β=0)",
            color: DARK_GREEN,
            dashed: true,
            points: honest,
        },
        Curve {
            label: "Bad Behavior (α)",
            color: RED,
            dashed: false,
            points: finite_points(&data.bad),
        },
        Curve {
            label: "Random Behavior (β)",
            color: ORANGE,
            dashed: false,
            points: finite_points(&data.random),
        },
        Curve {
            label: "Malicious Probability (p)",
            color: BLUE,
            dashed: false,
            points: finite_points(&data.probability),
        },
    ]
}

/// Fitted reliability trend against the three behavioural sweeps.
pub fn render_scenarios(
    root: &Area<'_>,
    plot: &PlotConfig,
    title: Option<&str>,
    y_label: &str,
    data: &ScenarioCurves,
) -> Result<()> {
    let curves = curves(data);
    let y_range = padded_range(curves.iter().flat_map(|c| c.points.iter().map(|p| p.1)));

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80);
    if let Some(title) = title {
        builder.caption(title, (FONT, plot.font_size + 4));
    }
    let mut chart = builder.build_cartesian_2d(X_RANGE, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Amount (%)")
        .y_desc(y_label)
        .axis_desc_style((FONT, plot.font_size + 2))
        .draw()?;

    for curve in &curves {
        let style = curve.color.stroke_width(2);
        if curve.dashed {
            chart.draw_series(DashedLineSeries::new(curve.points.clone(), 10, 6, style))?;
        } else {
            chart.draw_series(LineSeries::new(curve.points.clone(), style))?;
        }
    }

    // Legend entries are attached to empty series so their order is
    // independent of the drawing order above.
    for &idx in &LEGEND_ORDER {
        let curve = &curves[idx];
        if curve.points.is_empty() {
            continue;
        }
        let color = curve.color;
        chart
            .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
            .label(curve.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, plot.legend_font_size))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
