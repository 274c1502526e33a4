use anyhow::Result;
use plotters::element::Cubiod;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::colormap::{coolwarm, normalize};
use super::{Area, FONT, padded_range};
use crate::aggregate::{ExperimentGrid, GRID_SIZE};
use crate::config::PlotConfig;

/// Width of one bar along either sweep axis, in percent.
const BAR: f64 = 5.0;
const AXIS_MAX: f64 = 105.0;

/// A cell is feasible when β + α leaves room for honest agents.
pub fn feasible(beta: f64, alpha: f64) -> bool {
    beta + alpha <= 100.0
}

/// Normalized color coordinate of every cell, zero where infeasible.
pub fn gradient(grid_size: usize) -> Vec<Vec<f64>> {
    let mut flat = Vec::with_capacity(grid_size * grid_size);
    for i in 0..grid_size {
        for j in 0..grid_size {
            let beta = ExperimentGrid::percent(i);
            let alpha = ExperimentGrid::percent(j);
            flat.push(if feasible(beta, alpha) {
                beta / 10.0 + alpha
            } else {
                0.0
            });
        }
    }
    normalize(&flat)
        .chunks(grid_size)
        .map(<[f64]>::to_vec)
        .collect()
}

/// Bars over the β/α plane, β on the first grid index.
pub fn render_surface(
    root: &Area<'_>,
    plot: &PlotConfig,
    title: Option<&str>,
    z_label: &str,
    grid: &ExperimentGrid,
) -> Result<()> {
    let heights = grid.cells.iter().flatten().copied().chain([0.0]);
    let height_range = padded_range(heights);
    let height_range = height_range.start.min(0.0)..height_range.end;

    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if let Some(title) = title {
        builder.caption(title, (FONT, plot.font_size));
    }
    let mut chart =
        builder.build_cartesian_3d(0.0..AXIS_MAX, height_range, 0.0..AXIS_MAX)?;
    chart.with_projection(|mut pb| {
        pb.pitch = 0.52;
        pb.yaw = 0.35;
        pb.scale = 0.8;
        pb.into_matrix()
    });
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(2)
        .label_style((FONT, plot.font_size.saturating_sub(6).max(10)))
        .draw()?;

    let shades = gradient(GRID_SIZE);
    let mut cells: Vec<(usize, usize)> = (0..GRID_SIZE)
        .flat_map(|i| (0..GRID_SIZE).map(move |j| (i, j)))
        .filter(|&(i, j)| feasible(ExperimentGrid::percent(i), ExperimentGrid::percent(j)))
        .filter(|&(i, j)| grid.get(i, j).is_finite())
        .collect();
    // Far cells first so nearer bars paint over them.
    cells.sort_by_key(|&(i, j)| std::cmp::Reverse(i + j));

    chart.draw_series(cells.into_iter().map(|(i, j)| {
        let beta = ExperimentGrid::percent(i);
        let alpha = ExperimentGrid::percent(j);
        let color = coolwarm(shades[i][j]);
        Cubiod::new(
            [(beta, 0.0, alpha), (beta + BAR, grid.get(i, j), alpha + BAR)],
            color.filled(),
            BLACK.mix(0.25),
        )
    }))?;

    let (w, h) = root.dim_in_pixel();
    let desc = (FONT, f64::from(plot.font_size)).into_font().color(&BLACK);
    root.draw(&Text::new(
        "β (%)",
        (w as i32 / 3, h as i32 - 30),
        desc.clone().pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;
    root.draw(&Text::new(
        "α (%)",
        (w as i32 * 4 / 5, h as i32 - 60),
        desc.clone().pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;
    root.draw(&Text::new(
        z_label.to_string(),
        (25, h as i32 / 2),
        desc.transform(FontTransform::Rotate270)
            .pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_cells_have_zero_gradient() {
        let g = gradient(GRID_SIZE);
        assert_eq!(g[20][20], 0.0);
        assert_eq!(g[15][10], 0.0);
        assert_eq!(g[0][0], 0.0);
        assert_eq!(g[0][20], 1.0);
        assert!((g[20][0] - 0.1).abs() < 1e-12);
        assert!((g[10][10] - 0.55).abs() < 1e-12);
    }

    #[test]
    fn feasibility_boundary_is_inclusive() {
        assert!(feasible(50.0, 50.0));
        assert!(!feasible(55.0, 50.0));
    }
}
