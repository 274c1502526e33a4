// Plotter: renders surface, trend and scenario plots for every metric.
use anyhow::Result;

use lor_results::cli;
use lor_results::logging::init_tracing;
use lor_results::pipeline::plot_all;
use lor_results::viewer::{NullViewer, PlotViewer, WindowViewer};

fn main() -> Result<()> {
    let args = cli::parse_or_exit("plot-data");
    init_tracing();

    let config = args.load_config();
    let mut viewer: Box<dyn PlotViewer> = if config.display.interactive {
        Box::new(WindowViewer::new())
    } else {
        Box::new(NullViewer)
    };

    let written = plot_all(
        &args.dir_path,
        &args.linear_dir_path,
        &config,
        viewer.as_mut(),
    )?;
    println!(
        "Saved {} plots to {}",
        written.len(),
        config.output.images_dir.display()
    );
    Ok(())
}
