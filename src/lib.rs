//! Result analysis for the fractal ring trading simulation.
//!
//! The library backs two binaries: `check-data`, which only surfaces parse
//! failures, and `plot-data`, which aggregates a parameter sweep into
//! surface, trend and scenario plots.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod curves;
pub mod fit;
pub mod loader;
pub mod logging;
pub mod metric;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod smoothing;
pub mod viewer;
