// Validator: loads both result directories and reports files that fail to parse.
use std::io;

use anyhow::Result;

use lor_results::cli;
use lor_results::logging::init_tracing;
use lor_results::pipeline::validate;

fn main() -> Result<()> {
    let args = cli::parse_or_exit("check-data");
    init_tracing();

    let config = args.load_config();
    let mut stdout = io::stdout().lock();
    validate(&args.dir_path, &args.linear_dir_path, &config.loader, &mut stdout)?;
    Ok(())
}
