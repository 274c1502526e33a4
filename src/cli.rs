use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug, Clone)]
#[command(about, disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Directory of two-parameter sweep results (`{beta}-{alpha}.result`)
    #[arg(value_name = "DIR_PATH")]
    pub dir_path: PathBuf,

    /// Directory of single-parameter sweep results (`{n}-p`, `{n}-num-bad`, `{n}-num-random`)
    #[arg(value_name = "LINEAR_DIR_PATH")]
    pub linear_dir_path: PathBuf,

    /// Path to config TOML (written with commented defaults if missing)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn load_config(&self) -> AppConfig {
        self.config
            .as_deref()
            .map(AppConfig::load_or_default)
            .unwrap_or_default()
    }
}

pub fn usage(prog: &str) -> String {
    format!("Usage: {prog} <directory_path> <linear_directory_path>")
}

/// Parse the process arguments. Any argument error, `--help` included,
/// prints the usage line and exits 1.
pub fn parse_or_exit(prog: &str) -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(_) => {
            println!("{}", usage(prog));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_positionals_are_required() {
        assert!(Args::try_parse_from(["check-data"]).is_err());
        assert!(Args::try_parse_from(["check-data", "a"]).is_err());
        assert!(Args::try_parse_from(["check-data", "a", "b", "c"]).is_err());

        let args = Args::try_parse_from(["check-data", "a", "b"]).expect("parse");
        assert_eq!(args.dir_path, PathBuf::from("a"));
        assert_eq!(args.linear_dir_path, PathBuf::from("b"));
        assert!(args.config.is_none());
    }

    #[test]
    fn config_flag_is_optional() {
        let args =
            Args::try_parse_from(["plot-data", "a", "b", "--config", "x.toml"]).expect("parse");
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn help_and_version_flags_are_argument_errors() {
        assert!(Args::try_parse_from(["check-data", "--help"]).is_err());
        assert!(Args::try_parse_from(["check-data", "-h"]).is_err());
        assert!(Args::try_parse_from(["check-data", "-V"]).is_err());
        assert!(Args::try_parse_from(["check-data", "--version"]).is_err());
    }

    #[test]
    fn usage_names_the_program() {
        assert_eq!(
            usage("plot-data"),
            "Usage: plot-data <directory_path> <linear_directory_path>"
        );
    }
}
