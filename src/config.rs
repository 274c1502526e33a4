use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default = "LoaderConfig::default_suffix")]
    pub suffix: String,
    #[serde(default)]
    pub strict_labels: bool,
}

impl LoaderConfig {
    fn default_suffix() -> String {
        ".result".to_string()
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            suffix: Self::default_suffix(),
            strict_labels: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "AnalysisConfig::default_smoothing_k")]
    pub smoothing_k: f64,
}

impl AnalysisConfig {
    fn default_smoothing_k() -> f64 {
        1.0
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            smoothing_k: Self::default_smoothing_k(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "PlotConfig::default_width")]
    pub width: u32,
    #[serde(default = "PlotConfig::default_height")]
    pub height: u32,
    #[serde(default = "PlotConfig::default_font_size")]
    pub font_size: u32,
    #[serde(default = "PlotConfig::default_legend_font_size")]
    pub legend_font_size: u32,
}

impl PlotConfig {
    fn default_width() -> u32 {
        1000
    }
    fn default_height() -> u32 {
        700
    }
    fn default_font_size() -> u32 {
        18
    }
    fn default_legend_font_size() -> u32 {
        13
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            font_size: Self::default_font_size(),
            legend_font_size: Self::default_legend_font_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "DisplayConfig::default_interactive")]
    pub interactive: bool,
}

impl DisplayConfig {
    fn default_interactive() -> bool {
        true
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            interactive: Self::default_interactive(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_images_dir")]
    pub images_dir: PathBuf,
    #[serde(default)]
    pub export_csv: bool,
}

impl OutputConfig {
    fn default_images_dir() -> PathBuf {
        PathBuf::from("images")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            images_dir: Self::default_images_dir(),
            export_csv: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Read `path`, falling back to defaults on any error. A missing file is
    /// created with every default written out as a comment.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!("Failed to parse config {}: {err}. Using defaults.", path.display());
                    }
                },
                Err(err) => {
                    warn!("Failed to read config {}: {err}. Using defaults.", path.display());
                }
            }
            return Self::default();
        }

        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                let mut commented = String::new();
                for line in text.lines() {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        commented.push('\n');
                    } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
                        commented.push_str(line);
                        commented.push('\n');
                    } else {
                        commented.push_str("# ");
                        commented.push_str(line);
                        commented.push('\n');
                    }
                }
                if let Err(err) = fs::write(path, commented) {
                    warn!("Failed to write default config to {}: {err}", path.display());
                }
            }
            Err(err) => {
                warn!("Failed to serialize default config: {err}; continuing with defaults");
            }
        }
        default_cfg
    }
}
