//! Reads a directory of result files into an ordered record map.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LoaderConfig;
use crate::record::{ParseError, ResultRecord};

/// Outcome of loading one directory. Failed files never appear in `records`.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: BTreeMap<String, ResultRecord>,
    pub failures: Vec<ParseError>,
}

impl LoadReport {
    pub fn get(&self, key: &str) -> Option<&ResultRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push_failure(&mut self, err: ParseError) {
        debug!(file = %err.file(), error = %err, "Error reading file");
        self.failures.push(err);
    }
}

/// Experiment key of a result file: the name up to its first `.`.
pub fn experiment_key(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Load every entry in `dir` whose name ends with the configured suffix.
///
/// Symlinks are followed. An entry that cannot be read or parsed, a
/// directory or a dangling link included, is recorded in `failures`; it never
/// aborts the batch. Only a directory that cannot be listed is an error.
pub fn load_results(dir: &Path, config: &LoaderConfig) -> Result<LoadReport> {
    let mut report = LoadReport::default();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(err).with_context(|| format!("failed to list {}", dir.display()));
            }
            Err(err) => {
                let file_name = err
                    .path()
                    .and_then(Path::file_name)
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if file_name.ends_with(&config.suffix) {
                    let message = err.to_string();
                    let source = err.into_io_error().unwrap_or_else(|| io::Error::other(message));
                    report.push_failure(ParseError::Io {
                        file: file_name,
                        source,
                    });
                }
                continue;
            }
        };
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !file_name.ends_with(&config.suffix) {
            continue;
        }

        match load_file(entry.path(), &file_name, config.strict_labels) {
            Ok(record) => {
                debug!(file = %file_name, "loaded result");
                report
                    .records
                    .insert(experiment_key(&file_name).to_string(), record);
            }
            Err(err) => report.push_failure(err),
        }
    }

    Ok(report)
}

fn load_file(path: &Path, file_name: &str, strict_labels: bool) -> Result<ResultRecord, ParseError> {
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        file: file_name.to_string(),
        source,
    })?;
    ResultRecord::parse(file_name, &text, strict_labels)
}
