//! # Config - runtime settings
//!
//! All settings come from environment variables with defaults, so the
//! binary runs with no configuration at all next to the default file names.
//!
//! ```text
//! KONK_INDEX_PATH         sorted word index       (default: "rawindex.txt")
//! KONK_CORPUS_PATH        corpus                  (default: "korpus")
//! KONK_TABLE_PATH         bucket table            (default: "index")
//! KONK_SKIP_STRIDE        builder probe stride    (default: 2500, 0 = off)
//! KONK_TRAILING_MARGIN    builder exact-scan tail (default: 5000)
//! KONK_CONTEXT_RADIUS     bytes shown per side    (default: 30)
//! KONK_DISPLAY_THRESHOLD  confirm above this many (default: 25)
//! ```
//!
//! A value that does not parse falls back to its default with a warning.

use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

pub use bucket::{DEFAULT_SKIP_STRIDE, DEFAULT_TRAILING_MARGIN};
pub use engine::DEFAULT_CONTEXT_RADIUS;

pub const DEFAULT_INDEX_PATH: &str = "rawindex.txt";
pub const DEFAULT_CORPUS_PATH: &str = "korpus";
pub const DEFAULT_TABLE_PATH: &str = "index";
pub const DEFAULT_DISPLAY_THRESHOLD: usize = 25;

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub index_path: PathBuf,
    pub corpus_path: PathBuf,
    pub table_path: PathBuf,
    /// Bytes per skip-ahead probe while building the table.
    pub skip_stride: u64,
    /// Tail of the index the builder always scans record by record.
    pub trailing_margin: u64,
    /// Corpus bytes shown on each side of an occurrence.
    pub context_radius: u64,
    /// Above this many occurrences the user confirms before they print.
    pub display_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            corpus_path: PathBuf::from(DEFAULT_CORPUS_PATH),
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            skip_stride: DEFAULT_SKIP_STRIDE,
            trailing_margin: DEFAULT_TRAILING_MARGIN,
            context_radius: DEFAULT_CONTEXT_RADIUS,
            display_threshold: DEFAULT_DISPLAY_THRESHOLD,
        }
    }
}

impl Config {
    /// Reads the `KONK_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Missing keys take
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path_or = |key: &str, default: &str| {
            PathBuf::from(lookup(key).unwrap_or_else(|| default.to_string()))
        };
        Self {
            index_path: path_or("KONK_INDEX_PATH", DEFAULT_INDEX_PATH),
            corpus_path: path_or("KONK_CORPUS_PATH", DEFAULT_CORPUS_PATH),
            table_path: path_or("KONK_TABLE_PATH", DEFAULT_TABLE_PATH),
            skip_stride: parse_or(&lookup, "KONK_SKIP_STRIDE", DEFAULT_SKIP_STRIDE),
            trailing_margin: parse_or(&lookup, "KONK_TRAILING_MARGIN", DEFAULT_TRAILING_MARGIN),
            context_radius: parse_or(&lookup, "KONK_CONTEXT_RADIUS", DEFAULT_CONTEXT_RADIUS),
            display_threshold: parse_or(&lookup, "KONK_DISPLAY_THRESHOLD", DEFAULT_DISPLAY_THRESHOLD),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default = %default, "ignoring unparsable setting");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("KONK_INDEX_PATH", "/data/rawindex.txt"),
            ("KONK_TABLE_PATH", "/tmp/table"),
            ("KONK_SKIP_STRIDE", "0"),
            ("KONK_CONTEXT_RADIUS", " 45 "),
            ("KONK_DISPLAY_THRESHOLD", "100"),
        ]);
        assert_eq!(config.index_path, PathBuf::from("/data/rawindex.txt"));
        assert_eq!(config.table_path, PathBuf::from("/tmp/table"));
        assert_eq!(config.corpus_path, PathBuf::from(DEFAULT_CORPUS_PATH));
        assert_eq!(config.skip_stride, 0);
        assert_eq!(config.trailing_margin, DEFAULT_TRAILING_MARGIN);
        assert_eq!(config.context_radius, 45);
        assert_eq!(config.display_threshold, 100);
    }

    #[test]
    fn defaults_match_the_owning_crates() {
        let config = Config::default();
        assert_eq!(config.skip_stride, bucket::BuildOptions::default().skip_stride);
        assert_eq!(config.trailing_margin, bucket::BuildOptions::default().trailing_margin);
        assert_eq!(config.context_radius, engine::DEFAULT_CONTEXT_RADIUS);
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = config_from(&[
            ("KONK_SKIP_STRIDE", "fast"),
            ("KONK_DISPLAY_THRESHOLD", "-3"),
        ]);
        assert_eq!(config.skip_stride, DEFAULT_SKIP_STRIDE);
        assert_eq!(config.display_threshold, DEFAULT_DISPLAY_THRESHOLD);
    }
}
