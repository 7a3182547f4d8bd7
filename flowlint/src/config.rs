//! Configuration loaded from `.flowlint.toml`.
//!
//! The file is discovered by walking up from the analysis root; CLI flags
//! override file values. A malformed file degrades to defaults rather than
//! aborting the run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = ".flowlint.toml";

/// Top-level document shape: settings live under a `[flowlint]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    flowlint: Config,
}

/// Analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Folders skipped while collecting input files.
    pub exclude_folders: Vec<String>,
    /// Exit with a non-zero code when findings exist.
    pub fail_on_findings: bool,
    /// Worker threads for file-level parallelism; 0 picks the default.
    pub threads: usize,
    /// Master switch for the unreachable-code lint.
    pub unreachable_code: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_folders: Vec::new(),
            fail_on_findings: false,
            threads: 0,
            unreachable_code: true,
        }
    }
}

impl Config {
    /// Loads configuration from the current directory upwards.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from `path` and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let start = if path.is_file() {
            path.parent().unwrap_or(Path::new("."))
        } else {
            path
        };
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Self::parse_file(&candidate);
            }
        }
        Self::default()
    }

    fn parse_file(path: &Path) -> Self {
        let Ok(raw) = fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str::<ConfigFile>(&raw) {
            Ok(file) => file.flowlint,
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_the_lint() {
        let config = Config::default();
        assert!(config.unreachable_code);
        assert!(!config.fail_on_findings);
        assert_eq!(config.threads, 0);
    }

    #[test]
    fn loads_from_a_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[flowlint]\nfail-on-findings = true\nexclude-folders = [\"target\"]\n",
        )
        .expect("write config");

        let config = Config::load_from_path(dir.path());
        assert!(config.fail_on_findings);
        assert_eq!(config.exclude_folders, vec!["target".to_owned()]);
        assert!(config.unreachable_code, "unset keys keep their defaults");
    }

    #[test]
    fn walks_up_to_find_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[flowlint]\nthreads = 2\n",
        )
        .expect("write config");
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).expect("mkdirs");

        let config = Config::load_from_path(&nested);
        assert_eq!(config.threads, 2);
    }

    #[test]
    fn malformed_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "not [valid toml").expect("write config");

        let config = Config::load_from_path(dir.path());
        assert!(config.unreachable_code);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_from_path(dir.path());
        assert_eq!(config.exclude_folders, Vec::<String>::new());
    }
}
