//! TOML configuration with environment overrides.
//!
//! Settings resolve in this order, later sources winning:
//! built-in defaults, the TOML file, the `TARGET_ID` / `REPO` / `BRANCH`
//! environment variables, then command-line flags (applied by the binary).

use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::identifier::DEFAULT_MIN_PROBLEM_ID;

/// Environment variable holding an explicit problem number to process.
pub const ENV_TARGET_ID: &str = "TARGET_ID";
/// Environment variable holding the hosting repository (`owner/name`).
pub const ENV_REPO: &str = "REPO";
/// Environment variable holding the branch used for solution links.
pub const ENV_BRANCH: &str = "BRANCH";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub detect: DetectConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub notes: NotesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RepositoryConfig {
    /// Hosting repository as `owner/name`. Required by `run`.
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Working tree root. Git commands run here and changed paths are
    /// relative to it.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_git_program")]
    pub git_program: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            full_name: None,
            branch: default_branch(),
            root: default_root(),
            git_program: default_git_program(),
        }
    }
}

fn default_branch() -> String {
    "main".to_string()
}
fn default_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_git_program() -> String {
    "git".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectConfig {
    /// When set, walk the tree for this problem number instead of diffing
    /// the last commit.
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_min_problem_id")]
    pub min_problem_id: u32,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            target_id: None,
            extensions: default_extensions(),
            min_problem_id: default_min_problem_id(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    ["py", "java", "cpp", "c", "cc", "js", "ts"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}
fn default_min_problem_id() -> u32 {
    DEFAULT_MIN_PROBLEM_ID
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetadataConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "https://solved.ac/api/v3/problem/show".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrackerConfig {
    #[serde(default = "default_tracker_program")]
    pub program: String,
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,
    #[serde(default = "default_problem_url_base")]
    pub problem_url_base: String,
    #[serde(default = "default_web_base")]
    pub web_base: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            program: default_tracker_program(),
            title_prefix: default_title_prefix(),
            problem_url_base: default_problem_url_base(),
            web_base: default_web_base(),
        }
    }
}

fn default_tracker_program() -> String {
    "gh".to_string()
}
fn default_title_prefix() -> String {
    "[BOJ]".to_string()
}
fn default_problem_url_base() -> String {
    "https://www.acmicpc.net/problem".to_string()
}
fn default_web_base() -> String {
    "https://github.com".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotesConfig {
    #[serde(default = "default_notes_file")]
    pub file_name: String,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    #[serde(default = "default_push")]
    pub push: bool,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            file_name: default_notes_file(),
            commit_message: default_commit_message(),
            push: default_push(),
        }
    }
}

fn default_notes_file() -> String {
    "README.md".to_string()
}
fn default_commit_message() -> String {
    "Auto: Link Github Issue to README".to_string()
}
fn default_push() -> bool {
    true
}

impl Config {
    /// Apply `TARGET_ID`, `REPO`, and `BRANCH` from the given lookup.
    ///
    /// Blank values are ignored so an empty workflow input does not clear a
    /// value set in the file.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(target) = non_blank(ENV_TARGET_ID) {
            self.detect.target_id = Some(target);
        }
        if let Some(repo) = non_blank(ENV_REPO) {
            self.repository.full_name = Some(repo);
        }
        if let Some(branch) = non_blank(ENV_BRANCH) {
            self.repository.branch = branch;
        }
    }

    /// The hosting repository, or an error explaining how to set it.
    pub fn require_repo(&self) -> Result<&str> {
        match self.repository.full_name.as_deref() {
            Some(name) => Ok(name),
            None => bail!(
                "repository.full_name is not set (use --repo, the {} environment variable, or the config file)",
                ENV_REPO
            ),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.repository.full_name {
            let parts: Vec<&str> = name.split('/').collect();
            if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
                bail!("repository.full_name must look like 'owner/name', got '{}'", name);
            }
        }

        if self.repository.branch.trim().is_empty() {
            bail!("repository.branch must not be empty");
        }

        if let Some(target) = &self.detect.target_id {
            if target.is_empty() || !target.chars().all(|c| c.is_ascii_digit()) {
                bail!("target id must be a problem number, got '{}'", target);
            }
        }

        if self.detect.extensions.is_empty() {
            bail!("detect.extensions must list at least one extension");
        }

        if self.metadata.timeout_secs == 0 {
            bail!("metadata.timeout_secs must be > 0");
        }

        Url::parse(&self.metadata.endpoint)
            .with_context(|| format!("Invalid metadata.endpoint: {}", self.metadata.endpoint))?;
        Url::parse(&self.tracker.web_base)
            .with_context(|| format!("Invalid tracker.web_base: {}", self.tracker.web_base))?;

        if self.notes.file_name.trim().is_empty() {
            bail!("notes.file_name must not be empty");
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

/// Load `path` when given; otherwise use `fallback` if it exists, else
/// built-in defaults.
pub fn load_or_default(path: Option<&Path>, fallback: &Path) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None if fallback.exists() => load_config(fallback),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.repository.branch, "main");
        assert_eq!(config.detect.min_problem_id, 1000);
        assert_eq!(config.metadata.timeout_secs, 10);
        assert_eq!(config.tracker.program, "gh");
        assert_eq!(config.notes.file_name, "README.md");
        assert!(config.notes.push);
        assert!(config.detect.extensions.contains(&"cc".to_string()));
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
[repository]
full_name = "me/algorithms"

[metadata]
timeout_secs = 3
"#,
        )
        .unwrap();
        assert_eq!(config.require_repo().unwrap(), "me/algorithms");
        assert_eq!(config.metadata.timeout_secs, 3);
        assert_eq!(
            config.metadata.endpoint,
            "https://solved.ac/api/v3/problem/show"
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config: Config = toml::from_str(
            r#"
[repository]
full_name = "me/old"
branch = "dev"
"#,
        )
        .unwrap();
        let vars = env(&[("REPO", "me/new"), ("BRANCH", " main "), ("TARGET_ID", "1000")]);
        config.apply_env(|k| vars.get(k).cloned());

        assert_eq!(config.repository.full_name.as_deref(), Some("me/new"));
        assert_eq!(config.repository.branch, "main");
        assert_eq!(config.detect.target_id.as_deref(), Some("1000"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut config = Config::default();
        config.repository.full_name = Some("me/repo".to_string());
        let vars = env(&[("REPO", ""), ("TARGET_ID", "   ")]);
        config.apply_env(|k| vars.get(k).cloned());

        assert_eq!(config.repository.full_name.as_deref(), Some("me/repo"));
        assert!(config.detect.target_id.is_none());
    }

    #[test]
    fn test_require_repo_missing() {
        let err = Config::default().require_repo().unwrap_err();
        assert!(err.to_string().contains("repository.full_name"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.repository.full_name = Some("no-slash".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.detect.target_id = Some("12a".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.metadata.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.detect.extensions.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.metadata.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = load_or_default(None, &tmp.path().join("missing.toml")).unwrap();
        assert!(config.repository.full_name.is_none());
    }

    #[test]
    fn test_load_config_missing_explicit_file_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("missing.toml");
        assert!(load_or_default(Some(missing.as_path()), &missing).is_err());
    }
}
