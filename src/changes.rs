//! Change detection: which solution files does this run look at?
//!
//! Two modes:
//! 1. An explicit problem number was given: walk the working tree and keep
//!    every source file whose relative path contains that number.
//! 2. Otherwise: the files touched by the most recent commit.

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::traits::VersionControl;

/// Candidate paths for this run, relative to the repository root.
pub fn detect_changed_files(config: &Config, vcs: &dyn VersionControl) -> Result<Vec<String>> {
    if let Some(target) = &config.detect.target_id {
        info!("Manual mode: searching for files of problem {}", target);
        return find_target_files(&config.repository.root, target, &config.detect.extensions);
    }

    match vcs.changed_files() {
        Ok(raw) => Ok(clean_paths(raw)),
        Err(e) => {
            warn!(
                "Could not diff against the previous commit, nothing to process: {:#}",
                e
            );
            Ok(Vec::new())
        }
    }
}

/// Every source file under `root` whose relative path contains `target`.
pub fn find_target_files(
    root: &Path,
    target: &str,
    extensions: &[String],
) -> Result<Vec<String>> {
    let include_patterns: Vec<String> = extensions
        .iter()
        .map(|ext| format!("**/*.{}", ext.trim_start_matches('.')))
        .collect();
    let include_set = build_globset(&include_patterns)?;
    let exclude_set = build_globset(&["**/.git/**".to_string(), ".git/**".to_string()])?;

    let mut found = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().replace('\\', "/");

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }

        if rel_str.contains(target) {
            debug!("Matched {}", rel_str);
            found.push(rel_str);
        }
    }

    found.sort();
    Ok(found)
}

/// Trim whitespace and surrounding quotes from raw `git diff` lines and
/// drop empty ones.
pub fn clean_paths<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    raw.into_iter()
        .map(|line| line.trim().trim_matches('"').to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::fs;

    struct FixedVcs(Option<Vec<String>>);

    impl VersionControl for FixedVcs {
        fn changed_files(&self) -> Result<Vec<String>> {
            match &self.0 {
                Some(files) => Ok(files.clone()),
                None => bail!("fatal: ambiguous argument 'HEAD~1'"),
            }
        }
        fn stage(&self, _path: &Path) -> Result<()> {
            Ok(())
        }
        fn commit(&self, _message: &str) -> Result<()> {
            Ok(())
        }
        fn push(&self) -> Result<()> {
            Ok(())
        }
    }

    fn exts() -> Vec<String> {
        vec!["py".to_string(), "cpp".to_string()]
    }

    #[test]
    fn test_clean_paths() {
        let raw = vec![
            "  \"백준/Silver/1234. 문제/sol.py\"  ".to_string(),
            String::new(),
            "   ".to_string(),
            "a/b.py".to_string(),
        ];
        assert_eq!(
            clean_paths(raw),
            vec!["백준/Silver/1234. 문제/sol.py".to_string(), "a/b.py".to_string()]
        );
    }

    #[test]
    fn test_find_target_files_filters() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path();
        let dir = root.join("Bronze").join("1000. A+B");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("a.py"), "print(1)").unwrap();
        fs::write(dir.join("a.cpp"), "int main(){}").unwrap();
        fs::write(dir.join("README.md"), "# A+B").unwrap();
        fs::create_dir_all(root.join(".git").join("1000")).unwrap();
        fs::write(root.join(".git").join("1000").join("x.py"), "").unwrap();
        fs::create_dir_all(root.join("Silver").join("2000")).unwrap();
        fs::write(root.join("Silver").join("2000").join("b.py"), "").unwrap();

        let files = find_target_files(root, "1000", &exts()).unwrap();
        assert_eq!(
            files,
            vec![
                "Bronze/1000. A+B/a.cpp".to_string(),
                "Bronze/1000. A+B/a.py".to_string()
            ]
        );
    }

    #[test]
    fn test_find_target_files_no_match() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::write(tmp.path().join("1500.py"), "").unwrap();
        let files = find_target_files(tmp.path(), "9999", &exts()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_detect_uses_vcs_without_target() {
        let config = Config::default();
        let vcs = FixedVcs(Some(vec!["\"x/1000/a.py\"".to_string(), "".to_string()]));
        let files = detect_changed_files(&config, &vcs).unwrap();
        assert_eq!(files, vec!["x/1000/a.py".to_string()]);
    }

    #[test]
    fn test_detect_without_previous_commit_is_empty() {
        let config = Config::default();
        let files = detect_changed_files(&config, &FixedVcs(None)).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_detect_with_target_walks_tree() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("3000")).unwrap();
        fs::write(tmp.path().join("3000").join("s.py"), "").unwrap();

        let mut config = Config::default();
        config.repository.root = tmp.path().to_path_buf();
        config.detect.target_id = Some("3000".to_string());

        // The VCS is never consulted in manual mode.
        let files = detect_changed_files(&config, &FixedVcs(None)).unwrap();
        assert_eq!(files, vec!["3000/s.py".to_string()]);
    }
}
