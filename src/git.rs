//! `git` command-line adapter.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::config::Config;
use crate::traits::VersionControl;

/// Runs `git` in the configured working tree.
pub struct GitCli {
    program: String,
    repo_dir: PathBuf,
}

impl GitCli {
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.repository.git_program.clone(),
            repo_dir: config.repository.root.clone(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<Output> {
        Command::new(&self.program)
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .with_context(|| {
                format!(
                    "Failed to execute '{} {}'. Is git installed?",
                    self.program,
                    args.join(" ")
                )
            })
    }

    fn git_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.git(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("git {} failed: {}", args.join(" "), stderr.trim());
        }
        Ok(output)
    }
}

impl VersionControl for GitCli {
    fn changed_files(&self) -> Result<Vec<String>> {
        // quotepath=false keeps non-ASCII names verbatim instead of octal-escaped.
        let output = self.git_checked(&[
            "-c",
            "core.quotepath=false",
            "diff",
            "--name-only",
            "HEAD~1",
            "HEAD",
        ])?;
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|l| l.to_string())
            .collect())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        let path_str = path.to_string_lossy();
        self.git_checked(&["add", "--", &path_str])?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.git_checked(&["commit", "-m", message])?;
        Ok(())
    }

    fn push(&self) -> Result<()> {
        self.git_checked(&["push"])?;
        Ok(())
    }
}
