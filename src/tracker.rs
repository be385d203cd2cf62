//! GitHub issue tracker adapter driving the `gh` CLI.
//!
//! Authentication is whatever `gh` already has; this module never touches
//! credentials.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::process::Command;

use crate::compose::IssueDraft;
use crate::config::Config;
use crate::models::{Lookup, ProblemId};
use crate::traits::IssueTracker;

pub struct GhCli {
    program: String,
    repo: String,
}

#[derive(Debug, Deserialize)]
struct IssueRef {
    url: String,
}

impl GhCli {
    pub fn new(config: &Config, repo: &str) -> Self {
        Self {
            program: config.tracker.program.clone(),
            repo: repo.to_string(),
        }
    }
}

impl IssueTracker for GhCli {
    fn find_existing(&self, id: ProblemId) -> Lookup<String> {
        let search = format!("{} in:title", id);
        let output = Command::new(&self.program)
            .args(["issue", "list", "--search", &search])
            .args(["--repo", &self.repo])
            .args(["--json", "url", "--limit", "1"])
            .output();

        match output {
            Ok(out) if out.status.success() => parse_issue_list(&out.stdout),
            Ok(out) => Lookup::Failed(format!(
                "{} issue list failed: {}",
                self.program,
                String::from_utf8_lossy(&out.stderr).trim()
            )),
            Err(e) => Lookup::Failed(format!("failed to execute '{}': {}", self.program, e)),
        }
    }

    fn create(&self, draft: &IssueDraft) -> Result<String> {
        let output = Command::new(&self.program)
            .args(["issue", "create"])
            .args(["--title", &draft.title])
            .args(["--body", &draft.body])
            .args(["--repo", &self.repo])
            .output()
            .with_context(|| format!("Failed to execute '{} issue create'", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} issue create failed: {}", self.program, stderr.trim());
        }

        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if url.is_empty() {
            bail!("{} issue create printed no URL", self.program);
        }
        Ok(url)
    }
}

/// Decode `gh issue list --json url` output.
pub fn parse_issue_list(stdout: &[u8]) -> Lookup<String> {
    match serde_json::from_slice::<Vec<IssueRef>>(stdout) {
        Ok(issues) => match issues.into_iter().next() {
            Some(issue) => Lookup::Found(issue.url),
            None => Lookup::NotFound,
        },
        Err(e) => Lookup::Failed(format!("malformed issue list: {}", e)),
    }
}
