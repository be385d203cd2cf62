//! Seams between the orchestrator and the external systems it drives.
//!
//! The production implementations shell out to `git` and `gh` and call the
//! problem API over HTTP. Tests substitute in-memory fakes.
//!
//! ```text
//!                 ┌──────────────┐
//!                 │  run_linker  │
//!                 └──────┬───────┘
//!        ┌───────────────┼────────────────┐
//!        ▼               ▼                ▼
//! ┌──────────────┐ ┌──────────────┐ ┌──────────────┐
//! │VersionControl│ │MetadataSource│ │ IssueTracker │
//! │   (git)      │ │ (solved.ac)  │ │    (gh)      │
//! └──────────────┘ └──────────────┘ └──────────────┘
//! ```

use anyhow::Result;
use std::path::Path;

use crate::compose::IssueDraft;
use crate::models::{Lookup, ProblemId, ProblemMetadata};

/// The version-control system holding the solution tree.
pub trait VersionControl {
    /// Raw paths changed between the previous commit and `HEAD`.
    ///
    /// Returns an error when there is no previous commit; the change
    /// detector downgrades that to an empty run.
    fn changed_files(&self) -> Result<Vec<String>>;

    /// Stage a modified notes file for the final commit.
    fn stage(&self, path: &Path) -> Result<()>;

    /// Commit everything staged.
    fn commit(&self, message: &str) -> Result<()>;

    /// Push the current branch.
    fn push(&self) -> Result<()>;
}

/// Read-only source of problem metadata.
pub trait MetadataSource {
    fn fetch(&self, id: ProblemId) -> Lookup<ProblemMetadata>;
}

/// The issue tracker that holds one issue per solved problem.
pub trait IssueTracker {
    /// URL of an existing issue whose title mentions `id`.
    fn find_existing(&self, id: ProblemId) -> Lookup<String>;

    /// Create an issue and return its URL.
    fn create(&self, draft: &IssueDraft) -> Result<String>;
}
