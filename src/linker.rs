//! The link pipeline: changed files → problem numbers → issues → notes.
//!
//! # Workflow
//!
//! 1. Detect candidate files (manual target or last commit).
//! 2. Extract a problem number from each; skip files without one and
//!    numbers already handled in this run.
//! 3. Reuse an existing issue, or fetch metadata and create one.
//! 4. Append a backlink to the directory's notes file and stage it.
//! 5. One commit (and push) covering every modified notes file.
//!
//! Stage, commit, and push failures end up in the [`RunReport`] rather than
//! failing the run. Nothing is rolled back. A later run finds the existing issue and skips
//! notes that already link it, so re-running after a partial failure is
//! safe.

use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::changes::detect_changed_files;
use crate::compose::compose_issue;
use crate::config::Config;
use crate::git::GitCli;
use crate::identifier::extract_problem_id;
use crate::models::{Lookup, ProblemId};
use crate::notes::{link_issue, notes_path_for, notes_relative_path, preview_link, NotesStatus};
use crate::solved::SolvedAcClient;
use crate::tracker::GhCli;
use crate::traits::{IssueTracker, MetadataSource, VersionControl};

/// Flags for a single run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Query everything, change nothing.
    pub dry_run: bool,
    /// Push after committing.
    pub push: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            push: true,
        }
    }
}

/// The external systems a run talks to.
pub struct Collaborators<'a> {
    pub vcs: &'a dyn VersionControl,
    pub metadata: &'a dyn MetadataSource,
    pub tracker: &'a dyn IssueTracker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueOrigin {
    Existing,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemOutcome {
    Linked {
        url: String,
        origin: IssueOrigin,
        notes: NotesStatus,
        notes_path: PathBuf,
    },
    /// Dry run: an issue with this title would be created.
    WouldCreate { title: String },
    MetadataUnavailable { reason: String },
    CreateFailed { reason: String },
}

#[derive(Debug, Clone)]
pub struct ProblemReport {
    pub id: ProblemId,
    pub file: String,
    pub outcome: ProblemOutcome,
}

/// A notes file that was written but could not be staged.
#[derive(Debug, Clone)]
pub struct StageFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub dry_run: bool,
    pub files: Vec<String>,
    pub problems: Vec<ProblemReport>,
    /// Staged notes files, relative to the repository root.
    pub staged: Vec<PathBuf>,
    pub unstaged: Vec<StageFailure>,
    pub committed: bool,
    pub commit_error: Option<String>,
    pub pushed: bool,
    pub push_error: Option<String>,
}

impl RunReport {
    pub fn created(&self) -> usize {
        self.problems
            .iter()
            .filter(|p| {
                matches!(
                    p.outcome,
                    ProblemOutcome::Linked {
                        origin: IssueOrigin::Created,
                        ..
                    }
                )
            })
            .count()
    }

    pub fn notes_updated(&self) -> usize {
        self.problems
            .iter()
            .filter(|p| {
                matches!(
                    p.outcome,
                    ProblemOutcome::Linked {
                        notes: NotesStatus::Appended | NotesStatus::WouldAppend,
                        ..
                    }
                )
            })
            .count()
    }

    pub fn print_summary(&self) {
        if self.dry_run {
            println!("link (dry-run)");
        } else {
            println!("link");
        }
        println!("  files detected: {}", self.files.len());
        println!("  problems: {}", self.problems.len());
        for p in &self.problems {
            match &p.outcome {
                ProblemOutcome::Linked {
                    url, origin, notes, ..
                } => {
                    let origin = match origin {
                        IssueOrigin::Existing => "existing",
                        IssueOrigin::Created => "created",
                    };
                    println!(
                        "  {:<8} linked   {} ({}, notes {})",
                        p.id,
                        url,
                        origin,
                        notes.as_str()
                    );
                }
                ProblemOutcome::WouldCreate { title } => {
                    println!("  {:<8} create   {}", p.id, title);
                }
                ProblemOutcome::MetadataUnavailable { reason } => {
                    println!("  {:<8} skipped  metadata unavailable: {}", p.id, reason);
                }
                ProblemOutcome::CreateFailed { reason } => {
                    println!("  {:<8} skipped  issue creation failed: {}", p.id, reason);
                }
            }
        }
        println!("  issues created: {}", self.created());
        println!("  notes updated: {}", self.notes_updated());
        println!("  staged: {}", self.staged.len());
        for failure in &self.unstaged {
            println!("  not staged: {} ({})", failure.path.display(), failure.reason);
        }
        println!("  committed: {}", yes_no(self.committed, &self.commit_error));
        println!("  pushed: {}", yes_no(self.pushed, &self.push_error));
        println!("ok");
    }
}

fn yes_no(done: bool, error: &Option<String>) -> String {
    match (done, error) {
        (true, _) => "yes".to_string(),
        (false, Some(e)) => format!("no ({})", e),
        (false, None) => "no".to_string(),
    }
}

/// Run the pipeline against the real `git`, solved.ac, and `gh`.
pub fn run_linker(config: &Config, options: RunOptions) -> Result<RunReport> {
    let repo = config.require_repo()?;
    let git = GitCli::new(config);
    let solved = SolvedAcClient::new(&config.metadata)?;
    let gh = GhCli::new(config, repo);

    let collaborators = Collaborators {
        vcs: &git,
        metadata: &solved,
        tracker: &gh,
    };
    run_linker_with(config, &collaborators, options)
}

/// Run the pipeline against the given collaborators.
pub fn run_linker_with(
    config: &Config,
    collaborators: &Collaborators<'_>,
    options: RunOptions,
) -> Result<RunReport> {
    let repo = config.require_repo()?;

    let mut report = RunReport {
        dry_run: options.dry_run,
        ..Default::default()
    };

    report.files = detect_changed_files(config, collaborators.vcs)?;
    info!("Detected {} file(s): {:?}", report.files.len(), report.files);

    let mut seen: HashSet<ProblemId> = HashSet::new();

    for file in &report.files {
        let Some(id) = extract_problem_id(file, config.detect.min_problem_id) else {
            continue;
        };
        if !seen.insert(id) {
            continue;
        }

        info!("Processing problem {} ({})", id, file);
        let outcome = process_problem(config, repo, collaborators, options, id, file)?;

        if let ProblemOutcome::Linked {
            notes: NotesStatus::Appended,
            ..
        } = &outcome
        {
            let relative = notes_relative_path(file, &config.notes.file_name);
            match collaborators.vcs.stage(&relative) {
                Ok(()) => report.staged.push(relative),
                Err(e) => {
                    error!("Failed to stage {}: {:#}", relative.display(), e);
                    report.unstaged.push(StageFailure {
                        path: relative,
                        reason: format!("{:#}", e),
                    });
                }
            }
        }

        report.problems.push(ProblemReport {
            id,
            file: file.clone(),
            outcome,
        });
    }

    if report.staged.is_empty() {
        info!("No notes files changed; nothing to commit");
        return Ok(report);
    }

    info!("Committing {} notes file(s)", report.staged.len());
    match collaborators.vcs.commit(&config.notes.commit_message) {
        Ok(()) => report.committed = true,
        Err(e) => {
            error!("Commit failed: {:#}", e);
            report.commit_error = Some(format!("{:#}", e));
            return Ok(report);
        }
    }

    if options.push {
        match collaborators.vcs.push() {
            Ok(()) => report.pushed = true,
            Err(e) => {
                error!("Push failed: {:#}", e);
                report.push_error = Some(format!("{:#}", e));
            }
        }
    }

    Ok(report)
}

fn process_problem(
    config: &Config,
    repo: &str,
    collaborators: &Collaborators<'_>,
    options: RunOptions,
    id: ProblemId,
    file: &str,
) -> Result<ProblemOutcome> {
    let notes_path = notes_path_for(&config.repository.root, file, &config.notes.file_name);

    let (url, origin) = match collaborators.tracker.find_existing(id) {
        Lookup::Found(url) => {
            info!("Existing issue for {}: {}", id, url);
            (url, IssueOrigin::Existing)
        }
        other => {
            if let Lookup::Failed(reason) = &other {
                warn!("Issue search for {} failed, assuming none: {}", id, reason);
            }

            let meta = match collaborators.metadata.fetch(id) {
                Lookup::Found(meta) => meta,
                Lookup::NotFound => {
                    warn!("No metadata for problem {}", id);
                    return Ok(ProblemOutcome::MetadataUnavailable {
                        reason: "not found".to_string(),
                    });
                }
                Lookup::Failed(reason) => {
                    warn!("Metadata fetch for {} failed: {}", id, reason);
                    return Ok(ProblemOutcome::MetadataUnavailable { reason });
                }
            };

            let draft = compose_issue(config, repo, id, file, &meta)?;
            if options.dry_run {
                return Ok(ProblemOutcome::WouldCreate { title: draft.title });
            }

            info!("Creating issue: {}", draft.title);
            match collaborators.tracker.create(&draft) {
                Ok(url) => {
                    info!("Created issue {}", url);
                    (url, IssueOrigin::Created)
                }
                Err(e) => {
                    error!("Issue creation for {} failed: {:#}", id, e);
                    return Ok(ProblemOutcome::CreateFailed {
                        reason: format!("{:#}", e),
                    });
                }
            }
        }
    };

    let notes = if options.dry_run {
        preview_link(&notes_path, &url)?
    } else {
        link_issue(&notes_path, &url)?
    };

    Ok(ProblemOutcome::Linked {
        url,
        origin,
        notes,
        notes_path,
    })
}
