//! # Issue Linker
//!
//! Links solved judge problems in a solutions repository to GitHub issues
//! and leaves a backlink in each problem directory's notes file.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌────────────┐   ┌──────────────┐   ┌────────────┐
//! │   Changes   │──▶│ Identifier │──▶│ Issue lookup │──▶│   Notes    │
//! │ git diff/fs │   │  (≥ 1000)  │   │ gh / solved  │   │ README.md  │
//! └─────────────┘   └────────────┘   └──────────────┘   └─────┬──────┘
//!                                                            ▼
//!                                                     git commit + push
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! REPO=me/algorithms BRANCH=main issue-linker run
//! issue-linker run --target-id 1000 --dry-run
//! issue-linker inspect "백준/Bronze/1000. A+B/A+B.py"
//! issue-linker tier 12
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and environment overrides |
//! | [`models`] | Problem ids, metadata, lookup results |
//! | [`traits`] | Seams to git, the problem API, and the tracker |
//! | [`changes`] | Change detection |
//! | [`identifier`] | Problem number extraction |
//! | [`solved`] | Problem metadata client |
//! | [`tracker`] | `gh` issue tracker adapter |
//! | [`git`] | `git` adapter |
//! | [`tier`] | Tier badges |
//! | [`compose`] | Issue title and body |
//! | [`notes`] | Notes file backlinks |
//! | [`linker`] | The end-to-end pipeline |
//! | [`status`] | Collaborator health checks |

pub mod changes;
pub mod compose;
pub mod config;
pub mod git;
pub mod identifier;
pub mod linker;
pub mod models;
pub mod notes;
pub mod solved;
pub mod status;
pub mod tier;
pub mod tracker;
pub mod traits;
