//! # Issue Linker CLI (`issue-linker`)
//!
//! ## Usage
//!
//! ```bash
//! issue-linker [--config ./issue-linker.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `issue-linker run` | Link problems touched by the last commit (or `--target-id`) |
//! | `issue-linker inspect <path>...` | Show the problem number parsed from each path |
//! | `issue-linker tier <level>` | Show the tier badge for a difficulty level |
//! | `issue-linker status` | Check that git, gh, and the repository are usable |
//!
//! Logs go to stderr (`RUST_LOG` controls the filter); command output goes to
//! stdout.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use issue_linker::config;
use issue_linker::identifier::extract_problem_id;
use issue_linker::linker::{run_linker, RunOptions};
use issue_linker::status::print_status;
use issue_linker::tier::TierBadge;

const DEFAULT_CONFIG_PATH: &str = "./issue-linker.toml";

/// Issue Linker: one tracker issue per solved problem, linked from the
/// problem's notes file.
#[derive(Parser)]
#[command(name = "issue-linker", version)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./issue-linker.toml` when present, otherwise built-in
    /// defaults. `TARGET_ID`, `REPO`, and `BRANCH` override file values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create missing issues and link them from notes files.
    ///
    /// Without `--target-id`, processes the files changed by the last
    /// commit. Modified notes files are committed (and pushed) together.
    Run {
        /// Process every source file whose path contains this problem number.
        #[arg(long)]
        target_id: Option<String>,

        /// Hosting repository as `owner/name`.
        #[arg(long)]
        repo: Option<String>,

        /// Branch used in solution file links.
        #[arg(long)]
        branch: Option<String>,

        /// Query only: create no issues, write no files, make no commits.
        #[arg(long)]
        dry_run: bool,

        /// Commit without pushing.
        #[arg(long)]
        no_push: bool,
    },

    /// Print the problem number extracted from each path.
    Inspect {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Print the tier badge for a difficulty level.
    Tier { level: u32 },

    /// Check the configured collaborators.
    Status,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg =
        config::load_or_default(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_PATH))?;
    cfg.apply_env(|key| std::env::var(key).ok());

    match cli.command {
        Commands::Run {
            target_id,
            repo,
            branch,
            dry_run,
            no_push,
        } => {
            if let Some(target) = target_id {
                cfg.detect.target_id = Some(target.trim().to_string());
            }
            if let Some(repo) = repo {
                cfg.repository.full_name = Some(repo);
            }
            if let Some(branch) = branch {
                cfg.repository.branch = branch;
            }
            cfg.validate()?;

            let options = RunOptions {
                dry_run,
                push: cfg.notes.push && !no_push,
            };
            let report = run_linker(&cfg, options)?;
            report.print_summary();
        }
        Commands::Inspect { paths } => {
            for path in paths {
                match extract_problem_id(&path, cfg.detect.min_problem_id) {
                    Some(id) => println!("{}\t{}", id, path),
                    None => println!("-\t{}", path),
                }
            }
        }
        Commands::Tier { level } => {
            let badge = TierBadge::from_level(level);
            println!("label: {}", badge.label());
            println!("color: #{}", badge.color());
            println!("badge: {}", badge.image_url());
        }
        Commands::Status => {
            cfg.validate()?;
            print_status(&cfg);
        }
    }

    Ok(())
}
