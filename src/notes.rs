//! Backlinks from per-directory notes files to tracker issues.
//!
//! Notes files are append-only. A file that already mentions the issue URL
//! anywhere is left alone, which makes repeated runs safe.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What happened (or would happen) to a notes file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesStatus {
    Appended,
    WouldAppend,
    AlreadyLinked,
    Missing,
}

impl NotesStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NotesStatus::Appended => "appended",
            NotesStatus::WouldAppend => "would append",
            NotesStatus::AlreadyLinked => "already linked",
            NotesStatus::Missing => "missing",
        }
    }
}

/// The notes file next to a solution file, relative to the repository root.
/// This is the form `git add` expects when run inside the root.
pub fn notes_relative_path(file_path: &str, file_name: &str) -> PathBuf {
    let parent = Path::new(file_path).parent().unwrap_or_else(|| Path::new(""));
    parent.join(file_name)
}

/// The notes file living next to a solution file.
pub fn notes_path_for(root: &Path, file_path: &str, file_name: &str) -> PathBuf {
    root.join(notes_relative_path(file_path, file_name))
}

/// The fragment appended for `url`.
pub fn render_link(url: &str) -> String {
    format!(
        "\n<br>\n\n### 💡 [노트] 풀이 보러가기\n- [Github Issue 링크]({})\n",
        url
    )
}

/// Append the backlink for `url` unless the file is missing or already
/// mentions it.
pub fn link_issue(path: &Path, url: &str) -> Result<NotesStatus> {
    let status = preview_link(path, url)?;
    if status != NotesStatus::WouldAppend {
        return Ok(status);
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open notes file: {}", path.display()))?;
    file.write_all(render_link(url).as_bytes())
        .with_context(|| format!("Failed to append to notes file: {}", path.display()))?;

    info!("Linked {} in {}", url, path.display());
    Ok(NotesStatus::Appended)
}

/// Same checks as [`link_issue`] without writing.
pub fn preview_link(path: &Path, url: &str) -> Result<NotesStatus> {
    if !path.exists() {
        warn!("Notes file not found: {}", path.display());
        return Ok(NotesStatus::Missing);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read notes file: {}", path.display()))?;

    if content.contains(url) {
        Ok(NotesStatus::AlreadyLinked)
    } else {
        Ok(NotesStatus::WouldAppend)
    }
}
