//! Core data models used throughout the linker.
//!
//! These types describe the problems, metadata, and lookup results that flow
//! between the change detector, the external collaborators, and the
//! orchestrator. All of them live for a single run.

use serde::Deserialize;
use std::fmt;

/// Tag names are shown in this language when the API provides it.
const PREFERRED_LANGUAGE: &str = "ko";

/// A problem number parsed from a solution file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProblemId(pub u32);

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Problem metadata as returned by the problem API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProblemMetadata {
    #[serde(rename = "titleKo")]
    pub title: String,
    pub level: u32,
    #[serde(default)]
    pub tags: Vec<ProblemTag>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProblemTag {
    #[serde(default)]
    pub key: String,
    #[serde(rename = "displayNames", default)]
    pub display_names: Vec<DisplayName>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplayName {
    #[serde(default)]
    pub language: String,
    pub name: String,
}

impl ProblemTag {
    /// The Korean display name, else the first localized one, else the tag
    /// key.
    pub fn display_name(&self) -> Option<&str> {
        let localized = self
            .display_names
            .iter()
            .find(|d| d.language == PREFERRED_LANGUAGE)
            .or_else(|| self.display_names.first());
        match localized {
            Some(d) => Some(d.name.as_str()),
            None if !self.key.is_empty() => Some(self.key.as_str()),
            None => None,
        }
    }
}

/// Result of a best-effort query against an external system.
///
/// `NotFound` means the system answered and had nothing; `Failed` means the
/// question could not be answered. Callers usually treat both as absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Failed(String),
}
