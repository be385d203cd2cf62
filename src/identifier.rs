//! Problem number extraction from solution file paths.
//!
//! Tier directories and file names often carry small numbers of their own
//! (`Bronze/5`, `2024`-style prefixes are rare but exist), so only digit runs
//! at or above a threshold count as problem numbers.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::ProblemId;

/// Problem numbers start at 1000 on the judge.
pub const DEFAULT_MIN_PROBLEM_ID: u32 = 1000;

fn digit_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// First maximal digit run in `path`, left to right, whose value is at least
/// `min`.
///
/// Runs too large for a `u32` are skipped rather than clamped.
pub fn extract_problem_id(path: &str, min: u32) -> Option<ProblemId> {
    digit_runs()
        .find_iter(path)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .find(|n| *n >= min)
        .map(ProblemId)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(path: &str) -> Option<u32> {
        extract_problem_id(path, DEFAULT_MIN_PROBLEM_ID).map(|id| id.0)
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(extract("백준/Bronze/README.md"), None);
    }

    #[test]
    fn test_only_small_numbers() {
        assert_eq!(extract("tier5/level3/999.py"), None);
        assert_eq!(extract("a/0999/b.py"), None);
    }

    #[test]
    fn test_first_qualifying_run_wins() {
        assert_eq!(extract("Silver/5/1234. Title 20000/sol.py"), Some(1234));
        assert_eq!(extract("3/1000/2000.py"), Some(1000));
    }

    #[test]
    fn test_small_runs_before_are_skipped() {
        assert_eq!(extract("백준/Gold/4/10828. 스택/스택.py"), Some(10828));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(extract("problems/1000/a.c"), Some(1000));
        assert_eq!(extract("problems/2000/Solution.py"), Some(2000));
    }

    #[test]
    fn test_maximal_runs_not_substrings() {
        // "12000" is one run, not "1200" + "0".
        assert_eq!(extract("x12000y"), Some(12000));
    }

    #[test]
    fn test_overflowing_run_is_skipped() {
        assert_eq!(extract("99999999999999/1500.py"), Some(1500));
    }

    #[test]
    fn test_custom_threshold() {
        assert_eq!(extract_problem_id("a/50/b.py", 10), Some(ProblemId(50)));
    }
}
