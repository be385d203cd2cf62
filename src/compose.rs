//! Issue title and Markdown body rendering.

use anyhow::{anyhow, Result};
use reqwest::Url;

use crate::config::Config;
use crate::models::{ProblemId, ProblemMetadata};
use crate::tier::TierBadge;

/// A rendered issue, ready for the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    pub title: String,
    pub body: String,
}

/// `[BOJ] 1000번 A+B - Bronze 5`
pub fn issue_title(prefix: &str, id: ProblemId, title: &str, badge: &TierBadge) -> String {
    format!("{} {}번 {} - {}", prefix, id, title, badge.label())
}

/// Tags as a comma-separated list of inline code spans.
pub fn format_tags(meta: &ProblemMetadata) -> String {
    meta.tags
        .iter()
        .filter_map(|t| t.display_name())
        .map(|name| format!("`{}`", name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Link to a file in the hosting repository at `branch`, with every path
/// segment percent-encoded.
pub fn solution_url(web_base: &str, repo: &str, branch: &str, file_path: &str) -> Result<String> {
    let mut url = Url::parse(web_base)?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("web base URL cannot carry a path: {}", web_base))?
        .pop_if_empty()
        .extend(repo.split('/'))
        .push("blob")
        .extend(branch.split('/'))
        .extend(file_path.split('/').filter(|s| !s.is_empty() && *s != "."));
    Ok(url.to_string())
}

pub fn compose_issue(
    config: &Config,
    repo: &str,
    id: ProblemId,
    file_path: &str,
    meta: &ProblemMetadata,
) -> Result<IssueDraft> {
    let badge = TierBadge::from_level(meta.level);
    let title = issue_title(&config.tracker.title_prefix, id, &meta.title, &badge);
    let code_url = solution_url(
        &config.tracker.web_base,
        repo,
        &config.repository.branch,
        file_path,
    )?;
    let problem_url = format!(
        "{}/{}",
        config.tracker.problem_url_base.trim_end_matches('/'),
        id
    );

    let body = format!(
        "# {title}

![Tier]({badge_url})

| 문제 정보 | 바로가기 |
| :-: | :-: |
| **난이도** | {label} |
| **문제 번호** | {id} |
| **태그** | {tags} |

<br>

### 🔗 링크
- [문제 풀러 가기]({problem_url})
- [내 정답 코드 보기 (Github)]({code_url})

<br>

## 1. 문제 파악
- 

## 2. 접근 방법
1. 
2. 

## 3. 코드 구현 시 주의점
- 

## 4. 배우고 느낀 점
- 
",
        title = title,
        badge_url = badge.image_url(),
        label = badge.label(),
        id = id,
        tags = format_tags(meta),
        problem_url = problem_url,
        code_url = code_url,
    );

    Ok(IssueDraft { title, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisplayName, ProblemTag};

    fn meta(title: &str, level: u32, tags: &[&str]) -> ProblemMetadata {
        ProblemMetadata {
            title: title.to_string(),
            level,
            tags: tags
                .iter()
                .map(|t| ProblemTag {
                    key: String::new(),
                    display_names: vec![DisplayName {
                        language: "ko".to_string(),
                        name: t.to_string(),
                    }],
                })
                .collect(),
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.repository.full_name = Some("me/algo".to_string());
        config
    }

    #[test]
    fn test_title_for_level_three() {
        let draft = compose_issue(
            &config(),
            "me/algo",
            ProblemId(2000),
            "problems/2000/Solution.py",
            &meta("Test Problem", 3, &[]),
        )
        .unwrap();
        assert_eq!(draft.title, "[BOJ] 2000번 Test Problem - Bronze 3");
    }

    #[test]
    fn test_unrated_title_ignores_content() {
        let badge = TierBadge::from_level(0);
        assert_eq!(
            issue_title("[BOJ]", ProblemId(1000), "Gold Silver 5", &badge),
            "[BOJ] 1000번 Gold Silver 5 - Unrated"
        );
    }

    #[test]
    fn test_format_tags() {
        assert_eq!(format_tags(&meta("x", 1, &["수학", "구현"])), "`수학`, `구현`");
        assert_eq!(format_tags(&meta("x", 1, &[])), "");
    }

    #[test]
    fn test_solution_url_encodes_segments() {
        let url = solution_url(
            "https://github.com",
            "me/algo",
            "main",
            "백준/Bronze/1000. A+B/A+B.py",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://github.com/me/algo/blob/main/%EB%B0%B1%EC%A4%80/Bronze/1000.%20A+B/A+B.py"
        );
    }

    #[test]
    fn test_solution_url_strips_dot_prefix() {
        let url = solution_url("https://github.com/", "me/algo", "dev", "./a/1000.py").unwrap();
        assert_eq!(url, "https://github.com/me/algo/blob/dev/a/1000.py");
    }

    #[test]
    fn test_body_contents() {
        let draft = compose_issue(
            &config(),
            "me/algo",
            ProblemId(1000),
            "Bronze/1000/a.py",
            &meta("A+B", 1, &["사칙연산"]),
        )
        .unwrap();
        assert!(draft.body.starts_with("# [BOJ] 1000번 A+B - Bronze 5\n"));
        assert!(draft
            .body
            .contains("![Tier](https://img.shields.io/badge/Bronze%205-ad5600?"));
        assert!(draft.body.contains("| **난이도** | Bronze 5 |"));
        assert!(draft.body.contains("| **문제 번호** | 1000 |"));
        assert!(draft.body.contains("| **태그** | `사칙연산` |"));
        assert!(draft
            .body
            .contains("- [문제 풀러 가기](https://www.acmicpc.net/problem/1000)"));
        assert!(draft
            .body
            .contains("(https://github.com/me/algo/blob/main/Bronze/1000/a.py)"));
        for section in [
            "## 1. 문제 파악",
            "## 2. 접근 방법",
            "## 3. 코드 구현 시 주의점",
            "## 4. 배우고 느낀 점",
        ] {
            assert!(draft.body.contains(section), "missing {}", section);
        }
    }

    #[test]
    fn test_body_placeholders_keep_trailing_space() {
        let draft = compose_issue(
            &config(),
            "me/algo",
            ProblemId(1000),
            "Bronze/1000/a.py",
            &meta("A+B", 1, &[]),
        )
        .unwrap();
        assert!(draft.body.contains("## 1. 문제 파악\n- \n\n"));
        assert!(draft.body.contains("## 2. 접근 방법\n1. \n2. \n\n"));
        assert!(draft.body.ends_with("## 4. 배우고 느낀 점\n- \n"));
    }
}
