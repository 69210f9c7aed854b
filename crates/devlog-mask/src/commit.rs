//! Per-commit field redaction

use std::sync::LazyLock;

use devlog_core::Commit;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::alias::RepositoryAliases;
use crate::pseudonym::{OrdinalIndex, author_pseudonym};

/// Coarse commit category shown in place of the message to anonymous viewers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitCategory {
    Feature,
    Fix,
    Refactor,
    Style,
    Docs,
    Test,
    Chore,
    Perf,
    Build,
    Ci,
    Other,
}

impl CommitCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Feature => "기능 추가",
            Self::Fix => "버그 수정",
            Self::Refactor => "리팩토링",
            Self::Style => "스타일 수정",
            Self::Docs => "문서 수정",
            Self::Test => "테스트",
            Self::Chore => "유지보수",
            Self::Perf => "성능 개선",
            Self::Build => "빌드 설정",
            Self::Ci => "CI 설정",
            Self::Other => "코드 업데이트",
        }
    }

    /// Classify by the conventional-commit prefix of the first line
    pub fn classify(message: &str) -> Self {
        let first_line = message.lines().next().unwrap_or_default().trim_start();

        CATEGORY_PATTERNS
            .iter()
            .find(|(_, pattern)| pattern.is_match(first_line))
            .map_or(Self::Other, |(category, _)| *category)
    }
}

// Checked in order, first match wins
static CATEGORY_PATTERNS: LazyLock<Vec<(CommitCategory, Regex)>> = LazyLock::new(|| {
    [
        (CommitCategory::Feature, "feat|feature"),
        (CommitCategory::Fix, "fix|hotfix"),
        (CommitCategory::Refactor, "refactor"),
        (CommitCategory::Style, "style"),
        (CommitCategory::Docs, "docs|doc"),
        (CommitCategory::Test, "tests|test"),
        (CommitCategory::Chore, "chore"),
        (CommitCategory::Perf, "perf"),
        (CommitCategory::Build, "build"),
        (CommitCategory::Ci, "ci"),
    ]
    .into_iter()
    .map(|(category, tokens)| {
        let pattern = Regex::new(&format!(r"(?i)^(?:{tokens})[(!:]"))
            .expect("category pattern is a valid regex");
        (category, pattern)
    })
    .collect()
});

/// A commit as presented to one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactedCommit {
    pub repository: String,
    pub message: String,
    pub author: String,
    /// Per-post author pseudonym, anonymous viewers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    pub additions: u32,
    pub deletions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub committed_at: OffsetDateTime,
}

/// Transform one commit.
///
/// Author fields, line counts and the timestamp pass through in both modes.
/// Anonymous viewers get a pseudonymous repository, a category label instead
/// of the message and no URL.
pub fn redact_commit(
    commit: &Commit,
    aliases: &RepositoryAliases<'_>,
    authenticated: bool,
    authors: &OrdinalIndex,
) -> RedactedCommit {
    let (repository, message, url, author_alias) = if authenticated {
        (
            aliases.display_name(&commit.repository),
            commit.message.clone(),
            commit.url.clone(),
            None,
        )
    } else {
        (
            aliases.pseudonym(&commit.repository),
            CommitCategory::classify(&commit.message).label().to_string(),
            None,
            authors.get(&commit.author).map(author_pseudonym),
        )
    };

    RedactedCommit {
        repository,
        message,
        author: commit.author.clone(),
        author_alias,
        author_email: commit.author_email.clone(),
        author_avatar: commit.author_avatar.clone(),
        additions: commit.additions,
        deletions: commit.deletions,
        url,
        committed_at: commit.committed_at,
    }
}
