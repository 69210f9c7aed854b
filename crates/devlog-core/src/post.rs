//! Post and commit aggregates as supplied by the rendering layer

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single commit attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Raw repository name
    pub repository: String,
    pub message: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub committed_at: OffsetDateTime,
}

/// An authored post together with the commits it describes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

impl Post {
    /// Distinct repository names referenced by the commits, in order of first appearance
    pub fn repository_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for commit in &self.commits {
            if !names.contains(&commit.repository.as_str()) {
                names.push(&commit.repository);
            }
        }
        names
    }
}
