//! Post-level orchestration
//!
//! Pure transform from a post and its commits to the projection one viewer
//! is allowed to see. Only `PostMasker` touches the registry.

use std::sync::Arc;

use devlog_core::{Post, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alias::RepositoryAliases;
use crate::commit::{RedactedCommit, redact_commit};
use crate::pseudonym::OrdinalIndex;
use crate::registry::MappingRegistry;
use crate::table::MappingTable;
use crate::text::redact_text_with;

/// A post as presented to one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactedPost {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub commits: Vec<RedactedCommit>,
}

/// Mask a single post.
///
/// Without a global index, repositories are numbered by first appearance in
/// this post's commits. Titles are never redacted.
pub fn mask_post(
    post: &Post,
    mappings: &MappingTable,
    authenticated: bool,
    global_index: Option<&OrdinalIndex>,
) -> RedactedPost {
    let aliases = RepositoryAliases::new(mappings, global_index, post.repository_names());
    let authors = OrdinalIndex::from_first_appearance(post.commits.iter().map(|c| &c.author));

    // one replacement list serves both text fields
    let replacements = (!authenticated).then(|| aliases.replacements());
    let content = redact_text_with(post.content.as_deref(), replacements.as_ref());
    let summary = redact_text_with(post.summary.as_deref(), replacements.as_ref());

    let commits = post
        .commits
        .iter()
        .map(|commit| redact_commit(commit, &aliases, authenticated, &authors))
        .collect();

    RedactedPost {
        title: post.title.clone(),
        content,
        summary,
        commits,
    }
}

/// Registry-backed entry point for page and list renderers
pub struct PostMasker {
    registry: Arc<MappingRegistry>,
}

impl PostMasker {
    pub fn new(registry: Arc<MappingRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<MappingRegistry> {
        &self.registry
    }

    pub async fn mask_post(&self, post: &Post, authenticated: bool) -> Result<RedactedPost> {
        let snapshot = self.registry.snapshot().await?;
        Ok(mask_post(
            post,
            snapshot.mappings(),
            authenticated,
            Some(snapshot.index()),
        ))
    }

    /// Mask every post against one registry snapshot so pseudonyms agree across the list
    pub async fn mask_post_list(
        &self,
        posts: &[Post],
        authenticated: bool,
    ) -> Result<Vec<RedactedPost>> {
        let snapshot = self.registry.snapshot().await?;
        debug!(
            "Masking {} posts against registry epoch {} (authenticated: {})",
            posts.len(),
            snapshot.epoch,
            authenticated
        );

        Ok(posts
            .iter()
            .map(|post| {
                mask_post(
                    post,
                    snapshot.mappings(),
                    authenticated,
                    Some(snapshot.index()),
                )
            })
            .collect())
    }
}
