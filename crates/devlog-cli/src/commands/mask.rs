use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use devlog_core::Post;
use devlog_mask::{MappingRegistry, PostMasker};
use tracing::debug;

pub async fn handle(
    file: &Path,
    authenticated: bool,
    list: bool,
    registry: Arc<MappingRegistry>,
) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let masker = PostMasker::new(registry);

    let output = if list {
        let posts: Vec<Post> = serde_json::from_str(&raw).context("Invalid post list JSON")?;
        let masked = masker.mask_post_list(&posts, authenticated).await?;
        debug!("Masked {} posts from {}", masked.len(), file.display());
        serde_json::to_string_pretty(&masked)?
    } else {
        let post: Post = serde_json::from_str(&raw).context("Invalid post JSON")?;
        let masked = masker.mask_post(&post, authenticated).await?;
        serde_json::to_string_pretty(&masked)?
    };

    println!("{}", output);
    Ok(())
}
