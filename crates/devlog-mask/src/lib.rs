//! Privacy-preserving projection of posts and commits
//!
//! Authenticated viewers get real repository names, messages and links.
//! Anonymous viewers get the same aggregate with every repository identity
//! replaced by a stable pseudonym:
//! - `registry`: cached repository -> display/mask name table plus the global index
//! - `pseudonym`: bijective letter allocation ("Repository A", "개발자 B")
//! - `text`: longest-first literal substitution over free text
//! - `commit`: per-commit field transform
//! - `post`: orchestration over a post and its commits

pub mod admin;
pub mod alias;
pub mod commit;
pub mod post;
pub mod pseudonym;
pub mod registry;
pub mod table;
pub mod text;

pub use admin::MappingAdmin;
pub use alias::RepositoryAliases;
pub use commit::{CommitCategory, RedactedCommit, redact_commit};
pub use post::{PostMasker, RedactedPost, mask_post};
pub use pseudonym::{OrdinalIndex, pseudonym_letter};
pub use registry::{MappingRegistry, RegistrySnapshot};
pub use table::{MappingTable, MaskingInfo};
pub use text::{ReplacementSet, redact_text, redact_text_with};
