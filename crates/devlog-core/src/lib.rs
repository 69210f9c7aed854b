//! Core domain models for devlog
//!
//! This crate contains:
//! - Domain models (Post, Commit, RepositoryRecord, ProjectMapping)
//! - Read/write contracts for the repository mapping store
//! - The shared error type

pub mod error;
pub mod mapping;
pub mod post;
pub mod source;

pub use error::{Error, Result};
pub use mapping::{ProjectMapping, RepositoryRecord};
pub use post::{Commit, Post};
pub use source::{MappingSource, MappingWriter};
