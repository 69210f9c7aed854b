//! Storage layer for devlog
//!
//! This crate provides:
//! - SQLite tables for repositories and project mappings
//! - The `MappingSource`/`MappingWriter` contracts over them

pub mod db;
pub mod error;

pub use db::Storage;
pub use error::{Result, StorageError};
