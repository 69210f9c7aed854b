//! Repository and project mapping records

use serde::{Deserialize, Serialize};

/// A repository known to the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    #[serde(default)]
    pub is_deleted: bool,
}

impl RepositoryRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_deleted: false,
        }
    }
}

/// An explicit display/mask name pair for one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMapping {
    pub repository_name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_name: Option<String>,
}

impl ProjectMapping {
    pub fn new(repository_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            repository_name: repository_name.into(),
            display_name: display_name.into(),
            mask_name: None,
        }
    }

    pub fn with_mask_name(mut self, mask_name: impl Into<String>) -> Self {
        self.mask_name = Some(mask_name.into());
        self
    }
}
