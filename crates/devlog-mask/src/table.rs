//! Repository -> display/mask name table

use std::borrow::Cow;
use std::collections::HashMap;

use devlog_core::{ProjectMapping, RepositoryRecord};

/// Names used to present one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskingInfo {
    /// Shown to authenticated viewers
    pub display_name: String,
    /// Shown verbatim to anonymous viewers when present
    pub mask_name: Option<String>,
    /// True when an explicit mapping row exists
    pub is_registered: bool,
}

impl MaskingInfo {
    /// Mapping of a repository that has no explicit row
    pub fn implicit(repository_name: &str) -> Self {
        Self {
            display_name: repository_name.to_string(),
            mask_name: None,
            is_registered: false,
        }
    }

    fn explicit(mapping: &ProjectMapping) -> Self {
        Self {
            display_name: mapping.display_name.clone(),
            mask_name: mapping.mask_name.clone().filter(|m| !m.is_empty()),
            is_registered: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: HashMap<String, MaskingInfo>,
}

impl MappingTable {
    /// Every non-deleted repository gets an entry; explicit rows override the implicit default.
    /// Rows for repositories missing from `repositories` are dropped.
    pub fn build(repositories: &[RepositoryRecord], mappings: &[ProjectMapping]) -> Self {
        let mut entries: HashMap<String, MaskingInfo> = repositories
            .iter()
            .filter(|r| !r.is_deleted)
            .map(|r| (r.name.clone(), MaskingInfo::implicit(&r.name)))
            .collect();

        for mapping in mappings {
            if let Some(entry) = entries.get_mut(&mapping.repository_name) {
                *entry = MaskingInfo::explicit(mapping);
            }
        }

        Self { entries }
    }

    /// Table made of explicit rows only
    pub fn from_mappings<'a, I>(mappings: I) -> Self
    where
        I: IntoIterator<Item = &'a ProjectMapping>,
    {
        let entries = mappings
            .into_iter()
            .map(|m| (m.repository_name.clone(), MaskingInfo::explicit(m)))
            .collect();
        Self { entries }
    }

    /// Total lookup: unknown repositories resolve to their implicit mapping
    pub fn lookup(&self, repository_name: &str) -> Cow<'_, MaskingInfo> {
        match self.entries.get(repository_name) {
            Some(info) => Cow::Borrowed(info),
            None => Cow::Owned(MaskingInfo::implicit(repository_name)),
        }
    }

    pub fn get(&self, repository_name: &str) -> Option<&MaskingInfo> {
        self.entries.get(repository_name)
    }

    pub fn contains(&self, repository_name: &str) -> bool {
        self.entries.contains_key(repository_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MaskingInfo)> {
        self.entries.iter().map(|(name, info)| (name.as_str(), info))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
