//! Per-call repository name resolution

use crate::pseudonym::{OrdinalIndex, repository_pseudonym};
use crate::table::MappingTable;
use crate::text::ReplacementSet;

/// Resolves display names and pseudonyms for one masking call.
///
/// Positions come from the global index when one is supplied. Repositories it
/// does not cover are numbered after it: commit repositories in order of first
/// appearance, then the remaining mapped repositories by name.
#[derive(Debug)]
pub struct RepositoryAliases<'a> {
    mappings: &'a MappingTable,
    global: Option<&'a OrdinalIndex>,
    overflow: OrdinalIndex,
    known: Vec<String>,
}

impl<'a> RepositoryAliases<'a> {
    pub fn new<I, S>(
        mappings: &'a MappingTable,
        global: Option<&'a OrdinalIndex>,
        known_repositories: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known: Vec<String> = Vec::new();
        for name in known_repositories {
            let name = name.as_ref();
            if !known.iter().any(|k| k == name) {
                known.push(name.to_string());
            }
        }

        let mut mapped: Vec<&str> = mappings.iter().map(|(name, _)| name).collect();
        mapped.sort_unstable();

        let mut overflow = OrdinalIndex::default();
        for name in known.iter().map(String::as_str).chain(mapped) {
            if !global.is_some_and(|g| g.contains(name)) {
                overflow.insert_next(name);
            }
        }

        Self {
            mappings,
            global,
            overflow,
            known,
        }
    }

    fn position(&self, repository_name: &str) -> usize {
        if let Some(i) = self.global.and_then(|g| g.get(repository_name)) {
            return i;
        }
        let base = self.global.map_or(0, OrdinalIndex::len);
        base + self
            .overflow
            .get(repository_name)
            .unwrap_or(self.overflow.len())
    }

    /// Name shown to authenticated viewers
    pub fn display_name(&self, repository_name: &str) -> String {
        self.mappings.lookup(repository_name).display_name.clone()
    }

    /// Name shown to anonymous viewers
    pub fn pseudonym(&self, repository_name: &str) -> String {
        match &self.mappings.lookup(repository_name).mask_name {
            Some(mask_name) => mask_name.clone(),
            None => repository_pseudonym(self.position(repository_name)),
        }
    }

    /// Literal -> pseudonym pairs covering every mapped and referenced repository
    pub fn replacements(&self) -> ReplacementSet {
        let mut pairs = Vec::new();

        for (name, info) in self.mappings.iter() {
            let pseudonym = self.pseudonym(name);
            if info.display_name != name {
                pairs.push((name.to_string(), pseudonym.clone()));
            }
            pairs.push((info.display_name.clone(), pseudonym));
        }

        for name in &self.known {
            if !self.mappings.contains(name) {
                pairs.push((name.clone(), self.pseudonym(name)));
            }
        }

        ReplacementSet::new(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devlog_core::ProjectMapping;

    fn table() -> MappingTable {
        let alpha = ProjectMapping::new("repo-alpha", "Alpha Project").with_mask_name("프로젝트 A");
        let beta = ProjectMapping::new("repo-beta", "Beta Project");
        MappingTable::from_mappings([&alpha, &beta])
    }

    #[test]
    fn test_mask_name_wins_over_index() {
        let mappings = table();
        let global = OrdinalIndex::from_sorted_names(["repo-alpha", "repo-beta"]);
        let aliases = RepositoryAliases::new(&mappings, Some(&global), ["repo-alpha"]);

        assert_eq!(aliases.pseudonym("repo-alpha"), "프로젝트 A");
        assert_eq!(aliases.pseudonym("repo-beta"), "Repository B");
        assert_eq!(aliases.display_name("repo-beta"), "Beta Project");
    }

    #[test]
    fn test_unindexed_repositories_follow_global_index() {
        let mappings = table();
        let global = OrdinalIndex::from_sorted_names(["repo-alpha", "repo-beta"]);
        let aliases =
            RepositoryAliases::new(&mappings, Some(&global), ["new-one", "new-two", "new-one"]);

        assert_eq!(aliases.pseudonym("new-one"), "Repository C");
        assert_eq!(aliases.pseudonym("new-two"), "Repository D");
        assert_eq!(aliases.display_name("new-one"), "new-one");
    }

    #[test]
    fn test_local_index_without_global() {
        let mappings = table();
        let aliases = RepositoryAliases::new(&mappings, None, ["repo-beta", "side"]);

        assert_eq!(aliases.pseudonym("repo-beta"), "Repository A");
        assert_eq!(aliases.pseudonym("side"), "Repository B");
        // mapped but unreferenced repositories come after, by name
        assert_eq!(aliases.pseudonym("repo-alpha"), "프로젝트 A");
    }

    #[test]
    fn test_replacements_cover_raw_and_display_names() {
        let mappings = table();
        let global = OrdinalIndex::from_sorted_names(["repo-alpha", "repo-beta"]);
        let aliases = RepositoryAliases::new(&mappings, Some(&global), ["orphan"]);

        let set = aliases.replacements();
        let text = set.apply("repo-alpha, Alpha Project, repo-beta, orphan");

        assert_eq!(text, "프로젝트 A, 프로젝트 A, Repository B, Repository C");
    }
}
