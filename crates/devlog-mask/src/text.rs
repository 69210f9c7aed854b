//! Literal substitution of repository identifiers in free text

use crate::alias::RepositoryAliases;
use crate::pseudonym::OrdinalIndex;
use crate::table::MappingTable;

/// Ordered literal -> replacement pairs, longest literal first.
///
/// A longer name is always substituted before any shorter name it contains,
/// so "Kiaf SEOUL" is never split by an earlier "Kiaf" replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementSet {
    pairs: Vec<(String, String)>,
}

impl ReplacementSet {
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut pairs: Vec<(String, String)> = pairs
            .into_iter()
            .filter(|(literal, _)| !literal.is_empty())
            .collect();

        pairs.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
                .then_with(|| a.1.cmp(&b.1))
        });
        pairs.dedup_by(|next, kept| next.0 == kept.0);

        Self { pairs }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Replace every occurrence of every literal, one pair at a time
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();

        for (literal, replacement) in &self.pairs {
            if result.contains(literal.as_str()) {
                result = result.replace(literal.as_str(), replacement);
            }
        }

        result
    }
}

/// Redact repository identifiers from a single text.
///
/// Standalone entry point for callers holding one text; `mask_post` builds the
/// replacement list once and shares it between content and summary.
/// Authenticated viewers and absent text pass through unchanged.
/// `known_repositories` are the repositories referenced by the commits being
/// rendered; any of them missing from `mappings` still get a pseudonym.
pub fn redact_text(
    text: Option<&str>,
    mappings: &MappingTable,
    global_index: Option<&OrdinalIndex>,
    known_repositories: &[&str],
    authenticated: bool,
) -> Option<String> {
    let replacements = (!authenticated).then(|| {
        RepositoryAliases::new(mappings, global_index, known_repositories).replacements()
    });
    redact_text_with(text, replacements.as_ref())
}

/// Apply `replacements` to `text`; `None` means pass through (authenticated viewer)
pub fn redact_text_with(
    text: Option<&str>,
    replacements: Option<&ReplacementSet>,
) -> Option<String> {
    let text = text?;
    Some(match replacements {
        Some(set) => set.apply(text),
        None => text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use devlog_core::ProjectMapping;

    fn pair(literal: &str, replacement: &str) -> (String, String) {
        (literal.to_string(), replacement.to_string())
    }

    #[test]
    fn test_longest_literal_first() {
        let set = ReplacementSet::new(vec![
            pair("Kiaf", "프로젝트 X"),
            pair("Kiaf SEOUL", "프로젝트 Y"),
        ]);

        assert_eq!(set.apply("Kiaf SEOUL 행사"), "프로젝트 Y 행사");
        assert_eq!(set.apply("Kiaf 행사와 Kiaf SEOUL"), "프로젝트 X 행사와 프로젝트 Y");
    }

    #[test]
    fn test_replaces_all_occurrences() {
        let set = ReplacementSet::new(vec![pair("alpha", "Repository A")]);

        assert_eq!(set.apply("alpha, alpha, alpha"), "Repository A, Repository A, Repository A");
    }

    #[test]
    fn test_literal_not_pattern() {
        let set = ReplacementSet::new(vec![pair("a.c", "X"), pair("(b)", "Y")]);

        assert_eq!(set.apply("abc a.c (b) b"), "abc X Y b");
    }

    #[test]
    fn test_empty_literal_ignored() {
        let set = ReplacementSet::new(vec![pair("", "X")]);

        assert!(set.is_empty());
        assert_eq!(set.apply("text"), "text");
    }

    #[test]
    fn test_order_independent_of_input_order() {
        let a = ReplacementSet::new(vec![pair("ab", "1"), pair("abc", "2"), pair("b", "3")]);
        let b = ReplacementSet::new(vec![pair("b", "3"), pair("ab", "1"), pair("abc", "2")]);

        assert_eq!(a, b);
        assert_eq!(a.pairs()[0].0, "abc");
    }

    #[test]
    fn test_redact_text_modes() {
        let kiaf = ProjectMapping::new("kiaf", "Kiaf").with_mask_name("프로젝트 X");
        let seoul = ProjectMapping::new("kiaf-seoul", "Kiaf SEOUL").with_mask_name("프로젝트 Y");
        let mappings = MappingTable::from_mappings([&kiaf, &seoul]);

        let anonymous = redact_text(Some("Kiaf SEOUL 행사"), &mappings, None, &[], false);
        assert_eq!(anonymous.as_deref(), Some("프로젝트 Y 행사"));

        let internal = redact_text(Some("Kiaf SEOUL 행사"), &mappings, None, &[], true);
        assert_eq!(internal.as_deref(), Some("Kiaf SEOUL 행사"));

        assert!(redact_text(None, &mappings, None, &[], false).is_none());
    }

    #[test]
    fn test_redact_text_with_passthrough() {
        let set = ReplacementSet::new(vec![pair("Kiaf", "프로젝트 X")]);

        let redacted = redact_text_with(Some("Kiaf 행사"), Some(&set));
        assert_eq!(redacted.as_deref(), Some("프로젝트 X 행사"));

        let internal = redact_text_with(Some("Kiaf 행사"), None);
        assert_eq!(internal.as_deref(), Some("Kiaf 행사"));

        assert!(redact_text_with(None, Some(&set)).is_none());
    }

    #[test]
    fn test_unmapped_commit_repository_caught() {
        let mappings = MappingTable::default();
        let redacted = redact_text(
            Some("secret-client 작업"),
            &mappings,
            None,
            &["secret-client"],
            false,
        );

        assert_eq!(redacted.as_deref(), Some("Repository A 작업"));
    }
}
