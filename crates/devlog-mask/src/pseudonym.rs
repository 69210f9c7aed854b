//! Identity index allocation and pseudonym letters

use std::collections::HashMap;

/// Prefix of synthesized repository pseudonyms
pub const REPOSITORY_PREFIX: &str = "Repository";

/// Prefix of synthesized author pseudonyms
pub const AUTHOR_PREFIX: &str = "개발자";

/// Convert a zero-based index into a bijective base-26 letter sequence.
///
/// `0 -> "A"`, `25 -> "Z"`, `26 -> "AA"`, `701 -> "ZZ"`, `702 -> "AAA"`.
pub fn pseudonym_letter(index: usize) -> String {
    let mut n = index as u128 + 1;
    let mut letters = Vec::new();

    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }

    letters.iter().rev().collect()
}

pub fn repository_pseudonym(index: usize) -> String {
    format!("{} {}", REPOSITORY_PREFIX, pseudonym_letter(index))
}

pub fn author_pseudonym(index: usize) -> String {
    format!("{} {}", AUTHOR_PREFIX, pseudonym_letter(index))
}

/// Stable value -> small integer assignment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrdinalIndex {
    positions: HashMap<String, usize>,
}

impl OrdinalIndex {
    /// Assign indices in order of first appearance, ignoring repeats
    pub fn from_first_appearance<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for value in values {
            index.insert_next(value.as_ref());
        }
        index
    }

    /// Assign indices by ascending name order
    pub fn from_sorted_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        sorted.sort();
        sorted.dedup();
        Self::from_first_appearance(sorted)
    }

    /// Index of `value`, assigning the next free one if it is new
    pub fn insert_next(&mut self, value: &str) -> usize {
        let next = self.positions.len();
        *self.positions.entry(value.to_string()).or_insert(next)
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.positions.get(value).copied()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.positions.contains_key(value)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Entries ordered by index
    pub fn entries(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self
            .positions
            .iter()
            .map(|(value, i)| (value.as_str(), *i))
            .collect();
        entries.sort_by_key(|(_, i)| *i);
        entries
    }
}
