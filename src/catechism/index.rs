//! In-memory paragraph index
//!
//! Built once by the pagination walk and read-only afterwards.

use super::Paragraph;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Paragraphs keyed by number, iterated in ascending order
#[derive(Debug, Clone, Default)]
pub struct CatechismIndex {
    paragraphs: BTreeMap<u32, Paragraph>,
}

impl CatechismIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a paragraph unless the number is already present
    ///
    /// The first text seen for a number wins. Returns `true` if the paragraph
    /// was inserted, `false` if it was a duplicate.
    pub fn insert(&mut self, number: u32, text: impl Into<String>) -> bool {
        match self.paragraphs.entry(number) {
            Entry::Vacant(slot) => {
                slot.insert(Paragraph::new(number, text));
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn lookup(&self, number: u32) -> Option<&Paragraph> {
        self.paragraphs.get(&number)
    }

    /// All paragraphs in ascending number order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.values()
    }

    pub fn contains(&self, number: u32) -> bool {
        self.paragraphs.contains_key(&number)
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Lowest paragraph number in the index
    pub fn first_number(&self) -> Option<u32> {
        self.paragraphs.keys().next().copied()
    }

    /// Next paragraph number present after `number`
    pub fn next_number_after(&self, number: u32) -> Option<u32> {
        self.paragraphs
            .range((Bound::Excluded(number), Bound::Unbounded))
            .next()
            .map(|(n, _)| *n)
    }
}
