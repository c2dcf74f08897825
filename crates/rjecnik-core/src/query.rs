use rjecnik_types::{CategoryFilter, DisplayRow, Entry, FilterSpec};

use crate::store::EntryStore;

/// Entry selected by a filter, with its current position in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visible<'a> {
    pub index: usize,
    pub entry: &'a Entry,
}

impl Visible<'_> {
    pub fn to_row(&self) -> DisplayRow {
        DisplayRow {
            index: self.index,
            word: self.entry.word.clone(),
            translation: self.entry.translation.clone(),
            category: self.entry.category.clone(),
            favorite: self.entry.favorite,
        }
    }
}

/// Entries matching `spec`, in store order.
///
/// Category, then favorites, then a case-insensitive substring match against
/// word or translation. Any stage whose input is unset is skipped.
pub fn filter<'a>(store: &'a EntryStore, spec: &FilterSpec) -> Vec<Visible<'a>> {
    let needle = spec.search.trim().to_lowercase();

    store
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| match &spec.category {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => e.category == *name,
        })
        .filter(|(_, e)| !spec.favorites_only || e.favorite)
        .filter(|(_, e)| {
            needle.is_empty()
                || e.word.to_lowercase().contains(&needle)
                || e.translation.to_lowercase().contains(&needle)
        })
        .map(|(index, entry)| Visible { index, entry })
        .collect()
}
