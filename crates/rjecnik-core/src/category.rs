use std::cmp::Ordering;
use std::collections::BTreeSet;

use rjecnik_types::{ALL_CATEGORIES, UNCATEGORIZED};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::store::EntryStore;

/// Categories offered before the user has made up any
pub const DEFAULT_CATEGORIES: &[&str] = &[
    UNCATEGORIZED,
    "Nouns",
    "Verbs",
    "Adjectives",
    "Phrases",
];

/// Default categories plus every distinct category found in `store`
pub fn all_categories(store: &EntryStore) -> Vec<String> {
    let mut set: BTreeSet<&str> = DEFAULT_CATEGORIES.iter().copied().collect();
    set.extend(
        store
            .entries()
            .iter()
            .map(|e| e.category.as_str())
            .filter(|c| !c.trim().is_empty()),
    );

    let mut categories: Vec<String> = set.into_iter().map(String::from).collect();
    categories.sort_by(|a, b| collate(a, b));
    categories
}

/// Choices for the filter selector, led by the synthetic "All"
pub fn filter_choices(store: &EntryStore) -> Vec<String> {
    let mut choices = vec![ALL_CATEGORIES.to_string()];
    choices.extend(all_categories(store));
    choices
}

pub fn is_known(store: &EntryStore, category: &str) -> bool {
    category == ALL_CATEGORIES
        || DEFAULT_CATEGORIES.contains(&category)
        || store.entries().iter().any(|e| e.category == category)
}

/// Dictionary order: diacritics and case only break ties
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
