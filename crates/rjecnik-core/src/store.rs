use rjecnik_config::validation::ValidationConfig;
use rjecnik_types::{Entry, EntryDraft, ImportReport, UNCATEGORIZED};
use serde::{Deserialize, Serialize};

use crate::error::{DictError, Result};

/// Result of an insert path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert {
    Added,
    /// An entry with the same `(word, translation)` already exists
    Duplicate,
}

/// Entry taken out of a store, with the position it held
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub entry: Entry,
    pub index: usize,
}

/// Ordered entries of one language pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Entry> {
        self.check_index(index)?;
        Ok(&self.entries[index])
    }

    /// Whether an entry with this `(word, translation)` pair is stored
    pub fn contains_pair(&self, word: &str, translation: &str, policy: &ValidationConfig) -> bool {
        self.entries
            .iter()
            .any(|e| same_pair(e, word, translation, policy.case_insensitive_duplicates))
    }

    /// Append a new entry unless it is invalid or already present
    pub fn add(&mut self, draft: EntryDraft, policy: &ValidationConfig) -> Result<Insert> {
        let (word, translation) = validate(&draft, policy.require_translation)?;

        if self.contains_pair(&word, &translation, policy) {
            tracing::debug!("Skipping duplicate '{}' / '{}'", word, translation);
            return Ok(Insert::Duplicate);
        }

        self.entries.push(Entry {
            word,
            translation,
            category: resolve_category(draft.category),
            favorite: draft.favorite.unwrap_or(false),
        });
        Ok(Insert::Added)
    }

    /// Replace the entry at `index`.
    ///
    /// The favorite flag and the category carry over unless the draft sets
    /// them. No duplicate check is made here.
    pub fn update(&mut self, index: usize, draft: EntryDraft, policy: &ValidationConfig) -> Result<&Entry> {
        self.check_index(index)?;
        let (word, translation) = validate(&draft, policy.require_translation)?;

        let slot = &mut self.entries[index];
        slot.word = word;
        slot.translation = translation;
        if let Some(category) = draft.category {
            slot.category = resolve_category(Some(category));
        }
        if let Some(favorite) = draft.favorite {
            slot.favorite = favorite;
        }

        Ok(&self.entries[index])
    }

    pub fn remove(&mut self, index: usize) -> Result<Removed> {
        self.check_index(index)?;
        let entry = self.entries.remove(index);
        Ok(Removed { entry, index })
    }

    /// Put an entry back at `index`, appending when the store has shrunk
    /// below it. Returns the position actually used.
    pub fn insert_at(&mut self, index: usize, entry: Entry) -> usize {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
        index
    }

    /// Returns the new flag
    pub fn toggle_favorite(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        let entry = &mut self.entries[index];
        entry.favorite = !entry.favorite;
        Ok(entry.favorite)
    }

    /// Append every candidate with a non-empty word that is not stored yet
    pub fn merge(&mut self, candidates: Vec<EntryDraft>, policy: &ValidationConfig) -> ImportReport {
        let total = candidates.len();
        let mut added = 0;

        for draft in candidates {
            let word = draft.word.trim();
            if word.is_empty() {
                continue;
            }
            let translation = draft.translation.trim();
            if self.contains_pair(word, translation, policy) {
                continue;
            }

            self.entries.push(Entry {
                word: word.to_string(),
                translation: translation.to_string(),
                category: resolve_category(draft.category),
                favorite: draft.favorite.unwrap_or(false),
            });
            added += 1;
        }

        ImportReport { added, total }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(DictError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }
}

fn validate(draft: &EntryDraft, require_translation: bool) -> Result<(String, String)> {
    let word = draft.word.trim();
    if word.is_empty() {
        return Err(DictError::Validation("word must not be empty".into()));
    }

    let translation = draft.translation.trim();
    if require_translation && translation.is_empty() {
        return Err(DictError::Validation("translation must not be empty".into()));
    }

    Ok((word.to_string(), translation.to_string()))
}

fn resolve_category(category: Option<String>) -> String {
    match category {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}

fn same_pair(entry: &Entry, word: &str, translation: &str, ignore_case: bool) -> bool {
    if ignore_case {
        entry.word.to_lowercase() == word.to_lowercase()
            && entry.translation.to_lowercase() == translation.to_lowercase()
    } else {
        entry.word == word && entry.translation == translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ValidationConfig {
        ValidationConfig::default()
    }

    fn sample() -> EntryStore {
        EntryStore::from_entries(vec![Entry::new("cat", "dog"), Entry::new("apple", "jabuka")])
    }

    #[test]
    fn test_add_applies_defaults() {
        let mut store = sample();
        let outcome = store.add(EntryDraft::new("sun", "sunce"), &policy()).unwrap();

        assert_eq!(outcome, Insert::Added);
        assert_eq!(store.len(), 3);
        let last = store.get(2).unwrap();
        assert_eq!(last.word, "sun");
        assert_eq!(last.translation, "sunce");
        assert_eq!(last.category, UNCATEGORIZED);
        assert!(!last.favorite);
    }

    #[test]
    fn test_add_trims_and_rejects_empty_word() {
        let mut store = EntryStore::new();

        let err = store.add(EntryDraft::new("   ", "x"), &policy()).unwrap_err();
        assert!(matches!(err, DictError::Validation(_)));
        assert!(store.is_empty());

        store.add(EntryDraft::new("  kuca ", " house  "), &policy()).unwrap();
        assert_eq!(store.entries()[0], Entry::new("kuca", "house"));
    }

    #[test]
    fn test_translation_requirement_is_policy() {
        let mut store = EntryStore::new();

        let err = store.add(EntryDraft::new("hund", ""), &policy()).unwrap_err();
        assert!(matches!(err, DictError::Validation(_)));

        let lenient = ValidationConfig {
            require_translation: false,
            ..policy()
        };
        assert_eq!(store.add(EntryDraft::new("hund", ""), &lenient).unwrap(), Insert::Added);
    }

    #[test]
    fn test_add_skips_duplicates() {
        let mut store = sample();
        assert_eq!(store.add(EntryDraft::new("cat", "dog"), &policy()).unwrap(), Insert::Duplicate);
        assert_eq!(store.add(EntryDraft::new("Cat", "dog"), &policy()).unwrap(), Insert::Added);

        let folded = ValidationConfig {
            case_insensitive_duplicates: true,
            ..policy()
        };
        assert_eq!(store.add(EntryDraft::new("APPLE", "Jabuka"), &folded).unwrap(), Insert::Duplicate);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_update_preserves_favorite_and_category() {
        let mut store = sample();
        store.toggle_favorite(0).unwrap();
        store
            .update(0, EntryDraft::new("cat", "pas").with_category("Animals"), &policy())
            .unwrap();

        let updated = store.update(0, EntryDraft::new("cat", "mačka"), &policy()).unwrap();
        assert_eq!(updated.translation, "mačka");
        assert_eq!(updated.category, "Animals");
        assert!(updated.favorite);

        let updated = store
            .update(0, EntryDraft::new("cat", "mačka").with_favorite(false), &policy())
            .unwrap();
        assert!(!updated.favorite);
    }

    #[test]
    fn test_update_may_create_duplicates() {
        let mut store = sample();
        store.update(1, EntryDraft::new("cat", "dog"), &policy()).unwrap();
        assert_eq!(store.entries()[0], store.entries()[1]);
    }

    #[test]
    fn test_stale_index() {
        let mut store = sample();
        assert!(matches!(
            store.remove(2),
            Err(DictError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(store.toggle_favorite(5).is_err());
        assert!(store.update(9, EntryDraft::new("a", "b"), &policy()).is_err());
        assert_eq!(store, sample());
    }

    #[test]
    fn test_insert_at_clamps_to_end() {
        let mut store = sample();
        let at = store.insert_at(10, Entry::new("sun", "sunce"));
        assert_eq!(at, 2);
        assert_eq!(store.entries()[2].word, "sun");

        store.insert_at(0, Entry::new("moon", "mjesec"));
        assert_eq!(store.entries()[0].word, "moon");
    }

    #[test]
    fn test_merge_reports_added_and_total() {
        let mut store = sample();
        let report = store.merge(
            vec![
                EntryDraft::new("cat", "dog"),
                EntryDraft::new("", "nothing"),
                EntryDraft::new("sun", "sunce"),
                EntryDraft::new("sun", "sunce"),
                EntryDraft::new("tree", "").with_favorite(true),
            ],
            &policy(),
        );

        assert_eq!(report, ImportReport { added: 2, total: 5 });
        assert_eq!(store.len(), 4);
        assert!(store.entries()[3].favorite);
    }
}
