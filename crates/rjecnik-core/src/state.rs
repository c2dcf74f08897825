use rjecnik_config::Config;
use rjecnik_config::translator::TranslatorConfig;
use rjecnik_config::validation::ValidationConfig;
use rjecnik_types::{CategoryFilter, DisplayRow, Entry, EntryDraft, FilterSpec, ImportReport, Theme, TransferFormat};
use url::Url;

use crate::category;
use crate::codec;
use crate::error::{DictError, Result};
use crate::link;
use crate::query;
use crate::quickfill::QuickFill;
use crate::registry::NamespaceRegistry;
use crate::storage::{KeyValueStore, THEME_KEY};
use crate::store::Insert;
use crate::undo::{UndoBuffer, UndoToken};

/// Everything one user session works on.
///
/// Owned by whoever handles user events; every operation takes `&mut self`
/// or `&self`, there is no shared state behind it.
pub struct Session {
    registry: NamespaceRegistry,
    policy: ValidationConfig,
    translator: TranslatorConfig,
    filter: FilterSpec,
    undo: UndoBuffer,
    editing: Option<usize>,
    suggestion: QuickFill,
    theme: Theme,
}

impl Session {
    /// Load persisted data and fold in any legacy list
    pub fn open(storage: Box<dyn KeyValueStore>, config: &Config) -> Result<Self> {
        let mut registry = NamespaceRegistry::open(storage, &config.namespaces)?;

        if let Err(e) = registry.migrate_legacy(&config.validation) {
            tracing::warn!("Legacy dictionary left in place: {}", e);
        }

        let theme = match registry.storage().get(THEME_KEY) {
            Ok(value) => value.map(|v| Theme::from_stored(&v)).unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Theme preference unavailable: {}", e);
                Theme::default()
            }
        };

        Ok(Self {
            registry,
            policy: config.validation,
            translator: config.translator.clone(),
            filter: FilterSpec::default(),
            undo: UndoBuffer::new(),
            editing: None,
            suggestion: QuickFill::default(),
            theme,
        })
    }

    pub fn registry(&self) -> &NamespaceRegistry {
        &self.registry
    }

    pub fn selected_pair(&self) -> &str {
        self.registry.selected()
    }

    pub fn entries(&self) -> &[Entry] {
        self.registry.active().entries()
    }

    pub fn add(&mut self, draft: EntryDraft) -> Result<Insert> {
        let policy = self.policy;
        self.registry.mutate_active(|store| store.add(draft, &policy))
    }

    /// Mark `index` as being edited and hand back its current values
    pub fn begin_edit(&mut self, index: usize) -> Result<Entry> {
        let entry = self.registry.active().get(index)?.clone();
        self.editing = Some(index);
        Ok(entry)
    }

    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// A draft rejected by validation leaves the edit open for another try
    pub fn commit_edit(&mut self, draft: EntryDraft) -> Result<Entry> {
        let index = self
            .editing
            .ok_or_else(|| DictError::Validation("no edit in progress".into()))?;

        let result = self.update(index, draft);
        if !matches!(result, Err(DictError::Validation(_))) {
            self.editing = None;
        }
        result
    }

    pub fn update(&mut self, index: usize, draft: EntryDraft) -> Result<Entry> {
        let policy = self.policy;
        self.registry
            .mutate_active(|store| store.update(index, draft, &policy).cloned())
    }

    /// Delete and remember the entry for [`Session::restore`]
    pub fn remove(&mut self, index: usize) -> Result<Entry> {
        let pair = self.registry.selected().to_string();
        let undo = &mut self.undo;
        self.editing = None;

        self.registry.mutate_active(|store| {
            let removed = store.remove(index)?;
            let entry = removed.entry.clone();
            undo.capture(&pair, removed);
            Ok(entry)
        })
    }

    /// Put back the last deleted entry. `Ok(None)` when nothing is pending.
    pub fn restore(&mut self) -> Result<Option<usize>> {
        let Some(UndoToken {
            namespace,
            entry,
            index,
        }) = self.undo.take()
        else {
            return Ok(None);
        };

        self.editing = None;
        let position = self
            .registry
            .mutate(&namespace, |store| Ok(store.insert_at(index, entry)))?;
        Ok(Some(position))
    }

    pub fn pending_undo(&self) -> Option<&UndoToken> {
        self.undo.peek()
    }

    pub fn toggle_favorite(&mut self, index: usize) -> Result<bool> {
        self.registry.mutate_active(|store| store.toggle_favorite(index))
    }

    /// Switch pair; an unfinished edit is abandoned
    pub fn select(&mut self, pair: &str) -> Result<()> {
        self.editing = None;
        self.registry.select(pair)
    }

    pub fn known_namespaces(&self) -> Vec<String> {
        self.registry.known_namespaces()
    }

    pub fn filter_spec(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn set_filter(&mut self, spec: FilterSpec) {
        self.filter = spec;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) {
        self.filter.favorites_only = favorites_only;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn reset_filter(&mut self) {
        self.filter = FilterSpec::default();
    }

    /// Rows to render under the current filter
    pub fn visible(&self) -> Vec<DisplayRow> {
        query::filter(self.registry.active(), &self.filter)
            .iter()
            .map(|v| v.to_row())
            .collect()
    }

    pub fn categories(&self) -> Vec<String> {
        category::all_categories(self.registry.active())
    }

    pub fn filter_choices(&self) -> Vec<String> {
        category::filter_choices(self.registry.active())
    }

    /// Merge parsed text into the active pair; nothing is applied on a parse error
    pub fn import(&mut self, text: &str, format: TransferFormat) -> Result<ImportReport> {
        let candidates = codec::parse(text, format)?;
        let policy = self.policy;
        let report = self
            .registry
            .mutate_active(|store| Ok(store.merge(candidates, &policy)))?;

        tracing::info!(
            "Imported {} of {} entries into '{}'",
            report.added,
            report.total,
            self.registry.selected()
        );
        Ok(report)
    }

    pub fn export(&self, format: TransferFormat) -> Result<String> {
        codec::export(self.entries(), format)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The new theme applies even when it cannot be saved
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.registry
            .storage_mut()
            .set(THEME_KEY, theme.as_stored())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Remember a pre-filled word/translation until the next one arrives
    pub fn suggest(&mut self, fill: QuickFill) {
        self.suggestion = fill;
    }

    pub fn suggestion(&self) -> &QuickFill {
        &self.suggestion
    }

    /// Link-out for `word` into the selected pair's target language
    pub fn translate_link(&self, word: &str) -> Result<Url> {
        let target = link::target_language(self.registry.selected())
            .unwrap_or(&self.translator.fallback_target);
        link::translate_url(&self.translator.base_url, word, target)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.registry.flush()
    }

    pub fn is_dirty(&self) -> bool {
        self.registry.is_dirty()
    }
}
