use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Category assigned to entries that were stored without one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Synthetic filter value matching every category
pub const ALL_CATEGORIES: &str = "All";

fn default_category() -> String {
    UNCATEGORIZED.to_string()
}

/// One vocabulary pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub favorite: bool,
}

impl Entry {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            category: default_category(),
            favorite: false,
        }
    }
}

/// Caller-supplied candidate for an entry.
///
/// Optional fields are resolved by the entry store: a fresh entry falls back
/// to `Uncategorized`/not favorite, an edited entry keeps its previous values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub word: String,
    pub translation: String,
    pub category: Option<String>,
    pub favorite: Option<bool>,
}

impl EntryDraft {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            category: None,
            favorite: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = Some(favorite);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Named(name) => name,
        }
    }
}

/// Active category/favorites/search combination controlling visible entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub category: CategoryFilter,
    pub favorites_only: bool,
    pub search: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value written to the theme preference key
    pub fn as_stored(self) -> &'static str {
        match self {
            Theme::Light => "disabled",
            Theme::Dark => "enabled",
        }
    }

    pub fn from_stored(value: &str) -> Self {
        if value == "enabled" { Theme::Dark } else { Theme::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChange {
    Show,
    Toggle,
    Set(Theme),
}

/// Outcome of merging imported candidates into a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferFormat {
    Json,
    Csv,
}

impl TransferFormat {
    /// `.json` files are JSON, everything else is treated as delimited text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => TransferFormat::Json,
            _ => TransferFormat::Csv,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TransferFormat::Json => "json",
            TransferFormat::Csv => "csv",
        }
    }
}

/// Row handed to the renderer, addressed by its current index in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub index: usize,
    pub word: String,
    pub translation: String,
    pub category: String,
    pub favorite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeAction {
    Prefill,
    Save,
}

/// Request sent by a companion page over the message bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeMessage {
    pub action: BridgeAction,
    pub word: String,
    #[serde(default)]
    pub translation: String,
}

/// User intent, produced by the shell input or the one-shot CLI
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(EntryDraft),
    Edit { index: usize, draft: EntryDraft },
    Remove(usize),
    Undo,
    Favorite(usize),
    Select(String),
    Filter(CategoryFilter),
    FavoritesOnly(bool),
    Search(String),
    ResetFilter,
    List,
    Categories,
    Pairs,
    Import(PathBuf),
    Export { path: PathBuf, format: Option<TransferFormat> },
    Theme(ThemeChange),
    Paste,
    Translate(Option<String>),
    Help,
    Quit,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(Command),
    Bridge(BridgeMessage),
    ShowRows(Vec<DisplayRow>),
    ShowLines(Vec<String>),
    Status(String),
    Failure(String),
    Prefill {
        word: Option<String>,
        translation: Option<String>,
    },
    Shutdown,
}
