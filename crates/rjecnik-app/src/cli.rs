use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rjecnik_types::{CategoryFilter, Command, EntryDraft, FilterSpec, Theme, ThemeChange, TransferFormat};

#[derive(Debug, Parser)]
#[command(name = "rjecnik", version, about = "Personal word/translation dictionary")]
pub struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the dictionary data
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Switch to this language pair (e.g. `de-bs`) before running the command
    #[arg(long, global = true)]
    pub pair: Option<String>,

    /// Keep everything in memory
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for TransferFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => TransferFormat::Json,
            FormatArg::Csv => TransferFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Toggle,
    Dark,
    Light,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Add a word
    Add {
        word: String,
        #[arg(default_value = "")]
        translation: String,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        favorite: bool,
    },
    /// Replace the entry at INDEX
    Edit {
        index: usize,
        word: String,
        translation: String,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        favorite: Option<bool>,
    },
    /// Delete the entry at INDEX
    Remove { index: usize },
    /// Flip the favorite flag of the entry at INDEX
    Favorite { index: usize },
    /// Show entries of the selected pair
    List {
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        favorites: bool,
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Known categories
    Categories,
    /// Known language pairs
    Pairs,
    /// Make PAIR the selected language pair
    Select { pair: String },
    /// Merge a JSON or CSV file into the selected pair
    Import { file: PathBuf },
    /// Write the selected pair to a file
    Export {
        file: PathBuf,
        /// Defaults to the file extension
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
    /// Show or change the theme preference
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeArg>,
    },
    /// Suggest a word/translation pair from the clipboard
    Paste,
    /// Print a translation link for WORD
    Translate { word: String },
    /// Interactive session with undo and the message bridge
    Shell,
}

impl CliCommand {
    /// Filter to apply before listing
    pub fn filter_spec(&self) -> Option<FilterSpec> {
        match self {
            CliCommand::List {
                category,
                favorites,
                search,
            } => Some(FilterSpec {
                category: category
                    .as_deref()
                    .map(CategoryFilter::parse)
                    .unwrap_or_default(),
                favorites_only: *favorites,
                search: search.clone().unwrap_or_default(),
            }),
            _ => None,
        }
    }

    /// `None` for the interactive shell
    pub fn into_command(self) -> Option<Command> {
        let command = match self {
            CliCommand::Add {
                word,
                translation,
                category,
                favorite,
            } => {
                let mut draft = EntryDraft::new(word, translation).with_favorite(favorite);
                draft.category = category;
                Command::Add(draft)
            }
            CliCommand::Edit {
                index,
                word,
                translation,
                category,
                favorite,
            } => Command::Edit {
                index,
                draft: EntryDraft {
                    word,
                    translation,
                    category,
                    favorite,
                },
            },
            CliCommand::Remove { index } => Command::Remove(index),
            CliCommand::Favorite { index } => Command::Favorite(index),
            CliCommand::List { .. } => Command::List,
            CliCommand::Categories => Command::Categories,
            CliCommand::Pairs => Command::Pairs,
            CliCommand::Select { pair } => Command::Select(pair),
            CliCommand::Import { file } => Command::Import(file),
            CliCommand::Export { file, format } => Command::Export {
                path: file,
                format: format.map(TransferFormat::from),
            },
            CliCommand::Theme { mode } => Command::Theme(match mode {
                None => ThemeChange::Show,
                Some(ThemeArg::Toggle) => ThemeChange::Toggle,
                Some(ThemeArg::Dark) => ThemeChange::Set(Theme::Dark),
                Some(ThemeArg::Light) => ThemeChange::Set(Theme::Light),
            }),
            CliCommand::Paste => Command::Paste,
            CliCommand::Translate { word } => Command::Translate(Some(word)),
            CliCommand::Shell => return None,
        };
        Some(command)
    }
}
