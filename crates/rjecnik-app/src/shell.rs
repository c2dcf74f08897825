use std::path::PathBuf;

use rjecnik_types::{CategoryFilter, Command, EntryDraft, Theme, ThemeChange, TransferFormat};

pub const HELP: &[&str] = &[
    "add WORD TRANSLATION [CATEGORY]   add an entry (quote multi-word values)",
    "edit INDEX WORD TRANSLATION [CATEGORY]",
    "rm INDEX                          delete, `undo` brings it back",
    "undo                              restore the last deleted entry",
    "fav INDEX                         toggle favorite",
    "select PAIR                       switch language pair, e.g. de-bs",
    "filter CATEGORY|All               show one category",
    "favorites on|off                  show favorites only",
    "search [TEXT]                     filter by word or translation",
    "reset                             clear all filters",
    "list | categories | pairs",
    "import FILE | export FILE [json|csv]",
    "theme [toggle|dark|light]",
    "paste                             suggest a pair from the clipboard",
    "translate [WORD]                  print a translation link, default the suggested word",
    "quit",
];

/// Parse one line of shell input. `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let tokens = tokenize(line)?;
    let Some((verb, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match verb.to_lowercase().as_str() {
        "add" => {
            let (word, translation, category) = draft_args(args, "add WORD TRANSLATION [CATEGORY]")?;
            let mut draft = EntryDraft::new(word, translation);
            draft.category = category;
            Command::Add(draft)
        }
        "edit" => {
            let Some((index, rest)) = args.split_first() else {
                return Err("usage: edit INDEX WORD TRANSLATION [CATEGORY]".into());
            };
            let (word, translation, category) =
                draft_args(rest, "edit INDEX WORD TRANSLATION [CATEGORY]")?;
            let mut draft = EntryDraft::new(word, translation);
            draft.category = category;
            Command::Edit {
                index: parse_index(index)?,
                draft,
            }
        }
        "rm" | "remove" | "delete" => Command::Remove(parse_index(single(args, "rm INDEX")?)?),
        "undo" => Command::Undo,
        "fav" | "favorite" => Command::Favorite(parse_index(single(args, "fav INDEX")?)?),
        "select" => Command::Select(single(args, "select PAIR")?.to_string()),
        "filter" => Command::Filter(CategoryFilter::parse(&args.join(" "))),
        "favorites" => match args.first().map(|a| a.to_lowercase()).as_deref() {
            Some("on") | Some("yes") | Some("true") => Command::FavoritesOnly(true),
            Some("off") | Some("no") | Some("false") => Command::FavoritesOnly(false),
            _ => return Err("usage: favorites on|off".into()),
        },
        "search" => Command::Search(args.join(" ")),
        "reset" => Command::ResetFilter,
        "list" | "ls" => Command::List,
        "categories" => Command::Categories,
        "pairs" => Command::Pairs,
        "import" => Command::Import(PathBuf::from(single(args, "import FILE")?)),
        "export" => {
            let (path, format) = match args {
                [path] => (path, None),
                [path, format] => (path, Some(parse_format(format)?)),
                _ => return Err("usage: export FILE [json|csv]".into()),
            };
            Command::Export {
                path: PathBuf::from(path),
                format,
            }
        }
        "theme" => Command::Theme(match args.first().map(|a| a.to_lowercase()).as_deref() {
            None => ThemeChange::Show,
            Some("toggle") => ThemeChange::Toggle,
            Some("dark") => ThemeChange::Set(Theme::Dark),
            Some("light") => ThemeChange::Set(Theme::Light),
            Some(other) => return Err(format!("unknown theme '{other}'")),
        }),
        "paste" => Command::Paste,
        "translate" => Command::Translate(Some(args.join(" ")).filter(|w| !w.trim().is_empty())),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}', try `help`")),
    };

    Ok(Some(command))
}

fn draft_args(args: &[String], usage: &str) -> Result<(String, String, Option<String>), String> {
    match args {
        [word, translation] => Ok((word.clone(), translation.clone(), None)),
        [word, translation, category] => Ok((word.clone(), translation.clone(), Some(category.clone()))),
        _ => Err(format!("usage: {usage}")),
    }
}

fn single<'a>(args: &'a [String], usage: &str) -> Result<&'a str, String> {
    match args {
        [value] => Ok(value.as_str()),
        _ => Err(format!("usage: {usage}")),
    }
}

fn parse_index(value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("'{value}' is not an entry number"))
}

fn parse_format(value: &str) -> Result<TransferFormat, String> {
    match value.to_lowercase().as_str() {
        "json" => Ok(TransferFormat::Json),
        "csv" => Ok(TransferFormat::Csv),
        other => Err(format!("unknown format '{other}'")),
    }
}

/// Whitespace-separated tokens; double quotes group, `\"` escapes a quote
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err("unclosed quote".into());
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
