//! Import and export of entry lists.
//!
//! JSON is a plain array of entry objects. Delimited text is the CSV flavour
//! spreadsheet tools produce: optional header row, optionally quoted fields,
//! a leading byte-order mark on export.

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use rjecnik_types::{Entry, EntryDraft, TransferFormat};
use serde_json::Value;

use crate::error::{DictError, Result};

const BOM: char = '\u{feff}';
const QUOTE: char = '"';
const DELIMITERS: [char; 3] = [',', ';', '\t'];

pub fn export(entries: &[Entry], format: TransferFormat) -> Result<String> {
    match format {
        TransferFormat::Json => export_json(entries),
        TransferFormat::Csv => export_csv(entries),
    }
}

pub fn export_json(entries: &[Entry]) -> Result<String> {
    serde_json::to_string_pretty(entries).map_err(|e| DictError::Parse(e.to_string()))
}

/// Only word and translation are carried
pub fn export_csv(entries: &[Entry]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(["word", "translation"]).map_err(csv_error)?;
    for entry in entries {
        writer
            .write_record([entry.word.as_str(), entry.translation.as_str()])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DictError::Parse(format!("CSV export failed: {e}")))?;
    let body = String::from_utf8(bytes).map_err(|e| DictError::Parse(e.to_string()))?;

    Ok(format!("{BOM}{body}"))
}

fn csv_error(e: csv::Error) -> DictError {
    match e.position() {
        Some(pos) => DictError::Parse(format!("CSV error on line {}: {e}", pos.line())),
        None => DictError::Parse(format!("CSV error: {e}")),
    }
}

/// Parse candidates; rows without a word are dropped
pub fn parse(text: &str, format: TransferFormat) -> Result<Vec<EntryDraft>> {
    match format {
        TransferFormat::Json => parse_json(text),
        TransferFormat::Csv => parse_delimited(text),
    }
}

pub fn parse_json(text: &str) -> Result<Vec<EntryDraft>> {
    let text = text.trim_start_matches(BOM);
    let value: Value =
        serde_json::from_str(text).map_err(|e| DictError::Parse(format!("invalid JSON: {e}")))?;

    let Value::Array(items) = value else {
        return Err(DictError::Parse("expected a JSON array of entries".into()));
    };

    let drafts = items
        .iter()
        .map(|item| EntryDraft {
            word: coerce_text(item.get("word")),
            translation: coerce_text(item.get("translation")),
            category: Some(coerce_text(item.get("category"))).filter(|c| !c.trim().is_empty()),
            favorite: item.get("favorite").and_then(coerce_flag),
        })
        .filter(|d| !d.word.trim().is_empty())
        .collect();

    Ok(drafts)
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn coerce_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => Some(s.trim().eq_ignore_ascii_case("true")),
        _ => None,
    }
}

/// Column positions of a delimited file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    word: usize,
    translation: usize,
    category: Option<usize>,
    favorite: Option<usize>,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            word: 0,
            translation: 1,
            category: None,
            favorite: None,
        }
    }
}

impl Columns {
    /// `None` when the row does not look like a header
    fn detect(fields: &StringRecord) -> Option<Self> {
        let names: Vec<String> = fields.iter().map(|f| f.trim().to_lowercase()).collect();
        let find = |needle: &str| names.iter().position(|n| n.contains(needle));

        let word = find("word");
        let translation = find("translation");
        let other_than = |taken: usize| if taken == 0 { 1 } else { 0 };

        let (word, translation) = match (word, translation) {
            (Some(w), Some(t)) => (w, t),
            (Some(w), None) => (w, other_than(w)),
            (None, Some(t)) => (other_than(t), t),
            (None, None) => return None,
        };

        Some(Self {
            word,
            translation,
            category: find("category"),
            favorite: find("favorite").or_else(|| find("favourite")),
        })
    }
}

pub fn parse_delimited(text: &str) -> Result<Vec<EntryDraft>> {
    let text = text.trim_start_matches(BOM);
    let Some(first_line) = text.lines().find(|line| !line.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    let delimiter = sniff_delimiter(first_line);
    if let Some(line_no) = unterminated_quote(text, delimiter) {
        return Err(DictError::Parse(format!(
            "unterminated quoted field starting on line {line_no}"
        )));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter as u8)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let Some(first) = records.next().transpose().map_err(csv_error)? else {
        return Ok(Vec::new());
    };

    let (columns, first_row) = match Columns::detect(&first) {
        Some(columns) => (columns, None),
        None => (Columns::default(), Some(first)),
    };
    tracing::debug!("Delimited import: {:?}, delimiter {:?}", columns, delimiter);

    let mut drafts = Vec::new();
    for record in first_row.into_iter().map(Ok).chain(records) {
        let record = record.map_err(csv_error)?;
        let field = |i: usize| record.get(i).map(str::trim).unwrap_or_default();

        let word = field(columns.word);
        if word.is_empty() {
            continue;
        }

        drafts.push(EntryDraft {
            word: word.to_string(),
            translation: field(columns.translation).to_string(),
            category: columns
                .category
                .map(field)
                .filter(|c| !c.is_empty())
                .map(String::from),
            favorite: columns
                .favorite
                .map(field)
                .filter(|f| !f.is_empty())
                .map(|f| f.eq_ignore_ascii_case("true") || f == "1"),
        });
    }

    Ok(drafts)
}

/// Most frequent candidate outside quotes, comma on ties
fn sniff_delimiter(line: &str) -> char {
    let mut counts = [0usize; DELIMITERS.len()];
    let mut in_quotes = false;

    for c in line.chars() {
        if c == QUOTE {
            in_quotes = !in_quotes;
        } else if !in_quotes && let Some(i) = DELIMITERS.iter().position(|d| *d == c) {
            counts[i] += 1;
        }
    }

    let mut best = 0;
    for i in 1..DELIMITERS.len() {
        if counts[i] > counts[best] {
            best = i;
        }
    }
    DELIMITERS[best]
}

/// Line of a quoted field that never closes. The CSV reader would silently
/// run such a field to the end of the input.
fn unterminated_quote(text: &str, delimiter: char) -> Option<usize> {
    let mut line = 1;
    let mut opened_on = None;
    let mut field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if opened_on.is_some() {
            if c == QUOTE && chars.next_if_eq(&QUOTE).is_none() {
                opened_on = None;
            }
        } else if c == QUOTE && field_start {
            opened_on = Some(line);
        }

        if c == '\n' {
            line += 1;
        }
        field_start = opened_on.is_none() && (c == delimiter || c == '\n' || c == '\r');
    }

    opened_on
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(drafts: &[EntryDraft]) -> Vec<(&str, &str)> {
        drafts
            .iter()
            .map(|d| (d.word.as_str(), d.translation.as_str()))
            .collect()
    }

    #[test]
    fn test_csv_export_layout() {
        let entries = vec![Entry::new("say \"hi\"", "reći, \"zdravo\""), Entry::new("sun", "sunce")];
        let csv = export_csv(&entries).unwrap();

        assert!(csv.starts_with('\u{feff}'));
        let lines: Vec<&str> = csv.trim_start_matches('\u{feff}').lines().collect();
        assert_eq!(lines[0], r#""word","translation""#);
        assert_eq!(lines[1], r#""say ""hi""","reći, ""zdravo""""#);
        assert_eq!(lines[2], r#""sun","sunce""#);
    }

    #[test]
    fn test_csv_export_reimports() {
        let entries = vec![Entry::new("say \"hi\"", "reći, \"zdravo\"")];
        let drafts = parse_delimited(&export_csv(&entries).unwrap()).unwrap();
        assert_eq!(pairs(&drafts), vec![("say \"hi\"", "reći, \"zdravo\"")]);
    }

    #[test]
    fn test_csv_multiline_field_reimports() {
        let entries = vec![Entry::new("line\nbreak", "prijelom"), Entry::new("sun", "sunce")];
        let csv = export_csv(&entries).unwrap();
        assert!(csv.contains("\"line\nbreak\""));

        let drafts = parse_delimited(&csv).unwrap();
        assert_eq!(pairs(&drafts), vec![("line\nbreak", "prijelom"), ("sun", "sunce")]);
    }

    #[test]
    fn test_csv_with_header() {
        let drafts = parse_delimited("\"word\",\"translation\"\n\"Hund\",\"dog\"").unwrap();
        assert_eq!(pairs(&drafts), vec![("Hund", "dog")]);
        assert_eq!(drafts[0].category, None);
        assert_eq!(drafts[0].favorite, None);
    }

    #[test]
    fn test_csv_without_header_keeps_first_row() {
        let drafts = parse_delimited("Hund,dog\r\nKatze,cat\r\n").unwrap();
        assert_eq!(pairs(&drafts), vec![("Hund", "dog"), ("Katze", "cat")]);
    }

    #[test]
    fn test_csv_header_locates_columns() {
        let text = "Category;Translation;Source word;Favorite\nAnimals;dog;Hund;true\n;cat;Katze;no\n;x;  ;\n";
        let drafts = parse_delimited(text).unwrap();

        assert_eq!(pairs(&drafts), vec![("Hund", "dog"), ("Katze", "cat")]);
        assert_eq!(drafts[0].category.as_deref(), Some("Animals"));
        assert_eq!(drafts[0].favorite, Some(true));
        assert_eq!(drafts[1].category, None);
        assert_eq!(drafts[1].favorite, Some(false));
    }

    #[test]
    fn test_tab_delimited() {
        let drafts = parse_delimited("word\ttranslation\nkuća\thouse, home").unwrap();
        assert_eq!(pairs(&drafts), vec![("kuća", "house, home")]);
    }

    #[test]
    fn test_unterminated_quote_is_parse_error() {
        let err = parse_delimited("word,translation\n\"Hund,dog").unwrap_err();
        assert!(matches!(err, DictError::Parse(ref msg) if msg.contains("line 2")));

        let err = parse_delimited("word,translation\n\"Hund\",\"dog\nKatze,cat\n").unwrap_err();
        assert!(matches!(err, DictError::Parse(ref msg) if msg.contains("line 2")));
    }

    #[test]
    fn test_literal_quotes_inside_unquoted_field() {
        let drafts = parse_delimited("say \"hi\",reći\nsun,sunce").unwrap();
        assert_eq!(pairs(&drafts), vec![("say \"hi\"", "reći"), ("sun", "sunce")]);
    }

    #[test]
    fn test_json_coerces_fields() {
        let text = r#"[
            {"word": "Hund", "translation": "dog", "category": "Animals", "favorite": true},
            {"word": 42, "translation": null},
            {"word": "  "},
            {"translation": "orphan"},
            "not an object",
            {"word": "sun", "favorite": "true"}
        ]"#;
        let drafts = parse_json(text).unwrap();

        assert_eq!(pairs(&drafts), vec![("Hund", "dog"), ("42", ""), ("sun", "")]);
        assert_eq!(drafts[0].category.as_deref(), Some("Animals"));
        assert_eq!(drafts[0].favorite, Some(true));
        assert_eq!(drafts[2].favorite, Some(true));
    }

    #[test]
    fn test_json_rejects_malformed_and_non_array() {
        assert!(matches!(parse_json("{not valid json"), Err(DictError::Parse(_))));
        assert!(matches!(parse_json(r#"{"word": "Hund"}"#), Err(DictError::Parse(_))));
    }

    #[test]
    fn test_json_export_keeps_category_and_favorite() {
        let mut entry = Entry::new("Hund", "dog");
        entry.category = "Animals".into();
        entry.favorite = true;

        let json = export_json(&[entry]).unwrap();
        let drafts = parse_json(&json).unwrap();

        assert_eq!(drafts[0].category.as_deref(), Some("Animals"));
        assert_eq!(drafts[0].favorite, Some(true));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(parse_delimited("").unwrap().is_empty());
        assert!(parse_delimited("\u{feff}\n\n").unwrap().is_empty());
    }
}
