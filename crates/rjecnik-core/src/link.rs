use url::Url;

use crate::error::{DictError, Result};

/// Translation page for `word`, source language auto-detected
pub fn translate_url(base_url: &str, word: &str, target: &str) -> Result<Url> {
    let word = word.trim();
    if word.is_empty() {
        return Err(DictError::Validation("enter a word to translate".into()));
    }

    Url::parse_with_params(
        base_url,
        &[("sl", "auto"), ("tl", target), ("text", word), ("op", "translate")],
    )
    .map_err(|e| DictError::Validation(format!("invalid translator URL '{base_url}': {e}")))
}

/// Target half of a `"<source>-<target>"` pair key
pub fn target_language(pair: &str) -> Option<&str> {
    pair.split_once('-')
        .map(|(_, target)| target.trim())
        .filter(|t| !t.is_empty())
}
