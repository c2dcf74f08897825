/// Word and translation guessed from pasted text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickFill {
    pub word: Option<String>,
    pub translation: Option<String>,
}

/// Split `"word — translation"` or `"word: translation"`.
///
/// The em-dash wins when both are present. Only meant to pre-fill inputs.
pub fn split_pair(text: &str) -> QuickFill {
    let separator = if text.contains('—') { '—' } else { ':' };
    let mut parts = text.split(separator).map(str::trim);

    let piece = |p: Option<&str>| p.filter(|s| !s.is_empty()).map(String::from);
    let word = piece(parts.next());
    let translation = piece(parts.next());

    QuickFill { word, translation }
}
