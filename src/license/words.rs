use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w']+").expect("word regex must compile"));

static COPYRIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*Copyright (?:©|\(c\))?\s*(?:\d{4}|\[year\]).*")
        .expect("copyright regex must compile")
});

/// Distinct lowercase words of a text, each mapped to the index of its first
/// occurrence among all tokens.
///
/// Membership drives scoring; the position only orders words for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: HashMap<String, usize>,
}

impl WordSet {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    #[cfg(test)]
    pub fn position(&self, word: &str) -> Option<usize> {
        self.words.get(word).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.words.iter().map(|(w, &pos)| (w.as_str(), pos))
    }
}

/// Lowercase the text and drop copyright notices, whose years and authors
/// differ between otherwise identical licenses.
fn clean_license_text(raw: &[u8]) -> String {
    let lower = String::from_utf8_lossy(raw).to_lowercase();
    COPYRIGHT.replace_all(&lower, "").into_owned()
}

/// Turn raw license text into a [`WordSet`]. Empty input gives an empty set.
pub fn normalize(raw: &[u8]) -> WordSet {
    let cleaned = clean_license_text(raw);
    let mut words = HashMap::new();
    for (i, m) in WORD.find_iter(&cleaned).enumerate() {
        // First occurrence wins so header words keep their reading order.
        words.entry(m.as_str().to_string()).or_insert(i);
    }
    WordSet { words }
}
