use std::rc::Rc;

use crate::license::template::Template;
use crate::license::words::{normalize, WordSet};

/// Best template for a license file, with the words that set them apart.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// `None` only when the catalog is empty.
    pub template: Option<Rc<Template>>,
    /// Dice coefficient in `[0, 1]`; negative when nothing was scored.
    pub score: f64,
    /// Words of the file missing from the template, in reading order.
    pub extra_words: Vec<String>,
    /// Words of the template missing from the file, in reading order.
    pub missing_words: Vec<String>,
    pub file_content: Vec<u8>,
}

/// `2 * |A ∩ B| / (|A| + |B|)`; two empty vocabularies score 0.
pub fn dice(common: usize, a: usize, b: usize) -> f64 {
    if a + b == 0 {
        return 0.0;
    }
    2.0 * common as f64 / (a + b) as f64
}

/// Words of `from` absent in `other`, sorted by their first position in `from`.
fn difference(from: &WordSet, other: &WordSet) -> Vec<String> {
    let mut words: Vec<(&str, usize)> = from.iter().filter(|(w, _)| !other.contains(w)).collect();
    words.sort_by_key(|&(_, pos)| pos);
    words.into_iter().map(|(w, _)| w.to_string()).collect()
}

/// Score `license` against every template and keep the best one.
///
/// Ties go to the earlier template.
pub fn match_templates(license: &[u8], templates: &[Rc<Template>]) -> MatchResult {
    let words = normalize(license);
    let mut best_score = -1.0;
    let mut best: Option<&Rc<Template>> = None;

    for t in templates {
        let common = words.iter().filter(|(w, _)| t.words.contains(w)).count();
        let score = dice(common, words.len(), t.words.len());
        if score > best_score {
            best_score = score;
            best = Some(t);
        }
    }

    let (extra_words, missing_words) = match best {
        Some(t) => (difference(&words, &t.words), difference(&t.words, &words)),
        None => (Vec::new(), Vec::new()),
    };

    MatchResult {
        template: best.cloned(),
        score: best_score,
        extra_words,
        missing_words,
        file_content: license.to_vec(),
    }
}
