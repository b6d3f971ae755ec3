//! CJK-aware tokenization.

use std::sync::LazyLock;

use jieba_rs::Jieba;
use regex::Regex;

use crate::stopwords::StopWords;

/// A word: a word character followed by at least one word character or
/// apostrophe. Single characters never count as words.
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w[\w']+").unwrap());

/// Splits corpus text into candidate words.
///
/// Building one loads the jieba dictionary, so a process keeps a single
/// instance and shares it.
pub struct Tokenizer {
    jieba: Jieba,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
        }
    }

    /// Segment `text` and return the words that survive filtering, in order.
    ///
    /// Drops possessive `'s`, pure numbers and stop words. The second value
    /// is the number of words removed by filtering.
    pub fn words<'t>(&self, text: &'t str, stop_words: &StopWords) -> (Vec<&'t str>, usize) {
        let mut kept = Vec::new();
        let mut filtered = 0;

        for segment in self.jieba.cut(text, false) {
            for m in WORD.find_iter(segment) {
                let word = strip_possessive(m.as_str());
                if word.chars().count() < 2
                    || word.chars().all(|c| c.is_numeric())
                    || stop_words.contains(word)
                {
                    filtered += 1;
                    continue;
                }
                kept.push(word);
            }
        }

        (kept, filtered)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer").finish_non_exhaustive()
    }
}

fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("'S"))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(word)
}
