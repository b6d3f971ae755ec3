//! Stop words excluded from frequency weighting.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::CloudResult;

/// Common English function words.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm",
    "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k",
    "let's", "like", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "otherwise", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "r", "same", "shall", "shan't", "she", "she'd", "she'll", "she's", "should",
    "shouldn't", "since", "so", "some", "such", "than", "that", "that's", "the", "their",
    "theirs", "them", "themselves", "then", "there", "there's", "therefore", "these", "they",
    "they'd", "they'll", "they're", "they've", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've", "were",
    "weren't", "what", "what's", "when", "when's", "where", "where's", "which", "while", "who",
    "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't", "www", "you",
    "you'd", "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
];

/// Platform noise: emoticon codes and fragments of HTML-escaped ampersands
/// that survive in comment text.
pub const PLATFORM_STOPWORDS: &[&str] = &[
    "doge", "amp", "amps", "amper", "amperf", "amperfi", "amperfin",
];

/// Case-insensitive stop-word set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// An empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// English defaults plus the platform noise words.
    pub fn defaults() -> Self {
        ENGLISH_STOPWORDS
            .iter()
            .chain(PLATFORM_STOPWORDS)
            .copied()
            .collect()
    }

    /// Defaults extended with the words in `path`, one per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn defaults_with_file(path: impl AsRef<Path>) -> CloudResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let mut words = Self::defaults();
        let before = words.len();
        words.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );

        info!(
            path = %path.display(),
            added = words.len() - before,
            "Loaded extra stop words"
        );
        Ok(words)
    }

    pub fn insert(&mut self, word: &str) {
        self.words.insert(word.to_lowercase());
    }

    pub fn extend<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        for word in words {
            self.insert(word);
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for StopWords {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_include_platform_words() {
        let stop = StopWords::defaults();
        assert!(stop.contains("doge"));
        assert!(stop.contains("amperfin"));
        assert!(stop.contains("the"));
        assert!(!stop.contains("弹幕"));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let stop: StopWords = ["Hello"].into_iter().collect();
        assert!(stop.contains("hello"));
        assert!(stop.contains("HELLO"));
    }

    #[test]
    fn test_defaults_with_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# extra words").unwrap();
        writeln!(file, "哈哈哈").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  awsl  ").unwrap();

        let stop = StopWords::defaults_with_file(file.path()).unwrap();
        assert!(stop.contains("哈哈哈"));
        assert!(stop.contains("awsl"));
        assert!(!stop.contains("# extra words"));
        assert_eq!(stop.len(), StopWords::defaults().len() + 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = StopWords::defaults_with_file("/nonexistent/stopwords.txt").unwrap_err();
        assert!(matches!(err, crate::CloudError::Io(_)));
    }
}
