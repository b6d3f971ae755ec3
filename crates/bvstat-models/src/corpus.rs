//! Text corpora collected for a video.
//!
//! Both corpora keep insertion order and never de-duplicate: repeated
//! comments are meaningful input for frequency weighting.

use serde::{Deserialize, Serialize};

macro_rules! text_corpus {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Vec<String>);

        impl $name {
            pub fn new() -> Self {
                Self(Vec::new())
            }

            pub fn push(&mut self, fragment: impl Into<String>) {
                self.0.push(fragment.into());
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, String> {
                self.0.iter()
            }

            pub fn as_slice(&self) -> &[String] {
                &self.0
            }

            pub fn into_inner(self) -> Vec<String> {
                self.0
            }
        }

        impl From<Vec<String>> for $name {
            fn from(fragments: Vec<String>) -> Self {
                Self(fragments)
            }
        }

        impl FromIterator<String> for $name {
            fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl Extend<String> for $name {
            fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
                self.0.extend(iter);
            }
        }

        impl IntoIterator for $name {
            type Item = String;
            type IntoIter = std::vec::IntoIter<String>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a String;
            type IntoIter = std::slice::Iter<'a, String>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl AsRef<[String]> for $name {
            fn as_ref(&self) -> &[String] {
                &self.0
            }
        }
    };
}

text_corpus!(
    /// Raw comment messages in page order, then in-page order.
    CommentCorpus
);

text_corpus!(
    /// Barrage captions in file order, with spaces stripped.
    BarrageCorpus
);
