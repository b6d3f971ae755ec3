//! Corpus assembly.

/// Join fragments into one text blob.
///
/// With the default empty separator adjacent fragments fuse, so the last
/// word of one comment can merge with the first word of the next. The
/// tokenizer is left to split them again. The renderer only passes
/// fragments that contain at least one word on their own.
pub fn assemble_corpus<S: AsRef<str>>(fragments: &[S], separator: &str) -> String {
    let mut corpus = String::with_capacity(
        fragments.iter().map(|f| f.as_ref().len() + separator.len()).sum(),
    );
    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 {
            corpus.push_str(separator);
        }
        corpus.push_str(fragment.as_ref());
    }
    corpus
}
