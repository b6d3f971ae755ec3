//! Renderer tests using the font-free glyph backend.

use std::sync::Arc;

use bvstat_cloud::{BlockGlyphs, CloudConfig, CloudError, StopWords, WordCloudRenderer};

fn renderer(config: CloudConfig) -> WordCloudRenderer {
    WordCloudRenderer::new(config, Arc::new(BlockGlyphs)).unwrap()
}

fn barrage() -> Vec<String> {
    [
        "前方高能", "名场面", "前方高能", "awsl", "名场面", "前方高能", "好活", "awsl",
        "Rust yyds", "rust", "前方高能",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn spaced_config() -> CloudConfig {
    CloudConfig {
        fragment_separator: "\n".to_string(),
        ..CloudConfig::default()
    }
}

#[test]
fn test_render_produces_full_size_png() {
    let image = renderer(spaced_config()).render_default(&barrage()).unwrap();

    assert_eq!((image.width, image.height), (1920, 1080));
    assert!(!image.words.is_empty());

    let decoded = image::load_from_memory_with_format(&image.png, image::ImageFormat::Png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1920, 1080));
}

#[test]
fn test_render_is_deterministic() {
    let renderer = renderer(spaced_config());
    let first = renderer.render_default(&barrage()).unwrap();
    let second = renderer.render_default(&barrage()).unwrap();

    assert_eq!(first.png, second.png);
    assert_eq!(first.words, second.words);
}

#[test]
fn test_more_frequent_word_is_larger() {
    let fragments = ["danmaku danmaku danmaku danmaku", "bilibili"];
    let image = renderer(spaced_config())
        .render(&fragments, &StopWords::empty())
        .unwrap();

    let size_of = |word: &str| {
        image
            .words
            .iter()
            .find(|w| w.word == word)
            .map(|w| w.font_size)
            .unwrap()
    };
    assert_eq!(image.words[0].word, "danmaku");
    assert!(size_of("danmaku") > size_of("bilibili"));
}

#[test]
fn test_case_variants_share_one_entry() {
    let fragments = ["Rust rust RUST Rust"];
    let image = renderer(spaced_config())
        .render(&fragments, &StopWords::empty())
        .unwrap();

    assert_eq!(image.words.len(), 1);
    assert_eq!(image.words[0].word, "Rust");
}

#[test]
fn test_empty_corpus() {
    let renderer = renderer(CloudConfig::default());

    let err = renderer.render_default::<String>(&[]).unwrap_err();
    assert!(matches!(err, CloudError::EmptyCorpus));

    let err = renderer.render_default(&["  ", "\n"]).unwrap_err();
    assert!(matches!(err, CloudError::EmptyCorpus));
    assert!(err.is_empty_input());
}

#[test]
fn test_stop_words_only_corpus() {
    let err = renderer(spaced_config())
        .render_default(&["doge", "the and", "amp"])
        .unwrap_err();

    assert!(matches!(err, CloudError::NoWords { filtered } if filtered >= 4));
    assert!(err.is_empty_input());
}

#[test]
fn test_stop_words_do_not_fuse_under_default_config() {
    let err = renderer(CloudConfig::default())
        .render_default(&["doge", "doge", "amp"])
        .unwrap_err();

    assert!(matches!(err, CloudError::NoWords { filtered: 3 }));
}

#[test]
fn test_stop_word_fragments_skipped_under_default_config() {
    let image = renderer(CloudConfig::default())
        .render_default(&["doge", "danmaku", "amp"])
        .unwrap();

    assert_eq!(image.words.len(), 1);
    assert_eq!(image.words[0].word, "danmaku");
}

#[test]
fn test_chinese_corpus_under_default_config() {
    let image = renderer(CloudConfig::default())
        .render_default(&["前方高能", "名场面", "前方高能"])
        .unwrap();

    assert!(!image.words.is_empty());
    assert!(image.words.iter().any(|w| w.word.contains("前方")));
    assert!(image.png.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn test_nothing_fits_on_tiny_canvas() {
    let config = CloudConfig {
        width: 8,
        height: 8,
        ..spaced_config()
    };
    let err = renderer(config).render_default(&["danmaku"]).unwrap_err();

    assert!(matches!(err, CloudError::NothingPlaced { width: 8, height: 8 }));
}

#[test]
fn test_extra_stop_words_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, "awsl\n".as_bytes()).unwrap();

    let config = CloudConfig {
        stopwords_path: Some(file.path().to_path_buf()),
        ..spaced_config()
    };
    let renderer = renderer(config);
    assert!(renderer.stop_words().contains("awsl"));

    let image = renderer.render_default(&barrage()).unwrap();
    assert!(image.words.iter().all(|w| w.word != "awsl"));
}

#[test]
fn test_missing_font_fails_construction() {
    let config = CloudConfig {
        font_path: "/nonexistent/FZYTK.TTF".into(),
        ..CloudConfig::default()
    };
    let err = WordCloudRenderer::from_config(config).unwrap_err();
    assert!(matches!(err, CloudError::Font { .. }));
}
