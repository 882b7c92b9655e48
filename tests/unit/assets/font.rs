use super::*;

#[test]
fn default_source_is_pinned_source_code_pro() {
    let FontSource::Url(url) = FontSource::default() else {
        panic!("default font source should be a url");
    };
    assert!(url.starts_with("https://github.com/google/fonts/"));
    assert!(url.contains("/ofl/sourcecodepro/SourceCodePro-Regular.ttf"));
    assert!(!url.contains(' '));
}

#[test]
fn empty_font_bytes_are_rejected() {
    assert!(matches!(
        FontBytes::new(Vec::new()),
        Err(IntensifyError::Font(_))
    ));
}

#[test]
fn missing_font_file_is_an_error() {
    let source = FontSource::File(PathBuf::from("no/such/font.ttf"));
    let err = load_font(&source).unwrap_err();
    assert!(err.to_string().contains("no/such/font.ttf"));
}

#[test]
fn local_font_file_is_read_verbatim() {
    let path = std::env::temp_dir().join(format!("intensify_font_{}.bin", std::process::id()));
    std::fs::write(&path, [1u8, 2, 3]).unwrap();
    let font = load_font(&FontSource::File(path.clone())).unwrap();
    assert_eq!(font.as_slice(), &[1, 2, 3]);
    let _ = std::fs::remove_file(path);
}

#[test]
fn unreachable_url_is_a_font_error() {
    let err = load_font(&FontSource::Url("http://127.0.0.1:9/font.ttf".into())).unwrap_err();
    assert!(matches!(err, IntensifyError::Font(_)));
}
