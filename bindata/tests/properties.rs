use bindata::{Compression, Error, Request, TocRegistry, sanitize};
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Recovers the bytes of the array literal in a generated unit.
fn embedded_literal(source: &str) -> Vec<u8> {
    let start = source.find("= &[").expect("literal start") + 4;
    let end = start + source[start..].find("];").expect("literal end");
    source[start..end]
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| u8::from_str_radix(t.trim_start_matches("0x"), 16).expect("hex token"))
        .collect()
}

fn generate(input: &[u8], compression: Compression) -> String {
    let mut out = Vec::new();
    Request::new("assets", "blob")
        .compression(compression)
        .translate(input, &mut out)
        .expect("translation failed");
    String::from_utf8(out).expect("generated source is UTF-8")
}

fn inflate(data: Vec<u8>) -> Vec<u8> {
    bindata::decompress(Box::leak(data.into_boxed_slice()))
}

#[test]
fn empty_file_uncompressed() {
    init_logging();
    let source = generate(b"", Compression::None);
    assert!(embedded_literal(&source).is_empty());
}

#[test]
fn repetitive_input_shrinks() {
    init_logging();
    let input = vec![b'a'; 300];
    let literal = embedded_literal(&generate(&input, Compression::deflate()));
    assert!(literal.len() < 300);
    assert_eq!(inflate(literal), input);
}

#[test]
fn duplicate_toc_keys_are_rejected() {
    let mut toc = TocRegistry::new();
    let key = TocRegistry::key_for("/srv/assets/a.txt", "/srv/assets/");
    toc.register(key.clone(), "a_txt", "a_txt.rs").unwrap();
    assert!(matches!(
        toc.register(key, "b_txt", "b_txt.rs"),
        Err(Error::DuplicateKey(_))
    ));
}

proptest! {
    #[test]
    fn uncompressed_round_trip(input in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let source = generate(&input, Compression::None);
        prop_assert_eq!(embedded_literal(&source), input);
    }

    #[test]
    fn compressed_round_trip(
        input in proptest::collection::vec(any::<u8>(), 0..2048),
        level in 0u32..=9,
    ) {
        let source = generate(&input, Compression::Deflate { level });
        prop_assert_eq!(inflate(embedded_literal(&source)), input);
    }

    #[test]
    fn sanitize_is_deterministic(path in ".*", prefix in ".{0,4}") {
        let first = sanitize(&path, &prefix).ok();
        let second = sanitize(&path, &prefix).ok();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn sanitized_names_are_identifiers(path in "[ -~]*[A-Za-z0-9][ -~]*", prefix in "/?[a-z]{0,3}/?") {
        prop_assert!(sanitize(&path, "").is_ok());
        // The prefix may remove every usable character.
        let Ok(name) = sanitize(&path, &prefix) else {
            return Ok(());
        };
        prop_assert!(!name.is_empty());
        prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!name.starts_with(|c: char| c.is_ascii_digit() || c == '_'));
        prop_assert!(!name.contains("__"));
    }
}
