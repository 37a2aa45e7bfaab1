use bindata::embed;

include!(concat!(env!("OUT_DIR"), "/toc/bindata_toc.rs"));
include!(concat!(env!("OUT_DIR"), "/plain/file_txt.rs"));
include!(concat!(env!("OUT_DIR"), "/raw_empty.rs"));
include!(concat!(env!("OUT_DIR"), "/gz_empty.rs"));

fn main() {
    let original_content = "Contents of file.txt\n";

    let data = assets::lookup("file.txt").expect("file.txt missing from TOC");
    let s = std::str::from_utf8(data).expect("data is not valid UTF-8");
    println!("{s}");
    assert_eq!(s, original_content);

    assert_eq!(plain::file_txt(), original_content.as_bytes());
    assert_eq!(embed!("blobs/file.txt"), original_content.as_bytes());

    assert_eq!(assets::nested_repeat_txt(), [b'a'; 300].as_slice());
    // Second call returns the cached bytes.
    assert_eq!(assets::nested_repeat_txt().as_ptr(), assets::nested_repeat_txt().as_ptr());

    let all: Vec<u8> = (0..=255).collect();
    assert_eq!(assets::lookup("nested/all-bytes.bin"), Some(all.as_slice()));
    assert_eq!(assets::lookup("1st.txt"), Some(&b"first\n"[..]));
    assert_eq!(assets::file_1st_txt(), b"first\n");
    assert_eq!(assets::lookup("empty.bin"), Some(&[][..]));
    assert_eq!(assets::lookup("missing.txt"), None);

    let mut keys: Vec<_> = assets::keys().collect();
    keys.sort_unstable();
    println!("TOC keys: {}", keys.join(", "));
    assert_eq!(
        keys,
        ["1st.txt", "empty.bin", "file.txt", "nested/all-bytes.bin", "nested/repeat.txt"]
    );

    assert!(raw_empty::empty().is_empty());
    assert!(gz_empty::empty().is_empty());

    for key in &keys {
        let data = assets::lookup(key).expect("listed key resolves");
        println!("{key}: {} bytes", data.len());
    }

    println!("Decompressed data matches original.");
}
