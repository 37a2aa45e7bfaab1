use std::{env, fs::File, path::PathBuf};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    // Whole directory, compressed, mounted by a table of contents.
    bindata::Config::new("blobs")
        .package("assets")
        .toc(true)
        .out_dir(out_dir.join("toc"))
        .build()
        .expect("Failed to generate TOC sources");

    // One file, uncompressed, wrapped in its own module.
    bindata::Config::new("blobs/file.txt")
        .package("plain")
        .function("file_txt")
        .uncompressed()
        .out_dir(out_dir.join("plain"))
        .build()
        .expect("Failed to generate plain source");

    // Empty input through both strategies.
    for (package, compress) in [("raw_empty", false), ("gz_empty", true)] {
        let output = File::create(out_dir.join(format!("{package}.rs"))).expect("create unit");
        bindata::translate(std::io::empty(), output, package, "empty", compress)
            .expect("Failed to translate empty input");
    }
}
