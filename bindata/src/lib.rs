//! Turn arbitrary files into Rust source that embeds their bytes.
//!
//! Each generated unit contains one accessor function returning the original
//! bytes as `&'static [u8]`. Build pipelines use it to bundle templates,
//! images or configuration directly into a binary, with no file system access
//! at runtime.
//!
//! ## How It Works
//!
//! 1.  **Transcoding:** A [`Request`] reads a byte stream, optionally gzips it
//!     ([`Compression`]), and writes the result as a byte array literal inside
//!     an accessor function.
//! 2.  **Runtime:** Uncompressed accessors return the literal directly.
//!     Compressed accessors inflate it once, on first call, and return the
//!     cached bytes afterwards. Corrupt embedded data panics.
//! 3.  **Table of contents:** A [`TocRegistry`] collects the accessors written
//!     to one directory and emits a manifest with a `lookup(key)` function.
//!
//! ## Usage
//!
//! 1. Add `bindata` to `[build-dependencies]`. Compressed accessors call
//!    `bindata::decompress`, so it is needed in `[dependencies]` as well.
//!
//! ```toml
//! [dependencies]
//! bindata = "0.2"
//!
//! [build-dependencies]
//! bindata = "0.2"
//! ```
//!
//! 2. Generate sources from `build.rs`.
//!
//! ```no_run
//! // build.rs
//! bindata::Config::new("assets")
//!   .package("assets")
//!   .toc(true)
//!   .build()
//!   .expect("Failed to generate asset sources");
//! ```
//!
//! 3. Include the manifest and look files up.
//!
//! ```ignore
//! // src/main.rs
//! include!(concat!(env!("OUT_DIR"), "/bindata_toc.rs"));
//!
//! let logo: &'static [u8] = assets::lookup("images/logo.png").unwrap();
//! ```
//!
//! For a single file known at compile time, [`embed!`] skips the build script.

#![doc(html_root_url = "https://docs.rs/bindata/0.2.0")]

// Re-export the procedural macro.
pub use bindata_macros::embed;

mod build;
mod compress;
mod error;
mod ident;
mod toc;
mod translate;
mod writer;

pub use build::{Config, DEFAULT_PACKAGE};
pub use compress::{Compression, DEFAULT_COMPRESSION_LEVEL, decompress};
pub use error::{Error, Result};
pub use ident::{sanitize, validate};
pub use toc::{MANIFEST_FILE_NAME, TocEntry, TocRegistry};
pub use translate::{Layout, Request, translate};
pub use writer::ByteWriter;
