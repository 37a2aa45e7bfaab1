//! Translation of a byte stream into a Rust source unit.
use std::io::{Read, Write};

use crate::{
    compress::Compression,
    error::{Error, Result},
    ident,
    writer::ByteWriter,
};

/// First line of every generated file.
pub(crate) const HEADER: &str = "// Code generated by bindata. DO NOT EDIT.";

/// How the generated items are wrapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// Wrap the accessor in `pub mod <package> { .. }`.
    #[default]
    Module,
    /// Emit the accessor bare, for units mounted by a TOC manifest.
    Items,
}

impl Layout {
    const fn indent(self) -> &'static str {
        match self {
            Self::Module => "    ",
            Self::Items => "",
        }
    }

    const fn literal_indent(self) -> &'static str {
        match self {
            Self::Module => "            ",
            Self::Items => "        ",
        }
    }
}

/// A request to generate one accessor function.
///
/// # Example
/// ```
/// use bindata::{Compression, Request};
///
/// let mut out = Vec::new();
/// Request::new("assets", "hello_txt")
///     .compression(Compression::None)
///     .translate(&b"hello"[..], &mut out)
///     .unwrap();
/// let source = String::from_utf8(out).unwrap();
/// assert!(source.contains("pub fn hello_txt() -> &'static [u8]"));
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    package: String,
    function: String,
    compression: Compression,
    layout: Layout,
}

impl Request {
    /// Creates a gzip-compressed, module-wrapped request.
    pub fn new(package: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            function: function.into(),
            compression: Compression::default(),
            layout: Layout::default(),
        }
    }

    #[must_use]
    pub const fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Shorthand for [`Compression::from_flag`].
    #[must_use]
    pub const fn compress(self, compress: bool) -> Self {
        self.compression(Compression::from_flag(compress))
    }

    #[must_use]
    pub const fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Reads all of `input` and writes the generated unit to `output`.
    ///
    /// Names are validated before anything is written. A failure after that
    /// point leaves `output` truncated; callers should discard it.
    ///
    /// # Errors
    /// [`Error::InvalidIdentifier`] for a bad package or function name, and
    /// the errors of [`Compression::transform`].
    pub fn translate<R: Read, W: Write>(&self, input: R, mut output: W) -> Result<()> {
        let package = ident::validate("package", &self.package)?;
        let function = ident::validate("function", &self.function)?;
        let layout = self.layout;
        let pad = layout.indent();

        let head = match layout {
            Layout::Module => format!("{HEADER}\n\n#[allow(dead_code)]\npub mod {package} {{\n"),
            Layout::Items => format!("{HEADER}\n// Package: {package}\n\n"),
        };
        output
            .write_all(head.as_bytes())
            .map_err(Error::DestinationWrite)?;

        let open = if self.compression.is_compressed() {
            format!(
                "{pad}/// Returns the file data, decompressing it on first call.\n\
                 {pad}///\n\
                 {pad}/// # Panics\n\
                 {pad}/// Panics if the embedded data is corrupt.\n\
                 {pad}pub fn {function}() -> &'static [u8] {{\n\
                 {pad}    use ::bindata::decompress;\n\
                 {pad}    use ::std::sync::OnceLock;\n\
                 \n\
                 {pad}    static DATA: OnceLock<Vec<u8>> = OnceLock::new();\n\
                 {pad}    const COMPRESSED: &[u8] = &["
            )
        } else {
            format!(
                "{pad}/// Returns raw file data.\n\
                 {pad}pub fn {function}() -> &'static [u8] {{\n\
                 {pad}    const DATA: &[u8] = &["
            )
        };
        output
            .write_all(open.as_bytes())
            .map_err(Error::DestinationWrite)?;

        let bytes = ByteWriter::new(&mut output, layout.literal_indent());
        let (consumed, bytes) = self.compression.transform(input, bytes)?;
        let embedded = bytes.written();
        bytes.finish().map_err(Error::DestinationWrite)?;

        let close = if self.compression.is_compressed() {
            format!(
                "{pad}    ];\n\
                 {pad}    DATA.get_or_init(|| decompress(COMPRESSED))\n\
                 {pad}}}\n"
            )
        } else {
            format!("{pad}    ];\n{pad}    DATA\n{pad}}}\n")
        };
        output
            .write_all(close.as_bytes())
            .map_err(Error::DestinationWrite)?;
        if layout == Layout::Module {
            output.write_all(b"}\n").map_err(Error::DestinationWrite)?;
        }
        output.flush().map_err(Error::DestinationWrite)?;

        log::debug!(
            "generated {package}::{function}: {consumed} bytes embedded as {embedded} ({})",
            self.compression
        );
        Ok(())
    }
}

/// Translates `input` into a module-wrapped accessor `package::function`.
///
/// # Errors
/// See [`Request::translate`].
pub fn translate<R: Read, W: Write>(
    input: R,
    output: W,
    package: &str,
    function: &str,
    compress: bool,
) -> Result<()> {
    Request::new(package, function)
        .compress(compress)
        .translate(input, output)
}
