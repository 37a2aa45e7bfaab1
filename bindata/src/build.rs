//! Build-script helpers for `bindata`.
use std::{
    collections::HashSet,
    env,
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use crate::{
    compress::Compression,
    error::{Error, Result},
    ident,
    toc::TocRegistry,
    translate::{Layout, Request},
};

//
// ==================== PUBLIC BUILDER API ====================
//

/// A builder for generating accessor sources from a file or a directory.
///
/// This provides a clean, high-level API for use in `build.rs` scripts.
///
/// # Example
/// ```no_run
/// // in build.rs
/// bindata::Config::new("assets")
///   .package("assets")
///   .toc(true)
///   .build()
///   .expect("Failed to generate asset sources");
/// ```
#[derive(Debug)]
pub struct Config {
    path: PathBuf,
    package: String,
    function: Option<String>,
    prefix: Option<PathBuf>,
    compression: Compression,
    toc: bool,
    out_dir: Option<PathBuf>,
}

/// The module name used when [`Config::package`] is not called.
pub const DEFAULT_PACKAGE: &str = "bindata";

impl Config {
    /// Creates a new configuration for a given asset path.
    ///
    /// The path can be a single file or a directory and should be relative to
    /// the crate root (`CARGO_MANIFEST_DIR`).
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            package: DEFAULT_PACKAGE.to_owned(),
            function: None,
            prefix: None,
            compression: Compression::default(),
            toc: false,
            out_dir: None,
        }
    }

    /// Sets the module that wraps the generated accessors.
    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Names the accessor when the configured path is a single file.
    ///
    /// Ignored for directories, whose accessors are always derived from
    /// their file paths.
    #[must_use]
    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Sets the path prefix stripped from function names and TOC keys.
    ///
    /// Defaults to the configured directory, or the parent of the configured file.
    #[must_use]
    pub fn prefix(mut self, prefix: impl AsRef<Path>) -> Self {
        self.prefix = Some(prefix.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub const fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Embeds files without compression.
    #[must_use]
    pub const fn uncompressed(self) -> Self {
        self.compression(Compression::None)
    }

    /// Also writes a table of contents that mounts every generated unit.
    #[must_use]
    pub const fn toc(mut self, toc: bool) -> Self {
        self.toc = toc;
        self
    }

    /// Sets the output directory. Defaults to `OUT_DIR`.
    #[must_use]
    pub fn out_dir(mut self, out_dir: impl AsRef<Path>) -> Self {
        self.out_dir = Some(out_dir.as_ref().to_path_buf());
        self
    }

    /// Runs the generation with the specified configuration.
    ///
    /// Every file becomes `<out_dir>/<function>.rs`. With a table of
    /// contents the units are written bare and mounted by
    /// `<out_dir>/bindata_toc.rs`; otherwise each unit wraps itself in the
    /// package module.
    ///
    /// # Errors
    /// Returns an [`Error`] if any part of the build process fails, such as
    /// file I/O, an unusable name, or two files mapping to one accessor.
    pub fn build(self) -> Result<()> {
        ident::validate("package", &self.package)?;

        let out_dir = match &self.out_dir {
            Some(dir) => dir.clone(),
            None => env::var("OUT_DIR")
                .map(PathBuf::from)
                .map_err(|_| Error::Var("OUT_DIR"))?,
        };
        fs::create_dir_all(&out_dir)?;

        let root = resolve(&self.path)?;
        let prefix = match &self.prefix {
            Some(prefix) => resolve(prefix)?,
            None if root.is_dir() => root.clone(),
            None => root.parent().map_or_else(|| root.clone(), Path::to_path_buf),
        };

        let mut files = Vec::new();
        collect_files(&root, &mut files)?;

        let prefix = slashed(&prefix);
        let single = root.is_file();
        let mut batch = Batch {
            config: &self,
            out_dir: &out_dir,
            prefix: &prefix,
            toc: self.toc.then(TocRegistry::new),
            functions: HashSet::new(),
        };
        for file in &files {
            batch
                .generate(file, single)
                .map_err(|e| e.in_file(file.display().to_string()))?;
        }

        if let Some(toc) = &batch.toc {
            toc.serialize(&out_dir, &self.package)?;
        }
        Ok(())
    }
}

/// State of one [`Config::build`] run.
struct Batch<'a> {
    config: &'a Config,
    out_dir: &'a Path,
    prefix: &'a str,
    toc: Option<TocRegistry>,
    functions: HashSet<String>,
}

impl Batch<'_> {
    fn generate(&mut self, file: &Path, single: bool) -> Result<()> {
        let path = slashed(file);
        let function = match (&self.config.function, single) {
            (Some(function), true) => ident::validate("function", function)?,
            (None, true) => {
                let function = ident::sanitize(&path, self.prefix)?;
                log::warn!("no function name given for {path}; using {function}");
                function
            }
            (_, false) => ident::sanitize(&path, self.prefix)?,
        };
        if !self.functions.insert(function.clone()) {
            return Err(Error::DuplicateFunction(function));
        }

        let unit = format!("{function}.rs");
        let layout = if self.toc.is_some() {
            Layout::Items
        } else {
            Layout::Module
        };
        if let Some(toc) = &mut self.toc {
            toc.register(TocRegistry::key_for(&path, self.prefix), &function, unit.as_str())?;
        }

        let input = File::open(file).map_err(Error::SourceRead)?;
        let output = File::create(self.out_dir.join(&unit)).map_err(Error::DestinationWrite)?;
        Request::new(self.config.package.as_str(), function)
            .compression(self.config.compression)
            .layout(layout)
            .translate(BufReader::new(input), BufWriter::new(output))
    }
}

/// Resolves `path` against `CARGO_MANIFEST_DIR` and canonicalizes it.
fn resolve(path: &Path) -> Result<PathBuf> {
    let full = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::var("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .map_err(|_| Error::Var("CARGO_MANIFEST_DIR"))?
            .join(path)
    };
    full.canonicalize().map_err(|_| {
        Error::PathNotFound(
            full.display().to_string(),
            env::current_dir().map_or_else(|_| "unknown".into(), |p| p.display().to_string()),
        )
    })
}

/// Recursively collects files below `path`, in sorted order.
fn collect_files(path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    println!("cargo:rerun-if-changed={}", path.display());

    let metadata = fs::metadata(path)?;
    if metadata.is_dir() {
        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();
        for entry in entries {
            collect_files(&entry, files)?;
        }
        Ok(())
    } else if metadata.is_file() {
        files.push(path.to_path_buf());
        Ok(())
    } else {
        Err(Error::UnsupportedFileType(path.display().to_string()))
    }
}

/// Path as a string with `/` separators, so names do not depend on the host.
fn slashed(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
