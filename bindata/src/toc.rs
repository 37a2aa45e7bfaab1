//! Table of contents mapping lookup keys to generated accessor functions.
use std::{
    collections::HashSet,
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    ident,
    translate::HEADER,
};

/// File name of the manifest written by [`TocRegistry::serialize`].
pub const MANIFEST_FILE_NAME: &str = "bindata_toc.rs";

/// Items the manifest defines next to the accessors.
const RESERVED: &[&str] = &["Accessor", "HashMap", "LazyLock", "TOC", "keys", "lookup", "toc"];

/// One registered accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Lookup key, normally the source path relative to a prefix.
    pub key: String,
    /// Name of the accessor function.
    pub function: String,
    /// Generated unit, relative to the manifest directory.
    pub unit: String,
}

/// Accumulates entries for the units generated into one output directory.
///
/// A registry lives for one batch: fill it while translating files, call
/// [`serialize`](Self::serialize) once at the end, then drop it. Keys and
/// function names must be unique; duplicates are rejected on registration.
#[derive(Debug, Default)]
pub struct TocRegistry {
    entries: Vec<TocEntry>,
    keys: HashSet<String>,
    functions: HashSet<String>,
}

impl TocRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a lookup key from a source path.
    ///
    /// `prefix` is stripped if present, backslashes become `/` and leading
    /// slashes are removed.
    pub fn key_for(path: &str, prefix: &str) -> String {
        let rest = path.strip_prefix(prefix).unwrap_or(path);
        rest.replace('\\', "/").trim_start_matches('/').to_owned()
    }

    /// Appends an entry.
    ///
    /// # Errors
    /// [`Error::InvalidIdentifier`] if `function` is not a usable name or
    /// clashes with an item or the file name of the manifest,
    /// [`Error::DuplicateKey`] or [`Error::DuplicateFunction`] if either is
    /// already registered.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        function: &str,
        unit: impl Into<String>,
    ) -> Result<()> {
        let key = key.into();
        let function = ident::validate("function", function)?;
        if RESERVED.contains(&function.as_str())
            || function == MANIFEST_FILE_NAME.trim_end_matches(".rs")
        {
            return Err(Error::invalid("function", function));
        }
        if self.keys.contains(&key) {
            return Err(Error::DuplicateKey(key));
        }
        if self.functions.contains(&function) {
            return Err(Error::DuplicateFunction(function));
        }
        self.keys.insert(key.clone());
        self.functions.insert(function.clone());
        self.entries.push(TocEntry {
            key,
            function,
            unit: unit.into(),
        });
        Ok(())
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the manifest source for `package` to `output`.
    ///
    /// The manifest mounts every registered unit with `include!` and builds a
    /// lazily initialised key to accessor map. Entries are sorted by key.
    ///
    /// # Errors
    /// [`Error::InvalidIdentifier`] for a bad package name and
    /// [`Error::DestinationWrite`] if `output` fails.
    pub fn write_manifest<W: Write>(&self, package: &str, mut output: W) -> Result<()> {
        let package = ident::validate("package", package)?;

        let mut sorted: Vec<&TocEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.key.cmp(&b.key));

        let mut source = format!("{HEADER}\n\n#[allow(dead_code)]\npub mod {package} {{\n");
        source.push_str(
            "    use ::std::collections::HashMap;\n    use ::std::sync::LazyLock;\n\n",
        );
        for entry in &sorted {
            source.push_str(&format!("    include!({:?});\n", entry.unit));
        }
        source.push_str(
            "\n    /// Signature shared by every accessor.\n\
             \x20   pub type Accessor = fn() -> &'static [u8];\n\
             \n\
             \x20   static TOC: LazyLock<HashMap<&'static str, Accessor>> = LazyLock::new(|| {\n",
        );
        source.push_str(&format!(
            "        let mut toc: HashMap<&'static str, Accessor> = HashMap::with_capacity({});\n",
            sorted.len()
        ));
        for entry in &sorted {
            source.push_str(&format!(
                "        toc.insert({:?}, {});\n",
                entry.key, entry.function
            ));
        }
        source.push_str(
            "        toc\n    });\n\
             \n\
             \x20   /// Returns the data embedded under `key`.\n\
             \x20   pub fn lookup(key: &str) -> Option<&'static [u8]> {\n\
             \x20       TOC.get(key).map(|accessor| accessor())\n\
             \x20   }\n\
             \n\
             \x20   /// Returns every registered key, in no particular order.\n\
             \x20   pub fn keys() -> impl Iterator<Item = &'static str> {\n\
             \x20       TOC.keys().copied()\n\
             \x20   }\n\
             \n\
             \x20   /// Returns the full key to accessor map.\n\
             \x20   pub fn toc() -> &'static HashMap<&'static str, Accessor> {\n\
             \x20       &TOC\n\
             \x20   }\n\
             }\n",
        );

        output
            .write_all(source.as_bytes())
            .and_then(|()| output.flush())
            .map_err(Error::DestinationWrite)
    }

    /// Writes [`MANIFEST_FILE_NAME`] into `dir` and returns its path.
    ///
    /// # Errors
    /// See [`write_manifest`](Self::write_manifest); creating the file
    /// reports [`Error::DestinationWrite`] as well.
    pub fn serialize(&self, dir: &Path, package: &str) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE_NAME);
        let file = fs::File::create(&path).map_err(Error::DestinationWrite)?;
        self.write_manifest(package, BufWriter::new(file))
            .map_err(|e| e.in_file(path.display().to_string()))?;
        log::info!(
            "wrote table of contents with {} entries to {}",
            self.entries.len(),
            path.display()
        );
        Ok(path)
    }
}
