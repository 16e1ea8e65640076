//! `local.properties` loading
//!
//! The Android toolchain writes this file in the `java.util.Properties` text
//! format, so it is read with `java-properties` rather than as dotenv. Lines
//! without a separator are kept as keys with an empty value. A malformed
//! `\uXXXX` escape fails the whole load.

use buildgate_core::fs::{is_not_found, FileSystem};
use buildgate_core::ResolveError;
use java_properties::{LineContent, PropertiesIter};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    pub line: usize,
    pub message: String,
}

impl From<java_properties::PropertiesError> for PropertiesError {
    fn from(err: java_properties::PropertiesError) -> Self {
        Self {
            line: err.line_number().unwrap_or_default(),
            message: err.to_string(),
        }
    }
}

/// Developer-local key/value store, read once and never written back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalProperties {
    entries: BTreeMap<String, String>,
}

impl LocalProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses ISO-8859-1 properties text. Later duplicates of a key replace
    /// earlier ones.
    pub fn parse<R: Read>(input: R) -> Result<Self, PropertiesError> {
        let mut entries = BTreeMap::new();

        for line in PropertiesIter::new(input) {
            if let LineContent::KVPair(key, value) = line?.consume_content() {
                entries.insert(key, value);
            }
        }

        Ok(Self { entries })
    }

    /// Loads the properties file at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist. Read faults and
    /// malformed content are errors.
    pub fn load<F: FileSystem + ?Sized>(
        fs: &F,
        path: &Path,
    ) -> Result<Option<Self>, ResolveError> {
        let bytes = match fs.read(path) {
            Ok(bytes) => bytes,
            Err(e) if is_not_found(&e) => {
                debug!(path = %path.display(), "No local properties file");
                return Ok(None);
            }
            Err(e) => return Err(ResolveError::io(path, e)),
        };

        let props = Self::parse(bytes.as_slice()).map_err(|e| {
            ResolveError::MalformedProperties {
                path: path.to_path_buf(),
                line: e.line,
                message: e.message,
            }
        })?;

        debug!(path = %path.display(), entries = props.len(), "Loaded local properties");
        Ok(Some(props))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
