//! Manifest placeholder table and secret injection

use crate::properties::LocalProperties;
use buildgate_core::{FileSystem, ResolveError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Placeholder name to substituted value, as consumed by manifest generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestPlaceholders(BTreeMap<String, String>);

impl ManifestPlaceholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing and returning any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of looking up the secret key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretLookup {
    pub properties_found: bool,
    pub key_found: bool,
    pub value: String,
}

/// Looks up `key` in the properties file at `path`, defaulting to `""`
pub fn lookup_secret<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    key: &str,
) -> Result<SecretLookup, ResolveError> {
    let props = LocalProperties::load(fs, path)?;
    let properties_found = props.is_some();
    let found = props.as_ref().and_then(|p| p.get(key)).map(str::to_string);

    Ok(SecretLookup {
        properties_found,
        key_found: found.is_some(),
        value: found.unwrap_or_default(),
    })
}

/// Resolves the secret and writes it into `placeholders` under `placeholder_name`.
///
/// The value is never logged.
pub fn inject_secret<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    key: &str,
    placeholder_name: &str,
    placeholders: &mut ManifestPlaceholders,
) -> Result<SecretLookup, ResolveError> {
    let lookup = lookup_secret(fs, path, key)?;

    if lookup.key_found {
        debug!(
            key,
            placeholder = placeholder_name,
            len = lookup.value.len(),
            "Injecting local secret into manifest placeholders"
        );
    } else if lookup.properties_found {
        info!(
            "{} not set in {}, injecting empty {}",
            key,
            path.display(),
            placeholder_name
        );
    } else {
        info!(
            "No {} file found, injecting empty {}",
            path.display(),
            placeholder_name
        );
    }

    placeholders.insert(placeholder_name, lookup.value.clone());
    Ok(lookup)
}
