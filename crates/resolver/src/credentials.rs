//! Credential file classification
//!
//! A sample project ships a dummy `google-services.json` so it builds without
//! real secrets. The classifier tells that dummy apart from a genuine file
//! with a plain substring search over a closed set of markers, and reports a
//! missing file as its own outcome rather than an error.

use buildgate_core::fs::{is_not_found, FileSystem};
use buildgate_core::ResolveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Substrings that only ever appear in the checked-in placeholder credential.
///
/// Matching is exact and case-sensitive. A real credential that happens to
/// contain one of these is classified as a placeholder.
pub const PLACEHOLDER_MARKERS: &[&str] = &["placeholder-project", "AIplaceholderKEY1234567890"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationDecision {
    NotFound,
    Placeholder,
    Real,
}

impl ActivationDecision {
    /// Only a real credential activates the integration
    pub fn activates(&self) -> bool {
        matches!(self, ActivationDecision::Real)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationDecision::NotFound => "not_found",
            ActivationDecision::Placeholder => "placeholder",
            ActivationDecision::Real => "real",
        }
    }
}

impl fmt::Display for ActivationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the credential file taken once per build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialFile {
    Absent,
    Present { raw_content: String },
}

impl CredentialFile {
    /// Reads the file at `path`.
    ///
    /// A missing file yields [`CredentialFile::Absent`]; any other read
    /// failure is returned as [`ResolveError::Io`]. Bytes that are not valid
    /// UTF-8 are replaced, never rejected.
    pub fn read<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<Self, ResolveError> {
        match fs.read_to_string_lossy(path) {
            Ok(raw_content) => Ok(CredentialFile::Present { raw_content }),
            Err(e) if is_not_found(&e) => Ok(CredentialFile::Absent),
            Err(e) => Err(ResolveError::io(path, e)),
        }
    }

    pub fn decision(&self) -> ActivationDecision {
        match self {
            CredentialFile::Absent => ActivationDecision::NotFound,
            CredentialFile::Present { raw_content } => classify_content(raw_content),
        }
    }
}

/// Decision for a credential file that exists with the given content
pub fn classify_content(content: &str) -> ActivationDecision {
    match find_marker(content) {
        Some(_) => ActivationDecision::Placeholder,
        None => ActivationDecision::Real,
    }
}

/// First placeholder marker found in `content`, if any
pub fn find_marker(content: &str) -> Option<&'static str> {
    PLACEHOLDER_MARKERS
        .iter()
        .copied()
        .find(|marker| content.contains(marker))
}

/// Reads and classifies the credential file at `path`
pub fn classify<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
) -> Result<ActivationDecision, ResolveError> {
    let file = CredentialFile::read(fs, path)?;
    let decision = file.decision();
    debug!(path = %path.display(), %decision, "Classified credential file");
    Ok(decision)
}
