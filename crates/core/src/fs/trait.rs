//! FileSystem trait definition

use std::io;
use std::path::Path;

/// Abstraction over file system reads for testability
///
/// Reads return [`io::Result`] rather than an erased error so callers can
/// tell a missing file (`ErrorKind::NotFound`) apart from a real fault.
pub trait FileSystem: Send + Sync {
    /// Read the full contents of a file as raw bytes
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read file contents, replacing invalid UTF-8 sequences
    fn read_to_string_lossy(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Returns true when the error means "nothing at this path"
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}
