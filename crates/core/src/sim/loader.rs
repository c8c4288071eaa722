//! Binary Loader.
//!
//! Reads a program image from disk. The image is used as-is: no header, no
//! relocation, execution starts at address 0.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::error::LoadError;

/// Loads a program image from disk into a byte vector.
///
/// # Arguments
///
/// * `path` - Path to the binary file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Empty`] if it contains no bytes.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), len = bytes.len(), "loaded program");
    Ok(bytes)
}
