use std::fs;
use std::path::Path;

use crate::error::KeyMaterialError;

/// Load raw key bytes from a hex-encoded text file.
///
/// Key files carry a single hex string; surrounding whitespace (trailing
/// newlines from editors and generators) is ignored.
pub fn load_key_bytes(path: &Path) -> Result<Vec<u8>, KeyMaterialError> {
    let text = fs::read_to_string(path).map_err(|source| KeyMaterialError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    hex::decode(text.trim()).map_err(|source| KeyMaterialError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}
