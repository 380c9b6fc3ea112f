use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hash function used to derive a payload's content key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha256,
    Md5,
    /// Pass the payload through untouched. Only useful for debugging.
    None,
}

impl HashAlgorithm {
    /// Derive the content key identifying `data` in annotations.
    pub fn derive_key(&self, data: &[u8]) -> String {
        match self {
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(data)),
            HashAlgorithm::Md5 => hex::encode(Md5::digest(data)),
            HashAlgorithm::None => String::from_utf8_lossy(data).into_owned(),
        }
    }
}
