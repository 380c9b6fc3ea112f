use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::hash::HashAlgorithm;
use crate::signing::SignatureAlgorithm;

/// One key's material location and the scheme it must be used with.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyReference {
    pub path: PathBuf,
    pub algorithm: SignatureAlgorithm,
}

impl KeyReference {
    pub fn new(path: impl Into<PathBuf>, algorithm: SignatureAlgorithm) -> Self {
        KeyReference {
            path: path.into(),
            algorithm,
        }
    }

    /// The file-name component of the key path, used as its key identifier.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// Pairs the key used to verify inbound signatures with the key used to
/// self-sign produced annotations. Configured once per service instance.
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureContext {
    pub public_key: KeyReference,
    pub private_key: KeyReference,
    /// Directory holding known senders' public keys, named by key
    /// identifier. Defaults to the directory of `public_key`.
    #[serde(default)]
    pub trusted_keys_dir: Option<PathBuf>,
    /// When set, inbound signature metadata may only assert these
    /// algorithms. Unset accepts every supported algorithm.
    #[serde(default)]
    pub allowed_algorithms: Option<Vec<SignatureAlgorithm>>,
}

impl SignatureContext {
    pub fn new(public_key: KeyReference, private_key: KeyReference) -> Self {
        SignatureContext {
            public_key,
            private_key,
            trusted_keys_dir: None,
            allowed_algorithms: None,
        }
    }

    /// Resolve a key identifier from signature metadata to the public-key
    /// file that should verify the request. Pure path composition; whether
    /// the file exists is discovered at read time.
    pub fn resolve_public_key(&self, key_id: &str) -> PathBuf {
        let dir = match &self.trusted_keys_dir {
            Some(dir) => dir.as_path(),
            None => self.public_key.path.parent().unwrap_or_else(|| Path::new("")),
        };
        dir.join(key_id)
    }

    pub fn algorithm_allowed(&self, algorithm: SignatureAlgorithm) -> bool {
        match &self.allowed_algorithms {
            Some(allowed) => allowed.contains(&algorithm),
            None => true,
        }
    }
}

/// Service configuration for the annotation engine.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotatorConfig {
    pub hash: HashAlgorithm,
    pub signature: SignatureContext,
}

impl AnnotatorConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
