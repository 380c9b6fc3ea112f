use serde::{Deserialize, Serialize};

use super::ed25519::Ed25519Provider;
use super::secp256k1::Secp256k1Provider;
use crate::error::{AnnotatorError, ProviderError};

/// Signature scheme identifier.
///
/// Tokens come from configuration and from the `alg` parameter of inbound
/// signature metadata. Anything unrecognized maps to `Unsupported`; it is
/// never defaulted to a known scheme, and selecting a provider for it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureAlgorithm {
    Ed25519,
    Secp256k1,
    Unsupported,
}

impl<'de> Deserialize<'de> for SignatureAlgorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(SignatureAlgorithm::from_token(&token))
    }
}

impl SignatureAlgorithm {
    pub fn from_token(token: &str) -> Self {
        match token {
            "ed25519" => SignatureAlgorithm::Ed25519,
            "secp256k1" => SignatureAlgorithm::Secp256k1,
            _ => SignatureAlgorithm::Unsupported,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Ed25519 => "ed25519",
            SignatureAlgorithm::Secp256k1 => "secp256k1",
            SignatureAlgorithm::Unsupported => "unsupported",
        }
    }
}

/// The exact bytes a signature claims to cover, plus the hex-encoded
/// signature to check them against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningMaterial {
    pub seed: String,
    pub signature: String,
}

/// Trait for signature scheme backends.
///
/// Implementations are sync — signing and verification are CPU-bound.
pub trait SignatureProvider: Send + Sync {
    /// Sign `data` with the raw private key bytes. Returns raw signature bytes.
    fn sign(&self, data: &[u8], private_key: &[u8]) -> Result<Vec<u8>, ProviderError>;

    /// Check `signature` over `data` against the raw public key bytes.
    ///
    /// `Ok(false)` covers every cryptographic mismatch, including malformed
    /// signature bytes and a public key that decodes to no valid point.
    /// `Err` is reserved for key material the scheme cannot interpret.
    fn verify(&self, public_key: &[u8], data: &[u8], signature: &[u8])
    -> Result<bool, ProviderError>;
}

/// Select the provider for `algorithm`.
///
/// Fails before any I/O when the algorithm is unsupported.
pub fn provider_for(
    algorithm: SignatureAlgorithm,
) -> Result<&'static dyn SignatureProvider, AnnotatorError> {
    match algorithm {
        SignatureAlgorithm::Ed25519 => Ok(&Ed25519Provider),
        SignatureAlgorithm::Secp256k1 => Ok(&Secp256k1Provider),
        SignatureAlgorithm::Unsupported => Err(AnnotatorError::UnsupportedAlgorithm(
            SignatureAlgorithm::Unsupported.token().to_string(),
        )),
    }
}
