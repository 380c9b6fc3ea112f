use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for annotation attempts.
///
/// Every variant is fatal for the attempt that raised it: no annotation is
/// produced. A cryptographic mismatch is deliberately *not* represented here;
/// it is the `is_satisfied = false` verdict of a successfully produced
/// annotation.
#[derive(Debug, Error)]
pub enum AnnotatorError {
    #[error("unsupported signature algorithm '{0}'")]
    UnsupportedAlgorithm(String),
    #[error("signature algorithm '{0}' is not allowed by configuration")]
    AlgorithmNotAllowed(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    SigningString(#[from] SigningStringError),
    #[error(transparent)]
    KeyMaterial(#[from] KeyMaterialError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("cannot resolve local host name: {0}")]
    HostResolution(String),
    #[error("configured key path {} has no file name to use as a key identifier", .0.display())]
    KeyIdUnavailable(PathBuf),
    #[error("constructed signature header is not a valid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    #[error("serializing annotation for signing: {0}")]
    Canonical(#[from] serde_json::Error),
}

/// Failures extracting signature metadata from a request.
///
/// A missing signature is a different condition from an invalid one; none of
/// these variants ever degrade into an unsatisfied annotation.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("request carries no Signature-Input header")]
    MissingSignatureInput,
    #[error("request carries no Signature header")]
    MissingSignature,
    #[error("malformed Signature-Input header: {0}")]
    MalformedSignatureInput(String),
    #[error("signature metadata is missing the '{0}' parameter")]
    MissingParameter(&'static str),
    #[error("signature metadata covers no message components")]
    EmptyCoveredFields,
    #[error(transparent)]
    SigningString(#[from] SigningStringError),
}

/// Failures serializing covered message components into a signing string.
#[derive(Debug, Error)]
pub enum SigningStringError {
    #[error("unknown derived component '{0}'")]
    UnknownComponent(String),
    #[error("covered header '{0}' is not present on the request")]
    MissingHeader(String),
    #[error("request has no authority to cover")]
    MissingAuthority,
}

/// Failures reading or decoding key material from storage.
#[derive(Debug, Error)]
pub enum KeyMaterialError {
    #[error("reading key material from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("key material in {} is not valid hex: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: hex::FromHexError,
    },
}

/// Failures inside a signature provider.
///
/// Raised only when key material cannot be interpreted by the selected scheme
/// at all. A signature that merely fails to verify is reported as a negative
/// verdict, not an error.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{algorithm} private key must be {expected} bytes, got {actual}")]
    PrivateKeyLength {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{algorithm} public key must be {expected} bytes, got {actual}")]
    PublicKeyLength {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{algorithm} rejected the private key: {reason}")]
    InvalidPrivateKey {
        algorithm: &'static str,
        reason: String,
    },
}

/// Failures loading service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading configuration from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing configuration from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
