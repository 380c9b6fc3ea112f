use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hash::HashAlgorithm;

/// The kind of evidence an annotation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// Public-key signature verification of an HTTP request.
    #[serde(rename = "pki-http")]
    PkiHttp,
}

/// A signed verdict about one piece of data, forming one link in a
/// provenance chain.
///
/// Constructed unsigned; `signature` is populated exactly once after
/// self-signing and treated as immutable from then on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    /// Content key identifying the payload the verdict is about.
    pub key: String,
    /// Hash algorithm that derived `key`.
    pub hash: HashAlgorithm,
    /// Host the verification ran on.
    pub host: String,
    pub kind: AnnotationKind,
    /// Content key of a prior annotation in the chain, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub is_satisfied: bool,
    pub timestamp: DateTime<Utc>,
    /// The producer's own signature over this record, hex-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl Annotation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        key: String,
        hash: HashAlgorithm,
        host: String,
        kind: AnnotationKind,
        parent: Option<String>,
        is_satisfied: bool,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Annotation {
            key,
            hash,
            host,
            kind,
            parent,
            is_satisfied,
            timestamp,
            signature: None,
        }
    }

    /// The canonical bytes the producer signs: this record serialized with
    /// the `signature` field absent. Field order is fixed by the struct, so
    /// producer and auditor derive identical bytes.
    pub fn canonical_bytes(&self) -> serde_json::Result<Vec<u8>> {
        let mut unsigned = self.clone();
        unsigned.signature = None;
        serde_json::to_vec(&unsigned)
    }
}
