use chrono::Utc;
use tracing::{debug, instrument, warn};

use crate::annotation::{Annotation, AnnotationKind};
use crate::config::{AnnotatorConfig, KeyReference, SignatureContext};
use crate::error::AnnotatorError;
use crate::hash::HashAlgorithm;
use crate::http::{SignableRequest, parse_signature};
use crate::signing::{SignatureAlgorithm, SigningMaterial, load_key_bytes, provider_for};

/// Produces signed annotations recording whether an HTTP request carries a
/// valid signature over its own components.
///
/// Stateless per call: verification reads key material and the clock but
/// shares no mutable state, so one annotator may serve concurrent requests.
pub struct HttpPkiAnnotator {
    hash: HashAlgorithm,
    signature: SignatureContext,
    kind: AnnotationKind,
}

impl HttpPkiAnnotator {
    pub fn new(hash: HashAlgorithm, signature: SignatureContext) -> Self {
        HttpPkiAnnotator {
            hash,
            signature,
            kind: AnnotationKind::PkiHttp,
        }
    }

    pub fn from_config(config: &AnnotatorConfig) -> Self {
        Self::new(config.hash, config.signature.clone())
    }

    /// Verify the signature carried by `request` and return a self-signed
    /// annotation attesting the verdict for `payload`.
    ///
    /// A cryptographic mismatch yields a successful annotation with
    /// `is_satisfied = false`. Anything else that goes wrong (absent or
    /// malformed metadata, an unsupported or disallowed algorithm,
    /// unreadable key material, no host identity) aborts with an error and
    /// no annotation.
    #[instrument(skip_all)]
    pub fn annotate<R>(&self, request: &R, payload: &[u8]) -> Result<Annotation, AnnotatorError>
    where
        R: SignableRequest + ?Sized,
    {
        let key = self.hash.derive_key(payload);
        let host = local_host()?;

        let parsed = parse_signature(request)?;
        debug!(key_id = %parsed.key_id, algorithm = %parsed.algorithm, "parsed signature metadata");

        // The alg parameter arrives from the network; resolve it before any
        // key file is touched.
        let algorithm = SignatureAlgorithm::from_token(&parsed.algorithm);
        if algorithm == SignatureAlgorithm::Unsupported {
            return Err(AnnotatorError::UnsupportedAlgorithm(parsed.algorithm));
        }
        if !self.signature.algorithm_allowed(algorithm) {
            return Err(AnnotatorError::AlgorithmNotAllowed(parsed.algorithm));
        }

        // The configured public key is never mutated; the resolved key is a
        // fresh, call-local reference.
        let public_key = KeyReference::new(
            self.signature.resolve_public_key(&parsed.key_id),
            algorithm,
        );
        let is_satisfied = verify_signature(&public_key, &parsed.signing_material())?;
        if !is_satisfied {
            warn!(key_id = %parsed.key_id, "request signature did not verify");
        }

        let mut annotation = Annotation::new(
            key,
            self.hash,
            host,
            self.kind,
            None,
            is_satisfied,
            Utc::now(),
        );
        annotation.signature = Some(self.sign_annotation(&annotation)?);
        Ok(annotation)
    }

    /// Self-sign the verdict with the service's private key, over the
    /// annotation's canonical bytes.
    fn sign_annotation(&self, annotation: &Annotation) -> Result<String, AnnotatorError> {
        let provider = provider_for(self.signature.private_key.algorithm)?;
        let private_key = load_key_bytes(&self.signature.private_key.path)?;
        let raw = provider.sign(&annotation.canonical_bytes()?, &private_key)?;
        Ok(hex::encode(raw))
    }
}

/// Check the signable material against the resolved public key.
///
/// Returns the verdict; only an unreadable key file or uninterpretable key
/// material escalates to an error.
fn verify_signature(
    key: &KeyReference,
    material: &SigningMaterial,
) -> Result<bool, AnnotatorError> {
    let provider = provider_for(key.algorithm)?;
    let public_key = load_key_bytes(&key.path)?;
    // A signature value that is not even hex cannot match anything.
    let Ok(signature) = hex::decode(&material.signature) else {
        return Ok(false);
    };
    Ok(provider.verify(&public_key, material.seed.as_bytes(), &signature)?)
}

fn local_host() -> Result<String, AnnotatorError> {
    let name = hostname::get().map_err(|e| AnnotatorError::HostResolution(e.to_string()))?;
    name.into_string()
        .map_err(|_| AnnotatorError::HostResolution("host name is not valid UTF-8".into()))
}
