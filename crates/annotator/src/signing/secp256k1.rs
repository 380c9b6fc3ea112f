use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};

use super::provider::SignatureProvider;
use crate::error::ProviderError;

const PRIVATE_KEY_LENGTH: usize = 32;
const PUBLIC_KEY_LENGTH: usize = 33;

/// ECDSA signature provider over the secp256k1 curve, SHA-256 digest.
///
/// Private keys are 32-byte scalars, public keys 33-byte SEC1-compressed
/// points, signatures 64 bytes in fixed r||s form.
pub struct Secp256k1Provider;

impl SignatureProvider for Secp256k1Provider {
    fn sign(&self, data: &[u8], private_key: &[u8]) -> Result<Vec<u8>, ProviderError> {
        if private_key.len() != PRIVATE_KEY_LENGTH {
            return Err(ProviderError::PrivateKeyLength {
                algorithm: "secp256k1",
                expected: PRIVATE_KEY_LENGTH,
                actual: private_key.len(),
            });
        }
        let signing_key =
            SigningKey::from_slice(private_key).map_err(|e| ProviderError::InvalidPrivateKey {
                algorithm: "secp256k1",
                reason: e.to_string(),
            })?;
        let signature: Signature = signing_key.sign(data);
        Ok(signature.to_bytes().to_vec())
    }

    fn verify(
        &self,
        public_key: &[u8],
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, ProviderError> {
        if public_key.len() != PUBLIC_KEY_LENGTH {
            return Err(ProviderError::PublicKeyLength {
                algorithm: "secp256k1",
                expected: PUBLIC_KEY_LENGTH,
                actual: public_key.len(),
            });
        }
        // A correctly sized encoding that is no valid point is a mismatch.
        let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(public_key) else {
            return Ok(false);
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(verifying_key.verify(data, &signature).is_ok())
    }
}
