use ed25519_dalek::{
    PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH, Signature, Signer, SigningKey,
    Verifier, VerifyingKey,
};

use super::provider::SignatureProvider;
use crate::error::ProviderError;

/// Ed25519 signature provider.
///
/// Private keys are 32-byte seeds, public keys 32-byte compressed points,
/// signatures 64 bytes.
pub struct Ed25519Provider;

impl SignatureProvider for Ed25519Provider {
    fn sign(&self, data: &[u8], private_key: &[u8]) -> Result<Vec<u8>, ProviderError> {
        let seed: &[u8; SECRET_KEY_LENGTH] =
            private_key
                .try_into()
                .map_err(|_| ProviderError::PrivateKeyLength {
                    algorithm: "ed25519",
                    expected: SECRET_KEY_LENGTH,
                    actual: private_key.len(),
                })?;
        let signing_key = SigningKey::from_bytes(seed);
        Ok(signing_key.sign(data).to_bytes().to_vec())
    }

    fn verify(
        &self,
        public_key: &[u8],
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, ProviderError> {
        let key_bytes: &[u8; PUBLIC_KEY_LENGTH] =
            public_key
                .try_into()
                .map_err(|_| ProviderError::PublicKeyLength {
                    algorithm: "ed25519",
                    expected: PUBLIC_KEY_LENGTH,
                    actual: public_key.len(),
                })?;
        // A 32-byte value that decodes to no curve point is a mismatch, not
        // a provider failure.
        let Ok(verifying_key) = VerifyingKey::from_bytes(key_bytes) else {
            return Ok(false);
        };
        let Ok(sig_bytes) = <&[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
            return Ok(false);
        };
        let signature = Signature::from_bytes(sig_bytes);
        Ok(verifying_key.verify(data, &signature).is_ok())
    }
}
