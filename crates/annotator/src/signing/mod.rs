mod ed25519;
mod keyfile;
mod provider;
mod secp256k1;

pub use ed25519::Ed25519Provider;
pub use keyfile::load_key_bytes;
pub use provider::{SignatureAlgorithm, SignatureProvider, SigningMaterial, provider_for};
pub use secp256k1::Secp256k1Provider;
