use std::fs;
use std::path::Path;

use chrono::Utc;
use http::HeaderValue;

use provenance_annotator::error::{AnnotatorError, ParseError};
use provenance_annotator::signing::load_key_bytes;
use provenance_annotator::{
    AnnotationKind, CoveredField, DerivedComponent, HashAlgorithm, HttpPkiAnnotator, KeyReference,
    SignatureAlgorithm, SignatureContext, SignatureProvider, attach_signature, provider_for,
};

const PAYLOAD: &[u8] = b"{key: \"test\"}";

// Structurally valid 64-byte signature unrelated to any request.
const BOGUS_SIGNATURE: &str = "A9E41596541933DB7144CFBF72105E4E53F9493729CA66331A658B1B18AC6DF5\
                               DA991AD9720FD46A664918DFC745DE2F4F1F8C29FF71209B2DA79DFD1A34F50C";

fn write_ed25519_keypair(dir: &Path) -> SignatureContext {
    let signing_key = ed25519_dalek::SigningKey::from_bytes(&[42u8; 32]);
    let private_path = dir.join("private.key");
    let public_path = dir.join("public.key");
    fs::write(&private_path, hex::encode(signing_key.to_bytes())).unwrap();
    fs::write(&public_path, hex::encode(signing_key.verifying_key().to_bytes())).unwrap();
    SignatureContext::new(
        KeyReference::new(public_path, SignatureAlgorithm::Ed25519),
        KeyReference::new(private_path, SignatureAlgorithm::Ed25519),
    )
}

fn test_request() -> http::Request<()> {
    http::Request::builder()
        .method("POST")
        .uri("http://example.com/foo?var1=&var2=2")
        .header("Date", "Tue, 20 Feb 2024 12:00:00 GMT")
        .header("Content-Type", "application/json")
        .header("Content-Length", "10")
        .body(())
        .unwrap()
}

fn covered_fields() -> Vec<CoveredField> {
    vec![
        DerivedComponent::Method.into(),
        DerivedComponent::Path.into(),
        DerivedComponent::Authority.into(),
        CoveredField::header("Content-Type"),
        CoveredField::header("Content-Length"),
    ]
}

fn signed_request(context: &SignatureContext) -> http::Request<()> {
    let mut request = test_request();
    attach_signature(&mut request, &covered_fields(), context, Utc::now()).unwrap();
    request
}

#[test]
fn signed_request_yields_satisfied_annotation() {
    let dir = tempfile::tempdir().unwrap();
    let context = write_ed25519_keypair(dir.path());
    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Sha256, context.clone());

    let annotation = annotator.annotate(&signed_request(&context), PAYLOAD).unwrap();

    assert!(annotation.is_satisfied);
    assert_eq!(annotation.kind, AnnotationKind::PkiHttp);
    assert_eq!(annotation.key, HashAlgorithm::Sha256.derive_key(PAYLOAD));
    assert_eq!(annotation.hash, HashAlgorithm::Sha256);
    assert!(annotation.parent.is_none());
    assert!(!annotation.host.is_empty());
    assert!(annotation.signature.is_some());
}

#[test]
fn self_signature_verifies_against_the_service_public_key() {
    let dir = tempfile::tempdir().unwrap();
    let context = write_ed25519_keypair(dir.path());
    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Sha256, context.clone());

    let annotation = annotator.annotate(&signed_request(&context), PAYLOAD).unwrap();

    let provider = provider_for(SignatureAlgorithm::Ed25519).unwrap();
    let public_key = load_key_bytes(&context.public_key.path).unwrap();
    let signature = hex::decode(annotation.signature.as_deref().unwrap()).unwrap();
    assert!(
        provider
            .verify(&public_key, &annotation.canonical_bytes().unwrap(), &signature)
            .unwrap()
    );
}

#[test]
fn corrupted_signature_yields_unsatisfied_annotation() {
    let dir = tempfile::tempdir().unwrap();
    let context = write_ed25519_keypair(dir.path());
    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Sha256, context.clone());

    let mut request = signed_request(&context);
    request
        .headers_mut()
        .insert("signature", HeaderValue::from_static(BOGUS_SIGNATURE));

    let annotation = annotator.annotate(&request, PAYLOAD).unwrap();
    assert!(!annotation.is_satisfied);
    // A negative verdict is still attested.
    assert!(annotation.signature.is_some());
}

#[test]
fn covered_header_altered_after_signing_yields_unsatisfied() {
    let dir = tempfile::tempdir().unwrap();
    let context = write_ed25519_keypair(dir.path());
    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Sha256, context.clone());

    let mut request = signed_request(&context);
    request
        .headers_mut()
        .insert("content-length", HeaderValue::from_static("11"));

    let annotation = annotator.annotate(&request, PAYLOAD).unwrap();
    assert!(!annotation.is_satisfied);
}

#[test]
fn altered_public_key_bytes_yield_unsatisfied_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let context = write_ed25519_keypair(dir.path());
    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Sha256, context.clone());
    let request = signed_request(&context);

    let mut key_bytes = load_key_bytes(&context.public_key.path).unwrap();
    key_bytes[0] ^= 0xff;
    fs::write(&context.public_key.path, hex::encode(key_bytes)).unwrap();

    let annotation = annotator.annotate(&request, PAYLOAD).unwrap();
    assert!(!annotation.is_satisfied);
}

#[test]
fn missing_signature_metadata_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let context = write_ed25519_keypair(dir.path());
    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Sha256, context);

    let result = annotator.annotate(&test_request(), PAYLOAD);
    assert!(matches!(
        result,
        Err(AnnotatorError::Parse(ParseError::MissingSignatureInput))
    ));
}

#[test]
fn unsupported_algorithm_fails_before_any_key_io() {
    let dir = tempfile::tempdir().unwrap();
    let context = write_ed25519_keypair(dir.path());
    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Sha256, context);

    let mut request = test_request();
    request.headers_mut().insert(
        "signature-input",
        // keyid names a file that does not exist; reaching for it would
        // surface KeyMaterial, not UnsupportedAlgorithm.
        HeaderValue::from_static(r#"sig1=("@method");created=1;keyid="ghost.key";alg="rsa""#),
    );
    request
        .headers_mut()
        .insert("signature", HeaderValue::from_static("deadbeef"));

    let result = annotator.annotate(&request, PAYLOAD);
    assert!(matches!(result, Err(AnnotatorError::UnsupportedAlgorithm(alg)) if alg == "rsa"));
}

#[test]
fn algorithm_outside_the_allow_list_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut context = write_ed25519_keypair(dir.path());
    context.allowed_algorithms = Some(vec![SignatureAlgorithm::Secp256k1]);
    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Sha256, context.clone());

    let result = annotator.annotate(&signed_request(&context), PAYLOAD);
    assert!(matches!(result, Err(AnnotatorError::AlgorithmNotAllowed(alg)) if alg == "ed25519"));
}

#[test]
fn trusted_keys_dir_resolves_sender_keys() {
    let own_dir = tempfile::tempdir().unwrap();
    let trusted_dir = tempfile::tempdir().unwrap();
    let mut context = write_ed25519_keypair(own_dir.path());

    let request = signed_request(&context);

    // The sender's key lives only in the trusted directory.
    fs::rename(
        &context.public_key.path,
        trusted_dir.path().join("public.key"),
    )
    .unwrap();
    context.trusted_keys_dir = Some(trusted_dir.path().to_path_buf());

    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Sha256, context);
    let annotation = annotator.annotate(&request, PAYLOAD).unwrap();
    assert!(annotation.is_satisfied);
}

#[test]
fn unreadable_key_material_is_an_error_not_a_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let context = write_ed25519_keypair(dir.path());
    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Sha256, context.clone());
    let request = signed_request(&context);

    fs::remove_file(&context.public_key.path).unwrap();

    let result = annotator.annotate(&request, PAYLOAD);
    assert!(matches!(result, Err(AnnotatorError::KeyMaterial(_))));
}

#[test]
fn secp256k1_request_verifies_end_to_end() {
    use k256::ecdsa::SigningKey;
    use sha2::{Digest, Sha256};

    let dir = tempfile::tempdir().unwrap();
    let scalar = Sha256::digest(b"secp-seed");
    let signing_key = SigningKey::from_slice(&scalar).unwrap();
    let public_bytes = signing_key.verifying_key().to_encoded_point(true);

    let private_path = dir.path().join("private.key");
    let public_path = dir.path().join("public.key");
    fs::write(&private_path, hex::encode(scalar)).unwrap();
    fs::write(&public_path, hex::encode(public_bytes.as_bytes())).unwrap();

    let context = SignatureContext::new(
        KeyReference::new(public_path, SignatureAlgorithm::Secp256k1),
        KeyReference::new(private_path, SignatureAlgorithm::Secp256k1),
    );
    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Sha256, context.clone());

    let annotation = annotator.annotate(&signed_request(&context), PAYLOAD).unwrap();
    assert!(annotation.is_satisfied);
}

#[test]
fn content_key_uses_the_configured_hash() {
    let dir = tempfile::tempdir().unwrap();
    let context = write_ed25519_keypair(dir.path());
    let annotator = HttpPkiAnnotator::new(HashAlgorithm::Md5, context.clone());

    let annotation = annotator.annotate(&signed_request(&context), PAYLOAD).unwrap();
    assert_eq!(annotation.key, HashAlgorithm::Md5.derive_key(PAYLOAD));
    assert_eq!(annotation.hash, HashAlgorithm::Md5);
}
