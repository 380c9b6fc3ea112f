use chrono::{DateTime, Utc};
use http::{HeaderValue, Request};
use tracing::debug;

use super::fields::CoveredField;
use super::parser::{SIGNATURE_HEADER, SIGNATURE_INPUT_HEADER};
use super::signing_string::build_signing_string;
use crate::config::SignatureContext;
use crate::error::AnnotatorError;
use crate::signing::{load_key_bytes, provider_for};

/// Sign `request` over `fields` and attach the resulting signature headers.
///
/// The signing string is built over `fields` in the given order, signed with
/// the context's private key, and advertised in a `Signature-Input` header
/// whose `keyid` is the file name of the context's public key, the name a
/// verifier resolves inside its trusted-keys directory. The signature itself
/// travels hex-encoded in the `Signature` header.
pub fn attach_signature<B>(
    request: &mut Request<B>,
    fields: &[CoveredField],
    context: &SignatureContext,
    created: DateTime<Utc>,
) -> Result<(), AnnotatorError> {
    let seed = build_signing_string(&*request, fields)?;

    let provider = provider_for(context.private_key.algorithm)?;
    let private_key = load_key_bytes(&context.private_key.path)?;
    let signature = provider.sign(seed.as_bytes(), &private_key)?;

    let key_id = context
        .public_key
        .file_name()
        .ok_or_else(|| AnnotatorError::KeyIdUnavailable(context.public_key.path.clone()))?;

    let list = fields
        .iter()
        .map(|field| format!("\"{}\"", field.name()))
        .collect::<Vec<_>>()
        .join(" ");
    let input = format!(
        "sig1=({list});created={};keyid=\"{key_id}\";alg=\"{}\"",
        created.timestamp(),
        context.private_key.algorithm.token(),
    );
    debug!(%input, "attaching signature headers");

    request
        .headers_mut()
        .insert(SIGNATURE_INPUT_HEADER, HeaderValue::from_str(&input)?);
    request
        .headers_mut()
        .insert(SIGNATURE_HEADER, HeaderValue::from_str(&hex::encode(signature))?);
    Ok(())
}
