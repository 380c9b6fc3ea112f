use super::SignableRequest;
use super::fields::CoveredField;
use super::signing_string::build_signing_string;
use crate::error::ParseError;
use crate::signing::SigningMaterial;

/// Header naming the covered fields and signature parameters.
pub const SIGNATURE_INPUT_HEADER: &str = "signature-input";
/// Header carrying the hex-encoded signature value.
pub const SIGNATURE_HEADER: &str = "signature";

/// Signature metadata extracted from a request, with the signing string
/// ("seed") rebuilt over the covered-fields list the metadata itself
/// declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSignatureMetadata {
    pub seed: String,
    pub signature: String,
    pub key_id: String,
    pub algorithm: String,
    pub covered_fields: Vec<CoveredField>,
    pub created: Option<i64>,
}

impl ParsedSignatureMetadata {
    pub fn signing_material(&self) -> SigningMaterial {
        SigningMaterial {
            seed: self.seed.clone(),
            signature: self.signature.clone(),
        }
    }
}

/// Extract and reconstruct the signature metadata carried by `request`.
///
/// The covered-fields list is read from the `Signature-Input` header (the
/// verifier does not control what the signer chose to cover) and the seed is
/// rebuilt by running the signing-string builder over that list.
pub fn parse_signature<R>(request: &R) -> Result<ParsedSignatureMetadata, ParseError>
where
    R: SignableRequest + ?Sized,
{
    let input = request
        .header(SIGNATURE_INPUT_HEADER)
        .ok_or(ParseError::MissingSignatureInput)?;
    let signature = request
        .header(SIGNATURE_HEADER)
        .ok_or(ParseError::MissingSignature)?
        .trim()
        .to_string();

    let (covered_fields, params) = parse_signature_input(input)?;
    if covered_fields.is_empty() {
        return Err(ParseError::EmptyCoveredFields);
    }
    let key_id = params.key_id.ok_or(ParseError::MissingParameter("keyid"))?;
    let algorithm = params.algorithm.ok_or(ParseError::MissingParameter("alg"))?;

    let seed = build_signing_string(request, &covered_fields)?;

    Ok(ParsedSignatureMetadata {
        seed,
        signature,
        key_id,
        algorithm,
        covered_fields,
        created: params.created,
    })
}

#[derive(Default)]
struct SignatureParams {
    key_id: Option<String>,
    algorithm: Option<String>,
    created: Option<i64>,
}

/// Parse a `Signature-Input` member of the form
/// `sig1=("@method" "@path" "content-type");created=...;keyid="...";alg="..."`.
fn parse_signature_input(value: &str) -> Result<(Vec<CoveredField>, SignatureParams), ParseError> {
    let (_, member) = value
        .split_once('=')
        .ok_or_else(|| malformed("no '=' after the signature label"))?;
    let member = member.trim();
    let inner = member
        .strip_prefix('(')
        .ok_or_else(|| malformed("covered-fields list does not start with '('"))?;
    let (list, rest) = inner
        .split_once(')')
        .ok_or_else(|| malformed("covered-fields list is not closed"))?;

    let mut covered_fields = Vec::new();
    for token in list.split_whitespace() {
        let unquoted = token
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .ok_or_else(|| malformed("covered-field token is not quoted"))?;
        covered_fields.push(CoveredField::parse(unquoted)?);
    }

    let mut params = SignatureParams::default();
    for param in rest.split(';') {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }
        let (key, raw) = param
            .split_once('=')
            .ok_or_else(|| malformed("parameter without '='"))?;
        let value = raw.trim_matches('"');
        match key.trim() {
            "keyid" => params.key_id = Some(value.to_string()),
            "alg" => params.algorithm = Some(value.to_string()),
            "created" => {
                let created = value
                    .parse::<i64>()
                    .map_err(|_| malformed("created is not an integer timestamp"))?;
                params.created = Some(created);
            }
            // Unrecognized parameters are carried by signers we do not
            // control; they do not affect the seed.
            _ => {}
        }
    }

    Ok((covered_fields, params))
}

fn malformed(reason: &str) -> ParseError {
    ParseError::MalformedSignatureInput(reason.to_string())
}
