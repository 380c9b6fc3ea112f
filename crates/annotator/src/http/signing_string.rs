use super::SignableRequest;
use super::fields::{CoveredField, DerivedComponent};
use crate::error::SigningStringError;

/// Serialize the covered components of `request` into the canonical signing
/// string.
///
/// Each component renders as `<lowercased name>: <value>`, one line per
/// component, joined with `\n`, in exactly the order of `fields`; the order
/// is part of the signature's meaning. Header values are taken verbatim. A
/// covered component the request cannot supply is an error, never an empty
/// line.
pub fn build_signing_string<R>(
    request: &R,
    fields: &[CoveredField],
) -> Result<String, SigningStringError>
where
    R: SignableRequest + ?Sized,
{
    let mut lines = Vec::with_capacity(fields.len());
    for field in fields {
        let value = match field {
            CoveredField::Derived(DerivedComponent::Method) => request.method(),
            CoveredField::Derived(DerivedComponent::Path) => request.path(),
            CoveredField::Derived(DerivedComponent::Authority) => request
                .authority()
                .ok_or(SigningStringError::MissingAuthority)?,
            CoveredField::Header(name) => request
                .header(name)
                .ok_or_else(|| SigningStringError::MissingHeader(name.clone()))?,
        };
        lines.push(format!("{}: {}", field.name(), value));
    }
    Ok(lines.join("\n"))
}
