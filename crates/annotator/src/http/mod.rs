mod fields;
mod handler;
mod parser;
mod signing_string;

pub use fields::{CoveredField, DerivedComponent};
pub use handler::attach_signature;
pub use parser::{ParsedSignatureMetadata, SIGNATURE_HEADER, SIGNATURE_INPUT_HEADER, parse_signature};
pub use signing_string::build_signing_string;

/// Read-only view of the request components a signature can cover.
///
/// The engine works against this interface rather than a concrete HTTP
/// library's request type; an implementation for [`http::Request`] is
/// provided for callers in the hyper/axum family.
pub trait SignableRequest {
    /// HTTP method, as transmitted (e.g. `POST`).
    fn method(&self) -> &str;

    /// Request path, excluding the query string.
    fn path(&self) -> &str;

    /// Authority (host) the request is addressed to, if known.
    fn authority(&self) -> Option<&str>;

    /// Header value by case-insensitive name. `None` when absent or not
    /// representable as a string.
    fn header(&self, name: &str) -> Option<&str>;
}

impl<B> SignableRequest for http::Request<B> {
    fn method(&self) -> &str {
        http::Request::method(self).as_str()
    }

    fn path(&self) -> &str {
        self.uri().path()
    }

    fn authority(&self) -> Option<&str> {
        self.uri()
            .authority()
            .map(|authority| authority.as_str())
            .or_else(|| {
                self.headers()
                    .get(http::header::HOST)
                    .and_then(|value| value.to_str().ok())
            })
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|value| value.to_str().ok())
    }
}
