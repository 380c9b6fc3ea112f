pub mod annotation;
pub mod annotator;
pub mod config;
pub mod error;
pub mod hash;
pub mod http;
pub mod signing;

pub use annotation::{Annotation, AnnotationKind};
pub use annotator::HttpPkiAnnotator;
pub use config::{AnnotatorConfig, KeyReference, SignatureContext};
pub use error::AnnotatorError;
pub use hash::HashAlgorithm;
pub use http::{CoveredField, DerivedComponent, SignableRequest, attach_signature, parse_signature};
pub use signing::{SignatureAlgorithm, SignatureProvider, provider_for};
