use crate::error::SigningStringError;

/// Pseudo-components of a request that a signature can cover, alongside
/// literal headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedComponent {
    Method,
    Path,
    Authority,
}

impl DerivedComponent {
    pub fn token(&self) -> &'static str {
        match self {
            DerivedComponent::Method => "@method",
            DerivedComponent::Path => "@path",
            DerivedComponent::Authority => "@authority",
        }
    }
}

/// One entry of a signature's covered-fields list.
///
/// Header names are held lowercased; the lowercased name is what appears in
/// the signing string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoveredField {
    Derived(DerivedComponent),
    Header(String),
}

impl CoveredField {
    /// Parse one covered-field token as it appears in signature metadata.
    /// `@`-prefixed tokens must name a known derived component.
    pub fn parse(token: &str) -> Result<Self, SigningStringError> {
        if token.starts_with('@') {
            match token {
                "@method" => Ok(CoveredField::Derived(DerivedComponent::Method)),
                "@path" => Ok(CoveredField::Derived(DerivedComponent::Path)),
                "@authority" => Ok(CoveredField::Derived(DerivedComponent::Authority)),
                other => Err(SigningStringError::UnknownComponent(other.to_string())),
            }
        } else {
            Ok(CoveredField::Header(token.to_ascii_lowercase()))
        }
    }

    /// Convenience constructor for a covered header.
    pub fn header(name: &str) -> Self {
        CoveredField::Header(name.to_ascii_lowercase())
    }

    /// The field name as rendered into the signing string.
    pub fn name(&self) -> &str {
        match self {
            CoveredField::Derived(component) => component.token(),
            CoveredField::Header(name) => name,
        }
    }
}

impl From<DerivedComponent> for CoveredField {
    fn from(component: DerivedComponent) -> Self {
        CoveredField::Derived(component)
    }
}
