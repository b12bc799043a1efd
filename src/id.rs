//! ID classification and resolution
//!
//! Expanded documents normally carry absolute `@id`s, but embedded nodes may
//! use relative references that only make sense against their parent node.

use url::Url;

use crate::error::{ModelError, Result};

/// Classification of an entity @id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// Absolute IRI: "https://...", "urn:...", "mailto:..."
    Absolute,
    /// Relative reference: "page/2", "./items", "/collections/1"
    Relative,
    /// Fragment identifier: "#page2"
    Fragment,
    /// Blank node label: "_:b0"
    BlankNode,
}

/// Classify an @id string
pub fn classify_id(id: &str) -> IdKind {
    if id.starts_with("_:") {
        IdKind::BlankNode
    } else if id.starts_with('#') {
        IdKind::Fragment
    } else if Url::parse(id).is_ok() {
        IdKind::Absolute
    } else {
        IdKind::Relative
    }
}

/// Resolve an @id against a base IRI
///
/// Absolute IRIs and blank node labels are returned unchanged. Relative
/// references and fragments are joined to `base`, which must itself be an
/// absolute IRI.
pub fn resolve_id(id: &str, base: &str) -> Result<String> {
    match classify_id(id) {
        IdKind::Absolute | IdKind::BlankNode => Ok(id.to_string()),
        IdKind::Relative | IdKind::Fragment => {
            let base_url = Url::parse(base).map_err(|e| ModelError::InvalidIri {
                iri: base.to_string(),
                reason: e.to_string(),
            })?;
            let joined = base_url.join(id).map_err(|e| ModelError::InvalidIri {
                iri: id.to_string(),
                reason: e.to_string(),
            })?;
            Ok(joined.to_string())
        }
    }
}

/// Check that a string is an absolute IRI
pub fn validate_iri(iri: &str) -> Result<()> {
    Url::parse(iri).map(|_| ()).map_err(|e| ModelError::InvalidIri {
        iri: iri.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_id() {
        assert_eq!(classify_id("https://example.org/c/1"), IdKind::Absolute);
        assert_eq!(classify_id("urn:uuid:1234"), IdKind::Absolute);
        assert_eq!(classify_id("mailto:a@example.org"), IdKind::Absolute);
        assert_eq!(classify_id("page/2"), IdKind::Relative);
        assert_eq!(classify_id("/collections/1"), IdKind::Relative);
        assert_eq!(classify_id("#page2"), IdKind::Fragment);
        assert_eq!(classify_id("_:b0"), IdKind::BlankNode);
    }

    #[test]
    fn test_resolve_relative() {
        let resolved = resolve_id("page/2", "https://example.org/c/").unwrap();
        assert_eq!(resolved, "https://example.org/c/page/2");

        let resolved = resolve_id("/other", "https://example.org/c/").unwrap();
        assert_eq!(resolved, "https://example.org/other");
    }

    #[test]
    fn test_resolve_fragment() {
        let resolved = resolve_id("#p2", "https://example.org/c").unwrap();
        assert_eq!(resolved, "https://example.org/c#p2");
    }

    #[test]
    fn test_resolve_absolute_unchanged() {
        let resolved = resolve_id("https://other.org/x", "https://example.org/").unwrap();
        assert_eq!(resolved, "https://other.org/x");

        let resolved = resolve_id("_:b1", "not a base").unwrap();
        assert_eq!(resolved, "_:b1");
    }

    #[test]
    fn test_resolve_against_invalid_base() {
        assert!(matches!(
            resolve_id("page/2", "_:b0"),
            Err(ModelError::InvalidIri { .. })
        ));
    }

    #[test]
    fn test_validate_iri() {
        assert!(validate_iri("https://www.w3.org/ns/activitystreams#").is_ok());
        assert!(validate_iri("not an iri").is_err());
    }
}
