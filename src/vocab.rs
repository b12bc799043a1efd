//! Vocabulary definitions
//!
//! Namespaces and the symbolic (compact) names of the ActivityStreams terms
//! the object model reads and writes. Compact names are resolved to canonical
//! IRIs by the [`Reasoner`](crate::reasoner::Reasoner), so a vocabulary
//! configuration can move a prefix without touching the accessors.

/// ActivityStreams 2.0 namespace
pub const AS_NS: &str = "https://www.w3.org/ns/activitystreams#";

/// Namespace for the collection range extensions
pub const ASX_NS: &str = "https://www.w3.org/ns/activitystreams-ext#";

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

/// JSON-LD keywords used in expanded documents
pub mod keyword {
    pub const ID: &str = "@id";
    pub const TYPE: &str = "@type";
    pub const VALUE: &str = "@value";
    pub const LANGUAGE: &str = "@language";
    pub const LIST: &str = "@list";
}

/// Classes
pub mod class {
    pub const OBJECT: &str = "as:Object";
    pub const LINK: &str = "as:Link";
    pub const COLLECTION: &str = "as:Collection";
    pub const ORDERED_COLLECTION: &str = "as:OrderedCollection";
    pub const COLLECTION_PAGE: &str = "as:CollectionPage";
    pub const ORDERED_COLLECTION_PAGE: &str = "as:OrderedCollectionPage";
}

/// Properties
pub mod prop {
    pub const NAME: &str = "as:name";
    pub const SUMMARY: &str = "as:summary";
    pub const CONTENT: &str = "as:content";
    pub const URL: &str = "as:url";
    pub const PUBLISHED: &str = "as:published";
    pub const UPDATED: &str = "as:updated";
    pub const ATTRIBUTED_TO: &str = "as:attributedTo";

    pub const ITEMS: &str = "as:items";
    pub const TOTAL_ITEMS: &str = "as:totalItems";
    pub const ITEMS_PER_PAGE: &str = "as:itemsPerPage";
    pub const CURRENT: &str = "as:current";
    pub const NEXT: &str = "as:next";
    pub const PREV: &str = "as:prev";
    pub const FIRST: &str = "as:first";
    pub const LAST: &str = "as:last";
    pub const SELF: &str = "as:self";

    pub const INDEX_RANGE: &str = "asx:indexRange";
    pub const PUBLISHED_RANGE: &str = "asx:publishedRange";
    pub const START_TIME_RANGE: &str = "asx:startTimeRange";
}

/// Datatype of the paging counters
pub const XSD_NON_NEGATIVE_INTEGER: &str = "xsd:nonNegativeInteger";

pub const XSD_DATE_TIME: &str = "xsd:dateTime";

/// Prefixes every reasoner starts with
pub fn default_prefixes() -> [(&'static str, &'static str); 4] {
    [
        ("as", AS_NS),
        ("asx", ASX_NS),
        ("rdf", RDF_NS),
        ("xsd", XSD_NS),
    ]
}

/// Class hierarchy every reasoner starts with, as (class, superclass) pairs
pub fn default_hierarchy() -> [(&'static str, &'static str); 5] {
    [
        (class::COLLECTION, class::OBJECT),
        (class::ORDERED_COLLECTION, class::COLLECTION),
        (class::COLLECTION_PAGE, class::COLLECTION),
        (class::ORDERED_COLLECTION_PAGE, class::ORDERED_COLLECTION),
        (class::ORDERED_COLLECTION_PAGE, class::COLLECTION_PAGE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefixes_are_namespaces() {
        for (prefix, ns) in default_prefixes() {
            assert!(!prefix.contains(':'));
            assert!(ns.ends_with('#'), "{} should end with '#'", ns);
        }
    }

    #[test]
    fn test_terms_are_compact() {
        for term in [prop::ITEMS, prop::TOTAL_ITEMS, prop::INDEX_RANGE, class::COLLECTION] {
            assert!(term.split_once(':').is_some());
        }
    }
}
