//! Linked-data object view and builder
//!
//! An [`Object`] is a read-only view over a [`Document`], bound to the
//! [`Reasoner`] that resolves property names and, optionally, to the node it
//! was embedded in. An [`ObjectBuilder`] accumulates property assignments
//! and produces such a view.

use serde_json::Value;
use std::sync::{Arc, Weak};

use crate::document::{entries_of, Document, Entry, Literal};
use crate::id::{classify_id, resolve_id, IdKind};
use crate::reasoner::Reasoner;
use crate::vocab::{prop, XSD_DATE_TIME};

#[derive(Debug, Clone)]
pub struct Object {
    doc: Arc<Document>,
    reasoner: Arc<Reasoner>,
    /// Non-owning back-reference to the enclosing node
    parent: Option<Weak<Document>>,
}

impl Object {
    pub fn new(document: Document, reasoner: Arc<Reasoner>, parent: Option<&Object>) -> Self {
        Self {
            doc: Arc::new(document),
            reasoner,
            parent: parent.map(|p| Arc::downgrade(&p.doc)),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn reasoner(&self) -> &Arc<Reasoner> {
        &self.reasoner
    }

    /// The enclosing node, while its view is still alive
    pub fn parent(&self) -> Option<Arc<Document>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Raw stored value of a property
    pub fn get(&self, term: &str) -> Option<&Value> {
        self.doc.get(&self.reasoner.resolve(term))
    }

    /// All stored entries of a property (empty when absent)
    pub fn entries(&self, term: &str) -> Vec<Entry> {
        self.get(term).map(entries_of).unwrap_or_default()
    }

    pub fn first_entry(&self, term: &str) -> Option<Entry> {
        self.entries(term).into_iter().next()
    }

    /// View over the first node stored under a property, with `self` as its
    /// parent
    pub fn object(&self, term: &str) -> Option<Object> {
        let doc = self.entries(term).into_iter().find_map(|entry| match entry {
            Entry::Node(doc) => Some(doc),
            Entry::Id(id) => {
                let mut doc = Document::new();
                doc.set_id(&id);
                Some(doc)
            }
            _ => None,
        })?;
        Some(Object::new(doc, Arc::clone(&self.reasoner), Some(self)))
    }

    /// @id, resolved against the parent's @id when relative
    pub fn id(&self) -> Option<String> {
        let raw = self.doc.id()?;
        if matches!(classify_id(raw), IdKind::Relative | IdKind::Fragment) {
            if let Some(base) = self.parent().as_deref().and_then(Document::id) {
                if let Ok(resolved) = resolve_id(raw, base) {
                    return Some(resolved);
                }
            }
        }
        Some(raw.to_string())
    }

    pub fn types(&self) -> Vec<String> {
        self.doc.types()
    }

    /// Whether any declared type is `class` or one of its subclasses
    pub fn is_a(&self, class: &str) -> bool {
        self.reasoner.is_a(&self.types(), class)
    }

    pub fn name(&self) -> Option<String> {
        self.first_string(prop::NAME)
    }

    pub fn summary(&self) -> Option<String> {
        self.first_string(prop::SUMMARY)
    }

    pub fn content(&self) -> Option<String> {
        self.first_string(prop::CONTENT)
    }

    pub fn url(&self) -> Option<Entry> {
        self.first_entry(prop::URL)
    }

    pub fn attributed_to(&self) -> Option<Entry> {
        self.first_entry(prop::ATTRIBUTED_TO)
    }

    pub fn published(&self) -> Option<Entry> {
        self.first_entry(prop::PUBLISHED)
    }

    pub fn updated(&self) -> Option<Entry> {
        self.first_entry(prop::UPDATED)
    }

    fn first_string(&self, term: &str) -> Option<String> {
        self.entries(term)
            .iter()
            .find_map(|e| e.as_literal().and_then(Literal::as_str).map(String::from))
    }
}

impl From<Object> for Entry {
    fn from(object: Object) -> Self {
        Entry::Node(object.document().clone())
    }
}

impl From<&Object> for Entry {
    fn from(object: &Object) -> Self {
        Entry::Node(object.document().clone())
    }
}

/// Mutable companion of [`Object`]
#[derive(Debug, Clone)]
pub struct ObjectBuilder {
    doc: Document,
    reasoner: Arc<Reasoner>,
}

impl ObjectBuilder {
    /// Start from `base` (or an empty document) with `types` declared first
    pub fn new(reasoner: Arc<Reasoner>, types: &[String], base: Option<&Object>) -> Self {
        let mut doc = base.map(|b| b.document().clone()).unwrap_or_default();

        let mut all_types: Vec<String> = types.iter().map(|t| reasoner.resolve(t)).collect();
        for t in doc.types() {
            if !all_types.contains(&t) {
                all_types.push(t);
            }
        }
        doc.set_types(&all_types);

        Self { doc, reasoner }
    }

    pub fn reasoner(&self) -> &Arc<Reasoner> {
        &self.reasoner
    }

    /// Store a raw value under a property, replacing the previous one
    pub fn set(&mut self, term: &str, value: Value) -> &mut Self {
        let property = self.reasoner.resolve(term);
        self.doc.set(&property, value);
        self
    }

    pub fn set_entries(&mut self, term: &str, entries: Vec<Entry>) -> &mut Self {
        let values: Vec<Value> = entries.iter().map(Entry::to_json).collect();
        self.set(term, Value::Array(values))
    }

    pub fn set_entry(&mut self, term: &str, entry: impl Into<Entry>) -> &mut Self {
        self.set_entries(term, vec![entry.into()])
    }

    pub fn get(&self, term: &str) -> Option<&Value> {
        self.doc.get(&self.reasoner.resolve(term))
    }

    pub fn id(&mut self, id: &str) -> &mut Self {
        self.doc.set_id(id);
        self
    }

    pub fn add_type(&mut self, term: &str) -> &mut Self {
        let t = self.reasoner.resolve(term);
        let mut types = self.doc.types();
        if !types.contains(&t) {
            types.push(t);
            self.doc.set_types(&types);
        }
        self
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.set_entry(prop::NAME, Literal::new(name))
    }

    pub fn name_with_language(&mut self, name: &str, language: &str) -> &mut Self {
        self.set_entry(prop::NAME, Literal::with_language(name, language))
    }

    pub fn summary(&mut self, summary: &str) -> &mut Self {
        self.set_entry(prop::SUMMARY, Literal::new(summary))
    }

    pub fn content(&mut self, content: &str) -> &mut Self {
        self.set_entry(prop::CONTENT, Literal::new(content))
    }

    pub fn url(&mut self, url: impl Into<Entry>) -> &mut Self {
        self.set_entry(prop::URL, url)
    }

    pub fn attributed_to(&mut self, who: impl Into<Entry>) -> &mut Self {
        self.set_entry(prop::ATTRIBUTED_TO, who)
    }

    /// Timestamps are stored as xsd:dateTime literals
    pub fn published(&mut self, timestamp: &str) -> &mut Self {
        let literal = Literal::typed(timestamp, self.reasoner.resolve(XSD_DATE_TIME));
        self.set_entry(prop::PUBLISHED, literal)
    }

    pub fn updated(&mut self, timestamp: &str) -> &mut Self {
        let literal = Literal::typed(timestamp, self.reasoner.resolve(XSD_DATE_TIME));
        self.set_entry(prop::UPDATED, literal)
    }

    /// The document accumulated so far
    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn build(&self) -> Object {
        Object::new(self.doc.clone(), Arc::clone(&self.reasoner), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{class, AS_NS, XSD_NS};
    use serde_json::json;

    fn reasoner() -> Arc<Reasoner> {
        Arc::new(Reasoner::new())
    }

    #[test]
    fn test_get_resolves_terms() {
        let doc = Document::from_json(&json!({
            "@id": "https://example.org/note",
            "https://www.w3.org/ns/activitystreams#name": [{"@value": "A note"}]
        }))
        .unwrap();
        let object = Object::new(doc, reasoner(), None);

        assert!(object.get(prop::NAME).is_some());
        assert!(object.get(&format!("{}name", AS_NS)).is_some());
        assert_eq!(object.name(), Some("A note".to_string()));
        assert_eq!(object.summary(), None);
    }

    #[test]
    fn test_child_view_resolves_relative_id() {
        let doc = Document::from_json(&json!({
            "@id": "https://example.org/c/",
            "https://www.w3.org/ns/activitystreams#next": [{"@id": "page/2"}]
        }))
        .unwrap();
        let parent = Object::new(doc, reasoner(), None);

        let next = parent.object(prop::NEXT).unwrap();
        assert_eq!(next.id(), Some("https://example.org/c/page/2".to_string()));
        assert!(next.parent().is_some());
    }

    #[test]
    fn test_relative_id_without_parent() {
        let mut doc = Document::new();
        doc.set_id("page/2");
        let object = Object::new(doc, reasoner(), None);
        assert_eq!(object.id(), Some("page/2".to_string()));
    }

    #[test]
    fn test_parent_is_not_owned() {
        let doc = Document::from_json(&json!({
            "@id": "https://example.org/c/",
            "https://www.w3.org/ns/activitystreams#next": [{"@id": "#p2"}]
        }))
        .unwrap();
        let parent = Object::new(doc, reasoner(), None);
        let next = parent.object(prop::NEXT).unwrap();
        drop(parent);

        assert!(next.parent().is_none());
        assert_eq!(next.id(), Some("#p2".to_string()));
    }

    #[test]
    fn test_builder_roundtrip() {
        let mut builder = ObjectBuilder::new(reasoner(), &[class::OBJECT.to_string()], None);
        builder
            .id("https://example.org/note")
            .name_with_language("Hallo", "de")
            .summary("A short note")
            .content("<p>Hi</p>")
            .url("https://example.org/note.html")
            .attributed_to("https://example.org/alice")
            .published("2015-01-01T12:00:00Z");
        let object = builder.build();

        assert_eq!(object.id(), Some("https://example.org/note".to_string()));
        assert_eq!(object.types(), vec![format!("{}Object", AS_NS)]);
        assert_eq!(object.name(), Some("Hallo".to_string()));
        assert_eq!(object.summary(), Some("A short note".to_string()));
        assert_eq!(object.content(), Some("<p>Hi</p>".to_string()));
        assert_eq!(
            object.url(),
            Some(Entry::iri("https://example.org/note.html"))
        );
        assert_eq!(
            object.attributed_to().and_then(|e| e.id().map(String::from)),
            Some("https://example.org/alice".to_string())
        );

        let published = object.published().unwrap();
        let literal = published.as_literal().unwrap();
        assert_eq!(literal.datatype, Some(format!("{}dateTime", XSD_NS)));
    }

    #[test]
    fn test_builder_seeds_from_base() {
        let base_doc = Document::from_json(&json!({
            "@id": "https://example.org/x",
            "@type": ["https://example.org/ns#Thing"],
            "https://www.w3.org/ns/activitystreams#name": [{"@value": "seed"}]
        }))
        .unwrap();
        let base = Object::new(base_doc, reasoner(), None);

        let builder = ObjectBuilder::new(reasoner(), &[class::OBJECT.to_string()], Some(&base));
        let object = builder.build();

        assert_eq!(object.name(), Some("seed".to_string()));
        assert_eq!(
            object.types(),
            vec![
                format!("{}Object", AS_NS),
                "https://example.org/ns#Thing".to_string()
            ]
        );
        // the base view is untouched
        assert_eq!(base.types().len(), 1);
    }

    #[test]
    fn test_add_type_and_is_a() {
        let mut builder = ObjectBuilder::new(reasoner(), &[], None);
        builder
            .add_type(class::ORDERED_COLLECTION)
            .add_type(class::ORDERED_COLLECTION);
        let object = builder.build();

        assert_eq!(object.types().len(), 1);
        assert!(object.is_a(class::COLLECTION));
        assert!(!object.is_a(class::LINK));
    }

    #[test]
    fn test_set_overwrites() {
        let mut builder = ObjectBuilder::new(reasoner(), &[], None);
        builder.name("first").name("second");
        assert_eq!(builder.build().name(), Some("second".to_string()));
    }

    #[test]
    fn test_entry_from_object() {
        let mut builder = ObjectBuilder::new(reasoner(), &[], None);
        builder.id("https://example.org/a");
        let entry = Entry::from(builder.build());
        assert_eq!(entry.id(), Some("https://example.org/a"));
    }
}
