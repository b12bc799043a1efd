//! Base document model
//!
//! A [`Document`] is one node object of an expanded JSON-LD document: a map
//! from canonical property IRI to its stored value. In expanded form every
//! property value is an array of value objects, node references, embedded
//! nodes, or `{"@list": [...]}` wrappers; [`Entry`] is the tagged reading of
//! one such array element.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{ModelError, Result};
use crate::vocab::keyword;

/// An expanded node object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    map: Map<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a node object, or the one-element array expansion usually
    /// produces
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self { map: map.clone() }),
            Value::Array(arr) if arr.len() == 1 => Self::from_json(&arr[0]),
            Value::Array(arr) => Err(ModelError::InvalidDocument(format!(
                "expected a single node object, found an array of {}",
                arr.len()
            ))),
            other => Err(ModelError::InvalidDocument(format!(
                "expected a node object, found {}",
                json_kind(other)
            ))),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_json(&value)
    }

    /// Raw stored value of a property
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.map.get(property)
    }

    /// Store a value, replacing whatever was there
    pub fn set(&mut self, property: &str, value: Value) {
        self.map.insert(property.to_string(), value);
    }

    pub fn remove(&mut self, property: &str) -> Option<Value> {
        self.map.remove(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.map.contains_key(property)
    }

    /// Property IRIs, excluding JSON-LD keywords
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.map
            .keys()
            .filter(|k| !k.starts_with('@'))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn id(&self) -> Option<&str> {
        self.map.get(keyword::ID).and_then(|v| v.as_str())
    }

    pub fn set_id(&mut self, id: &str) {
        self.set(keyword::ID, json!(id));
    }

    /// @type as a list of IRIs
    pub fn types(&self) -> Vec<String> {
        match self.map.get(keyword::TYPE) {
            Some(Value::String(t)) => vec![t.clone()],
            Some(Value::Array(arr)) => arr
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => vec![],
        }
    }

    pub fn set_types(&mut self, types: &[String]) {
        if types.is_empty() {
            self.map.remove(keyword::TYPE);
        } else {
            self.set(keyword::TYPE, json!(types));
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.map.clone())
    }

    /// Serialize as expanded JSON-LD (a one-element array)
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let doc = json!([self.map]);
        if pretty {
            Ok(serde_json::to_string_pretty(&doc)?)
        } else {
            Ok(serde_json::to_string(&doc)?)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A value object: `{"@value": ..., "@type": ..., "@language": ...}`
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl Literal {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed(value: impl Into<Value>, datatype: impl Into<String>) -> Self {
        Self {
            datatype: Some(datatype.into()),
            ..Self::new(value)
        }
    }

    pub fn with_language(value: impl Into<String>, language: impl Into<String>) -> Self {
        let value: String = value.into();
        Self {
            language: Some(language.into()),
            ..Self::new(value)
        }
    }

    /// Read a value object, or a bare scalar
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Object(obj) => {
                let inner = obj.get(keyword::VALUE)?;
                Some(Self {
                    value: inner.clone(),
                    datatype: obj
                        .get(keyword::TYPE)
                        .and_then(|v| v.as_str())
                        .map(String::from),
                    language: obj
                        .get(keyword::LANGUAGE)
                        .and_then(|v| v.as_str())
                        .map(String::from),
                })
            }
            Value::Array(_) => None,
            scalar => Some(Self::new(scalar.clone())),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(keyword::VALUE.to_string(), self.value.clone());
        if let Some(dt) = &self.datatype {
            obj.insert(keyword::TYPE.to_string(), json!(dt));
        }
        if let Some(lang) = &self.language {
            obj.insert(keyword::LANGUAGE.to_string(), json!(lang));
        }
        Value::Object(obj)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Numeric reading; numeric lexical forms ("12") count as numbers
    pub fn as_f64(&self) -> Option<f64> {
        match &self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

/// One element of an expanded property value
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Node reference: `{"@id": "..."}`
    Id(String),
    /// Value object
    Literal(Literal),
    /// Embedded node object
    Node(Document),
    /// Ordered-list wrapper: `{"@list": [...]}`
    List(Vec<Entry>),
}

impl Entry {
    pub fn iri(iri: impl Into<String>) -> Self {
        Entry::Id(iri.into())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Entry::Literal(Literal::new(value))
    }

    /// Classify one stored element
    ///
    /// `@list` is a keyword no node object may carry, so the wrapper is
    /// recognised by its key alone. Anything that is neither a list, a value
    /// object, nor a node is kept as a raw literal.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(obj) => {
                if let Some(list) = obj.get(keyword::LIST) {
                    let items = match list {
                        Value::Array(arr) => arr.iter().map(Entry::from_json).collect(),
                        single => vec![Entry::from_json(single)],
                    };
                    return Entry::List(items);
                }
                if let Some(lit) = Literal::from_json(value) {
                    return Entry::Literal(lit);
                }
                match obj.get(keyword::ID) {
                    Some(Value::String(id)) if obj.len() == 1 => Entry::Id(id.clone()),
                    _ => Entry::Node(Document { map: obj.clone() }),
                }
            }
            other => Entry::Literal(Literal::new(other.clone())),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Entry::Id(id) => single_key(keyword::ID, json!(id)),
            Entry::Literal(lit) => lit.to_json(),
            Entry::Node(doc) => doc.to_value(),
            Entry::List(items) => {
                let list: Vec<Value> = items.iter().map(Entry::to_json).collect();
                single_key(keyword::LIST, Value::Array(list))
            }
        }
    }

    /// Identifier of a reference or embedded node
    pub fn id(&self) -> Option<&str> {
        match self {
            Entry::Id(id) => Some(id),
            Entry::Node(doc) => doc.id(),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Entry::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Document> {
        match self {
            Entry::Node(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Entry::List(_))
    }
}

impl From<&str> for Entry {
    fn from(iri: &str) -> Self {
        Entry::Id(iri.to_string())
    }
}

impl From<String> for Entry {
    fn from(iri: String) -> Self {
        Entry::Id(iri)
    }
}

impl From<Literal> for Entry {
    fn from(lit: Literal) -> Self {
        Entry::Literal(lit)
    }
}

impl From<Document> for Entry {
    fn from(doc: Document) -> Self {
        Entry::Node(doc)
    }
}

fn single_key(key: &str, value: Value) -> Value {
    let mut obj = Map::new();
    obj.insert(key.to_string(), value);
    Value::Object(obj)
}

/// Read a stored property value as entries; a non-array value is one entry
pub fn entries_of(value: &Value) -> Vec<Entry> {
    match value {
        Value::Array(arr) => arr.iter().map(Entry::from_json).collect(),
        single => vec![Entry::from_json(single)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_accepts_expanded_array() {
        let doc = Document::from_json(&json!([{"@id": "https://example.org/c"}])).unwrap();
        assert_eq!(doc.id(), Some("https://example.org/c"));

        let doc = Document::from_json(&json!({"@id": "https://example.org/c"})).unwrap();
        assert_eq!(doc.id(), Some("https://example.org/c"));
    }

    #[test]
    fn test_from_json_rejects_non_nodes() {
        assert!(matches!(
            Document::from_json(&json!("x")),
            Err(ModelError::InvalidDocument(_))
        ));
        assert!(matches!(
            Document::from_json(&json!([{}, {}])),
            Err(ModelError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_set_overwrites_verbatim() {
        let mut doc = Document::new();
        doc.set("https://example.org/p", json!([{"@value": 1}]));
        doc.set("https://example.org/p", json!([{"@list": [{"@id": "a"}]}]));
        assert_eq!(
            doc.get("https://example.org/p"),
            Some(&json!([{"@list": [{"@id": "a"}]}]))
        );
    }

    #[test]
    fn test_types() {
        let mut doc = Document::new();
        assert!(doc.types().is_empty());

        doc.set_types(&["https://example.org/A".to_string()]);
        assert_eq!(doc.types(), vec!["https://example.org/A"]);

        doc.set("@type", json!("https://example.org/B"));
        assert_eq!(doc.types(), vec!["https://example.org/B"]);
    }

    #[test]
    fn test_properties_skip_keywords() {
        let doc = Document::from_json(&json!({
            "@id": "https://example.org/c",
            "@type": ["https://example.org/T"],
            "https://example.org/p": [{"@value": 1}]
        }))
        .unwrap();
        let props: Vec<&str> = doc.properties().collect();
        assert_eq!(props, vec!["https://example.org/p"]);
    }

    #[test]
    fn test_entry_classification() {
        assert_eq!(
            Entry::from_json(&json!({"@id": "https://example.org/a"})),
            Entry::Id("https://example.org/a".to_string())
        );
        assert!(matches!(
            Entry::from_json(&json!({"@value": 3, "@type": "xsd:int"})),
            Entry::Literal(Literal { datatype: Some(_), .. })
        ));
        assert!(matches!(
            Entry::from_json(&json!({"@id": "https://example.org/a", "@type": ["T"]})),
            Entry::Node(_)
        ));
        assert_eq!(
            Entry::from_json(&json!({"@list": [{"@id": "a"}, {"@id": "b"}]})),
            Entry::List(vec![Entry::iri("a"), Entry::iri("b")])
        );
        assert_eq!(Entry::from_json(&json!(7)), Entry::literal(7));
    }

    #[test]
    fn test_entry_to_json() {
        let list = Entry::List(vec![Entry::iri("a"), Entry::literal("b")]);
        assert_eq!(
            list.to_json(),
            json!({"@list": [{"@id": "a"}, {"@value": "b"}]})
        );

        let lit = Literal::with_language("hello", "en");
        assert_eq!(
            Entry::from(lit).to_json(),
            json!({"@value": "hello", "@language": "en"})
        );
    }

    #[test]
    fn test_literal_numbers() {
        assert_eq!(Literal::new(12).as_f64(), Some(12.0));
        assert_eq!(Literal::new(" 12 ").as_f64(), Some(12.0));
        assert_eq!(Literal::new("twelve").as_f64(), None);
        assert_eq!(Literal::new(true).as_f64(), None);
    }

    #[test]
    fn test_entries_of() {
        assert_eq!(entries_of(&json!([{"@id": "a"}, {"@id": "b"}])).len(), 2);
        assert_eq!(entries_of(&json!({"@id": "a"})), vec![Entry::iri("a")]);
    }

    #[test]
    fn test_to_json_string_is_expanded_array() {
        let mut doc = Document::new();
        doc.set_id("https://example.org/c");
        let out = doc.to_json_string(false).unwrap();
        assert_eq!(out, r#"[{"@id":"https://example.org/c"}]"#);
    }
}
