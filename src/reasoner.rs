//! Vocabulary reasoner
//!
//! Resolves the symbolic term names used by the object model (`as:items`)
//! to canonical IRIs, merges declared types, and answers subclass questions
//! against a small, extensible class hierarchy.

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::config::VocabularyConfig;
use crate::error::{ModelError, Result};
use crate::id::validate_iri;
use crate::vocab::{default_hierarchy, default_prefixes};

/// Schemes that are never mistaken for a vocabulary prefix
const IRI_SCHEMES: &[&str] = &["http", "https", "urn", "mailto", "tag", "did", "data", "file"];

#[derive(Debug, Clone)]
pub struct Reasoner {
    /// Prefix -> namespace IRI
    prefixes: BTreeMap<String, String>,
    /// Class IRI -> direct superclass IRIs
    superclasses: HashMap<String, Vec<String>>,
}

impl Default for Reasoner {
    fn default() -> Self {
        Self::new()
    }
}

impl Reasoner {
    /// A reasoner loaded with the ActivityStreams vocabulary
    pub fn new() -> Self {
        let prefixes = default_prefixes()
            .into_iter()
            .map(|(p, ns)| (p.to_string(), ns.to_string()))
            .collect();

        let mut reasoner = Self {
            prefixes,
            superclasses: HashMap::new(),
        };
        for (class, superclass) in default_hierarchy() {
            let class = reasoner.resolve(class);
            let superclass = reasoner.resolve(superclass);
            reasoner.insert_subclass(class, superclass);
        }
        reasoner
    }

    /// Build a reasoner from the default vocabulary plus a configuration
    pub fn from_config(config: &VocabularyConfig) -> Result<Self> {
        let mut reasoner = Self::new();
        // Prefixes first so the subclass table can use them
        for (prefix, namespace) in &config.prefixes {
            reasoner = reasoner.with_prefix(prefix, namespace)?;
        }
        for (class, superclasses) in &config.subclasses {
            for superclass in superclasses {
                reasoner = reasoner.with_subclass(class, superclass)?;
            }
        }
        Ok(reasoner)
    }

    /// Register (or replace) a prefix
    pub fn with_prefix(mut self, prefix: &str, namespace: &str) -> Result<Self> {
        validate_iri(namespace)?;
        debug!(prefix, namespace, "registering vocabulary prefix");
        self.prefixes
            .insert(prefix.to_string(), namespace.to_string());
        Ok(self)
    }

    /// Declare `class` a direct subclass of `superclass`
    pub fn with_subclass(mut self, class: &str, superclass: &str) -> Result<Self> {
        let class = self.expand(class)?;
        let superclass = self.expand(superclass)?;
        self.insert_subclass(class, superclass);
        Ok(self)
    }

    fn insert_subclass(&mut self, class: String, superclass: String) {
        let entry = self.superclasses.entry(class).or_default();
        if !entry.contains(&superclass) {
            entry.push(superclass);
        }
    }

    /// Namespace registered for a prefix
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Expand a compact term (`as:items`) or validate an absolute IRI
    pub fn expand(&self, term: &str) -> Result<String> {
        if let Some((prefix, local)) = term.split_once(':') {
            if !local.starts_with("//") {
                if let Some(namespace) = self.prefixes.get(prefix) {
                    return Ok(format!("{}{}", namespace, local));
                }
                if !IRI_SCHEMES.contains(&prefix) {
                    return Err(ModelError::UnknownPrefix(term.to_string()));
                }
            }
        }
        validate_iri(term)?;
        Ok(term.to_string())
    }

    /// Infallible expansion: a term that cannot be expanded is returned as-is
    pub fn resolve(&self, term: &str) -> String {
        self.expand(term).unwrap_or_else(|_| term.to_string())
    }

    /// Shorten an IRI to `prefix:local` using the longest matching namespace
    pub fn compact(&self, iri: &str) -> String {
        self.prefixes
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()) && iri.len() > ns.len())
            .max_by_key(|(_, ns)| ns.len())
            .map(|(prefix, ns)| format!("{}:{}", prefix, &iri[ns.len()..]))
            .unwrap_or_else(|| iri.to_string())
    }

    /// Merge a primary type with additional declared types
    ///
    /// The primary type comes first; duplicates are dropped, order is kept.
    pub fn merge_types(&self, primary: &str, extra: &[String]) -> Vec<String> {
        let mut result = vec![self.resolve(primary)];
        for t in extra {
            let t = self.resolve(t);
            if !result.contains(&t) {
                result.push(t);
            }
        }
        result
    }

    /// Reflexive, transitive subclass check
    pub fn is_subclass_of(&self, class: &str, superclass: &str) -> bool {
        let class = self.resolve(class);
        let superclass = self.resolve(superclass);

        let mut seen = HashSet::new();
        let mut pending = vec![class];
        while let Some(current) = pending.pop() {
            if current == superclass {
                return true;
            }
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(parents) = self.superclasses.get(&current) {
                pending.extend(parents.iter().cloned());
            }
        }
        false
    }

    /// Whether any of `types` is (a subclass of) `class`
    pub fn is_a(&self, types: &[String], class: &str) -> bool {
        types.iter().any(|t| self.is_subclass_of(t, class))
    }
}
