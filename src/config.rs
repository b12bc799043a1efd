//! Vocabulary configuration
//!
//! Lets callers extend or override the default vocabulary from a JSON file:
//!
//! ```json
//! {
//!   "prefixes": { "ex": "https://example.org/ns#" },
//!   "subclasses": { "ex:Feed": ["as:OrderedCollection"] }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VocabularyConfig {
    /// Prefix -> namespace IRI, added to (or replacing) the defaults
    pub prefixes: BTreeMap<String, String>,
    /// Class -> superclasses; terms may be compact or absolute
    pub subclasses: BTreeMap<String, Vec<String>>,
}

impl VocabularyConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ModelError::InvalidPath(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
