//! Persisted search index: documents, inverted terms and metadata.

use crate::error::{IndexError, IndexResult};
use crate::types::SymbolKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// One searchable symbol. Its position in [`SearchIndex::symbols`] is its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub id: u32,
    pub kind: SymbolKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub rendering_text: String,
    #[serde(default)]
    pub summary: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub ns: String,
    pub version: String,
    pub generator: String,
    #[serde(rename = "generator-version")]
    pub generator_version: String,
    /// RFC 3339 build time.
    #[serde(rename = "generated-at", default)]
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    pub symbols: Vec<SearchDocument>,
    pub terms: BTreeMap<String, BTreeSet<u32>>,
    pub meta: IndexMeta,
}

impl SearchIndex {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn document(&self, id: u32) -> Option<&SearchDocument> {
        self.symbols.get(id as usize)
    }

    /// Ids of the documents containing `token`.
    pub fn term(&self, token: &str) -> Option<&BTreeSet<u32>> {
        self.terms.get(token)
    }

    /// Check that ids are positions, every term id is in range and every
    /// token is a non-empty lower-case word.
    pub fn validate(&self) -> IndexResult<()> {
        let corrupted = |reason: String| IndexError::IndexCorrupted { reason };

        for (position, doc) in self.symbols.iter().enumerate() {
            if doc.id as usize != position {
                return Err(corrupted(format!(
                    "symbol '{}' has id {} at position {position}",
                    doc.name, doc.id
                )));
            }
        }

        for (token, ids) in &self.terms {
            if token.is_empty()
                || token.chars().any(char::is_whitespace)
                || token.chars().any(char::is_uppercase)
            {
                return Err(corrupted(format!("invalid term '{token}'")));
            }
            if let Some(id) = ids.iter().find(|id| **id as usize >= self.symbols.len()) {
                return Err(corrupted(format!(
                    "term '{token}' references missing symbol {id}"
                )));
            }
        }

        Ok(())
    }

    /// Parse and validate a serialized index.
    pub fn from_json(json: &str) -> IndexResult<Self> {
        let index: Self = serde_json::from_str(json).map_err(|e| IndexError::IndexCorrupted {
            reason: e.to_string(),
        })?;
        index.validate()?;
        debug!(
            "loaded search index for {}-{} with {} symbols and {} terms",
            index.meta.ns,
            index.meta.version,
            index.symbols.len(),
            index.terms.len()
        );
        Ok(index)
    }

    /// Compact JSON.
    pub fn to_json(&self) -> IndexResult<String> {
        serde_json::to_string(self).map_err(|e| IndexError::Serialization {
            what: "search index".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> IndexResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| IndexError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, self.to_json()?).map_err(|source| IndexError::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> IndexResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| IndexError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
