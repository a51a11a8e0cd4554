//! Registry record types.
//!
//! Records follow the shadcn registry item schema. Every field is defaulted so
//! partially populated JSON (as emitted for individual `*-logo.json` files) still
//! decodes; unknown fields are ignored.

use crate::error::ElementsError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Registry item type used for bundles that only reference other items.
pub const BUNDLE_ITEM_TYPE: &str = "registry:block";

/// A single packaged source file of a registry item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryFile {
    /// Target path (e.g., "components/logos/stripe.tsx").
    pub path: String,
    /// Full source text.
    pub content: String,
    /// File type (e.g., "registry:component").
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub file_type: String,
}

/// One component as published in the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryRecord {
    /// Unique kebab-case slug (e.g., "stripe-logo").
    pub name: String,
    /// Item type (e.g., "registry:component", "registry:block").
    #[serde(rename = "type")]
    pub item_type: String,
    /// Display title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Ordered category tags.
    pub categories: Vec<String>,
    /// AI-elements subcategory, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// npm dependencies.
    pub dependencies: Vec<String>,
    /// Other registry items this one depends on.
    pub registry_dependencies: Vec<String>,
    /// Packaged files, in order.
    pub files: Vec<RegistryFile>,
}

impl RegistryRecord {
    /// Decode a single record from JSON.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Source text of the first file, if it has any content.
    pub fn source(&self) -> Option<&str> {
        self.files
            .first()
            .map(|f| f.content.as_str())
            .filter(|c| !c.trim().is_empty())
    }

    /// Non-empty subcategory.
    pub fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref().filter(|s| !s.is_empty())
    }

    /// Bundles are blocks without files of their own.
    pub fn is_bundle(&self) -> bool {
        self.item_type == BUNDLE_ITEM_TYPE && self.files.is_empty()
    }
}

/// The registry root document (`registry.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Registry {
    /// Registry name.
    pub name: String,
    /// Homepage URL.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub homepage: String,
    /// All items in registry order.
    pub items: Vec<RegistryRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RegistryDocument {
    Root(Registry),
    Items(Vec<RegistryRecord>),
}

impl Registry {
    /// Build a registry from items already in memory.
    pub fn from_items(items: Vec<RegistryRecord>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Decode either a registry root object or a bare array of items.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        Ok(match serde_json::from_str(input)? {
            RegistryDocument::Root(registry) => registry,
            RegistryDocument::Items(items) => Self::from_items(items),
        })
    }

    /// Load a registry document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ElementsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ElementsError::io(path, e))?;
        Self::from_json_str(&text).map_err(|e| ElementsError::json(path, e))
    }

    /// Find an item by name.
    pub fn find(&self, name: &str) -> Option<&RegistryRecord> {
        self.items.iter().find(|item| item.name == name)
    }
}
