//! Document graph nodes: pages, sections and their provenance.
//!
//! A [`Page`] is the root of one document graph. Its `has_part` list points
//! at [`Section`] nodes in reading order, and each section points back via
//! `is_part_of`. Both directions are recorded independently; keeping them
//! in agreement is the producer's job (see [`crate::graph`]).
//!
//! # Wire leniency
//!
//! `hasPart`, `isPartOf` and `about` decode as empty when absent or `null`,
//! and are always emitted, even when empty. Every other field is required,
//! except a section's `name`, which is omitted when empty.

use crate::codec::{self, CodecError};
use crate::time::JsonTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Opaque node identifier (usually a URL), unique by convention.
pub type Identifier = String;

/// Where a page's content came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Source {
    /// Page ID in the source wiki
    pub id: i64,
    /// Revision ID in the source wiki
    pub revision: i64,
    /// Time-based UUID of the render
    #[serde(rename = "tid")]
    pub time_uuid: String,
    /// Wiki, project or hostname of the source document
    pub authority: String,
}

impl Source {
    /// Create a new source record.
    #[must_use]
    pub fn new(
        id: i64,
        revision: i64,
        time_uuid: impl Into<String>,
        authority: impl Into<String>,
    ) -> Self {
        Self {
            id,
            revision,
            time_uuid: time_uuid.into(),
            authority: authority.into(),
        }
    }
}

/// Root node of a document graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Globally unique identifier
    #[serde(rename = "identifier")]
    pub id: Identifier,
    /// Provenance of the rendered revision
    #[serde(rename = "_source")]
    pub source: Source,
    /// Page title
    pub name: String,
    /// Canonical URL
    pub url: String,
    /// Last modification time
    pub date_modified: JsonTime,
    /// Child content nodes, in reading order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub has_part: Vec<Identifier>,
    /// Metadata node per vocabulary (e.g. `"wikidata" -> "Q2"`)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub about: BTreeMap<String, Identifier>,
}

impl Page {
    /// Create a page with no title, URL or edges.
    #[must_use]
    pub fn new(id: impl Into<Identifier>, source: Source, date_modified: JsonTime) -> Self {
        Self {
            id: id.into(),
            source,
            name: String::new(),
            url: String::new(),
            date_modified,
            has_part: Vec::new(),
            about: BTreeMap::new(),
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the canonical URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Append a child node to the end of the reading order.
    #[must_use]
    pub fn with_part(mut self, part: impl Into<Identifier>) -> Self {
        self.has_part.push(part.into());
        self
    }

    /// Point `vocabulary` at a metadata node, replacing any earlier entry.
    #[must_use]
    pub fn with_about(
        mut self,
        vocabulary: impl Into<String>,
        target: impl Into<Identifier>,
    ) -> Self {
        self.about.insert(vocabulary.into(), target.into());
        self
    }

    /// Whether `id` is listed in `has_part`.
    #[must_use]
    pub fn contains_part(&self, id: &str) -> bool {
        self.has_part.iter().any(|part| part == id)
    }

    /// Metadata node for a vocabulary, if any.
    #[must_use]
    pub fn about_for(&self, vocabulary: &str) -> Option<&str> {
        self.about.get(vocabulary).map(String::as_str)
    }

    /// Encode as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns error if `date_modified` cannot be encoded.
    pub fn to_json(&self) -> Result<String, CodecError> {
        codec::to_json(self)
    }

    /// Decode from JSON.
    ///
    /// # Errors
    ///
    /// Returns error on missing required fields, type mismatches or a
    /// malformed timestamp.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        codec::from_json(json)
    }
}

/// A content fragment of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Globally unique identifier
    pub id: Identifier,
    /// Text of the section's first heading. Empty means untitled.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Parent nodes this section belongs to
    #[serde(default, deserialize_with = "null_as_empty")]
    pub is_part_of: Vec<Identifier>,
    /// Last modification time
    pub date_modified: JsonTime,
    /// Raw, unsanitized markup. Escape before rendering.
    #[serde(rename = "unsafe")]
    pub unsafe_html: String,
}

impl Section {
    /// Create an untitled section with no parents.
    #[must_use]
    pub fn new(id: impl Into<Identifier>, date_modified: JsonTime) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            is_part_of: Vec::new(),
            date_modified,
            unsafe_html: String::new(),
        }
    }

    /// Set the heading text.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a parent node.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<Identifier>) -> Self {
        self.is_part_of.push(parent.into());
        self
    }

    /// Set the raw markup payload.
    #[must_use]
    pub fn with_unsafe(mut self, markup: impl Into<String>) -> Self {
        self.unsafe_html = markup.into();
        self
    }

    /// Whether the section has a heading.
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// Whether `id` is listed in `is_part_of`.
    #[must_use]
    pub fn belongs_to(&self, id: &str) -> bool {
        self.is_part_of.iter().any(|parent| parent == id)
    }

    /// Encode as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns error if `date_modified` cannot be encoded.
    pub fn to_json(&self) -> Result<String, CodecError> {
        codec::to_json(self)
    }

    /// Decode from JSON.
    ///
    /// # Errors
    ///
    /// Returns error on missing required fields, type mismatches or a
    /// malformed timestamp.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        codec::from_json(json)
    }
}

/// Read `null` as the empty collection.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
