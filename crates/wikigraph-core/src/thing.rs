//! schema.org-style entity descriptors.
//!
//! Metadata records referenced from a page's `about` map are described with
//! a [`Thing`]. The shared `@context` / `@type` / identity fields live in a
//! [`Descriptor`] held by composition and flattened onto the wire.

use crate::codec::{self, CodecError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vocabulary context emitted on every descriptor.
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";

/// Type tag of a plain, unspecialized descriptor.
pub const DEFAULT_TYPE: &str = "Thing";

/// Context, type tag and internal identity shared by all descriptors.
///
/// The identity token is assigned once at construction and never written
/// to the wire. Decoding produces a fresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(skip, default = "Uuid::new_v4")]
    id: Uuid,
    /// Vocabulary context (`@context`)
    #[serde(rename = "@context")]
    pub context: String,
    /// Type discriminator (`@type`)
    #[serde(rename = "@type")]
    pub type_name: String,
}

impl Descriptor {
    /// Create a descriptor with the schema.org context and `Thing` type.
    #[must_use]
    pub fn new() -> Self {
        Self::with_type(DEFAULT_TYPE)
    }

    /// Create a descriptor for a specialized type.
    #[must_use]
    pub fn with_type(type_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            context: SCHEMA_ORG_CONTEXT.to_string(),
            type_name: type_name.into(),
        }
    }

    /// Internal identity token.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Default for Descriptor {
    fn default() -> Self {
        Self::new()
    }
}

/// A generic entity, after <https://schema.org/Thing>.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thing {
    /// Context, type and identity
    #[serde(flatten)]
    pub descriptor: Descriptor,
    /// Alias for the entity
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alternate_name: String,
    /// Short description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Image URL
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
    /// Display name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// URL of a reference page identifying the entity. Always emitted.
    pub same_as: String,
}

impl Thing {
    /// Create an empty `Thing`.
    #[must_use]
    pub fn new() -> Self {
        Self::from_descriptor(Descriptor::new())
    }

    /// Create an empty descriptor of a specialized type (e.g. `"Person"`).
    #[must_use]
    pub fn with_type(type_name: impl Into<String>) -> Self {
        Self::from_descriptor(Descriptor::with_type(type_name))
    }

    fn from_descriptor(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            alternate_name: String::new(),
            description: String::new(),
            image: String::new(),
            name: String::new(),
            same_as: String::new(),
        }
    }

    /// Internal identity token.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.descriptor.id()
    }

    /// The `@type` tag.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.descriptor.type_name
    }

    /// Whether both values carry the same identity token, regardless of
    /// their field contents.
    #[must_use]
    pub fn is_same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Encode as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String, CodecError> {
        codec::to_json(self)
    }

    /// Decode from JSON. The result gets a fresh identity token.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not a valid descriptor.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        codec::from_json(json)
    }
}

impl Default for Thing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thing_wire_form() {
        let thing = Thing::new();
        assert_eq!(
            thing.to_json().unwrap(),
            r#"{"@context":"https://schema.org","@type":"Thing","sameAs":""}"#
        );
    }

    #[test]
    fn populated_fields_are_emitted() {
        let mut thing = Thing::with_type("Person");
        thing.name = "Ada Lovelace".to_string();
        thing.alternate_name = "Augusta Ada King".to_string();
        thing.same_as = "https://www.wikidata.org/wiki/Q7259".to_string();

        let json: serde_json::Value = serde_json::from_str(&thing.to_json().unwrap()).unwrap();
        assert_eq!(json["@type"], "Person");
        assert_eq!(json["name"], "Ada Lovelace");
        assert_eq!(json["alternateName"], "Augusta Ada King");
        assert!(json.get("description").is_none());
        assert!(json.get("image").is_none());
    }

    #[test]
    fn identity_is_stable_and_hidden() {
        let thing = Thing::new();
        let copy = thing.clone();
        assert!(!thing.id().is_nil());
        assert!(thing.is_same_entity(&copy));
        assert!(!thing.is_same_entity(&Thing::new()));

        let json = thing.to_json().unwrap();
        assert!(!json.contains(&thing.id().to_string()));
    }

    #[test]
    fn decode_assigns_fresh_identity() {
        let mut thing = Thing::new();
        thing.description = "third planet".to_string();

        let decoded = Thing::from_json(&thing.to_json().unwrap()).unwrap();
        assert_eq!(decoded.description, "third planet");
        assert_eq!(decoded.descriptor.context, SCHEMA_ORG_CONTEXT);
        assert_eq!(decoded.type_name(), DEFAULT_TYPE);
        assert!(!decoded.is_same_entity(&thing));
    }

    #[test]
    fn decode_requires_same_as() {
        let err = Thing::from_json(r#"{"@context":"https://schema.org","@type":"Thing"}"#);
        assert!(err.is_err());
    }
}
