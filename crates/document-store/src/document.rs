//! # Documents
//!
//! The contract a type must satisfy to live in a [`Collection`](crate::Collection).
//!
//! A document is split in two halves:
//! - the **identifier** ([`DocumentId`]), generated by the store on insert and never changed,
//! - the **fields** ([`Document::Fields`]), the payload callers create and replace.
//!
//! Keeping the fields as their own type means a caller can never forge or
//! overwrite an id: inserts and replaces only ever carry fields.

use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;
use uuid::Uuid;

/// Store-generated identifier for a document.
///
/// Rendered as 32 lowercase hex digits. Parsing accepts any textual UUID form
/// and rejects everything else with [`StoreError::InvalidId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for DocumentId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s)
            .map(Self)
            .map_err(|_| StoreError::InvalidId(s.to_string()))
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Trait that any stored type must implement to be managed by a [`Collection`](crate::Collection).
///
/// # Example
///
/// ```rust
/// use document_store::{Document, DocumentId};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Note { id: DocumentId, body: String }
///
/// impl Document for Note {
///     type Fields = String;
///
///     fn from_fields(id: DocumentId, body: String) -> Self { Self { id, body } }
///     fn id(&self) -> DocumentId { self.id }
///     fn replace(&mut self, body: String) { self.body = body; }
/// }
/// ```
pub trait Document: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The mutable payload: everything except the id.
    type Fields: Clone + Debug + Send + Sync + 'static;

    /// Builds the full document from a freshly generated id and its fields.
    fn from_fields(id: DocumentId, fields: Self::Fields) -> Self;

    fn id(&self) -> DocumentId;

    /// Replaces every field in place. The id is untouched.
    fn replace(&mut self, fields: Self::Fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_parse() {
        let id = DocumentId::generate();
        let text = id.to_string();
        assert_eq!(text.len(), 32);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(text.parse::<DocumentId>().unwrap(), id);
    }

    #[test]
    fn test_hyphenated_form_is_accepted() {
        let id: DocumentId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        assert_eq!(id.to_string(), "67e5504410b1426f9247bb680e5fe0c8");
    }

    #[test]
    fn test_malformed_ids_are_rejected() {
        for bad in ["", "new", "seed", "12345", "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"] {
            assert_eq!(
                bad.parse::<DocumentId>(),
                Err(StoreError::InvalidId(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id: DocumentId = "67e5504410b1426f9247bb680e5fe0c8".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"67e5504410b1426f9247bb680e5fe0c8\"");
        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
