//! Schema document storage and reference resolution.
//!
//! This module provides the [`Resolver`] capability used by `$ref` to find
//! documents by base URI, and [`SchemaRegistry`], a thread-safe in-memory
//! implementation of it. It also contains the fragment lookup shared by all
//! resolvers: JSON Pointer fragments (percent-decoded) and plain-name
//! anchors declared with `$anchor` or a legacy `$id: "#name"`.

use parking_lot::RwLock;
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Looks up schema documents by absolute URI.
///
/// Implementations must be shareable between threads; a single resolver is
/// held by a [`Validator`](crate::Validator) and consulted for every `$ref`
/// with a non-empty base URI.
pub trait Resolver: Send + Sync {
    /// Returns the document registered under `uri` (without fragment).
    fn resolve_document(&self, uri: &str) -> Option<Arc<Value>>;
}

/// Type alias for the document storage map.
type DocumentMap = Arc<RwLock<HashMap<String, Arc<Value>>>>;

/// A thread-safe store of schema documents keyed by URI.
///
/// Cloning a registry shares the underlying store, so documents registered
/// through one handle are visible to validators holding another.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>`:
/// - Any number of validations may resolve concurrently (read access)
/// - Registration is serialized (write access)
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use schemata::{Draft, SchemaRegistry, Validator};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry
///     .register("https://example.com/positive", json!({"type": "integer", "minimum": 1}))
///     .unwrap();
///
/// let validator = Validator::new(Draft::Draft202012).with_resolver(Arc::new(registry));
/// let schema = json!({"$ref": "https://example.com/positive"});
///
/// assert!(validator.is_valid(&schema, &json!(3)).unwrap());
/// assert!(!validator.is_valid(&schema, &json!(0)).unwrap());
/// ```
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    documents: DocumentMap,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document under `uri`.
    ///
    /// A trailing empty fragment (`#`) is ignored, so `https://a/b#` and
    /// `https://a/b` name the same document.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateDocument` if the URI is already taken.
    pub fn register(&self, uri: impl Into<String>, document: Value) -> Result<(), RegistryError> {
        let uri = normalize(uri.into());
        let mut documents = self.documents.write();

        if documents.contains_key(&uri) {
            return Err(RegistryError::DuplicateDocument(uri));
        }

        tracing::debug!(uri = %uri, "registered schema document");
        documents.insert(uri, Arc::new(document));
        Ok(())
    }

    /// Registers a document under the URI declared by its own `$id`
    /// (or `id` for draft 4 documents) and returns that URI.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::MissingId` when the document declares no
    /// absolute identifier, or `DuplicateDocument` if it is already taken.
    pub fn register_document(&self, document: Value) -> Result<String, RegistryError> {
        let id = document
            .get("$id")
            .or_else(|| document.get("id"))
            .and_then(Value::as_str)
            .filter(|id| !id.starts_with('#'))
            .map(|id| normalize(id.to_string()))
            .ok_or(RegistryError::MissingId)?;

        self.register(id.clone(), document)?;
        Ok(id)
    }

    /// Retrieves a document by URI.
    pub fn get(&self, uri: &str) -> Option<Arc<Value>> {
        self.documents.read().get(uri.trim_end_matches('#')).cloned()
    }

    /// Returns true if a document is registered under `uri`.
    pub fn contains(&self, uri: &str) -> bool {
        self.documents.read().contains_key(uri.trim_end_matches('#'))
    }

    /// Returns the number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Returns true if no document is registered.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    /// Lists every `$ref` in the registered documents that cannot be resolved.
    ///
    /// Call this after registering all documents to check reference
    /// integrity up front instead of failing mid-validation. The result is
    /// sorted and deduplicated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::SchemaRegistry;
    /// use serde_json::json;
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register("urn:user", json!({
    ///     "properties": {"id": {"$ref": "urn:user-id"}}
    /// })).unwrap();
    ///
    /// assert_eq!(registry.unresolved_refs(), vec!["urn:user-id"]);
    /// ```
    pub fn unresolved_refs(&self) -> Vec<String> {
        let documents = self.documents.read();
        let mut unresolved = Vec::new();

        for document in documents.values() {
            let mut references = Vec::new();
            collect_refs(document, &mut references);

            for reference in references {
                let (base, fragment) = split_reference(reference);
                let target = if base.is_empty() {
                    Some(document)
                } else {
                    documents.get(base)
                };
                if target.and_then(|doc| locate(doc, fragment)).is_none() {
                    unresolved.push(reference.to_string());
                }
            }
        }

        unresolved.sort();
        unresolved.dedup();
        unresolved
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let documents = self.documents.read();
        let mut uris: Vec<&String> = documents.keys().collect();
        uris.sort();
        f.debug_struct("SchemaRegistry").field("documents", &uris).finish()
    }
}

impl Resolver for SchemaRegistry {
    fn resolve_document(&self, uri: &str) -> Option<Arc<Value>> {
        self.get(uri)
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a document under a URI that already exists.
    #[error("schema document '{0}' already registered")]
    DuplicateDocument(String),

    /// The document declares no absolute `$id` to register it under.
    #[error("schema document has no absolute '$id'")]
    MissingId,
}

fn normalize(uri: String) -> String {
    match uri.strip_suffix('#') {
        Some(stripped) => stripped.to_string(),
        None => uri,
    }
}

fn collect_refs<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::Object(object) => {
            if let Some(reference) = object.get("$ref").and_then(Value::as_str) {
                out.push(reference);
            }
            for child in object.values() {
                collect_refs(child, out);
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_refs(child, out);
            }
        }
        _ => {}
    }
}

/// Splits a reference into its base URI and its (still encoded) fragment.
pub(crate) fn split_reference(reference: &str) -> (&str, &str) {
    match reference.split_once('#') {
        Some((base, fragment)) => (base, fragment),
        None => (reference, ""),
    }
}

/// Finds the subschema a fragment names inside `document`.
///
/// An empty fragment is the document itself, a fragment starting with `/`
/// is a percent-encoded JSON Pointer, and anything else is an anchor name.
pub(crate) fn locate<'a>(document: &'a Value, fragment: &str) -> Option<&'a Value> {
    let fragment = percent_decode(fragment)?;
    if fragment.is_empty() {
        Some(document)
    } else if fragment.starts_with('/') {
        document.pointer(&fragment)
    } else {
        find_anchor(document, &fragment)
    }
}

fn find_anchor<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    match value {
        Value::Object(object) => {
            let declared = object.get("$anchor").and_then(Value::as_str) == Some(name)
                || ["$id", "id"].iter().any(|key| {
                    object
                        .get(*key)
                        .and_then(Value::as_str)
                        .and_then(|id| id.strip_prefix('#'))
                        == Some(name)
                });
            if declared {
                return Some(value);
            }
            object.values().find_map(|child| find_anchor(child, name))
        }
        Value::Array(items) => items.iter().find_map(|child| find_anchor(child, name)),
        _ => None,
    }
}

fn percent_decode(input: &str) -> Option<String> {
    percent_decode_str(input)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_and_get() {
        let registry = SchemaRegistry::new();
        registry.register("urn:a", json!({"type": "string"})).unwrap();

        assert!(registry.contains("urn:a"));
        assert_eq!(registry.get("urn:a#").as_deref(), Some(&json!({"type": "string"})));
        assert!(registry.get("urn:b").is_none());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = SchemaRegistry::new();
        registry.register("urn:a", json!(true)).unwrap();
        assert_eq!(
            registry.register("urn:a#", json!(false)),
            Err(RegistryError::DuplicateDocument("urn:a".to_string()))
        );
    }

    #[test]
    fn test_clone_shares_store() {
        let registry = SchemaRegistry::new();
        let handle = registry.clone();
        handle.register("urn:shared", json!({})).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_document_uses_id() {
        let registry = SchemaRegistry::new();
        let id = registry
            .register_document(json!({"$id": "https://example.com/s", "type": "null"}))
            .unwrap();
        assert_eq!(id, "https://example.com/s");
        assert_eq!(
            registry.register_document(json!({"type": "null"})),
            Err(RegistryError::MissingId)
        );
    }

    #[test]
    fn test_split_reference() {
        assert_eq!(split_reference("#/a"), ("", "/a"));
        assert_eq!(split_reference("urn:x#/a"), ("urn:x", "/a"));
        assert_eq!(split_reference("urn:x"), ("urn:x", ""));
    }

    #[test]
    fn test_locate_pointer_with_percent_encoding() {
        let document = json!({"$defs": {"a b": {"type": "string"}, "c%d": {"type": "null"}}});
        assert_eq!(
            locate(&document, "/$defs/a%20b"),
            Some(&json!({"type": "string"}))
        );
        assert_eq!(
            locate(&document, "/$defs/c%25d"),
            Some(&json!({"type": "null"}))
        );
        assert!(locate(&document, "/$defs/%zz").is_none());
    }

    #[test]
    fn test_locate_anchor() {
        let document = json!({
            "$defs": {
                "modern": {"$anchor": "item", "type": "integer"},
                "legacy": {"$id": "#thing", "type": "boolean"}
            }
        });
        assert_eq!(locate(&document, "item").and_then(|s| s.get("type")), Some(&json!("integer")));
        assert_eq!(locate(&document, "thing").and_then(|s| s.get("type")), Some(&json!("boolean")));
        assert!(locate(&document, "nothing").is_none());
    }

    #[test]
    fn test_unresolved_refs() {
        let registry = SchemaRegistry::new();
        registry
            .register(
                "urn:root",
                json!({
                    "properties": {
                        "a": {"$ref": "#/$defs/a"},
                        "b": {"$ref": "#/$defs/missing"},
                        "c": {"$ref": "urn:other#/x"},
                        "d": {"$ref": "urn:other#/x"}
                    },
                    "$defs": {"a": true}
                }),
            )
            .unwrap();

        assert_eq!(
            registry.unresolved_refs(),
            vec!["#/$defs/missing", "urn:other#/x"]
        );

        registry.register("urn:other", json!({"x": {}})).unwrap();
        assert_eq!(registry.unresolved_refs(), vec!["#/$defs/missing"]);
    }
}
