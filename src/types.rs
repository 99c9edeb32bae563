//! Common types used throughout rdskit
//!
//! Shared type definitions, type aliases, and utility types used across
//! multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Verb
// ============================================================================

/// HTTP verb used by an endpoint.
///
/// The RDS API families mix GET-with-query-string and POST-with-JSON-body
/// for read-only queries, and use PUT/DELETE for mutations. The verb is
/// per-endpoint configuration, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    /// Read-only query; parameters go in the query string
    #[default]
    Get,
    /// Query or mutation carried in a JSON body
    Post,
    /// Mutation (update) carried in a JSON body
    Put,
    /// Mutation (removal); body optional
    Delete,
}

impl Verb {
    /// Whether request parameters travel in a JSON body rather than the
    /// query string
    pub fn uses_body(self) -> bool {
        matches!(self, Verb::Post | Verb::Put)
    }
}

impl From<Verb> for reqwest::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_conversion() {
        assert_eq!(reqwest::Method::from(Verb::Get), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(Verb::Post), reqwest::Method::POST);
        assert_eq!(reqwest::Method::from(Verb::Put), reqwest::Method::PUT);
        assert_eq!(reqwest::Method::from(Verb::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn test_verb_uses_body() {
        assert!(!Verb::Get.uses_body());
        assert!(Verb::Post.uses_body());
        assert!(Verb::Put.uses_body());
        assert!(!Verb::Delete.uses_body());
    }

    #[test]
    fn test_verb_deserialize() {
        let v: Verb = serde_json::from_str("\"GET\"").unwrap();
        assert_eq!(v, Verb::Get);
        let v: Verb = serde_json::from_str("\"POST\"").unwrap();
        assert_eq!(v, Verb::Post);
    }
}
