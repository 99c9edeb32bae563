//! Record normalization and client-side filtering
//!
//! Raw records come back as free-form JSON objects; each endpoint declares
//! an ordered rule set mapping output field names to dot paths with
//! defaults. Normalization is pure: one output record per input record,
//! input order preserved, absent data replaced by the rule's default and
//! never an error.

use crate::search;
use crate::types::{JsonObject, JsonValue};
use serde_json::Value;
use std::collections::HashMap;

/// One output field: where it comes from and what it falls back to
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Output field name
    pub output: String,
    /// Dot path evaluated against the raw record
    pub path: String,
    /// Value substituted when the path is absent
    pub default: JsonValue,
}

impl FieldRule {
    /// Rule reading `path` into an output field of the same name,
    /// defaulting to `null`
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            output: name.clone(),
            path: name,
            default: Value::Null,
        }
    }

    /// Rule mapping `path` to a differently named output field
    pub fn renamed(output: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            path: path.into(),
            default: Value::Null,
        }
    }

    /// Set the default value
    #[must_use]
    pub fn default_value(mut self, default: impl Into<JsonValue>) -> Self {
        self.default = default.into();
        self
    }
}

/// Ordered list of field rules; the output key set is fixed per endpoint
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a same-name field rule
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.rules.push(FieldRule::field(name));
        self
    }

    /// Add an arbitrary rule
    #[must_use]
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The rules, in output order
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the rule set is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// An identity rule set over the given field names
    pub fn identity<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set = set.field(name);
        }
        set
    }
}

/// Apply a rule set to every raw record.
///
/// Pure: preserves order and cardinality exactly; never fails.
pub fn normalize(raw: &[JsonValue], rules: &RuleSet) -> Vec<JsonObject> {
    raw.iter().map(|record| normalize_one(record, rules)).collect()
}

/// Apply a rule set to one raw record
pub fn normalize_one(record: &JsonValue, rules: &RuleSet) -> JsonObject {
    let mut out = JsonObject::new();
    for rule in rules.rules() {
        out.insert(
            rule.output.clone(),
            search::search_or(&rule.path, record, rule.default.clone()),
        );
    }
    out
}

/// Client-side equality filter for fields the remote API cannot filter
/// server-side.
///
/// Conjunctive across all supplied predicates, order-preserving, pure.
pub fn filter(records: &[JsonObject], predicates: &HashMap<String, JsonValue>) -> Vec<JsonObject> {
    records
        .iter()
        .filter(|record| {
            predicates
                .iter()
                .all(|(field, expected)| record.get(field) == Some(expected))
        })
        .cloned()
        .collect()
}
