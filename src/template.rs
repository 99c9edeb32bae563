//! Path-template rendering
//!
//! API paths arrive as templates like
//! `v3/{project_id}/instances/{instance_id}/databases`. Placeholders are
//! substituted from a variable map before the request is issued.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex for matching placeholders: {variable_name}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

/// Render a path template, substituting every placeholder from `vars`.
///
/// An unresolved placeholder is an error; a half-rendered path would
/// otherwise be sent to the API as a literal `{instance_id}` segment.
pub fn render(template: &str, vars: &HashMap<String, String>) -> Result<String> {
    let mut result = template.to_string();
    let mut missing = Vec::new();

    for cap in PLACEHOLDER_REGEX.captures_iter(template) {
        let full_match = cap.get(0).unwrap().as_str();
        let name = cap.get(1).unwrap().as_str();

        match vars.get(name) {
            Some(value) => {
                result = result.replace(full_match, value);
            }
            None => missing.push(name.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(result)
    } else {
        Err(Error::undefined_placeholder(missing.join(", ")))
    }
}

/// Render a template, leaving unresolved placeholders in place
pub fn render_optional(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();

    for cap in PLACEHOLDER_REGEX.captures_iter(template) {
        let full_match = cap.get(0).unwrap().as_str();
        let name = cap.get(1).unwrap().as_str();

        if let Some(value) = vars.get(name) {
            result = result.replace(full_match, value);
        }
    }

    result
}

/// Check if a string contains placeholders
pub fn has_placeholders(s: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(s)
}

/// Extract all placeholder names from a template
pub fn placeholder_names(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .map(|cap| cap.get(1).unwrap().as_str().to_string())
        .collect()
}
