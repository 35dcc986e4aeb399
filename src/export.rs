//! @ai:module:intent Decode a timer export document into groups and session names
//! @ai:module:layer infrastructure
//! @ai:module:public_api Export, parse_export, read_export
//! @ai:module:depends_on attempt, category, error
//!
//! An export is a JSON object. Every member holding an array is a group of
//! attempt records keyed by its member name (`session1`, `session2`, ...).
//! Display names live under `properties.sessionData`, itself a JSON document
//! encoded as a string.

use crate::attempt::normalize_with;
use crate::category::CategorySet;
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// @ai:intent Decoded export: raw groups in document order plus the label lookup
#[derive(Debug, Clone, Default)]
pub struct Export {
    pub groups: Vec<(String, Value)>,
    pub session_names: HashMap<String, String>,
}

impl Export {
    /// @ai:intent Normalize every group and aggregate into categories
    /// @ai:effects pure
    pub fn into_categories(self, windows: Vec<usize>, ok_code: i64) -> CategorySet {
        let normalized = self
            .groups
            .into_iter()
            .map(|(key, records)| {
                let attempts = normalize_with(&records, ok_code);
                (key, attempts)
            });

        CategorySet::from_groups(normalized, &self.session_names, windows)
    }
}

/// @ai:intent Decode an export document from a string
/// @ai:post Err only when the text is not JSON or the top level is not an object
/// @ai:effects pure
pub fn parse_export(content: &str) -> Result<Export> {
    let document: Value = serde_json::from_str(content)?;

    let members = match document {
        Value::Object(members) => members,
        other => {
            return Err(Error::UnexpectedShape(format!(
                "expected a JSON object at the top level, found {}",
                kind_of(&other)
            )))
        }
    };

    let session_names = members
        .get("properties")
        .and_then(|p| p.get("sessionData"))
        .map(session_names)
        .unwrap_or_default();

    let groups: Vec<(String, Value)> = members
        .into_iter()
        .filter(|(_, value)| value.is_array())
        .collect();

    tracing::info!(
        "Decoded export with {} groups and {} session names",
        groups.len(),
        session_names.len()
    );

    Ok(Export {
        groups,
        session_names,
    })
}

/// @ai:intent Read and decode an export file
/// @ai:effects fs:read
pub fn read_export(path: &Path) -> Result<Export> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_export(&content)
}

/// Maps `session{id}` to the session's name. Undecodable metadata gives an
/// empty table; the groups themselves are still usable.
fn session_names(session_data: &Value) -> HashMap<String, String> {
    let decoded;
    let entries: &Map<String, Value> = match session_data {
        Value::Object(map) => map,
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => {
                decoded = map;
                &decoded
            }
            Ok(_) => {
                tracing::warn!("Ignoring session metadata: not an object");
                return HashMap::new();
            }
            Err(e) => {
                tracing::warn!("Ignoring undecodable session metadata: {}", e);
                return HashMap::new();
            }
        },
        _ => return HashMap::new(),
    };

    entries
        .iter()
        .map(|(id, session)| {
            let key = format!("session{}", id);
            let name = session
                .get("name")
                .and_then(display_name)
                .unwrap_or_else(|| key.clone());
            (key, name)
        })
        .collect()
}

/// Empty strings, zero, false and null count as "no name".
fn display_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
