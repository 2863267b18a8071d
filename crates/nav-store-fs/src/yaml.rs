//! Node property files.
//!
//! Each node directory may contain a YAML mapping. Top-level scalar values
//! become string properties; the `order` key lists child names that are
//! enumerated before the remaining children.

use std::collections::HashMap;

use serde_yaml::Value;

/// Key holding the explicit child order.
const ORDER_KEY: &str = "order";

/// Parsed contents of a node property file.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct NodeMeta {
    pub properties: HashMap<String, String>,
    pub order: Vec<String>,
}

/// Parse a node property file.
///
/// Empty content yields empty metadata. Nested values are ignored.
///
/// # Errors
///
/// Returns an error if the content is not valid YAML or not a mapping.
pub(crate) fn parse_node_meta(content: &str) -> Result<NodeMeta, serde_yaml::Error> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(NodeMeta::default());
    }

    let mapping: serde_yaml::Mapping = serde_yaml::from_str(trimmed)?;
    let mut meta = NodeMeta::default();

    for (key, value) in mapping {
        let Some(key) = key.as_str() else { continue };
        if key == ORDER_KEY {
            if let Value::Sequence(names) = value {
                meta.order = names.iter().filter_map(scalar_to_string).collect();
            }
            continue;
        }
        if let Some(value) = scalar_to_string(&value) {
            meta.properties.insert(key.to_owned(), value);
        }
    }

    Ok(meta)
}

/// Render a scalar YAML value as a string.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
