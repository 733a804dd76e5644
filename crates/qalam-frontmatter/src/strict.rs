//! YAML-backed parser used by the manifest builder.

use serde_yaml::Value as Yaml;

use crate::{FrontMatter, FrontMatterError, Value};

pub(crate) fn parse_header(header: &str) -> Result<FrontMatter, FrontMatterError> {
    let mut meta = FrontMatter::new();
    if header.trim().is_empty() {
        return Ok(meta);
    }

    let mapping = match serde_yaml::from_str::<Yaml>(header)? {
        Yaml::Null => return Ok(meta),
        Yaml::Mapping(mapping) => mapping,
        _ => return Err(FrontMatterError::NotAMapping),
    };

    for (key, value) in mapping {
        let Some(key) = scalar_to_string(&key) else {
            return Err(FrontMatterError::InvalidKey);
        };
        if let Some(value) = convert_value(value) {
            meta.insert(key, value);
        }
    }
    Ok(meta)
}

/// Convert a top-level YAML value.
///
/// `null`, nested mappings and lists holding non-scalars yield `None`.
fn convert_value(value: Yaml) -> Option<Value> {
    match value {
        Yaml::Null | Yaml::Mapping(_) => None,
        Yaml::Sequence(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(scalar_to_string)
            .collect::<Option<Vec<_>>>()
            .map(Value::List),
        Yaml::Tagged(tagged) => convert_value(tagged.value),
        other => scalar_to_string(&other).map(Value::String),
    }
}

fn scalar_to_string(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        Yaml::Tagged(tagged) => scalar_to_string(&tagged.value),
        Yaml::Null | Yaml::Sequence(_) | Yaml::Mapping(_) => None,
    }
}
