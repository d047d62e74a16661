//! YAML documents.

use propcheck_core::{
    LoadError, LoadResult, LoaderStrategy, PropertySet, PropertyValue, RawSource,
};
use propcheck_macros::register_strategy;
use serde::Deserialize;
use serde_yaml::Value;
use tracing::trace;

use crate::document_name;

/// Key used for a document whose root is a bare scalar.
const SCALAR_DOCUMENT_KEY: &str = "document";

/// Strategy for `.yml` and `.yaml` files.
///
/// Each `---` separated document becomes its own property set. Nested
/// mappings are flattened into dotted keys (`server.port`) and sequences
/// into indexed keys (`hosts[0]`). A key with no value keeps a null value,
/// which the audit reports as empty.
///
/// Merge keys (`<<: *anchor`) are resolved before flattening. A mapping key
/// that itself contains `.`, `[` or `]` is kept whole in brackets, so
/// `"a.b": 1` becomes `[a.b]` and never collides with `a: {b: 1}`.
///
/// Any syntax error fails the whole file, including documents that parsed
/// before it.
#[register_strategy]
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlStrategy;

impl LoaderStrategy for YamlStrategy {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn file_extensions(&self) -> &[&str] {
        &["yml", "yaml"]
    }

    fn parse(&self, name: &str, source: RawSource<'_>) -> LoadResult<Vec<PropertySet>> {
        let content = source.text(name)?;

        let mut documents = Vec::new();
        for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
            let mut value = Value::deserialize(document)
                .map(untag)
                .map_err(|e| LoadError::parse(name, format!("document #{index}: {e}")))?;
            value
                .apply_merge()
                .map_err(|e| LoadError::parse(name, format!("document #{index}: {e}")))?;
            if value.is_null() {
                trace!(name, index, "Skipping empty YAML document");
                continue;
            }

            let mut entries = Vec::new();
            match value {
                Value::Mapping(_) | Value::Sequence(_) => {
                    flatten(String::new(), value, &mut entries)
                        .map_err(|e| LoadError::parse(name, format!("document #{index}: {e}")))?;
                }
                scalar => entries.push((SCALAR_DOCUMENT_KEY.to_string(), scalar_value(scalar))),
            }
            if !entries.is_empty() {
                documents.push(entries);
            }
        }

        let total = documents.len();
        Ok(documents
            .into_iter()
            .enumerate()
            .map(|(i, entries)| PropertySet::from_entries(document_name(name, i, total), entries))
            .collect())
    }
}

// ============================================================================
// Flattening
// ============================================================================

fn flatten(
    prefix: String,
    value: Value,
    out: &mut Vec<(String, PropertyValue)>,
) -> Result<(), String> {
    match value {
        Value::Mapping(mapping) => {
            if mapping.is_empty() && !prefix.is_empty() {
                out.push((prefix, PropertyValue::from("")));
                return Ok(());
            }
            for (key, child) in mapping {
                let key = key_string(key)?;
                let path = if key.contains(['.', '[', ']']) {
                    format!("{prefix}[{key}]")
                } else if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(path, child, out)?;
            }
        }
        Value::Sequence(items) => {
            if items.is_empty() && !prefix.is_empty() {
                out.push((prefix, PropertyValue::from("")));
                return Ok(());
            }
            for (i, child) in items.into_iter().enumerate() {
                flatten(format!("{prefix}[{i}]"), child, out)?;
            }
        }
        Value::Tagged(tagged) => flatten(prefix, tagged.value, out)?,
        scalar => out.push((prefix, scalar_value(scalar))),
    }
    Ok(())
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn key_string(key: Value) -> Result<String, String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => key_string(tagged.value),
        Value::Mapping(_) | Value::Sequence(_) => {
            Err("mapping keys must be scalars".to_string())
        }
    }
}

fn scalar_value(value: Value) -> PropertyValue {
    match value {
        Value::Null => PropertyValue::Null,
        Value::Bool(b) => PropertyValue::Bool(b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => PropertyValue::Integer(i),
            (None, Some(f)) if n.is_f64() => PropertyValue::Float(f),
            _ => PropertyValue::String(n.to_string()),
        },
        Value::String(s) => PropertyValue::String(s),
        Value::Tagged(tagged) => scalar_value(tagged.value),
        // Collections are flattened before they get here.
        other => PropertyValue::String(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propcheck_core::{CollectingSink, MemoryResource};

    fn parse(content: &str) -> LoadResult<Vec<PropertySet>> {
        YamlStrategy.parse("app", RawSource::new(Some("app.yml"), content.as_bytes()))
    }

    #[test]
    fn test_nested_mapping_is_flattened() {
        let sets = parse("server:\n  port: 8080\n  host: localhost\n  ssl:\n    enabled: true\n")
            .unwrap();
        assert_eq!(sets.len(), 1);

        let set = &sets[0];
        assert_eq!(set.name(), "app");
        let keys: Vec<_> = set.keys().collect();
        assert_eq!(keys, vec!["server.port", "server.host", "server.ssl.enabled"]);
        assert_eq!(set.get("server.port"), Some(&PropertyValue::Integer(8080)));
        assert_eq!(set.get("server.ssl.enabled"), Some(&PropertyValue::Bool(true)));
    }

    #[test]
    fn test_sequences_and_empty_collections() {
        let sets = parse("hosts:\n  - a\n  - b\nratio: 0.5\nnone: []\nnested: {}\n").unwrap();
        let set = &sets[0];

        assert_eq!(set.get("hosts[0]"), Some(&PropertyValue::from("a")));
        assert_eq!(set.get("hosts[1]"), Some(&PropertyValue::from("b")));
        assert_eq!(set.get("ratio"), Some(&PropertyValue::Float(0.5)));
        assert_eq!(set.get("none"), Some(&PropertyValue::from("")));
        assert_eq!(set.get("nested"), Some(&PropertyValue::from("")));
    }

    #[test]
    fn test_documents_are_audited_independently() {
        let sink = CollectingSink::new();
        let resource = MemoryResource::new("app.yml", "a: ''\n---\nb: 1\nc:\n");

        let sets = YamlStrategy
            .load_property_source("app", &resource, &sink)
            .unwrap();

        let names: Vec<_> = sets.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["app (document #0)", "app (document #1)"]);

        let findings = sink.findings();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].source_name, "app (document #0)");
        assert_eq!(findings[0].key, "a");
        assert_eq!(findings[1].source_name, "app (document #1)");
        assert_eq!(findings[1].key, "c");
    }

    #[test]
    fn test_merge_keys() {
        let sets =
            parse("base: &b {host: h, pass: ''}\nprod: {<<: *b, port: 1, host: p}\n").unwrap();
        let set = &sets[0];

        assert!(set.keys().all(|k| !k.contains("<<")));
        assert_eq!(set.get("prod.host"), Some(&PropertyValue::from("p")));
        assert_eq!(set.get("prod.port"), Some(&PropertyValue::Integer(1)));

        let sink = CollectingSink::new();
        let resource = MemoryResource::new("app.yml", "base: &b {pass: ''}\nprod:\n  <<: *b\n");
        YamlStrategy
            .load_property_source("app", &resource, &sink)
            .unwrap();
        let keys: Vec<_> = sink.findings().into_iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["base.pass", "prod.pass"]);
    }

    #[test]
    fn test_keys_with_separators_are_bracketed() {
        let sets = parse("\"a.b\": 1\na:\n  b: 2\n  \"x[0]\": 3\n").unwrap();
        let set = &sets[0];

        assert_eq!(set.len(), 3);
        assert_eq!(set.get("[a.b]"), Some(&PropertyValue::Integer(1)));
        assert_eq!(set.get("a.b"), Some(&PropertyValue::Integer(2)));
        assert_eq!(set.get("a[x[0]]"), Some(&PropertyValue::Integer(3)));
    }

    #[test]
    fn test_null_documents_are_skipped() {
        let sets = parse("---\n---\na: 1\n").unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name(), "app");
    }

    #[test]
    fn test_scalar_document() {
        let sets = parse("just text\n").unwrap();
        assert_eq!(sets[0].get("document"), Some(&PropertyValue::from("just text")));
    }

    #[test]
    fn test_non_string_keys() {
        let sets = parse("8080: http\ntrue: yes\n").unwrap();
        assert_eq!(sets[0].get("8080"), Some(&PropertyValue::from("http")));
        assert_eq!(sets[0].get("true"), Some(&PropertyValue::from("yes")));
    }

    #[test]
    fn test_malformed_yaml_yields_nothing() {
        let err = parse("ok: 1\n---\nbad: [unclosed\n").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("app"));
    }

    #[test]
    fn test_non_utf8_is_parse_error() {
        let err = YamlStrategy
            .parse("app", RawSource::new(Some("app.yml"), &[0x61, 0x3a, 0x20, 0xfe]))
            .unwrap_err();
        assert!(err.is_parse());
    }
}
