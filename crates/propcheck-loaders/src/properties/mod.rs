//! Key/value properties files and XML property lists.

mod text;
mod xml;

use propcheck_core::{LoadResult, LoaderStrategy, PropertySet, RawSource};
use propcheck_macros::register_strategy;
use tracing::trace;

use crate::document_name;

/// Strategy for `.properties` files and XML property lists.
///
/// Files whose name ends in `.xml` are read as
/// `<properties><entry key="…">…</entry></properties>` documents; everything
/// else is read line by line. A line-oriented file may hold several documents
/// separated by `#---` (or `!---`) lines, each becoming its own property set.
///
/// All values are strings. A key without a value, or without a separator at
/// all, is loaded with an empty string so the audit can flag it.
#[register_strategy]
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesStrategy;

impl LoaderStrategy for PropertiesStrategy {
    fn name(&self) -> &'static str {
        "properties"
    }

    fn file_extensions(&self) -> &[&str] {
        &["properties", "xml"]
    }

    fn parse(&self, name: &str, source: RawSource<'_>) -> LoadResult<Vec<PropertySet>> {
        let content = source.text(name)?;

        let documents = if source.has_extension("xml") {
            trace!(name, "Reading XML property list");
            vec![xml::parse_entries(name, content)?]
        } else {
            text::parse_documents(name, content)?
        };

        let documents: Vec<_> = documents.into_iter().filter(|d| !d.is_empty()).collect();
        let total = documents.len();
        Ok(documents
            .into_iter()
            .enumerate()
            .map(|(i, entries)| PropertySet::from_entries(document_name(name, i, total), entries))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propcheck_core::{CollectingSink, MemoryResource, PropertyValue};

    fn parse(file_name: &str, content: &str) -> LoadResult<Vec<PropertySet>> {
        PropertiesStrategy.parse("test", RawSource::new(Some(file_name), content.as_bytes()))
    }

    #[test]
    fn test_missing_value_is_loaded_as_empty() {
        let sink = CollectingSink::new();
        let resource = MemoryResource::new("application.properties", "name=\nage=30\n");

        let sets = PropertiesStrategy
            .load_property_source("application", &resource, &sink)
            .unwrap();

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name(), "application");
        assert_eq!(sets[0].get("name"), Some(&PropertyValue::from("")));
        assert_eq!(sets[0].get("age"), Some(&PropertyValue::from("30")));

        let findings = sink.findings();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].key, "name");
    }

    #[test]
    fn test_multi_document_naming() {
        let sets = parse("app.properties", "a=1\n#---\nb=2\n").unwrap();
        let names: Vec<_> = sets.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["test (document #0)", "test (document #1)"]);
    }

    #[test]
    fn test_empty_documents_are_dropped() {
        let sets = parse("app.properties", "#---\na=1\n#---\n# nothing here\n").unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name(), "test");

        assert!(parse("app.properties", "# only comments\n").unwrap().is_empty());
    }

    #[test]
    fn test_xml_routing() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE properties SYSTEM "http://java.sun.com/dtd/properties.dtd">
<properties>
  <comment>sample</comment>
  <entry key="url">jdbc:h2:mem</entry>
  <entry key="password"></entry>
</properties>"#;
        let sets = parse("db.xml", xml).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].get("url"), Some(&PropertyValue::from("jdbc:h2:mem")));
        assert_eq!(sets[0].get("password"), Some(&PropertyValue::from("")));
    }

    #[test]
    fn test_non_utf8_is_parse_error() {
        let err = PropertiesStrategy
            .parse("test", RawSource::new(Some("a.properties"), &[0x61, 0x3d, 0xff]))
            .unwrap_err();
        assert!(err.is_parse());
    }
}
