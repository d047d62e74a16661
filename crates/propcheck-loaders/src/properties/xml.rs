//! XML property lists.
//!
//! ```xml
//! <!DOCTYPE properties SYSTEM "http://java.sun.com/dtd/properties.dtd">
//! <properties>
//!   <comment>optional</comment>
//!   <entry key="db.url">jdbc:h2:mem</entry>
//! </properties>
//! ```

use propcheck_core::{LoadError, LoadResult};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::text::Entries;

const ROOT: &[u8] = b"properties";
const ENTRY: &[u8] = b"entry";

/// Reads every `<entry>` of a property list, in document order.
pub(super) fn parse_entries(name: &str, content: &str) -> LoadResult<Entries> {
    let error = |msg: String| LoadError::parse(name, msg);

    let mut reader = Reader::from_str(content);
    let mut entries = Entries::new();
    let mut current: Option<(String, String)> = None;
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            error(format!(
                "malformed XML at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(e) => {
                depth += 1;
                match e.name().as_ref() {
                    ROOT if depth == 1 => saw_root = true,
                    ENTRY => current = Some((entry_key(&e).map_err(error)?, String::new())),
                    _ => {}
                }
            }
            Event::Empty(e) => match e.name().as_ref() {
                ROOT if depth == 0 => saw_root = true,
                ENTRY => entries.push((entry_key(&e).map_err(error)?, String::new())),
                _ => {}
            },
            Event::Text(t) => {
                if let Some((_, value)) = current.as_mut() {
                    let text = t.unescape().map_err(|e| error(e.to_string()))?;
                    value.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some((_, value)) = current.as_mut() {
                    let bytes = c.into_inner();
                    let text = std::str::from_utf8(&bytes).map_err(|e| error(e.to_string()))?;
                    value.push_str(text);
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if e.name().as_ref() == ENTRY
                    && let Some(entry) = current.take()
                {
                    entries.push(entry);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(error("unexpected end of document".to_string()));
    }
    if !saw_root {
        return Err(error("missing <properties> root element".to_string()));
    }
    Ok(entries)
}

fn entry_key(element: &BytesStart<'_>) -> Result<String, String> {
    let attr = element
        .try_get_attribute("key")
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "<entry> without a key attribute".to_string())?;
    let key = attr.unescape_value().map_err(|e| e.to_string())?;
    Ok(key.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_entries_in_order() {
        let entries = parse_entries(
            "db",
            r#"<properties>
                <comment>ignored</comment>
                <entry key="b">2</entry>
                <entry key="a">one &amp; two</entry>
                <entry key="empty"/>
                <entry key="blank"></entry>
                <entry key="raw"><![CDATA[<x>]]></entry>
            </properties>"#,
        )
        .unwrap();

        assert_eq!(
            entries,
            vec![
                pair("b", "2"),
                pair("a", "one & two"),
                pair("empty", ""),
                pair("blank", ""),
                pair("raw", "<x>"),
            ]
        );
    }

    #[test]
    fn test_entry_without_key() {
        let err = parse_entries("db", "<properties><entry>1</entry></properties>").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("key attribute"));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(parse_entries("db", "<properties><entry key=\"a\">1</properties>").is_err());
        assert!(parse_entries("db", "<properties><entry key=\"a\">1</entry>").is_err());
        assert!(parse_entries("db", "<settings/>").is_err());
    }

    #[test]
    fn test_empty_root() {
        assert!(parse_entries("db", "<properties/>").unwrap().is_empty());
    }
}
