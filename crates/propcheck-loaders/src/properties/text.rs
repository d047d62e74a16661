//! Line-oriented `.properties` parsing.
//!
//! Follows the classic format: `#`/`!` comments, `=`/`:`/whitespace
//! separators, backslash line continuations and `\uXXXX` escapes.

use propcheck_core::{LoadError, LoadResult};

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// One document's entries, in file order.
pub(super) type Entries = Vec<(String, String)>;

/// Splits `content` into `#---` separated documents of raw entries.
///
/// The result always holds at least one (possibly empty) document.
pub(super) fn parse_documents(name: &str, content: &str) -> LoadResult<Vec<Entries>> {
    let mut documents: Vec<Entries> = vec![Vec::new()];
    let mut lines = content.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line = raw.trim_start_matches(WHITESPACE);
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') || line.starts_with('!') {
            if &line.trim_end()[1..] == "---" {
                documents.push(Vec::new());
            }
            continue;
        }

        let mut logical = line.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }

        let (key, value) = split_key_value(&logical);
        let at_line = |e: String| LoadError::parse(name, format!("line {}: {e}", index + 1));
        let key = unescape(key).map_err(at_line)?;
        let value = unescape(value).map_err(at_line)?;

        if let Some(document) = documents.last_mut() {
            document.push((key, value));
        }
    }

    Ok(documents)
}

/// An odd number of trailing backslashes continues the line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Splits a logical line at the first unescaped separator.
///
/// A line without separator is a key with an empty value.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], line[i + 1..].trim_start_matches(WHITESPACE)),
            c if WHITESPACE.contains(&c) => {
                let rest = line[i..].trim_start_matches(WHITESPACE);
                let rest = rest
                    .strip_prefix(['=', ':'])
                    .map_or(rest, |r| r.trim_start_matches(WHITESPACE));
                return (&line[..i], rest);
            }
            _ => {}
        }
    }
    (line, "")
}

/// Decodes backslash escapes.
fn unescape(raw: &str) -> Result<String, String> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => out.push(read_unicode(&mut chars)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Reads the `XXXX` of a `\uXXXX` escape, pairing UTF-16 surrogates.
fn read_unicode(chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    let high = read_hex4(chars)?;
    if !(0xD800..=0xDBFF).contains(&high) {
        return char::from_u32(high).ok_or_else(|| format!("invalid \\u{high:04x} escape"));
    }

    let low = match (chars.next(), chars.next()) {
        (Some('\\'), Some('u')) => read_hex4(chars)?,
        _ => return Err(format!("unpaired surrogate \\u{high:04x}")),
    };
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(format!("unpaired surrogate \\u{high:04x}"));
    }
    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(code).ok_or_else(|| format!("invalid surrogate pair \\u{high:04x}\\u{low:04x}"))
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Result<u32, String> {
    let digits: String = chars.take(4).collect();
    if digits.len() != 4 {
        return Err("malformed \\uxxxx encoding".to_string());
    }
    u32::from_str_radix(&digits, 16).map_err(|_| "malformed \\uxxxx encoding".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(content: &str) -> Entries {
        let mut docs = parse_documents("test", content).unwrap();
        assert_eq!(docs.len(), 1);
        docs.remove(0)
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_separators() {
        let entries = single("a=1\nb: 2\nc 3\nd = 4\ne\t:\t5\n");
        assert_eq!(
            entries,
            vec![
                pair("a", "1"),
                pair("b", "2"),
                pair("c", "3"),
                pair("d", "4"),
                pair("e", "5"),
            ]
        );
    }

    #[test]
    fn test_missing_values() {
        let entries = single("name=\nlonely\n  spaced   \n");
        assert_eq!(
            entries,
            vec![pair("name", ""), pair("lonely", ""), pair("spaced", "")]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let entries = single("# comment\n! also comment\n\n   \nkey=value # not a comment\n");
        assert_eq!(entries, vec![pair("key", "value # not a comment")]);
    }

    #[test]
    fn test_continuation_lines() {
        let entries = single("fruits = apple, \\\n         banana\nnext=x\n");
        assert_eq!(entries, vec![pair("fruits", "apple, banana"), pair("next", "x")]);

        let entries = single("path=c:\\\\dir\\\\\n");
        assert_eq!(entries, vec![pair("path", "c:\\dir\\")]);
    }

    #[test]
    fn test_escapes() {
        let entries = single(
            "key\\=with\\:seps=tab\\there\ngreeting=\\u00e9t\\u00e9\nemoji=\\uD83D\\uDE00\n",
        );
        assert_eq!(
            entries,
            vec![
                pair("key=with:seps", "tab\there"),
                pair("greeting", "été"),
                pair("emoji", "😀"),
            ]
        );
    }

    #[test]
    fn test_malformed_unicode_escape() {
        let err = parse_documents("app", "ok=1\nbad=\\u12g4\n").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("line 2"));

        assert!(parse_documents("app", "bad=\\uD83D\n").is_err());
    }

    #[test]
    fn test_document_separators() {
        let docs = parse_documents("app", "a=1\n#---\nb=2\n!---\nc=3\n").unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[2], vec![pair("c", "3")]);

        // Not a separator: trailing content after the dashes.
        let docs = parse_documents("app", "a=1\n#--- x\nb=2\n").unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let entries = single("a=1\r\nb=\r\n");
        assert_eq!(entries, vec![pair("a", "1"), pair("b", "")]);
    }
}
