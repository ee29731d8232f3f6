use std::{collections::BTreeMap, fmt, sync::LazyLock};

use regex::{Regex, RegexBuilder};

static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // header, first blank line, body
    RegexBuilder::new(r"^(.*?)\r?\n\r?\n(.*)$")
        .dot_matches_new_line(true)
        .build()
        .unwrap()
});

static META_LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^meta-([^:\s]+):(.*)$").unwrap());

/// The metadata block of a content file.
///
/// The bare line is stored under `title`, every `meta-<key>: <value>` line
/// under `<key>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Metadata {
    fields: BTreeMap<String, String>,
}

impl Metadata {
    pub fn parse(header: &str) -> Self {
        let mut fields = BTreeMap::new();
        for line in header.lines() {
            if let Some(caps) = META_LINE_PATTERN.captures(line) {
                fields.insert(caps[1].to_string(), caps[2].trim().to_string());
            } else {
                fields.insert("title".to_string(), line.to_string());
            }
        }
        Self { fields }
    }

    /// Value of `key`, or an empty string when the entry does not set it.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    #[cfg(test)]
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = self.fields.get("title") {
            writeln!(f, "{title}")?;
        }
        for (key, value) in self.fields.iter().filter(|(key, _)| *key != "title") {
            writeln!(f, "meta-{key}: {value}")?;
        }
        Ok(())
    }
}

/// Splits a content file at the first blank line. Without one the whole
/// file is the header and the body is empty.
pub(crate) fn split_entry(content: &str) -> (&str, &str) {
    match ENTRY_PATTERN.captures(content) {
        Some(caps) => {
            let header = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            (header, body)
        }
        None => (content, ""),
    }
}

pub(crate) fn parse_entry(content: &str) -> (Metadata, &str) {
    let (header, body) = split_entry(content);
    (Metadata::parse(header), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_entry_reads_title_and_meta_lines() {
        let (meta, body) =
            parse_entry("title line\nmeta-author: Alice\nmeta-tags: a,b\n\nHello **world**");
        assert_eq!(meta.get("title"), "title line");
        assert_eq!(meta.get("author"), "Alice");
        assert_eq!(meta.get("tags"), "a,b");
        assert_eq!(body, "Hello **world**");
    }

    #[test]
    fn missing_keys_read_as_empty() {
        let (meta, _) = parse_entry("only a title\n\nbody");
        assert_eq!(meta.get("description"), "");
        assert_eq!(meta.get("layout"), "");
        assert_eq!(meta.get("format"), "");
    }

    #[test]
    fn without_blank_line_everything_is_metadata() {
        let (meta, body) = parse_entry("A title\nmeta-layout: post\n");
        assert_eq!(meta.get("title"), "A title");
        assert_eq!(meta.get("layout"), "post");
        assert_eq!(body, "");
    }

    #[test]
    fn body_is_kept_verbatim() {
        let body = "<p>one</p>\n\n<p>two</p>\n";
        let content = format!("Title\nmeta-format: html\n\n{body}");
        assert_eq!(split_entry(&content).1, body);
    }

    #[test]
    fn crlf_blank_line_splits_too() {
        let (meta, body) = parse_entry("Title\r\nmeta-author: Bob\r\n\r\nbody\r\n");
        assert_eq!(meta.get("title"), "Title");
        assert_eq!(meta.get("author"), "Bob");
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn last_duplicate_wins() {
        let meta = Metadata::parse("meta-author: first\nFirst title\nmeta-author: second\nSecond title");
        assert_eq!(meta.get("author"), "second");
        assert_eq!(meta.get("title"), "Second title");
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let meta = Metadata::parse("T\nmeta-weather: sunny");
        assert_eq!(meta.get("weather"), "sunny");
        assert_eq!(meta.fields().len(), 2);
    }

    #[test]
    fn values_are_trimmed_and_may_be_empty() {
        let meta = Metadata::parse("meta-description:   spaced out  \nmeta-tags:");
        assert_eq!(meta.get("description"), "spaced out");
        assert_eq!(meta.get("tags"), "");
        assert!(meta.fields().contains_key("tags"));
    }

    #[test]
    fn malformed_meta_line_becomes_title() {
        let meta = Metadata::parse("meta-no colon here");
        assert_eq!(meta.get("title"), "meta-no colon here");
    }

    #[test]
    fn reparsing_serialized_block_is_idempotent() {
        let headers = [
            "title line\nmeta-author: Alice\nmeta-tags: a,b",
            "meta-layout: post\nmeta-format: hatena\nmeta-description:  x ",
            "meta-tags:\nmeta-extra: kept",
            "",
        ];
        for header in headers {
            let first = Metadata::parse(header);
            let second = Metadata::parse(&first.to_string());
            assert_eq!(first, second, "{header:?}");
        }
    }
}
