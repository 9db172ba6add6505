//! Attribute value entity mapping
//!
//! Decoding runs once when a value is parsed, encoding once when it is serialized. The
//! tables are applied in order with plain substring replacement.
//!
//! NOTE: `&#39;` decodes to a backslash, not an apostrophe. Templates already migrated
//! with this mapping depend on it, so it is kept as is.

const ENTITIES_TO_TEXT: &[(&str, &str)] = &[("&#34;", "\""), ("&quot;", "\""), ("&#39;", "\\")];

const TEXT_TO_ENTITIES: &[(&str, &str)] = &[("\"", "&quot;")];

pub fn decode(value: &str) -> String {
    replace_all(value, ENTITIES_TO_TEXT)
}

pub fn encode(value: &str) -> String {
    replace_all(value, TEXT_TO_ENTITIES)
}

fn replace_all(value: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .fold(value.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_quotes() {
        assert_eq!(decode("say &quot;hi&quot;"), "say \"hi\"");
        assert_eq!(decode("say &#34;hi&#34;"), "say \"hi\"");
    }

    #[test]
    fn test_decode_numeric_apostrophe_to_backslash() {
        assert_eq!(decode("it&#39;s"), "it\\s");
    }

    #[test]
    fn test_encode_only_touches_double_quotes() {
        assert_eq!(encode("a \"b\" 'c' \\d"), "a &quot;b&quot; 'c' \\d");
    }

    #[test]
    fn test_unrelated_entities_pass_through() {
        assert_eq!(decode("a &amp; b &lt;"), "a &amp; b &lt;");
        assert_eq!(encode("a &amp; b"), "a &amp; b");
    }
}
