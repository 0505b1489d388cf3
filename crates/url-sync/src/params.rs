//! Flat parameter map — the parsed form of a URL query string.

use indexmap::IndexMap;
use url::form_urlencoded;
use url::Url;

/// Key-value pairs with dotted-path keys, insertion-ordered.
///
/// Duplicate textual keys collapse to the last occurrence, mirroring
/// standard URL multimap iteration order. The first occurrence keeps its
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatParams {
    entries: IndexMap<String, String>,
}

impl FlatParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a flat map from key/value pairs, last-write-wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (k, v) in pairs {
            params.insert(k, v);
        }
        params
    }

    /// Parses a raw query string, with or without its leading `?`.
    ///
    /// Percent-escapes and `+` are decoded. A bare key with no `=` becomes
    /// an empty-string value.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    /// Extracts the query pairs of an already-parsed URL.
    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether any entry lives at or below `prefix` in dotted-path terms:
    /// the key equals the prefix or extends it past a `.` boundary.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.entries.keys().any(|k| {
            k == prefix
                || (k.len() > prefix.len()
                    && k.starts_with(prefix)
                    && k.as_bytes()[prefix.len()] == b'.')
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reconstitutes a percent-encoded query string, without a leading `?`.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.entries {
            serializer.append_pair(k, v);
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_query_decodes_pairs() {
        let params = FlatParams::from_query("name=Carrot+City&page=2");
        assert_eq!(params.get("name"), Some("Carrot City"));
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn from_query_strips_leading_question_mark() {
        let params = FlatParams::from_query("?id=42");
        assert_eq!(params.get("id"), Some("42"));
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let params = FlatParams::from_query("id=42&id=43");
        assert_eq!(params.get("id"), Some("43"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn bare_key_is_empty_value() {
        let params = FlatParams::from_query("flag&id=1");
        assert_eq!(params.get("flag"), Some(""));
    }

    #[test]
    fn from_url_reads_query_pairs() {
        let url = Url::parse("https://example.com/list?tags.0=a&tags.1=b").unwrap();
        let params = FlatParams::from_url(&url);
        assert_eq!(params.get("tags.0"), Some("a"));
        assert_eq!(params.get("tags.1"), Some("b"));
    }

    #[test]
    fn from_pairs_matches_query_parse() {
        let a = FlatParams::from_pairs([("page", "2"), ("q", "rust")]);
        let b = FlatParams::from_query("page=2&q=rust");
        assert_eq!(a, b);
    }

    #[test]
    fn has_prefix_respects_segment_boundaries() {
        let params = FlatParams::from_query("filter.color=red&filtered=1");
        assert!(params.has_prefix("filter.color"));
        assert!(params.has_prefix("filter"));
        assert!(!params.has_prefix("filt"));
        assert!(!params.has_prefix("filter.col"));
        assert!(params.has_prefix("filtered"));
    }

    #[test]
    fn to_query_percent_encodes() {
        let mut params = FlatParams::new();
        params.insert("q", "a&b=c d");
        let query = params.to_query();
        assert_eq!(query, "q=a%26b%3Dc+d");
        assert_eq!(FlatParams::from_query(&query), params);
    }

    #[test]
    fn to_query_keeps_dotted_keys_verbatim() {
        let mut params = FlatParams::new();
        params.insert("tags.0", "a");
        assert_eq!(params.to_query(), "tags.0=a");
    }

    #[test]
    fn round_trip_preserves_order_and_unicode() {
        let params = FlatParams::from_pairs([("a", "ä"), ("b", "日本"), ("c", "")]);
        let round = FlatParams::from_query(&params.to_query());
        assert_eq!(round, params);
        let keys: Vec<&str> = round.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
