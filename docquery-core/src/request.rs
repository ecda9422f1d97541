//! The decoded query string of an incoming HTTP request.
//!
//! [`RequestQuery`] keeps parameters in arrival order. Web frameworks hand over
//! query strings as maps of strings, sometimes with repeated keys collected into
//! arrays; both shapes decode into a [`RequestQuery`] through `serde`, and
//! already-split pairs can be collected with [`FromIterator`].
//!
//! ```ignore
//! use docquery::request::RequestQuery;
//!
//! let query: RequestQuery = [("name", "amit"), ("limit", "20")].into_iter().collect();
//! assert_eq!(query.get("limit"), Some("20"));
//! ```

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};
use std::fmt;

/// The value of a single query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// A parameter that appeared once.
    Single(String),
    /// A parameter that appeared several times, in arrival order.
    Multiple(Vec<String>),
}

impl QueryValue {
    /// Returns the effective value of the parameter.
    ///
    /// Repeated parameters resolve to their first occurrence, which is what
    /// common query-string parsers do.
    pub fn first(&self) -> Option<&str> {
        match self {
            QueryValue::Single(value) => Some(value),
            QueryValue::Multiple(values) => values.first().map(String::as_str),
        }
    }

    fn append(&mut self, other: QueryValue) {
        let mut values = match std::mem::replace(self, QueryValue::Multiple(Vec::new())) {
            QueryValue::Single(value) => vec![value],
            QueryValue::Multiple(values) => values,
        };

        match other {
            QueryValue::Single(value) => values.push(value),
            QueryValue::Multiple(more) => values.extend(more),
        }

        *self = QueryValue::Multiple(values);
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Multiple(values)
    }
}

/// Ordered, case-sensitive map of query parameters.
///
/// Absent keys mean "not provided". Inserting a key that is already present
/// appends to its values instead of replacing them, so the first occurrence
/// stays the effective one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestQuery {
    params: Vec<(String, QueryValue)>,
}

impl RequestQuery {
    /// Creates an empty request query.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Adds a parameter, merging it with an earlier occurrence of the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();

        match self.params.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, existing)) => existing.append(value),
            None => self.params.push((key, value)),
        }
    }

    /// Returns the raw value stored for `key`.
    pub fn value(&self, key: &str) -> Option<&QueryValue> {
        self.params
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Returns the effective string value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(QueryValue::first)
    }

    /// Returns `true` if `key` was provided.
    pub fn contains_key(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Iterates over the parameters in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.params.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of distinct parameter names.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestQuery
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = RequestQuery::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

impl<'de> Deserialize<'de> for RequestQuery {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RequestQueryVisitor;

        impl<'de> Visitor<'de> for RequestQueryVisitor {
            type Value = RequestQuery;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of query parameters with string values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut query = RequestQuery::new();
                while let Some((key, value)) = map.next_entry::<String, QueryValue>()? {
                    query.insert(key, value);
                }
                Ok(query)
            }
        }

        deserializer.deserialize_map(RequestQueryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let query: RequestQuery = [("city", "pune"), ("name", "amit"), ("city", "goa")]
            .into_iter()
            .collect();

        assert_eq!(query.len(), 2);
        assert_eq!(query.get("city"), Some("pune"));
        assert_eq!(
            query.value("city"),
            Some(&QueryValue::Multiple(vec!["pune".to_string(), "goa".to_string()]))
        );
    }

    #[test]
    fn keys_are_case_sensitive() {
        let query: RequestQuery = [("Limit", "5")].into_iter().collect();

        assert!(query.contains_key("Limit"));
        assert!(!query.contains_key("limit"));
        assert_eq!(query.get("limit"), None);
    }

    #[test]
    fn iteration_follows_arrival_order() {
        let query: RequestQuery = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();

        let keys: Vec<&str> = query.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn deserializes_strings_and_arrays() {
        let query: RequestQuery = serde_json::from_value(json!({
            "name": "amit",
            "tag": ["first", "second"],
        }))
        .unwrap();

        assert_eq!(query.get("name"), Some("amit"));
        assert_eq!(query.get("tag"), Some("first"));
    }

    #[test]
    fn empty_array_has_no_effective_value() {
        let query: RequestQuery = serde_json::from_value(json!({ "tag": [] })).unwrap();

        assert!(query.contains_key("tag"));
        assert_eq!(query.get("tag"), None);
    }

    #[test]
    fn rejects_non_string_values() {
        let result = serde_json::from_value::<RequestQuery>(json!({ "limit": 20 }));

        assert!(result.is_err());
    }
}
