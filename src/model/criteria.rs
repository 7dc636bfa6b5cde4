//! The `{field: value}` criterion object handed to [`Model::find_one`](super::Model::find_one).

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Equality criteria over named fields. Every pair must match for a record to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    fields: BTreeMap<String, String>,
}

impl Criteria {
    /// A single `{field: value}` criterion.
    pub fn by(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::default().and(field, value)
    }

    pub fn and(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Checks a serialized record against every criterion.
    ///
    /// Raw values are strings straight from the URL, so scalar fields are compared by
    /// their JSON text: a stored `1` matches `"1"`, a stored `true` matches `"true"`.
    pub fn matches(&self, record: &Value) -> bool {
        self.iter().all(|(field, raw)| {
            record
                .get(field)
                .is_some_and(|stored| scalar_matches(stored, raw))
        })
    }
}

fn scalar_matches(stored: &Value, raw: &str) -> bool {
    match stored {
        Value::String(s) => s == raw,
        Value::Number(n) => {
            n.to_string() == raw
                || raw
                    .parse::<f64>()
                    .ok()
                    .zip(n.as_f64())
                    .is_some_and(|(a, b)| a == b)
        }
        Value::Bool(b) => b.to_string() == raw,
        _ => false,
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}: {value:?}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_ids_match_raw_strings() {
        let record = json!({ "_id": 1, "title": "The Lord of the Rings" });
        assert!(Criteria::by("_id", "1").matches(&record));
        assert!(Criteria::by("_id", "1.0").matches(&record));
        assert!(!Criteria::by("_id", "2").matches(&record));
    }

    #[test]
    fn all_fields_must_match() {
        let record = json!({ "_id": 1, "title": "The Lord of the Rings" });
        let criteria = Criteria::by("_id", "1").and("title", "The Lord of the Rings");
        assert!(criteria.matches(&record));
        assert!(!criteria.and("author", "Tolkien").matches(&record));
    }

    #[test]
    fn nested_values_never_match() {
        let record = json!({ "tags": ["fantasy"] });
        assert!(!Criteria::by("tags", "fantasy").matches(&record));
    }

    #[test]
    fn display_reads_like_a_query_object() {
        let criteria = Criteria::by("title", "The Hobbit");
        assert_eq!(criteria.to_string(), r#"{title: "The Hobbit"}"#);
    }

    #[test]
    fn later_value_for_a_field_replaces_the_earlier_one() {
        let criteria = Criteria::by("_id", "1").and("title", "Dune").and("_id", "2");
        assert_eq!(criteria.get("_id"), Some("2"));
        assert_eq!(criteria.get("author"), None);
        assert_eq!(
            criteria.iter().collect::<Vec<_>>(),
            vec![("_id", "2"), ("title", "Dune")]
        );
    }
}
