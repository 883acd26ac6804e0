//! Query-string encoding with dotted keys for nested values.
//!
//! Objects flatten to `parent.child`, arrays to `parent[index]`. Null values
//! are dropped, so optional fields that are unset never reach the URL.

use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

/// Serializes query options into a key/value mapping.
///
/// Unit and `null` serialize to an empty mapping.
pub(crate) fn to_query_map<Q>(params: &Q) -> Result<Map<String, Value>>
where
    Q: Serialize + ?Sized,
{
    match serde_json::to_value(params).map_err(|e| Error::InvalidQuery(e.to_string()))? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(Error::InvalidQuery(format!(
            "expected a mapping of parameters, got {}",
            other
        ))),
    }
}

/// Flattens `(key, value)` entries into encoded-ready string pairs.
pub(crate) fn flatten<'a, I>(entries: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let mut pairs = Vec::new();
    for (key, value) in entries {
        flatten_value(key.clone(), value, &mut pairs);
    }
    pairs
}

fn flatten_value(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key, b.to_string())),
        Value::Number(n) => out.push((key, n.to_string())),
        Value::String(s) => out.push((key, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(format!("{}[{}]", key, index), item, out);
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                flatten_value(format!("{}.{}", key, field), item, out);
            }
        }
    }
}

/// Merges the URL's existing query parameters with `query` and writes the
/// result back as the URL's query string.
///
/// A key in `query` replaces an existing parameter of the same name.
pub(crate) fn apply(url: &mut Url, query: &Map<String, Value>) {
    let mut merged: Vec<(String, Value)> = Vec::new();
    let existing = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect::<Vec<_>>();

    for (key, value) in existing.into_iter().chain(query.clone()) {
        match merged.iter_mut().find(|slot| slot.0 == key) {
            Some(slot) => slot.1 = value,
            None => merged.push((key, value)),
        }
    }

    let pairs = flatten(merged.iter().map(|(k, v)| (k, v)));
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn nested_objects_use_dotted_keys() {
        let query = map(json!({
            "bbox": {"north": 52.52, "west": 13.37, "south": 52.5, "east": 13.42}
        }));
        let mut pairs = flatten(&query);
        pairs.sort();

        assert_eq!(
            pairs,
            vec![
                ("bbox.east".to_string(), "13.42".to_string()),
                ("bbox.north".to_string(), "52.52".to_string()),
                ("bbox.south".to_string(), "52.5".to_string()),
                ("bbox.west".to_string(), "13.37".to_string()),
            ]
        );
    }

    #[test]
    fn nulls_are_omitted() {
        let query = map(json!({"when": null, "duration": 10, "to": {"id": null, "name": "x"}}));
        let mut pairs = flatten(&query);
        pairs.sort();

        assert_eq!(
            pairs,
            vec![
                ("duration".to_string(), "10".to_string()),
                ("to.name".to_string(), "x".to_string()),
            ]
        );
    }

    #[test]
    fn arrays_use_indices() {
        let query = map(json!({"products": ["bus", "tram"]}));
        assert_eq!(
            flatten(&query),
            vec![
                ("products[0]".to_string(), "bus".to_string()),
                ("products[1]".to_string(), "tram".to_string()),
            ]
        );
    }

    #[test]
    fn supplied_values_replace_existing_ones() {
        let mut url = Url::parse("https://example.org/locations?query=old&lang=de").unwrap();
        apply(&mut url, &map(json!({"query": "new", "results": 5})));

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("query".to_string(), "new".to_string()),
                ("lang".to_string(), "de".to_string()),
                ("results".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn empty_query_leaves_no_question_mark() {
        let mut url = Url::parse("https://example.org/remarks").unwrap();
        apply(&mut url, &Map::new());
        assert_eq!(url.as_str(), "https://example.org/remarks");
    }

    #[test]
    fn values_are_form_encoded() {
        let mut url = Url::parse("https://example.org/locations").unwrap();
        apply(&mut url, &map(json!({"query": "Berlin Hbf&more"})));
        assert_eq!(url.query(), Some("query=Berlin+Hbf%26more"));
    }
}
