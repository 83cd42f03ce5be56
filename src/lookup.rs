//! Safe access into schema-variable Jira JSON.
//!
//! Paths are dot-separated segments. A segment indexes an object by key, or an
//! array by position when it parses as a number. Any missing segment, and any
//! `null` along the way, yields `None`.

use serde_json::Value;

pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
        .filter(|found| !found.is_null())
}

pub fn lookup_str<'a>(value: &'a Value, path: &str) -> Option<&'a str> {
    lookup(value, path).and_then(Value::as_str)
}

pub fn lookup_string(value: &Value, path: &str) -> Option<String> {
    lookup_str(value, path).map(str::to_string)
}

pub fn lookup_string_or(value: &Value, path: &str, default: &str) -> String {
    lookup_str(value, path).unwrap_or(default).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn walks_nested_objects() {
        let issue = json!({"fields": {"status": {"name": "Open"}}});
        assert_eq!(lookup_str(&issue, "fields.status.name"), Some("Open"));
    }

    #[test]
    fn missing_intermediate_segment_is_none() {
        let issue = json!({"fields": {}});
        assert_eq!(lookup(&issue, "fields.customfield_10319.value"), None);
        assert_eq!(lookup(&issue, "nope.at.all"), None);
    }

    #[test]
    fn null_counts_as_missing() {
        let issue = json!({"fields": {"customfield_10319": null}});
        assert_eq!(lookup(&issue, "fields.customfield_10319"), None);
        assert_eq!(
            lookup_string_or(&issue, "fields.customfield_10319.value", "undetermined"),
            "undetermined"
        );
    }

    #[test]
    fn numeric_segments_index_arrays() {
        let issue = json!({"fields": {"components": [{"name": "db"}, {"name": "web"}]}});
        assert_eq!(lookup_str(&issue, "fields.components.1.name"), Some("web"));
        assert_eq!(lookup_str(&issue, "fields.components.5.name"), None);
    }

    #[test]
    fn non_string_leaf_is_not_a_string() {
        let issue = json!({"fields": {"count": 3}});
        assert!(lookup(&issue, "fields.count").is_some());
        assert_eq!(lookup_string(&issue, "fields.count"), None);
    }
}
