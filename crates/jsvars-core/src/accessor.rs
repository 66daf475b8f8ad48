//! Server-side mirror of the client accessor contract.
//!
//! The JavaScript runtime exposes one overloaded function, `p(key, mutatorOrDefault, default)`,
//! whose behavior switches on whether the second argument is callable. Here the overload
//! is split into named operations over the same storage object:
//!
//! | JavaScript                    | Rust                                   |
//! |-------------------------------|----------------------------------------|
//! | `p(key)`                      | [`Accessor::get`]                      |
//! | `p(key, default)`             | [`Accessor::get_or`]                   |
//! | `p(key, mutator)`             | [`Accessor::get_with`]                 |
//! | `p(key, mutator, default)`    | [`Accessor::get_with_or`]              |
//!
//! [`parse_statements`] reads emitted markup back into a storage object, so a rendered
//! page can be checked without a browser.

use serde_json::{Deserializer, Map, Value};

use crate::error::{Error, Result};

/// Read-only view over a storage object.
#[derive(Debug, Clone, Copy)]
pub struct Accessor<'a> {
    storage: &'a Map<String, Value>,
}

impl<'a> Accessor<'a> {
    pub fn new(storage: &'a Map<String, Value>) -> Self {
        Self { storage }
    }

    /// Resolve a dot-separated property path. `None` when any segment is missing.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        let mut segments = key.split('.');
        let mut value = self.storage.get(segments.next()?)?;
        for segment in segments {
            value = match value {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(value)
    }

    /// The stored value, or `default` when absent.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).cloned().unwrap_or(default)
    }

    /// The stored value passed through `mutator`, or `None` when absent.
    pub fn get_with<T>(&self, key: &str, mutator: impl FnOnce(&'a Value) -> T) -> Option<T> {
        self.get(key).map(mutator)
    }

    /// The stored value passed through `mutator`, or `default` when absent.
    pub fn get_with_or<T>(
        &self,
        key: &str,
        mutator: impl FnOnce(&'a Value) -> T,
        default: T,
    ) -> T {
        self.get_with(key, mutator).unwrap_or(default)
    }
}

/// Collect every `window.<storage>.<key> = <value>;` statement in `markup`.
///
/// Anything between statements (script tags, the runtime source) is skipped. Later
/// statements win over earlier ones for the same key, as they would in the browser.
/// Dotted keys assign into nested objects.
pub fn parse_statements(storage: &str, markup: &str) -> Result<Map<String, Value>> {
    let prefix = format!("window.{storage}.");
    let mut out = Map::new();
    let mut cursor = 0;

    while let Some(found) = markup[cursor..].find(&prefix) {
        let start = cursor + found;
        let key_start = start + prefix.len();
        let rest = &markup[key_start..];

        let Some(eq) = rest.find(" = ") else {
            return Err(malformed(start, "missing ` = `"));
        };
        let key = &rest[..eq];
        if key.is_empty() {
            return Err(malformed(start, "empty key"));
        }

        let value_start = key_start + eq + 3;
        let (value, len) = parse_value(&markup[value_start..], value_start)?;
        let value_end = value_start + len;
        if !markup[value_end..].starts_with(';') {
            return Err(malformed(value_end, "missing `;`"));
        }

        assign(&mut out, key, value);
        cursor = value_end + 1;
    }

    Ok(out)
}

/// Parse the JSON value at the start of `text`, returning it with its length.
fn parse_value(text: &str, offset: usize) -> Result<(Value, usize)> {
    match text.as_bytes().first() {
        // Strings, arrays and objects delimit themselves; `;` may occur inside them.
        Some(b'"' | b'[' | b'{') => {
            let mut stream = Deserializer::from_str(text).into_iter::<Value>();
            match stream.next() {
                Some(Ok(value)) => Ok((value, stream.byte_offset())),
                Some(Err(e)) => Err(malformed(offset, &e.to_string())),
                None => Err(malformed(offset, "missing value")),
            }
        }
        Some(_) => {
            let end = text.find(';').ok_or_else(|| malformed(offset, "missing `;`"))?;
            let value = serde_json::from_str(&text[..end])
                .map_err(|e| malformed(offset, &e.to_string()))?;
            Ok((value, end))
        }
        None => Err(malformed(offset, "missing value")),
    }
}

fn assign(storage: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            storage.insert(key.to_string(), value);
        }
        Some((head, tail)) => {
            let slot = storage
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(inner) = slot {
                assign(inner, tail, value);
            }
        }
    }
}

fn malformed(offset: usize, reason: &str) -> Error {
    Error::MalformedStatement {
        offset,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::Store;
    use serde::Serialize;
    use serde_json::json;

    fn user_storage() -> Map<String, Value> {
        let Value::Object(map) = json!({
            "user": { "firstname": "John", "lastname": "Connor", "age": 15 }
        }) else {
            unreachable!()
        };
        map
    }

    #[test]
    fn test_missing_key() {
        let storage = user_storage();
        let p = Accessor::new(&storage);
        // p('not_exists') -> undefined
        assert!(p.get("not_exists").is_none());
        // p('not_exists', false) -> false
        assert_eq!(p.get_or("not_exists", json!(false)), json!(false));
        // p('not_exists', 'ignored', false) -> false
        assert_eq!(
            p.get_with_or("not_exists", |_| json!("ignored"), json!(false)),
            json!(false)
        );
    }

    #[test]
    fn test_found_key() {
        let storage = user_storage();
        let p = Accessor::new(&storage);
        // p('user') -> the stored object itself
        assert!(std::ptr::eq(p.get("user").unwrap(), &storage["user"]));
        // p('user', u => u.age) -> 15
        assert_eq!(p.get_with("user", |u| u["age"].clone()), Some(json!(15)));
        // p('user', 'not a function', 'ignored') -> the stored object
        assert_eq!(p.get_or("user", json!("ignored")), storage["user"]);
    }

    #[test]
    fn test_nested_path() {
        let storage = user_storage();
        let p = Accessor::new(&storage);
        assert_eq!(p.get("user.age"), Some(&json!(15)));
        assert!(p.get("user.age.years").is_none());
        assert!(p.get("user.middlename").is_none());
    }

    #[test]
    fn test_array_index_path() {
        let Value::Object(storage) = json!({ "tags": ["a", "b"] }) else {
            unreachable!()
        };
        let p = Accessor::new(&storage);
        assert_eq!(p.get("tags.1"), Some(&json!("b")));
        assert!(p.get("tags.2").is_none());
        assert!(p.get("tags.x").is_none());
    }

    #[derive(Serialize)]
    struct User {
        firstname: String,
        age: u32,
        admin: bool,
        homepage: Option<String>,
    }

    #[test]
    fn test_roundtrip_through_rendered_page() {
        let user = User {
            firstname: "Zoë </script>".into(),
            age: 15,
            admin: false,
            homepage: Some("https://example.com/~john".into()),
        };
        let mut store = Store::new(Config::default()).unwrap();
        store.set("user", &user).unwrap();
        store.set("count", &3).unwrap();
        store.set("ratio", &0.25).unwrap();
        store.set("enabled", &true).unwrap();
        store.set("missing", &None::<u8>).unwrap();
        store.set("tags", &["a", "b/c"]).unwrap();

        let html = store.get(true, true).unwrap();
        let parsed = parse_statements("__phptojavascript", &html).unwrap();

        assert_eq!(parsed["user"], serde_json::to_value(&user).unwrap());
        assert_eq!(parsed["count"], json!(3));
        assert_eq!(parsed["ratio"], json!(0.25));
        assert_eq!(parsed["enabled"], json!(true));
        assert_eq!(parsed["missing"], Value::Null);
        assert_eq!(parsed["tags"], json!(["a", "b/c"]));
        assert_eq!(parsed.len(), 6);
    }

    #[test]
    fn test_roundtrip_pretty_printed() {
        let mut config = Config::default();
        config.encode.pretty_print = true;
        let mut store = Store::new(config).unwrap();
        store.set("data", &json!({ "list": [1, { "x": null }] })).unwrap();

        let html = store.get(false, false).unwrap();
        let parsed = parse_statements("__phptojavascript", &html).unwrap();
        assert_eq!(parsed["data"], json!({ "list": [1, { "x": null }] }));
    }

    #[test]
    fn test_parse_later_statement_wins_and_nests() {
        let markup = "window.s.a = 1;window.s.a = 2;window.s.b.c = \"x\";";
        let parsed = parse_statements("s", markup).unwrap();
        assert_eq!(Value::Object(parsed), json!({ "a": 2, "b": { "c": "x" } }));
    }

    #[test]
    fn test_parse_ignores_other_storage() {
        let parsed = parse_statements("s", "window.other.a = 1;").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_json_value() {
        let result = parse_statements("s", "window.s.a = someCall();");
        assert!(matches!(result, Err(Error::MalformedStatement { .. })));
    }

    #[test]
    fn test_parse_rejects_missing_semicolon() {
        let result = parse_statements("s", "window.s.a = 1");
        assert!(matches!(result, Err(Error::MalformedStatement { .. })));
    }
}
