//! The accessor runtime: the JavaScript that defines the global accessor function.

use serde_json::json;
use tracing::debug;

use crate::cache::TemplateCache;
use crate::config::Config;
use crate::error::Result;
use crate::templates::embedded;
use crate::templates::renderer::TemplateRenderer;

/// Render `template` with the given global names.
pub fn render_template(template: &str, function: &str, storage: &str) -> Result<String> {
    let renderer = TemplateRenderer::new();
    let data = json!({
        "function": function,
        "storage": storage,
    });
    renderer.render(template, &data)
}

/// Return the accessor runtime for `config`, going through `cache` when
/// `cache.enabled` is set.
pub fn render(config: &Config, cache: &dyn TemplateCache) -> Result<String> {
    let cache_config = &config.cache;
    if cache_config.enabled {
        if let Some(content) = cache.read(&cache_config.config, &cache_config.key) {
            debug!(key = %cache_config.key, bucket = %cache_config.config, "runtime cache hit");
            return Ok(content);
        }
        debug!(key = %cache_config.key, bucket = %cache_config.config, "runtime cache miss");
    }

    let content = render_template(embedded::ACCESSOR_JS, &config.function, &config.storage)?;

    if cache_config.enabled {
        cache.write(&cache_config.config, &cache_config.key, &content);
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryCache, NoCache};
    use crate::store::Store;
    use serde_json::{json, Value};
    use std::process::Command;

    #[test]
    fn test_render_uses_configured_names() {
        let mut config = Config::default();
        config.function = "js".into();
        config.storage = "appVars".into();
        let out = render(&config, &NoCache).unwrap();
        assert!(out.contains("root.js = function (key)"));
        assert!(out.contains("root.appVars"));
        assert!(!out.contains("__phptojavascript"));
    }

    #[test]
    fn test_cache_disabled_never_writes() {
        let cache = MemoryCache::new();
        render(&Config::default(), &cache).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_enabled_writes_then_serves() {
        let cache = MemoryCache::new();
        let mut config = Config::default();
        config.cache.enabled = true;
        config.cache.key = "runtime".into();
        config.cache.config = "views".into();

        let first = render(&config, &cache).unwrap();
        assert_eq!(cache.read("views", "runtime").as_deref(), Some(first.as_str()));

        // A cached entry is returned as-is, without re-rendering.
        cache.write("views", "runtime", "cached();");
        assert_eq!(render(&config, &cache).unwrap(), "cached();");
    }

    /// Runs the rendered page under node and reports each accessor call as a boolean.
    const ACCESSOR_CHECKS: &str = r#"
var storage = window.__phptojavascript;
var results = {
    missing_is_undefined: typeof p('not_exists') === 'undefined',
    missing_returns_default: p('not_exists', false) === false,
    missing_skips_placeholder: p('not_exists', 'ignored', false) === false,
    missing_skips_null_placeholder: p('not_exists', null, false) === false,
    found_returns_stored_object: p('user') === storage.user,
    found_applies_mutator: p('user', function (u) { return u.age; }) === 15,
    found_ignores_non_function: p('user', 'not a function', 'ignored') === storage.user,
    found_ignores_null_mutator: p('user', null, false) === storage.user,
    nested_path: p('user.age') === 15,
    nested_missing_returns_default: p('user.middlename', 'none') === 'none'
};
process.stdout.write(JSON.stringify(results));
"#;

    #[test]
    fn test_accessor_runtime_under_node() {
        let Ok(node) = which::which("node") else {
            eprintln!("node not found, skipping accessor runtime check");
            return;
        };

        let mut store = Store::new(Config::default()).unwrap();
        store
            .set("user", &json!({ "firstname": "John", "lastname": "Connor", "age": 15 }))
            .unwrap();
        let page = store.get(true, false).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("page.js");
        let source = format!("globalThis.window = globalThis;\n{page}\n{ACCESSOR_CHECKS}");
        std::fs::write(&script, source).unwrap();

        let output = Command::new(node).arg(&script).output().unwrap();
        assert!(
            output.status.success(),
            "node failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let results: serde_json::Map<String, Value> =
            serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(results.len(), 10);
        for (check, passed) in &results {
            assert_eq!(passed, &Value::Bool(true), "accessor check failed: {check}");
        }
    }
}
