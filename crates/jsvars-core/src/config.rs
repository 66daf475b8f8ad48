//! Configuration for the store, the encoder and the accessor runtime.
//!
//! Every section carries `#[serde(default)]`, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! {
//!   "function": "p",
//!   "storage": "__phptojavascript",
//!   "encode": { "unescaped_slashes": true, "depth": 64 },
//!   "cache": { "enabled": true, "key": "__phptojavascript", "config": "default" },
//!   "script": { "nonce": "r4nd0m" }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Default config file name looked up by the CLI.
pub const DEFAULT_CONFIG_FILE: &str = "jsvars.config.json";

/// Default name of the global accessor function.
pub const DEFAULT_FUNCTION: &str = "p";

/// Default name of the global storage object.
pub const DEFAULT_STORAGE: &str = "__phptojavascript";

const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield", "let", "static",
];

/// Top-level configuration passed to [`crate::store::Store::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the global accessor function.
    pub function: String,
    /// Name of the global object holding the variables.
    pub storage: String,
    pub encode: EncodeOptions,
    pub cache: CacheConfig,
    pub script: ScriptConfig,
}

/// JSON encoding switches applied to strings, arrays and objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Indent nested structures.
    pub pretty_print: bool,
    /// Leave `/` as is instead of emitting `\/`.
    pub unescaped_slashes: bool,
    /// Leave non-ASCII characters as is instead of emitting `\uXXXX`.
    pub unescaped_unicode: bool,
    /// Emit `<` and `>` as `\u003C` and `\u003E`.
    pub hex_tag: bool,
    /// Emit `&` as `\u0026`.
    pub hex_amp: bool,
    /// Emit `'` as `\u0027`.
    pub hex_apos: bool,
    /// Maximum nesting of arrays/objects.
    pub depth: usize,
}

/// Caching of the rendered accessor runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Key the rendered runtime is stored under.
    pub key: String,
    /// Cache bucket name.
    pub config: String,
}

/// Attributes of the emitted `<script>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// CSP nonce attribute.
    pub nonce: Option<String>,
    /// Wrap the body in a CDATA section.
    pub safe: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            function: DEFAULT_FUNCTION.into(),
            storage: DEFAULT_STORAGE.into(),
            encode: EncodeOptions::default(),
            cache: CacheConfig::default(),
            script: ScriptConfig::default(),
        }
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty_print: false,
            unescaped_slashes: false,
            unescaped_unicode: false,
            hex_tag: false,
            hex_amp: false,
            hex_apos: false,
            depth: 512,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            key: DEFAULT_STORAGE.into(),
            config: "default".into(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Return a copy with `overrides` deep-merged on top. Keys present in `overrides` win.
    pub fn with_overrides(&self, overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(self).map_err(Error::ConfigOverride)?;
        merge(&mut base, overrides);
        let config: Self = serde_json::from_value(base).map_err(Error::ConfigOverride)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that `function` and `storage` can be used as JavaScript globals.
    pub fn validate(&self) -> Result<()> {
        for (option, value) in [("function", &self.function), ("storage", &self.storage)] {
            if !is_identifier(value) {
                return Err(Error::InvalidIdentifier {
                    option,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Whether `name` is a plain JavaScript identifier that is not a reserved word.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        return false;
    }
    !RESERVED_WORDS.contains(&name)
}

fn merge(base: &mut Value, overrides: &Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}
