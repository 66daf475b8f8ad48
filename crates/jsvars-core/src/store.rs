//! Per-render variable store.
//!
//! A [`Store`] is created for one render, filled with [`Store::set`] / [`Store::add`],
//! and flushed once with [`Store::get`]. Values are converted when they are inserted,
//! so the store only ever holds [`Serialized`] JavaScript literals.
//!
//! ```ignore
//! let mut store = Store::new(Config::default())?;
//! store.set("user", &user)?;
//! store.add("locale", "en")?;
//! let html = store.get(true, true)?;
//! // <script>...runtime...window.__phptojavascript.user = {...};...</script>
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use crate::cache::{NoCache, TemplateCache};
use crate::config::Config;
use crate::convert::{self, Serialized};
use crate::error::Result;
use crate::runtime;
use crate::script::script_block;

/// Variables collected during one render, in insertion order.
pub struct Store {
    config: Config,
    cache: Arc<dyn TemplateCache>,
    entries: Vec<(String, Serialized)>,
}

impl Store {
    /// Create a store that renders the runtime on every `get`.
    ///
    /// Fails with [`crate::error::Error::InvalidIdentifier`] when `function` or
    /// `storage` cannot name a JavaScript global.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_cache(config, Arc::new(NoCache))
    }

    /// Create a store whose runtime rendering goes through `cache` when
    /// `cache.enabled` is set.
    pub fn with_cache(config: Config, cache: Arc<dyn TemplateCache>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cache,
            entries: Vec::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert a value with this store's encode options.
    pub fn convert<T: Serialize + ?Sized>(&self, value: &T) -> Result<Serialized> {
        convert::convert(value, &self.config.encode)
    }

    /// Insert or overwrite `key`.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &T) -> Result<()> {
        let key = key.into();
        let serialized = self.convert(value)?;
        trace!(%key, "set");
        match self.position(&key) {
            Some(index) => self.entries[index].1 = serialized,
            None => self.entries.push((key, serialized)),
        }
        Ok(())
    }

    /// [`Store::set`] every pair. Stops at the first value that fails to convert;
    /// pairs before it stay stored.
    pub fn set_many<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        for (key, value) in entries {
            self.set(key, &value)?;
        }
        Ok(())
    }

    /// Insert `key` unless it is already present. Returns whether the value was stored.
    ///
    /// An existing key is left untouched and the new value is not converted.
    pub fn add<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<bool> {
        let key = key.into();
        if self.contains(&key) {
            trace!(%key, "add skipped, key exists");
            return Ok(false);
        }
        let serialized = self.convert(value)?;
        trace!(%key, "add");
        self.entries.push((key, serialized));
        Ok(true)
    }

    /// [`Store::add`] every pair. Returns how many were stored.
    pub fn add_many<I, K, V>(&mut self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        let mut added = 0;
        for (key, value) in entries {
            if self.add(key, &value)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Remove `key`. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(index) => {
                self.entries.remove(index);
                trace!(%key, "remove");
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// The stored literal for `key`.
    pub fn value(&self, key: &str) -> Option<&Serialized> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render one assignment statement without touching the store.
    ///
    /// An empty key renders nothing.
    pub fn put(&self, key: &str, value: &Serialized, with_tags: bool) -> String {
        if key.is_empty() {
            return String::new();
        }
        let statement = format!("window.{}.{} = {};", self.config.storage, key, value);
        if with_tags {
            script_block(&statement, &self.config.script)
        } else {
            statement
        }
    }

    /// Convert `value` and render it with [`Store::put`].
    pub fn put_value<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        with_tags: bool,
    ) -> Result<String> {
        let serialized = self.convert(value)?;
        Ok(self.put(key, &serialized, with_tags))
    }

    /// Render every stored variable, optionally preceded by the accessor runtime.
    ///
    /// Returns an empty string when nothing is stored, whatever the flags.
    pub fn get(&self, include_runtime: bool, with_tags: bool) -> Result<String> {
        if self.entries.is_empty() {
            return Ok(String::new());
        }

        let mut out = if include_runtime {
            runtime::render(&self.config, self.cache.as_ref())?
        } else {
            String::new()
        };
        for (key, value) in &self.entries {
            out.push_str(&self.put(key, value, false));
        }

        Ok(if with_tags {
            script_block(&out, &self.config.script)
        } else {
            out
        })
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}
