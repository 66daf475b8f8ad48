use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use jsvars_core::store::Store;

use crate::commands::load_config;

/// Print the script block for the variables in `vars_path`.
///
/// The file must hold a JSON object; each member becomes one variable.
pub fn run(
    config_path: &Path,
    vars_path: &Path,
    include_runtime: bool,
    with_tags: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    let contents = std::fs::read_to_string(vars_path)
        .with_context(|| format!("failed to read {}", vars_path.display()))?;
    let vars: Value = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", vars_path.display()))?;
    let Value::Object(vars) = vars else {
        anyhow::bail!("{} must contain a JSON object", vars_path.display());
    };

    let mut store = Store::new(config)?;
    store.set_many(vars)?;
    tracing::info!(variables = store.len(), "rendering");

    println!("{}", store.get(include_runtime, with_tags)?);
    Ok(())
}
