use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::Input;
use serde_json::{json, Map, Value};

use jsvars_core::scaffold::{self, DEFAULT_FILE_NAME, DEFAULT_TARGET_DIR};

use crate::commands::load_config;
use crate::output;

/// Write the accessor runtime to `<dir>/<name>.js`.
///
/// Global names come from the config file, overridden by `--function`/`--storage`.
/// The directory and file name are prompted for when not passed as flags.
pub fn run(
    config_path: &Path,
    function: Option<String>,
    storage: Option<String>,
    dir: Option<PathBuf>,
    name: Option<String>,
    template: Option<&Path>,
) -> Result<()> {
    output::print_header("jsvars generate");

    let mut overrides = Map::new();
    if let Some(function) = function {
        overrides.insert("function".into(), json!(function));
    }
    if let Some(storage) = storage {
        overrides.insert("storage".into(), json!(storage));
    }
    let config = load_config(config_path)?.with_overrides(&Value::Object(overrides))?;

    let dir = match dir {
        Some(dir) => dir,
        None => PathBuf::from(
            Input::<String>::new()
                .with_prompt("Where should the JavaScript file be saved?")
                .default(DEFAULT_TARGET_DIR.to_string())
                .interact_text()?,
        ),
    };
    output::print_step(1, 3, &format!("Target directory: {}", dir.display()));

    let name = match name {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("What should be the file name (without extension)?")
            .default(DEFAULT_FILE_NAME.to_string())
            .interact_text()?,
    };

    output::print_step(2, 3, "Loading template");
    match template {
        Some(path) => output::print_key_value("template", &path.display().to_string()),
        None => output::print_key_value("template", "built-in accessor runtime"),
    }
    output::print_key_value("function", &config.function);
    output::print_key_value("storage", &config.storage);

    let target = scaffold::target_path(&dir, &name)?;
    if target.exists() {
        output::print_warning(&format!("Overwriting {}", target.display()));
    }

    output::print_step(3, 3, "Writing file");
    let path = scaffold::generate(&dir, &name, &config, template)?;

    output::print_success(&format!("File successfully created: {}", path.display()));
    println!();
    println!("  Load it before the rendered variables:");
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("    <script src=\"/js/{file_name}\"></script>");
    println!();

    Ok(())
}
