//! Writing the accessor runtime to a standalone `.js` file.
//!
//! Pages that load the runtime as a static asset call [`crate::store::Store::get`] with
//! `include_runtime = false` and reference the generated file instead.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::runtime;
use crate::templates::embedded;

/// Default directory the CLI proposes for the generated file.
pub const DEFAULT_TARGET_DIR: &str = "webroot/js";

/// Default file name (without extension) the CLI proposes.
pub const DEFAULT_FILE_NAME: &str = "jsvars";

/// Load a template file, or the embedded accessor template when `path` is `None`.
pub fn load_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| Error::TemplateNotFound {
            path: path.to_path_buf(),
            source: e,
        }),
        None => Ok(embedded::ACCESSOR_JS.to_string()),
    }
}

/// Path of the file [`generate`] writes for `file_name` in `dir`.
///
/// A trailing `.js` in `file_name` is accepted and not doubled.
pub fn target_path(dir: &Path, file_name: &str) -> Result<PathBuf> {
    let stem = file_name.strip_suffix(".js").unwrap_or(file_name);
    if stem.is_empty() || stem.contains(['/', '\\']) {
        return Err(Error::InvalidFileName(file_name.to_string()));
    }
    Ok(dir.join(format!("{stem}.js")))
}

/// Render the runtime for `config` and write it to `<dir>/<file_name>.js`.
///
/// Returns the path of the written file. An existing file is overwritten.
pub fn generate(
    dir: &Path,
    file_name: &str,
    config: &Config,
    template: Option<&Path>,
) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(Error::TargetDirMissing(dir.to_path_buf()));
    }
    let path = target_path(dir, file_name)?;
    config.validate()?;

    let template = load_template(template)?;
    debug!(bytes = template.len(), "template loaded");
    let content = runtime::render_template(&template, &config.function, &config.storage)?;

    std::fs::write(&path, content).map_err(|e| Error::WriteFailed {
        path: path.clone(),
        source: e,
    })?;
    info!(path = %path.display(), "runtime written");
    Ok(path)
}
