use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::errors::SettingsError;

/// Icon directory shipped with the UI assets
pub const DEFAULT_ICON_DIR: &str = "node_modules/cryptocurrency-icons/svg/color/";

/// Prefix the packaged app places in front of bundled resources
const PACKAGED_PREFIX: &str = "resources/app/";

/// Pick the directory to scan relative to `root`: the configured one if it
/// exists, otherwise the same path under the packaged resources prefix.
pub fn resolve_icon_dir(root: &Path, icon_dir: &Path) -> PathBuf {
    let candidate = root.join(icon_dir);
    if candidate.exists() {
        candidate
    } else {
        let fallback = root.join(PACKAGED_PREFIX).join(icon_dir);
        warn!(
            "Icon directory {} not found, falling back to {}",
            icon_dir.display(),
            fallback.display()
        );
        fallback
    }
}

/// Map each icon file's base name (text before the first '.') to its path,
/// resolving `icon_dir` against the working directory
pub fn build_icon_map(icon_dir: &Path) -> Result<HashMap<String, PathBuf>, SettingsError> {
    build_icon_map_in(Path::new(""), icon_dir)
}

/// Same as [`build_icon_map`] with `icon_dir` taken relative to `root`.
///
/// A missing directory is an error; there is no retry.
pub fn build_icon_map_in(root: &Path, icon_dir: &Path) -> Result<HashMap<String, PathBuf>, SettingsError> {
    let dir = resolve_icon_dir(root, icon_dir);
    let entries = fs::read_dir(&dir).map_err(|source| SettingsError::IconScan {
        path: dir.clone(),
        source,
    })?;

    let mut icon_map = HashMap::new();
    for entry in entries {
        let entry = entry.map_err(|source| SettingsError::IconScan {
            path: dir.clone(),
            source,
        })?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let asset = match file_name.find('.') {
            Some(idx) => file_name[..idx].to_string(),
            None => file_name.clone(),
        };
        icon_map.insert(asset, dir.join(&file_name));
    }

    debug!("Loaded {} icons from {}", icon_map.len(), dir.display());
    Ok(icon_map)
}
