//! Kits file discovery.
//!
//! The discovery order is:
//! 1. `KITBOX_KITS_FILE` environment variable (path to the file itself).
//! 2. `KITBOX_HOME` environment variable, joined with `kits.json`.
//! 3. `~/.kitbox/kits.json`
//! 4. `kits.json` in the working directory when no home is known.

use std::path::PathBuf;

/// Env var naming the kits file directly.
pub const KITS_FILE_ENV: &str = "KITBOX_KITS_FILE";

/// Env var naming the kitbox home directory.
pub const HOME_ENV: &str = "KITBOX_HOME";

/// Directory under the user's home holding kitbox state.
pub const DOT_DIR: &str = ".kitbox";

/// File name of the enablement document.
pub const KITS_FILE_NAME: &str = "kits.json";

/// Resolve the kits file path.
///
/// Unlike config discovery this never checks existence: the file is
/// created on first enable, so the preferred location is always returned.
pub fn discover_kits_path(
    env: &dyn super::env::Environment,
    home_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(file) = env.get_var(KITS_FILE_ENV) {
        tracing::debug!(path = %file, "kits file from {KITS_FILE_ENV}");
        return PathBuf::from(file);
    }

    if let Some(home) = env.get_var(HOME_ENV) {
        return PathBuf::from(home).join(KITS_FILE_NAME);
    }

    match home_dir {
        Some(home) => home.join(DOT_DIR).join(KITS_FILE_NAME),
        None => {
            tracing::warn!("no home directory, using ./{KITS_FILE_NAME}");
            PathBuf::from(KITS_FILE_NAME)
        }
    }
}
