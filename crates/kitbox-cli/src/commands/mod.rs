//! CLI command implementations for `kit`.
//!
//! - [`kits_cmd`] -- `list`, `show`, `enable`, `disable`.
//! - [`run`] -- dispatch a single slash-command line.
//! - [`repl`] -- interactive slash-command session.

pub mod kits_cmd;
pub mod repl;
pub mod run;

use std::sync::Arc;

use kitbox_core::{FileKitStore, KitRegistry, shared_commands};
use kitbox_platform::NativePlatform;
use kitbox_types::CommandOutcome;

/// Open the registry with every bundled kit registered.
///
/// If `kits_file` is provided, enablement is persisted there. Otherwise the
/// location is discovered:
/// 1. `KITBOX_KITS_FILE` env var
/// 2. `$KITBOX_HOME/kits.json`
/// 3. `~/.kitbox/kits.json`
pub async fn open_registry(kits_file: Option<&str>) -> anyhow::Result<KitRegistry> {
    let store = match kits_file {
        Some(path) => FileKitStore::native(path),
        None => FileKitStore::discover(&NativePlatform::new()),
    };
    tracing::debug!(path = %store.path().display(), "using kits file");

    let registry = KitRegistry::open(Arc::new(store), shared_commands()).await;
    registry.register_all(crate::kits::bundled()?)?;
    Ok(registry)
}

/// Print a command outcome. Returns `true` if the session should end.
pub fn print_outcome(outcome: &CommandOutcome) -> bool {
    match outcome {
        CommandOutcome::Continue(Some(text)) => {
            println!("{text}");
            false
        }
        CommandOutcome::Continue(None) => false,
        CommandOutcome::Exit => true,
        CommandOutcome::Error(reason) => {
            eprintln!("error: {reason}");
            false
        }
    }
}

/// Prefix `/` if the user left it off.
pub fn as_slash_line(line: &str) -> String {
    let line = line.trim();
    if line.starts_with('/') {
        line.to_string()
    } else {
        format!("/{line}")
    }
}
