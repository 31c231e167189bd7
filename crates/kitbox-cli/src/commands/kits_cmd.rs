//! `kit list | show | enable | disable` -- inspect and toggle kits.
//!
//! # Examples
//!
//! ```text
//! kit list
//! kit show memkit
//! kit enable memkit
//! kit disable memkit
//! ```

use comfy_table::{Table, presets::UTF8_FULL};

use kitbox_core::KitRegistry;
use kitbox_types::KitError;

/// Print every known kit in a table.
pub fn kits_list(registry: &KitRegistry) {
    let statuses = registry.list_status();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["ID", "NAME", "VERSION", "ENABLED", "COMMANDS"]);
    for status in &statuses {
        let kit = &status.kit;
        let commands = kit
            .command_names()
            .iter()
            .map(|n| format!("/{n}"))
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row([
            kit.id(),
            kit.name(),
            kit.version(),
            if status.enabled { "yes" } else { "no" },
            commands.as_str(),
        ]);
    }
    println!("{table}");

    let pending = registry.pending_ids();
    if !pending.is_empty() {
        println!("  Enabled but not installed: {}", pending.join(", "));
    }
    if let Some(path) = registry.store_location() {
        println!("  Kits file: {}", path.display());
    }
}

/// Print details of one kit.
pub fn kits_show(registry: &KitRegistry, id: &str) -> anyhow::Result<()> {
    let kit = registry.get_kit(id)?;
    let enabled = registry.is_enabled(id);

    println!("{} ({})", kit.name(), kit.id());
    println!("  Version:     {}", kit.version());
    println!("  Enabled:     {}", if enabled { "yes" } else { "no" });
    if !kit.description().is_empty() {
        println!("  Description: {}", kit.description());
    }
    println!("  Commands:");
    for cmd in kit.commands() {
        println!("    /{:<16} {}", cmd.name(), cmd.description());
    }
    Ok(())
}

/// Enable a kit and persist the change.
pub async fn kits_enable(registry: &KitRegistry, id: &str) -> anyhow::Result<()> {
    let was_enabled = registry.is_enabled(id);
    report(registry.enable(id).await)?;
    if was_enabled {
        println!("Kit '{id}' is already enabled.");
    } else {
        println!("Enabled kit '{id}'.");
    }
    Ok(())
}

/// Disable a kit and persist the change.
pub async fn kits_disable(registry: &KitRegistry, id: &str) -> anyhow::Result<()> {
    let was_enabled = registry.is_enabled(id);
    report(registry.disable(id).await)?;
    if was_enabled {
        println!("Disabled kit '{id}'.");
    } else {
        println!("Kit '{id}' is already disabled.");
    }
    Ok(())
}

fn report(result: Result<(), KitError>) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_persistence() => {
            eprintln!("warning: change applies to this session only");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::open_registry;

    #[tokio::test]
    async fn enable_then_disable_updates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kits.json");
        let registry = open_registry(path.to_str()).await.unwrap();

        kits_enable(&registry, "textkit").await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("textkit"), "got: {raw}");

        kits_disable(&registry, "textkit").await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("textkit"), "got: {raw}");
    }

    #[tokio::test]
    async fn unknown_kit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let registry = open_registry(dir.path().join("kits.json").to_str())
            .await
            .unwrap();

        assert!(kits_show(&registry, "ghost").is_err());
        assert!(kits_enable(&registry, "ghost").await.is_err());
        assert!(kits_disable(&registry, "ghost").await.is_err());
        assert!(kits_show(&registry, "memkit").is_ok());
    }

    #[tokio::test]
    async fn unwritable_kits_file_fails_but_applies_for_session() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the kits file's parent directory should be.
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let registry = open_registry(blocker.join("kits.json").to_str())
            .await
            .unwrap();

        let err = kits_enable(&registry, "textkit").await.unwrap_err();
        assert!(
            err.downcast_ref::<KitError>()
                .is_some_and(KitError::is_persistence),
            "got: {err:#}"
        );
        assert!(registry.is_enabled("textkit"));

        let err = kits_disable(&registry, "textkit").await.unwrap_err();
        assert!(
            err.downcast_ref::<KitError>()
                .is_some_and(KitError::is_persistence),
            "got: {err:#}"
        );
        assert!(!registry.is_enabled("textkit"));
        assert!(!registry.commands().read().has("upper"));
    }
}
