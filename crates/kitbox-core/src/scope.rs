//! Scoped kit injection.
//!
//! [`with_kit`] runs a computation with the live registry holding *only*
//! one kit's commands, then puts the previous table back. The swap is a
//! total replacement, not an overlay: commands from enabled kits are
//! unreachable for the duration.
//!
//! Restoration lives in [`InjectionGuard`]'s `Drop`, so it runs when the
//! body returns, when it panics, and when the enclosing future is dropped
//! mid-await (cancellation). Nested injections unwind in LIFO order.

use std::future::Future;

use tracing::debug;

use kitbox_types::Kit;

use crate::slash::{CommandTable, SharedCommands};

/// Holds the table that was live before an injection.
///
/// Dropping the guard restores it.
#[must_use = "dropping the guard immediately restores the previous commands"]
pub struct InjectionGuard {
    commands: SharedCommands,
    previous: Option<CommandTable>,
    kit_id: String,
}

impl InjectionGuard {
    /// Id of the injected kit.
    pub fn kit_id(&self) -> &str {
        &self.kit_id
    }

    /// Restore the previous table now.
    pub fn restore(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(previous) = self.previous.take() {
            let restored = previous.len();
            self.commands.write().restore(previous);
            debug!(kit_id = %self.kit_id, restored, "restored command table");
        }
    }
}

impl Drop for InjectionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Replace the live table with `kit`'s commands until the guard drops.
pub fn inject(commands: &SharedCommands, kit: &Kit) -> InjectionGuard {
    let previous = commands
        .write()
        .replace_all(kit.commands().iter().cloned());
    debug!(
        kit_id = %kit.id(),
        injected = kit.commands().len(),
        displaced = previous.len(),
        "injected kit"
    );
    InjectionGuard {
        commands: commands.clone(),
        previous: Some(previous),
        kit_id: kit.id().to_string(),
    }
}

/// Run `body` with only `kit`'s commands dispatchable.
///
/// The body's output (including any error it carries) is returned
/// unchanged after the previous table has been restored. Enablement
/// changes made in the body are not replayed onto the restored table;
/// use [`KitRegistry::with_kit`](crate::KitRegistry::with_kit) for that.
pub async fn with_kit<F, Fut, T>(commands: &SharedCommands, kit: &Kit, body: F) -> T
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let guard = inject(commands, kit);
    let output = body().await;
    guard.restore();
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slash::shared_commands;
    use kitbox_types::{CommandDefinition, CommandOutcome};
    use std::time::Duration;

    fn kit(id: &str, commands: &[&str]) -> Kit {
        let mut builder = Kit::builder(id);
        for name in commands {
            builder = builder.command(CommandDefinition::from_fn(*name, "test", |_| {
                CommandOutcome::done()
            }));
        }
        builder.build().unwrap()
    }

    fn live_with(names: &[&str]) -> SharedCommands {
        let shared = shared_commands();
        shared.write().install(kit("base", names).commands());
        shared
    }

    #[tokio::test]
    async fn body_sees_only_injected_kit() {
        let shared = live_with(&["kit1-cmd"]);
        let k2 = kit("kit2", &["kit2-cmd"]);

        let seen = with_kit(&shared, &k2, || async {
            let reg = shared.read();
            (reg.has("kit1-cmd"), reg.has("kit2-cmd"))
        })
        .await;

        assert_eq!(seen, (false, true));
        assert!(shared.read().has("kit1-cmd"));
        assert!(!shared.read().has("kit2-cmd"));
    }

    #[tokio::test]
    async fn error_result_is_propagated_and_table_restored() {
        let shared = live_with(&["a", "b"]);
        let k2 = kit("kit2", &["c"]);

        let result: Result<(), String> =
            with_kit(&shared, &k2, || async { Err("body failed".to_string()) }).await;

        assert_eq!(result, Err("body failed".to_string()));
        assert_eq!(shared.read().names(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn cancellation_restores_table() {
        let shared = live_with(&["a"]);
        let k2 = kit("kit2", &["c"]);

        let timed_out = tokio::time::timeout(
            Duration::from_millis(20),
            with_kit(&shared, &k2, || std::future::pending::<()>()),
        )
        .await;

        assert!(timed_out.is_err());
        assert_eq!(shared.read().names(), vec!["a"]);
    }

    #[tokio::test]
    async fn panic_in_body_restores_table() {
        let shared = live_with(&["a"]);
        let k2 = kit("kit2", &["c"]);

        let task_shared = shared.clone();
        let joined = tokio::spawn(async move {
            with_kit(&task_shared, &k2, || async {
                if task_shared.read().has("c") {
                    panic!("body exploded");
                }
            })
            .await
        })
        .await;

        assert!(joined.is_err());
        assert_eq!(shared.read().names(), vec!["a"]);
    }

    #[tokio::test]
    async fn nested_injections_unwind_in_order() {
        let shared = live_with(&["base-cmd"]);
        let outer = kit("outer", &["outer-cmd"]);
        let inner = kit("inner", &["inner-cmd"]);

        with_kit(&shared, &outer, || async {
            with_kit(&shared, &inner, || async {
                assert_eq!(shared.read().names(), vec!["inner-cmd"]);
            })
            .await;
            assert_eq!(shared.read().names(), vec!["outer-cmd"]);
        })
        .await;

        assert_eq!(shared.read().names(), vec!["base-cmd"]);
    }

    #[test]
    fn guard_restores_on_drop_and_explicitly() {
        let shared = live_with(&["a"]);
        let k2 = kit("kit2", &["c"]);

        {
            let guard = inject(&shared, &k2);
            assert_eq!(guard.kit_id(), "kit2");
            assert_eq!(shared.read().names(), vec!["c"]);
        }
        assert_eq!(shared.read().names(), vec!["a"]);

        let guard = inject(&shared, &k2);
        guard.restore();
        assert_eq!(shared.read().names(), vec!["a"]);
    }
}
