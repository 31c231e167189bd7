//! Kit registry service.
//!
//! [`KitRegistry`] owns the set of *known* kits (populated by
//! [`register`](KitRegistry::register)), the set of *enabled* kit ids, and
//! keeps the live [`SlashCommandRegistry`](crate::SlashCommandRegistry) in
//! step with both.
//!
//! # Persisted intent
//!
//! The persisted document may name kits that have not been registered
//! yet. Those ids stay recorded (and are written back on every save) but
//! are inert until the kit is registered, at which point it is enabled
//! and its commands installed without an explicit `enable`. Registration
//! order relative to loading the configuration never loses intent.
//!
//! # Durability
//!
//! `enable`/`disable` apply the in-memory change first and then persist.
//! A persistence failure is returned to the caller but not rolled back:
//! the change is effective for this process and may not survive a
//! restart. Failed saves are not retried.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use kitbox_types::{CommandOutcome, InvocationContext, Kit, KitError, KitsConfig, Result};

use crate::scope::{self, InjectionGuard};
use crate::slash::{SharedCommands, SlashCommandRegistry, shared_commands};
use crate::store::{KitStore, MemoryKitStore};

/// A known kit and whether it is enabled.
#[derive(Debug, Clone)]
pub struct KitStatus {
    /// The kit.
    pub kit: Arc<Kit>,
    /// Whether its commands are (persistently) installed.
    pub enabled: bool,
}

#[derive(Default)]
struct RegistryState {
    /// Known kits in registration order.
    known: Vec<Arc<Kit>>,
    /// Kit id to index into `known`.
    index: HashMap<String, usize>,
    /// Ids of known kits that are enabled.
    enabled: HashSet<String>,
    /// Persisted enablement order; may include unregistered ids.
    intent: Vec<String>,
}

impl RegistryState {
    fn get(&self, id: &str) -> Option<&Arc<Kit>> {
        self.index.get(id).map(|&i| &self.known[i])
    }

    fn config(&self) -> KitsConfig {
        KitsConfig::from_ids(self.intent.iter().cloned())
    }

    /// Give `removed` names back to the enabled kits that define them.
    ///
    /// Kits are visited in enablement order, so the most recently enabled
    /// one ends up owning each name.
    fn reinstall_shadowed(&self, commands: &mut SlashCommandRegistry, removed: &[String]) {
        if removed.is_empty() {
            return;
        }
        for other in self.enabled_kits() {
            let shadowed: Vec<_> = other
                .commands()
                .iter()
                .filter(|cmd| removed.iter().any(|name| name == cmd.name()))
                .cloned()
                .collect();
            if !shadowed.is_empty() {
                debug!(kit_id = %other.id(), count = shadowed.len(), "reinstalling shadowed commands");
                commands.install(&shadowed);
            }
        }
    }

    /// Enabled kits in enablement order.
    fn enabled_kits(&self) -> impl Iterator<Item = &Arc<Kit>> {
        self.intent
            .iter()
            .filter(|id| self.enabled.contains(id.as_str()))
            .filter_map(|id| self.get(id))
    }
}

/// Registry of known kits and their enablement.
pub struct KitRegistry {
    store: Arc<dyn KitStore>,
    commands: SharedCommands,
    state: Mutex<RegistryState>,
}

impl KitRegistry {
    /// Open the registry, loading persisted enablement from `store`.
    ///
    /// `commands` is the live table the host loop dispatches from.
    pub async fn open(store: Arc<dyn KitStore>, commands: SharedCommands) -> Self {
        let config = store.load().await;
        debug!(
            persisted = config.enabled_kits.len(),
            "loaded kit enablement"
        );
        let state = RegistryState {
            intent: config.enabled_kits,
            ..RegistryState::default()
        };
        Self {
            store,
            commands,
            state: Mutex::new(state),
        }
    }

    /// Open a registry backed by a fresh in-memory store and table.
    pub async fn in_memory() -> Self {
        Self::open(Arc::new(MemoryKitStore::new()), shared_commands()).await
    }

    /// The live command table.
    pub fn commands(&self) -> &SharedCommands {
        &self.commands
    }

    /// Backing file of the store, if any.
    pub fn store_location(&self) -> Option<&Path> {
        self.store.location()
    }

    /// Add a kit to the known set.
    ///
    /// If the persisted configuration already lists the kit as enabled, it
    /// becomes enabled now and its commands are installed.
    ///
    /// # Errors
    ///
    /// [`KitError::DuplicateKit`] if a kit with the same id is known.
    pub fn register(&self, kit: Kit) -> Result<()> {
        let mut state = self.state.lock();
        if state.index.contains_key(kit.id()) {
            return Err(KitError::DuplicateKit {
                id: kit.id().to_string(),
            });
        }

        let id = kit.id().to_string();
        let kit = Arc::new(kit);
        let position = state.known.len();
        state.index.insert(id.clone(), position);
        state.known.push(kit.clone());

        if state.intent.contains(&id) {
            state.enabled.insert(id.clone());
            self.commands.write().install(kit.commands());
            info!(kit_id = %id, version = %kit.version(), "registered kit (enabled from config)");
        } else {
            info!(kit_id = %id, version = %kit.version(), "registered kit");
        }
        Ok(())
    }

    /// Register several kits in order, stopping at the first failure.
    pub fn register_all<I>(&self, kits: I) -> Result<()>
    where
        I: IntoIterator<Item = Kit>,
    {
        kits.into_iter().try_for_each(|kit| self.register(kit))
    }

    /// All known kits, in registration order.
    pub fn list_available(&self) -> Vec<Arc<Kit>> {
        self.state.lock().known.clone()
    }

    /// All known kits with their enablement.
    pub fn list_status(&self) -> Vec<KitStatus> {
        let state = self.state.lock();
        state
            .known
            .iter()
            .map(|kit| KitStatus {
                kit: kit.clone(),
                enabled: state.enabled.contains(kit.id()),
            })
            .collect()
    }

    /// Look up a known kit.
    ///
    /// # Errors
    ///
    /// [`KitError::UnknownKit`] if no kit has this id.
    pub fn get_kit(&self, id: &str) -> Result<Arc<Kit>> {
        self.state
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| KitError::UnknownKit { id: id.to_string() })
    }

    /// Whether a kit is enabled. Does not consult the store.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.state.lock().enabled.contains(id)
    }

    /// Enabled kit ids, in enablement order.
    pub fn enabled_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .enabled_kits()
            .map(|kit| kit.id().to_string())
            .collect()
    }

    /// Persisted ids that do not match any registered kit yet.
    pub fn pending_ids(&self) -> Vec<String> {
        let state = self.state.lock();
        state
            .intent
            .iter()
            .filter(|id| !state.index.contains_key(id.as_str()))
            .cloned()
            .collect()
    }

    /// Enable a kit: install its commands and persist.
    ///
    /// Enabling an enabled kit is a no-op.
    ///
    /// # Errors
    ///
    /// [`KitError::UnknownKit`] if the id is not registered (nothing
    /// changes). A persistence error means the kit *is* enabled for this
    /// process but the change may not have reached disk.
    pub async fn enable(&self, id: &str) -> Result<()> {
        let config = {
            let mut state = self.state.lock();
            let kit = state
                .get(id)
                .cloned()
                .ok_or_else(|| KitError::UnknownKit { id: id.to_string() })?;
            if state.enabled.contains(id) {
                debug!(kit_id = %id, "kit already enabled");
                return Ok(());
            }

            state.enabled.insert(id.to_string());
            if !state.intent.iter().any(|k| k == id) {
                state.intent.push(id.to_string());
            }
            self.commands.write().install(kit.commands());
            info!(kit_id = %id, commands = kit.commands().len(), "enabled kit");
            state.config()
        };

        self.persist(&config).await
    }

    /// Disable a kit: remove its commands and persist.
    ///
    /// Only commands that still route to this kit's handlers are removed.
    /// Names the kit had shadowed fall back to the most recently enabled
    /// remaining kit that defines them. Disabling a disabled kit is a no-op.
    ///
    /// # Errors
    ///
    /// Same contract as [`enable`](Self::enable).
    pub async fn disable(&self, id: &str) -> Result<()> {
        let config = {
            let mut state = self.state.lock();
            let kit = state
                .get(id)
                .cloned()
                .ok_or_else(|| KitError::UnknownKit { id: id.to_string() })?;
            if !state.enabled.remove(id) {
                debug!(kit_id = %id, "kit already disabled");
                return Ok(());
            }
            state.intent.retain(|k| k != id);

            let mut commands = self.commands.write();
            let removed = commands.remove(kit.commands());
            state.reinstall_shadowed(&mut commands, &removed);
            info!(kit_id = %id, removed = removed.len(), "disabled kit");
            state.config()
        };

        self.persist(&config).await
    }

    /// Dispatch a line of input through the live table.
    ///
    /// Sets `ctx.kit_id` to the owning kit when the handler belongs to a
    /// known kit. Returns `None` if the input is not a known slash command.
    pub async fn dispatch(
        &self,
        input: &str,
        ctx: &mut InvocationContext,
    ) -> Option<CommandOutcome> {
        let (cmd, args) = self.commands.read().resolve(input)?;
        let owner = self
            .state
            .lock()
            .known
            .iter()
            .find(|kit| kit.command(cmd.name()).is_some_and(|c| c.same_handler(&cmd)))
            .map(|kit| kit.id().to_string());

        ctx.begin(cmd.name(), &args, owner.as_deref());
        debug!(command = %cmd.name(), kit_id = ?owner, "dispatching");
        Some(cmd.invoke(ctx).await)
    }

    /// Run `body` with only `kit`'s commands dispatchable.
    ///
    /// Enablement state is untouched; the live table is restored on every
    /// exit path. See [`scope::with_kit`].
    ///
    /// Kits enabled, disabled or registered from inside `body` only touch
    /// the temporary table. Once it is restored, those changes are applied
    /// to it so every enabled kit's commands are live again.
    pub async fn with_kit<F, Fut, T>(&self, kit: &Kit, body: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let enabled_before = self.state.lock().enabled.clone();
        let _scope = ScopedInjection {
            registry: self,
            guard: Some(scope::inject(&self.commands, kit)),
            enabled_before,
        };
        body().await
    }

    /// [`with_kit`](Self::with_kit) for a registered kit.
    ///
    /// # Errors
    ///
    /// [`KitError::UnknownKit`] if the id is not registered; `body` does not run.
    pub async fn with_registered_kit<F, Fut, T>(&self, id: &str, body: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let kit = self.get_kit(id)?;
        Ok(self.with_kit(&kit, body).await)
    }

    /// Bring the live table in line with enablement changes made since
    /// `enabled_before` was captured.
    fn reconcile(&self, enabled_before: &HashSet<String>) {
        let state = self.state.lock();
        let mut commands = self.commands.write();

        for id in enabled_before.difference(&state.enabled) {
            if let Some(kit) = state.get(id) {
                let removed = commands.remove(kit.commands());
                state.reinstall_shadowed(&mut commands, &removed);
                debug!(kit_id = %id, removed = removed.len(), "dropped commands of kit disabled in scope");
            }
        }
        for kit in state.enabled_kits() {
            if !enabled_before.contains(kit.id()) {
                commands.install(kit.commands());
                debug!(kit_id = %kit.id(), "installed commands of kit enabled in scope");
            }
        }
    }

    async fn persist(&self, config: &KitsConfig) -> Result<()> {
        self.store.save(config).await.inspect_err(|e| {
            warn!(error = %e, "kit enablement not persisted; change applies to this session only");
        })
    }
}

/// Restores the table on drop, then reconciles it with enablement.
struct ScopedInjection<'a> {
    registry: &'a KitRegistry,
    guard: Option<InjectionGuard>,
    enabled_before: HashSet<String>,
}

impl Drop for ScopedInjection<'_> {
    fn drop(&mut self) {
        if let Some(guard) = self.guard.take() {
            guard.restore();
        }
        self.registry.reconcile(&self.enabled_before);
    }
}
