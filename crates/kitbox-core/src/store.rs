//! Persistence of kit enablement.
//!
//! The registry sees persistence only through [`KitStore`]: `load` never
//! fails (a missing or unreadable file is an empty configuration), `save`
//! overwrites the whole document and reports I/O failures without
//! retrying.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use kitbox_platform::Platform;
use kitbox_platform::fs::{FileSystem, NativeFileSystem};
use kitbox_platform::kits_path::discover_kits_path;
use kitbox_types::{KitError, KitsConfig, Result};

/// Where kit enablement is persisted.
#[async_trait]
pub trait KitStore: Send + Sync {
    /// Read the persisted configuration. Absent or corrupt ⇒ default.
    async fn load(&self) -> KitsConfig;

    /// Overwrite the persisted configuration.
    async fn save(&self, config: &KitsConfig) -> Result<()>;

    /// Backing file, if any (for display).
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// JSON file store (`{"enabledKits": [...]}`).
pub struct FileKitStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileKitStore {
    /// Store at `path` on the given filesystem.
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Store at `path` on the native filesystem.
    pub fn native(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(NativeFileSystem), path)
    }

    /// Native store at the discovered location (see [`discover_kits_path`]).
    pub fn discover(platform: &dyn Platform) -> Self {
        let path = discover_kits_path(platform.env(), platform.fs().home_dir());
        Self::native(path)
    }

    /// The kits file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KitStore for FileKitStore {
    async fn load(&self) -> KitsConfig {
        if !self.fs.exists(&self.path).await {
            debug!(path = %self.path.display(), "no kits file, starting empty");
            return KitsConfig::default();
        }

        let contents = match self.fs.read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read kits file, starting empty");
                return KitsConfig::default();
            }
        };

        match serde_json::from_str::<KitsConfig>(&contents) {
            Ok(config) => {
                let config = config.normalized();
                debug!(
                    path = %self.path.display(),
                    enabled = config.enabled_kits.len(),
                    "loaded kits file"
                );
                config
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to parse kits file, starting empty");
                KitsConfig::default()
            }
        }
    }

    async fn save(&self, config: &KitsConfig) -> Result<()> {
        let mut body = serde_json::to_string_pretty(config)?;
        body.push('\n');
        self.fs
            .write_string(&self.path, &body)
            .await
            .map_err(|e| KitError::persistence(&self.path, e))?;
        debug!(
            path = %self.path.display(),
            enabled = config.enabled_kits.len(),
            "saved kits file"
        );
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryKitStore {
    config: Mutex<KitsConfig>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryKitStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a configuration.
    pub fn with_config(config: KitsConfig) -> Self {
        Self {
            config: Mutex::new(config),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail with an I/O error.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// What the store currently holds.
    pub fn current(&self) -> KitsConfig {
        self.config.lock().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KitStore for MemoryKitStore {
    async fn load(&self) -> KitsConfig {
        self.config.lock().clone().normalized()
    }

    async fn save(&self, config: &KitsConfig) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(KitError::from(std::io::Error::other(
                "simulated write failure",
            )));
        }
        *self.config.lock() = config.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
