//! Platform abstraction layer for kitbox.
//!
//! Isolates the two platform capabilities the kit system touches -- file
//! I/O and environment lookup -- behind traits, so the registry and its
//! persistence can be exercised against in-memory fakes.
//!
//! The [`Platform`] trait bundles both capabilities. [`NativePlatform`] is
//! the tokio/std-backed implementation used by the `kit` binary.

pub mod env;
pub mod fs;
pub mod kits_path;

/// Bundle of platform capabilities.
pub trait Platform: Send + Sync {
    /// Filesystem operations.
    fn fs(&self) -> &dyn fs::FileSystem;

    /// Environment variable access.
    fn env(&self) -> &dyn env::Environment;
}

/// Native platform implementation using tokio and std.
pub struct NativePlatform {
    fs: fs::NativeFileSystem,
    env: env::NativeEnvironment,
}

impl NativePlatform {
    /// Create a new native platform.
    pub fn new() -> Self {
        Self {
            fs: fs::NativeFileSystem,
            env: env::NativeEnvironment,
        }
    }
}

impl Default for NativePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for NativePlatform {
    fn fs(&self) -> &dyn fs::FileSystem {
        &self.fs
    }

    fn env(&self) -> &dyn env::Environment {
        &self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_platform_accessors() {
        let platform = NativePlatform::default();
        let _fs = platform.fs();
        assert!(platform.env().get_var("PATH").is_some());
    }

    #[test]
    fn platform_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NativePlatform>();
    }
}
