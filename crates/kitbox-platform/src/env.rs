//! Environment variable abstraction.
//!
//! Read-only: the kit system only consults the environment to locate the
//! kits file. [`MapEnvironment`] backs tests without touching process-global
//! state.

use std::collections::HashMap;

/// Read access to environment-style configuration.
pub trait Environment: Send + Sync {
    /// Value of a variable, or `None` if unset.
    fn get_var(&self, name: &str) -> Option<String>;
}

/// Native implementation using [`std::env`].
pub struct NativeEnvironment;

impl Environment for NativeEnvironment {
    fn get_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

/// Fixed in-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    /// Empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl Environment for MapEnvironment {
    fn get_var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_reads_path() {
        // PATH is universally available
        assert!(NativeEnvironment.get_var("PATH").is_some());
    }

    #[test]
    fn native_missing_var() {
        assert!(
            NativeEnvironment
                .get_var("KITBOX_DEFINITELY_NOT_SET_12345")
                .is_none()
        );
    }

    #[test]
    fn map_environment_lookup() {
        let env = MapEnvironment::new().with_var("A", "1");
        assert_eq!(env.get_var("A").as_deref(), Some("1"));
        assert!(env.get_var("B").is_none());
    }
}
