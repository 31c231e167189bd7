//! Kits: named, versioned bundles of commands.
//!
//! Every [`Kit`] value is validated on construction (see [`create_kit`] and
//! [`KitBuilder`]): the id is non-empty and command names are unique
//! within the kit. Collisions *across* kits are allowed and resolved by
//! install order in the slash-command registry.

use std::collections::HashSet;

use crate::command::CommandDefinition;
use crate::error::{KitError, Result};

/// A named, versioned bundle of commands.
#[derive(Debug, Clone)]
pub struct Kit {
    id: String,
    name: String,
    description: String,
    version: String,
    commands: Vec<CommandDefinition>,
}

impl Kit {
    /// Start building a kit with the given id.
    pub fn builder(id: impl Into<String>) -> KitBuilder {
        KitBuilder::new(id)
    }

    /// Stable identity, also the persistence key.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Version string (free-form).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Commands in install order.
    pub fn commands(&self) -> &[CommandDefinition] {
        &self.commands
    }

    /// Names of this kit's commands, in install order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// Look up one of this kit's commands by name.
    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.iter().find(|c| c.name() == name)
    }
}

/// Construct a kit, validating it.
///
/// # Errors
///
/// Returns [`KitError::InvalidKit`] if `id` is empty (or whitespace) or if
/// two commands share a name.
pub fn create_kit(
    id: impl Into<String>,
    name: impl Into<String>,
    version: impl Into<String>,
    description: impl Into<String>,
    commands: Vec<CommandDefinition>,
) -> Result<Kit> {
    let id = id.into();
    if id.trim().is_empty() {
        return Err(KitError::InvalidKit {
            reason: "kit id must not be empty".into(),
        });
    }

    let mut seen = HashSet::with_capacity(commands.len());
    for cmd in &commands {
        if !seen.insert(cmd.name()) {
            return Err(KitError::InvalidKit {
                reason: format!("kit '{id}' defines command '{}' more than once", cmd.name()),
            });
        }
    }

    Ok(Kit {
        id,
        name: name.into(),
        description: description.into(),
        version: version.into(),
        commands,
    })
}

/// Fluent builder over [`create_kit`].
#[derive(Debug)]
pub struct KitBuilder {
    id: String,
    name: Option<String>,
    description: String,
    version: String,
    commands: Vec<CommandDefinition>,
}

impl KitBuilder {
    /// New builder; name defaults to the id, version to `0.1.0`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: String::new(),
            version: "0.1.0".into(),
            commands: Vec::new(),
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Append a command.
    pub fn command(mut self, command: CommandDefinition) -> Self {
        self.commands.push(command);
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Kit> {
        let name = self.name.unwrap_or_else(|| self.id.clone());
        create_kit(self.id, name, self.version, self.description, self.commands)
    }
}
