//! Command registry with deferred construction.
//!
//! Commands are registered either as constructed [`Command`]s or as a
//! factory identifier. A deferred entry is constructed through a
//! [`CommandFactory`] the first time it is resolved and is replaced in place,
//! so each identifier is constructed at most once.
//!
//! # Examples
//!
//! ```
//! use console_kit_dispatch::{Command, CommandContainer, CommandRegistry};
//!
//! let mut container = CommandContainer::new();
//! container.register("commands.build", || Command::new("build"));
//!
//! let mut registry = CommandRegistry::new();
//! registry.insert_deferred("build", "commands.build");
//!
//! let command = registry.resolve("build", &container).unwrap().unwrap();
//! assert_eq!(command.name(), "build");
//! assert!(command.is_prepared());
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::command::Command;
use crate::error::{ConsoleError, Result};

/// Constructs commands from identifiers.
pub trait CommandFactory {
    /// Builds the command registered under `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCommand`](ConsoleError::UnknownCommand) if the
    /// identifier is not known.
    fn construct(&self, identifier: &str) -> Result<Command>;
}

impl<F> CommandFactory for F
where
    F: Fn(&str) -> Result<Command>,
{
    fn construct(&self, identifier: &str) -> Result<Command> {
        self(identifier)
    }
}

type Constructor = Box<dyn Fn() -> Command>;

/// [`CommandFactory`] backed by a map of constructor closures.
#[derive(Default)]
pub struct CommandContainer {
    constructors: HashMap<String, Constructor>,
}

impl CommandContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor, replacing any previous one for `identifier`.
    pub fn register<F>(&mut self, identifier: &str, constructor: F)
    where
        F: Fn() -> Command + 'static,
    {
        self.constructors
            .insert(identifier.to_string(), Box::new(constructor));
    }

    pub fn has(&self, identifier: &str) -> bool {
        self.constructors.contains_key(identifier)
    }
}

impl CommandFactory for CommandContainer {
    fn construct(&self, identifier: &str) -> Result<Command> {
        let constructor = self
            .constructors
            .get(identifier)
            .ok_or_else(|| ConsoleError::UnknownCommand(identifier.to_string()))?;
        Ok(constructor())
    }
}

impl std::fmt::Debug for CommandContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut identifiers: Vec<&String> = self.constructors.keys().collect();
        identifiers.sort();
        f.debug_struct("CommandContainer")
            .field("identifiers", &identifiers)
            .finish()
    }
}

/// A registry slot.
#[derive(Debug, Clone)]
pub enum RegistryEntry {
    /// A constructed, prepared command.
    Resolved(Command),
    /// A factory identifier not yet constructed.
    Deferred(String),
}

impl RegistryEntry {
    pub fn as_resolved(&self) -> Option<&Command> {
        match self {
            Self::Resolved(command) => Some(command),
            Self::Deferred(_) => None,
        }
    }

    pub fn as_resolved_mut(&mut self) -> Option<&mut Command> {
        match self {
            Self::Resolved(command) => Some(command),
            Self::Deferred(_) => None,
        }
    }
}

/// Name-keyed command registry that remembers registration order.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: HashMap<String, RegistryEntry>,
    order: Vec<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructed command under its own name.
    ///
    /// A command already registered under that name is replaced.
    pub fn insert(&mut self, mut command: Command) {
        command.prepare();
        let name = command.name().to_string();
        self.put(name, RegistryEntry::Resolved(command));
    }

    /// Registers `identifier` for construction on first use under `name`.
    pub fn insert_deferred(&mut self, name: &str, identifier: &str) {
        self.put(
            name.to_string(),
            RegistryEntry::Deferred(identifier.to_string()),
        );
    }

    fn put(&mut self, name: String, entry: RegistryEntry) {
        if self.entries.insert(name.clone(), entry).is_none() {
            self.order.push(name);
        }
    }

    /// Removes the entry for `name`, returning it if there was one.
    pub fn remove(&mut self, name: &str) -> Option<RegistryEntry> {
        let entry = self.entries.remove(name)?;
        self.order.retain(|n| n != name);
        Some(entry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name).map(|entry| (name.as_str(), entry)))
    }

    /// Returns the command for `name`, constructing it first if deferred.
    ///
    /// Returns `Ok(None)` when nothing is registered under `name`.
    ///
    /// # Errors
    ///
    /// Propagates the factory's error if construction fails. The entry stays
    /// deferred in that case.
    pub fn resolve(
        &mut self,
        name: &str,
        factory: &dyn CommandFactory,
    ) -> Result<Option<&mut Command>> {
        let Some(entry) = self.entries.get_mut(name) else {
            return Ok(None);
        };

        if let RegistryEntry::Deferred(identifier) = entry {
            debug!(
                command = name,
                identifier = identifier.as_str(),
                "Constructing deferred command"
            );
            let mut command = factory.construct(identifier)?;
            command.prepare();
            *entry = RegistryEntry::Resolved(command);
        }

        Ok(entry.as_resolved_mut())
    }

    /// Constructs every deferred entry.
    ///
    /// # Errors
    ///
    /// Stops at the first construction failure.
    pub fn resolve_all(&mut self, factory: &dyn CommandFactory) -> Result<()> {
        let names = self.order.clone();
        for name in names {
            self.resolve(&name, factory)?;
        }
        Ok(())
    }
}
