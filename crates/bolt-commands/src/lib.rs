//! Regex-triggered chat commands.
//!
//! Commands are kept in registration order. For each incoming message the
//! first command whose pattern matches is invoked, and only that one.

use std::{fmt, sync::Arc};

use regex::Regex;
use tracing::{debug, warn};

use bolt_core::models::Message;

pub const UNDOCUMENTED: &str = "That command is currently undocumented";

pub type Callback = Arc<dyn Fn(&Message) -> bolt_core::Result<()> + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("invalid pattern for command `{name}`: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("command `{name}` failed: {source}")]
    Failed {
        name: String,
        #[source]
        source: bolt_core::Error,
    },
}

pub type Result<T> = std::result::Result<T, CommandError>;

/// One registered command.
#[derive(Clone)]
pub struct Command {
    name: String,
    pattern: Regex,
    callback: Callback,
    requires_trigger: bool,
    access: u32,
    help: Option<String>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("requires_trigger", &self.requires_trigger)
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

impl Command {
    /// A trigger-prefixed command open to everyone. The pattern is compiled here.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        callback: impl Fn(&Message) -> bolt_core::Result<()> + Send + Sync + 'static,
    ) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|source| CommandError::InvalidPattern {
            name: name.clone(),
            source,
        })?;
        Ok(Self {
            name,
            pattern,
            callback: Arc::new(callback),
            requires_trigger: true,
            access: 0,
            help: None,
        })
    }

    /// Match against the raw message text instead of the text after the trigger.
    pub fn without_trigger(mut self) -> Self {
        self.requires_trigger = false;
        self
    }

    /// Minimum author access level.
    pub fn access(mut self, level: u32) -> Self {
        self.access = level;
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn requires_trigger(&self) -> bool {
        self.requires_trigger
    }

    pub fn access_level(&self) -> u32 {
        self.access
    }

    pub fn help_text(&self) -> &str {
        self.help.as_deref().unwrap_or(UNDOCUMENTED)
    }

    fn matches(&self, text: &str, trigger: &str) -> bool {
        if !self.requires_trigger {
            return self.pattern.is_match(text);
        }
        text.strip_prefix(trigger)
            .is_some_and(|rest| self.pattern.is_match(rest))
    }

    fn invoke(&self, message: &Message) -> Result<()> {
        (self.callback)(message).map_err(|source| CommandError::Failed {
            name: self.name.clone(),
            source,
        })
    }
}

/// Who is speaking and which prefix marks a command.
#[derive(Clone, Copy, Debug)]
pub struct DispatchContext<'a> {
    pub trigger: &'a str,
    pub access: u32,
}

/// Registration table, keyed by command name.
///
/// Mutation takes `&mut self`; callers that share a registry across tasks put
/// it behind a lock.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. A name that is already taken is skipped and `false` returned.
    pub fn register(&mut self, command: Command) -> bool {
        if self.get(&command.name).is_some() {
            warn!(command = %command.name, "duplicate command, skipping registration");
            return false;
        }
        debug!(
            command = %command.name,
            pattern = command.pattern(),
            requires_trigger = command.requires_trigger,
            access = command.access,
            "registered command"
        );
        self.commands.push(command);
        true
    }

    /// Remove a command; `false` if no command had that name.
    pub fn unregister(&mut self, name: &str) -> bool {
        let Some(idx) = self.commands.iter().position(|c| c.name == name) else {
            warn!(command = %name, "cannot unregister, command not found");
            return false;
        };
        self.commands.remove(idx);
        debug!(command = %name, "unregistered command");
        true
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().map(|c| c.name.as_str())
    }

    pub fn help(&self, name: &str) -> Option<&str> {
        self.get(name).map(Command::help_text)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Invoke the first command matching `message`, if any, and return its name.
    pub fn dispatch(&self, message: &Message, ctx: DispatchContext<'_>) -> Result<Option<&str>> {
        let text = message.content();
        let Some(command) = self
            .commands
            .iter()
            .filter(|c| c.access <= ctx.access)
            .find(|c| c.matches(text, ctx.trigger))
        else {
            return Ok(None);
        };

        debug!(command = %command.name, message = %message.id(), "dispatching command");
        command.invoke(message)?;
        Ok(Some(command.name.as_str()))
    }
}
