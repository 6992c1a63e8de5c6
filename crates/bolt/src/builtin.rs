use std::sync::{Arc, Mutex};

use serde_json::{json, Map, Value};
use tracing::warn;

use bolt_commands::{Command, CommandRegistry};
use bolt_core::{
    models::{Message, NewMessage},
    Model,
};

/// Outbound payloads produced by commands, waiting to be written out.
#[derive(Clone, Default)]
pub struct Outbox {
    inner: Arc<Mutex<Vec<Map<String, Value>>>>,
}

impl Outbox {
    /// Validate a reply draft and queue its wire form.
    pub fn reply(&self, to: &Message, content: &str) -> bolt_core::Result<()> {
        let draft = NewMessage::marshal(&json!({
            "channel_id": to.channel_id(),
            "content": content,
        }))?;
        self.inner
            .lock()
            .map_err(|_| bolt_core::Error::External("outbox lock poisoned".to_string()))?
            .push(draft.serialize());
        Ok(())
    }

    /// Take every queued payload. Payloads queued before a panicking command
    /// poisoned the lock are still handed out.
    pub fn drain(&self) -> Vec<Map<String, Value>> {
        let mut queue = self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("outbox lock poisoned, draining queued replies anyway");
            poisoned.into_inner()
        });
        std::mem::take(&mut *queue)
    }
}

/// Commands every bot instance carries.
pub fn commands(outbox: &Outbox) -> bolt_commands::Result<CommandRegistry> {
    let mut registry = CommandRegistry::new();

    let out = outbox.clone();
    registry.register(
        Command::new("ping", r"^ping\b", move |m| out.reply(m, "pong"))?
            .help("Replies with pong."),
    );

    let out = outbox.clone();
    registry.register(
        Command::new("whoami", r"^whoami\b", move |m| {
            let who = m.author().map(|u| u.tag()).unwrap_or_default();
            out.reply(m, &format!("You are {who}"))
        })?
        .help("Shows your name and discriminator."),
    );

    let listing = {
        let mut names: Vec<String> = registry.names().map(str::to_string).collect();
        names.push("help".to_string());
        names.join(", ")
    };
    let out = outbox.clone();
    registry.register(
        Command::new("help", r"^help\b", move |m| {
            out.reply(m, &format!("Commands: {listing}"))
        })?
        .help("Lists available commands."),
    );

    Ok(registry)
}
