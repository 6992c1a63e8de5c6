use std::sync::Arc;

use bolt_core::{config::Config, schema::SchemaRegistry};

mod builtin;
mod gateway;

#[tokio::main]
async fn main() -> Result<(), bolt_core::Error> {
    bolt_core::logging::init("bolt")?;

    let cfg = Arc::new(Config::load()?);
    let schemas = SchemaRegistry::builtin()?;
    tracing::info!(kinds = schemas.len(), trigger = %cfg.trigger, "record kinds loaded");

    let outbox = builtin::Outbox::default();
    let commands = builtin::commands(&outbox)
        .map_err(|e| bolt_core::Error::External(format!("command setup failed: {e}")))?;

    let bot = gateway::Bot::new(cfg, commands, outbox);
    let stats = bot
        .run()
        .await
        .map_err(|e| bolt_core::Error::External(format!("event loop failed: {e}")))?;

    tracing::info!(
        received = stats.received,
        handled = stats.handled,
        dispatched = stats.dispatched,
        dropped = stats.dropped,
        "event stream closed"
    );
    Ok(())
}
