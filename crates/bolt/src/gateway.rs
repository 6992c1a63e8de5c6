use std::sync::Arc;

use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use bolt_commands::{CommandRegistry, DispatchContext};
use bolt_core::{
    config::Config,
    models::{Channel, Guild, Message},
    schema::ModelError,
    Model,
};

use crate::builtin::Outbox;

/// Dispatch opcode; everything else is connection housekeeping.
const OP_DISPATCH: u8 = 0;

/// One line of the event stream: `{"op":0,"t":"MESSAGE_CREATE","d":{...}}`.
#[derive(Debug, Deserialize)]
struct GatewayEvent {
    op: u8,
    #[serde(default)]
    t: Option<String>,
    #[serde(default)]
    d: serde_json::Value,
}

#[derive(Debug)]
enum Inbound {
    Message(Message),
    Channel(&'static str, Channel),
    Guild(&'static str, Guild),
}

fn route(name: &str, data: &serde_json::Value) -> Option<Result<Inbound, ModelError>> {
    let inbound = match name {
        "MESSAGE_CREATE" => Message::marshal(data).map(Inbound::Message),
        "CHANNEL_CREATE" => Channel::marshal(data).map(|c| Inbound::Channel("created", c)),
        "CHANNEL_UPDATE" => Channel::marshal(data).map(|c| Inbound::Channel("updated", c)),
        "CHANNEL_DELETE" => Channel::marshal(data).map(|c| Inbound::Channel("deleted", c)),
        "GUILD_CREATE" => Guild::marshal(data).map(|g| Inbound::Guild("available", g)),
        "GUILD_UPDATE" => Guild::marshal(data).map(|g| Inbound::Guild("updated", g)),
        _ => return None,
    };
    Some(inbound)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub received: u64,
    pub handled: u64,
    pub dispatched: u64,
    pub dropped: u64,
}

pub struct Bot {
    cfg: Arc<Config>,
    commands: CommandRegistry,
    outbox: Outbox,
}

impl Bot {
    pub fn new(cfg: Arc<Config>, commands: CommandRegistry, outbox: Outbox) -> Self {
        Self {
            cfg,
            commands,
            outbox,
        }
    }

    /// Consume the configured event source until it ends.
    pub async fn run(&self) -> anyhow::Result<Stats> {
        let mut stdout = tokio::io::stdout();
        match &self.cfg.events_path {
            Some(path) => {
                info!(path = %path.display(), "reading events from file");
                let file = tokio::fs::File::open(path).await?;
                self.pump(BufReader::new(file), &mut stdout).await
            }
            None => {
                info!("reading events from stdin");
                self.pump(BufReader::new(tokio::io::stdin()), &mut stdout)
                    .await
            }
        }
    }

    /// Feed every line of `reader` through [`Bot::handle_line`], writing replies
    /// to `out` one JSON object per line.
    pub async fn pump<R, W>(&self, reader: R, out: &mut W) -> anyhow::Result<Stats>
    where
        R: AsyncBufRead + Unpin,
        W: tokio::io::AsyncWrite + Unpin,
    {
        let mut stats = Stats::default();
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            stats.received += 1;
            self.handle_line(&line, &mut stats);

            for payload in self.outbox.drain() {
                let mut buf = serde_json::to_vec(&payload)?;
                buf.push(b'\n');
                out.write_all(&buf).await?;
            }
        }
        out.flush().await?;

        Ok(stats)
    }

    /// Parse, marshal and act on one event. Malformed events are logged and dropped.
    fn handle_line(&self, line: &str, stats: &mut Stats) {
        let event: GatewayEvent = match serde_json::from_str(line) {
            Ok(ev) => ev,
            Err(e) => {
                warn!(error = %e, "dropping unparseable event");
                stats.dropped += 1;
                return;
            }
        };

        if event.op != OP_DISPATCH {
            debug!(op = event.op, "ignoring non-dispatch event");
            return;
        }
        let Some(name) = event.t.as_deref() else {
            warn!("dropping dispatch event without a name");
            stats.dropped += 1;
            return;
        };

        let inbound = match route(name, &event.d) {
            None => {
                debug!(event = name, "ignoring unhandled event");
                return;
            }
            Some(Err(e)) => {
                warn!(event = name, error = %e, "dropping malformed event");
                stats.dropped += 1;
                return;
            }
            Some(Ok(inbound)) => inbound,
        };
        stats.handled += 1;

        match inbound {
            Inbound::Message(message) => self.on_message(&message, stats),
            Inbound::Channel(what, channel) => info!(
                id = channel.id(),
                kind = channel.kind().as_str(),
                name = channel.name().unwrap_or_default(),
                "channel {what}"
            ),
            Inbound::Guild(what, guild) => info!(
                id = guild.id(),
                name = guild.name(),
                channels = guild.channels().len(),
                "guild {what}"
            ),
        }
    }

    fn on_message(&self, message: &Message, stats: &mut Stats) {
        if message.author().is_some_and(|a| a.is_bot()) {
            return;
        }

        let ctx = DispatchContext {
            trigger: &self.cfg.trigger,
            access: self.cfg.access_for(message.author_id()),
        };
        match self.commands.dispatch(message, ctx) {
            Ok(Some(name)) => {
                stats.dispatched += 1;
                debug!(command = name, channel = message.channel_id(), "command handled");
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "command failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    fn bot() -> Bot {
        let outbox = Outbox::default();
        let commands = builtin::commands(&outbox).expect("builtin patterns compile");
        Bot::new(Arc::new(Config::default()), commands, outbox)
    }

    async fn pump(input: &str) -> (Stats, Vec<serde_json::Value>) {
        let bot = bot();
        let mut out = Vec::new();
        let stats = bot.pump(input.as_bytes(), &mut out).await.expect("pump");
        let replies = String::from_utf8(out)
            .expect("utf8")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        (stats, replies)
    }

    const PING: &str = r#"{"op":0,"t":"MESSAGE_CREATE","d":{"id":"1","channel_id":"2","author":{"id":"3","username":"u","discriminator":"0001"},"content":".ping"}}"#;

    #[tokio::test]
    async fn ping_event_produces_a_reply() {
        let (stats, replies) = pump(PING).await;
        assert_eq!(
            stats,
            Stats {
                received: 1,
                handled: 1,
                dispatched: 1,
                dropped: 0
            }
        );
        assert_eq!(
            replies,
            vec![serde_json::json!({"channel_id": "2", "content": "pong", "tts": false})]
        );
    }

    #[tokio::test]
    async fn malformed_events_are_dropped_and_the_stream_continues() {
        let input = [
            "not json",
            r#"{"op":0,"t":"CHANNEL_CREATE","d":{"id":"5","type":99}}"#,
            r#"{"op":0,"t":"MESSAGE_CREATE","d":{"channel_id":"2"}}"#,
            r#"{"op":0,"d":{}}"#,
            "",
            PING,
        ]
        .join("\n");

        let (stats, replies) = pump(&input).await;
        assert_eq!(stats.received, 5);
        assert_eq!(stats.dropped, 4);
        assert_eq!(stats.dispatched, 1);
        assert_eq!(replies.len(), 1);
    }

    #[tokio::test]
    async fn housekeeping_and_unknown_events_are_ignored() {
        let input = [
            r#"{"op":11}"#,
            r#"{"op":0,"t":"TYPING_START","d":{"user_id":"1"}}"#,
            r#"{"op":0,"t":"GUILD_CREATE","d":{"id":"1","name":"g","channels":[{"id":"2","type":0}]}}"#,
        ]
        .join("\n");

        let (stats, replies) = pump(&input).await;
        assert_eq!(stats.received, 3);
        assert_eq!(stats.handled, 1);
        assert_eq!(stats.dropped, 0);
        assert!(replies.is_empty());
    }

    #[tokio::test]
    async fn bot_authors_are_not_dispatched() {
        let input = PING.replace(r#""discriminator":"0001""#, r#""discriminator":"0001","bot":true"#);
        let (stats, replies) = pump(&input).await;
        assert_eq!(stats.handled, 1);
        assert_eq!(stats.dispatched, 0);
        assert!(replies.is_empty());
    }

    #[test]
    fn routes_only_known_events() {
        assert!(route("PRESENCE_UPDATE", &serde_json::json!({})).is_none());
        assert!(matches!(
            route("CHANNEL_DELETE", &serde_json::json!({"id": "1", "type": 1})),
            Some(Ok(Inbound::Channel("deleted", _)))
        ));
    }
}
