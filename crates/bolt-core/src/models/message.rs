use chrono::{DateTime, FixedOffset};

use crate::{
    models::{embed::EMBED, model, nested, timestamp, user::USER, Embed, Model, User},
    schema::{DefaultValue, FieldSpec, ItemKind, Schema},
};

pub const CONTENT_LIMIT: usize = 2000;
pub const EMBED_COUNT_LIMIT: usize = 10;

pub static MESSAGE: Schema = Schema {
    kind: "message",
    fields: &[
        FieldSpec::string("id").required(),
        FieldSpec::string("channel_id").required(),
        FieldSpec::string("guild_id"),
        FieldSpec::record("author", &USER),
        FieldSpec::string("content").max_length(CONTENT_LIMIT),
        FieldSpec::string("timestamp"),
        FieldSpec::string("edited_timestamp"),
        FieldSpec::boolean("tts"),
        FieldSpec::boolean("mention_everyone"),
        FieldSpec::records("mentions", &USER).default(DefaultValue::EmptyList),
        FieldSpec::list("mention_roles", ItemKind::Str).default(DefaultValue::EmptyList),
        FieldSpec::records("embeds", &EMBED)
            .max_items(EMBED_COUNT_LIMIT)
            .default(DefaultValue::EmptyList),
        FieldSpec::boolean("pinned"),
        FieldSpec::string("webhook_id"),
        FieldSpec::int("type").named("message_type"),
    ],
};

/// Body of an outbound create-message request.
pub static NEW_MESSAGE: Schema = Schema {
    kind: "new_message",
    fields: &[
        FieldSpec::string("channel_id").required(),
        FieldSpec::string("content").max_length(CONTENT_LIMIT),
        FieldSpec::string("nonce"),
        FieldSpec::boolean("tts").default(DefaultValue::Bool(false)),
        FieldSpec::record("embed", &EMBED),
    ],
};

model!(
    /// A chat message, as delivered by `MESSAGE_CREATE`.
    Message => MESSAGE
);

model!(
    /// Outbound message; marshal it from a draft payload to validate it
    /// before it goes on the wire.
    NewMessage => NEW_MESSAGE
);

impl NewMessage {
    pub fn channel_id(&self) -> &str {
        self.0.str("channel_id").unwrap_or_default()
    }

    pub fn content(&self) -> Option<&str> {
        self.0.str("content")
    }
}

impl Message {
    pub fn id(&self) -> &str {
        self.0.str("id").unwrap_or_default()
    }

    pub fn channel_id(&self) -> &str {
        self.0.str("channel_id").unwrap_or_default()
    }

    pub fn guild_id(&self) -> Option<&str> {
        self.0.str("guild_id")
    }

    pub fn author(&self) -> Option<User> {
        self.0.record("author").cloned().map(User::from_record)
    }

    /// Author id without cloning the nested user.
    pub fn author_id(&self) -> Option<&str> {
        self.0.record("author").and_then(|r| r.str("id"))
    }

    pub fn content(&self) -> &str {
        self.0.str("content").unwrap_or_default()
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.0.str("timestamp")
    }

    pub fn sent_at(&self) -> Option<DateTime<FixedOffset>> {
        self.timestamp().and_then(timestamp::parse)
    }

    pub fn edited_at(&self) -> Option<DateTime<FixedOffset>> {
        self.0.str("edited_timestamp").and_then(timestamp::parse)
    }

    pub fn mentions(&self) -> Vec<User> {
        nested(&self.0, "mentions")
    }

    pub fn mention_roles(&self) -> Vec<&str> {
        self.0.strings("mention_roles").collect()
    }

    pub fn embeds(&self) -> Vec<Embed> {
        nested(&self.0, "embeds")
    }

    pub fn is_tts(&self) -> bool {
        self.0.boolean("tts").unwrap_or(false)
    }

    pub fn pinned(&self) -> bool {
        self.0.boolean("pinned").unwrap_or(false)
    }

    pub fn message_type(&self) -> i64 {
        self.0.int("message_type").unwrap_or(0)
    }
}
