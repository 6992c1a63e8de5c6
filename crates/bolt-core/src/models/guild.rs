use crate::{
    models::{channel::CHANNEL, model, nested, user::USER, Channel, Model, User},
    schema::{DefaultValue, FieldSpec, ItemKind, Schema},
};

pub static ROLE: Schema = Schema {
    kind: "role",
    fields: &[
        FieldSpec::string("id").required(),
        FieldSpec::string("name").required().max_length(100),
        FieldSpec::int("color"),
        FieldSpec::boolean("hoist"),
        FieldSpec::int("position"),
        FieldSpec::int("permissions"),
        FieldSpec::boolean("managed"),
        FieldSpec::boolean("mentionable"),
    ],
};

pub static EMOJI: Schema = Schema {
    kind: "emoji",
    fields: &[
        // Null for unicode emoji.
        FieldSpec::string("id"),
        FieldSpec::string("name"),
        FieldSpec::list("roles", ItemKind::Str).default(DefaultValue::EmptyList),
        FieldSpec::record("user", &USER),
        FieldSpec::boolean("require_colons"),
        FieldSpec::boolean("managed"),
        FieldSpec::boolean("animated"),
    ],
};

pub static GUILD: Schema = Schema {
    kind: "guild",
    fields: &[
        FieldSpec::string("id").required(),
        FieldSpec::string("name").required().max_length(100),
        FieldSpec::string("icon"),
        FieldSpec::string("splash"),
        FieldSpec::string("owner_id"),
        FieldSpec::string("application_id"),
        FieldSpec::string("region"),
        FieldSpec::string("afk_channel_id"),
        FieldSpec::int("afk_timeout"),
        FieldSpec::boolean("embed_enabled"),
        FieldSpec::string("embed_channel_id"),
        FieldSpec::int("verification_level"),
        FieldSpec::int("default_message_notifications"),
        FieldSpec::int("explicit_content_filter"),
        FieldSpec::int("mfa_level"),
        FieldSpec::boolean("widget_enabled"),
        FieldSpec::string("widget_channel_id"),
        FieldSpec::records("roles", &ROLE).default(DefaultValue::EmptyList),
        FieldSpec::records("emojis", &EMOJI).default(DefaultValue::EmptyList),
        FieldSpec::list("features", ItemKind::Str).default(DefaultValue::EmptyList),
        FieldSpec::records("channels", &CHANNEL).default(DefaultValue::EmptyList),
        FieldSpec::boolean("unavailable"),
        FieldSpec::int("member_count"),
    ],
};

model!(Role => ROLE);
model!(Emoji => EMOJI);
model!(
    /// A server: its settings plus the roles, emojis and channels it carries.
    Guild => GUILD
);

impl Role {
    pub fn id(&self) -> &str {
        self.0.str("id").unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.0.str("name").unwrap_or_default()
    }

    pub fn permissions(&self) -> i64 {
        self.0.int("permissions").unwrap_or(0)
    }

    pub fn position(&self) -> Option<i64> {
        self.0.int("position")
    }
}

impl Emoji {
    pub fn id(&self) -> Option<&str> {
        self.0.str("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.0.str("name")
    }

    pub fn role_ids(&self) -> Vec<&str> {
        self.0.strings("roles").collect()
    }

    pub fn creator(&self) -> Option<User> {
        self.0.record("user").cloned().map(User::from_record)
    }

    pub fn animated(&self) -> bool {
        self.0.boolean("animated").unwrap_or(false)
    }
}

impl Guild {
    pub fn id(&self) -> &str {
        self.0.str("id").unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.0.str("name").unwrap_or_default()
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.0.str("owner_id")
    }

    pub fn region(&self) -> Option<&str> {
        self.0.str("region")
    }

    pub fn afk_timeout(&self) -> Option<i64> {
        self.0.int("afk_timeout")
    }

    pub fn verification_level(&self) -> Option<i64> {
        self.0.int("verification_level")
    }

    pub fn features(&self) -> Vec<&str> {
        self.0.strings("features").collect()
    }

    pub fn roles(&self) -> Vec<Role> {
        nested(&self.0, "roles")
    }

    pub fn emojis(&self) -> Vec<Emoji> {
        nested(&self.0, "emojis")
    }

    pub fn channels(&self) -> Vec<Channel> {
        nested(&self.0, "channels")
    }

    pub fn unavailable(&self) -> bool {
        self.0.boolean("unavailable").unwrap_or(false)
    }
}
