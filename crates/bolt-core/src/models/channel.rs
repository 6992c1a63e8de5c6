use crate::{
    models::{model, nested, user::USER, User},
    schema::{DefaultValue, FieldSpec, Schema, Variant, VariantSet},
};

pub static CHANNEL_TYPES: VariantSet = VariantSet {
    name: "channel type",
    variants: &[
        ChannelType::GuildText.variant(),
        ChannelType::Dm.variant(),
        ChannelType::GuildVoice.variant(),
        ChannelType::GroupDm.variant(),
        ChannelType::GuildCategory.variant(),
    ],
};

/// Known channel kinds. All of them share the one [`CHANNEL`] table; fields
/// that do not apply to a kind (e.g. `bitrate` on a text channel) are simply
/// expected to be unset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelType {
    GuildText,
    Dm,
    GuildVoice,
    GroupDm,
    GuildCategory,
}

impl ChannelType {
    pub const ALL: [ChannelType; 5] = [
        ChannelType::GuildText,
        ChannelType::Dm,
        ChannelType::GuildVoice,
        ChannelType::GroupDm,
        ChannelType::GuildCategory,
    ];

    pub const fn code(self) -> i64 {
        match self {
            ChannelType::GuildText => 0,
            ChannelType::Dm => 1,
            ChannelType::GuildVoice => 2,
            ChannelType::GroupDm => 3,
            ChannelType::GuildCategory => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ChannelType::GuildText => "GUILD_TEXT",
            ChannelType::Dm => "DM",
            ChannelType::GuildVoice => "GUILD_VOICE",
            ChannelType::GroupDm => "GROUP_DM",
            ChannelType::GuildCategory => "GUILD_CATEGORY",
        }
    }

    pub const fn variant(self) -> Variant {
        Variant {
            code: self.code(),
            name: self.as_str(),
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn is_private(self) -> bool {
        matches!(self, ChannelType::Dm | ChannelType::GroupDm)
    }
}

pub static OVERWRITE: Schema = Schema {
    kind: "permission_overwrite",
    fields: &[
        FieldSpec::string("id").required(),
        FieldSpec::string("type").named("target").required(),
        FieldSpec::int("allow"),
        FieldSpec::int("deny"),
    ],
};

pub static CHANNEL: Schema = Schema {
    kind: "channel",
    fields: &[
        FieldSpec::string("id").required(),
        FieldSpec::variant("type", &CHANNEL_TYPES)
            .named("kind")
            .required(),
        FieldSpec::string("guild_id"),
        FieldSpec::int("position"),
        FieldSpec::records("permission_overwrites", &OVERWRITE).default(DefaultValue::EmptyList),
        FieldSpec::string("name").max_length(100),
        FieldSpec::string("topic").max_length(1024),
        FieldSpec::boolean("nsfw"),
        FieldSpec::string("last_message_id"),
        FieldSpec::int("bitrate"),
        FieldSpec::int("user_limit"),
        FieldSpec::int("rate_limit_per_user"),
        FieldSpec::records("recipients", &USER).default(DefaultValue::EmptyList),
        FieldSpec::string("icon"),
        FieldSpec::string("owner_id"),
        FieldSpec::string("application_id"),
        FieldSpec::string("parent_id"),
        FieldSpec::string("last_pin_timestamp"),
    ],
};

model!(
    /// A permission override attached to a guild channel.
    Overwrite => OVERWRITE
);

impl Overwrite {
    pub fn id(&self) -> &str {
        self.0.str("id").unwrap_or_default()
    }

    /// `"role"` or `"member"`.
    pub fn target(&self) -> &str {
        self.0.str("target").unwrap_or_default()
    }

    pub fn allow(&self) -> i64 {
        self.0.int("allow").unwrap_or(0)
    }

    pub fn deny(&self) -> i64 {
        self.0.int("deny").unwrap_or(0)
    }
}

model!(
    /// Any kind of channel: guild text/voice/category, DM or group DM.
    Channel => CHANNEL
);

impl Channel {
    pub fn id(&self) -> &str {
        self.0.str("id").unwrap_or_default()
    }

    pub fn kind(&self) -> ChannelType {
        self.0
            .variant("kind")
            .and_then(|v| ChannelType::from_code(v.code))
            .unwrap_or(ChannelType::GuildText)
    }

    pub fn guild_id(&self) -> Option<&str> {
        self.0.str("guild_id")
    }

    pub fn name(&self) -> Option<&str> {
        self.0.str("name")
    }

    pub fn topic(&self) -> Option<&str> {
        self.0.str("topic")
    }

    pub fn position(&self) -> Option<i64> {
        self.0.int("position")
    }

    pub fn nsfw(&self) -> Option<bool> {
        self.0.boolean("nsfw")
    }

    pub fn last_message_id(&self) -> Option<&str> {
        self.0.str("last_message_id")
    }

    pub fn bitrate(&self) -> Option<i64> {
        self.0.int("bitrate")
    }

    pub fn user_limit(&self) -> Option<i64> {
        self.0.int("user_limit")
    }

    pub fn rate_limit_per_user(&self) -> Option<i64> {
        self.0.int("rate_limit_per_user")
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.0.str("owner_id")
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.0.str("parent_id")
    }

    pub fn recipients(&self) -> Vec<User> {
        nested(&self.0, "recipients")
    }

    pub fn permission_overwrites(&self) -> Vec<Overwrite> {
        nested(&self.0, "permission_overwrites")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        models::Model,
        schema::{ModelError, Violation},
    };

    fn dm_recipient(id: &str, name: &str) -> Value {
        json!({
            "username": name,
            "discriminator": "9999",
            "id": id,
            "avatar": "33ecab261d4681afa4d85a04691c4a01"
        })
    }

    #[test]
    fn text_channel() {
        let raw = json!({
            "id": "41771983423143937",
            "guild_id": "41771983423143937",
            "name": "general",
            "type": 0,
            "position": 6,
            "permission_overwrites": [],
            "rate_limit_per_user": 2,
            "nsfw": true,
            "topic": "24/7 chat about how to gank Mike #2",
            "last_message_id": "155117677105512449",
            "parent_id": "399942396007890945"
        });

        let channel = Channel::marshal(&raw).expect("valid channel");
        assert_eq!(channel.id(), "41771983423143937");
        assert_eq!(channel.name(), Some("general"));
        assert_eq!(channel.last_message_id(), Some("155117677105512449"));
        assert_eq!(channel.kind(), ChannelType::GuildText);
        assert!(channel.recipients().is_empty());

        let out = channel.serialize();
        assert_eq!(out.get("type"), Some(&json!(0)));
        assert_eq!(out.get("topic"), raw.get("topic"));
        assert_eq!(out.get("nsfw"), Some(&json!(true)));
    }

    #[test]
    fn voice_channel_with_null_parent() {
        let raw = json!({
            "id": "155101607195836416",
            "guild_id": "41771983423143937",
            "name": "ROCKET CHEESE",
            "type": 2,
            "nsfw": false,
            "position": 5,
            "permission_overwrites": [],
            "bitrate": 64000,
            "user_limit": 0,
            "parent_id": null
        });

        let channel = Channel::marshal(&raw).expect("valid channel");
        assert_eq!(channel.kind(), ChannelType::GuildVoice);
        assert_eq!(channel.bitrate(), Some(64000));
        assert_eq!(channel.parent_id(), None);

        let out = channel.serialize();
        assert!(!out.contains_key("parent_id"));
        assert_eq!(out.get("nsfw"), Some(&json!(false)));
        assert_eq!(out.get("user_limit"), Some(&json!(0)));
    }

    #[test]
    fn dm_channel_marshals_recipients_as_users() {
        let raw = json!({
            "id": "319674150115610528",
            "last_message_id": "3343820033257021450",
            "type": 1,
            "recipients": [dm_recipient("82198898841029460", "test")]
        });

        let channel = Channel::marshal(&raw).expect("valid channel");
        assert_eq!(channel.kind(), ChannelType::Dm);
        assert!(channel.kind().is_private());
        let recipients = channel.recipients();
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].name(), "test");

        let out = Value::Object(channel.serialize());
        assert_eq!(out["recipients"][0]["id"], json!("82198898841029460"));
        assert_eq!(out["recipients"], raw["recipients"]);
    }

    #[test]
    fn group_dm_channel() {
        let raw = json!({
            "name": "Some test channel",
            "icon": null,
            "recipients": [
                dm_recipient("82198898841029460", "test"),
                dm_recipient("82198810841029460", "test2")
            ],
            "last_message_id": "3343820033257021450",
            "type": 3,
            "id": "319674150115710528",
            "owner_id": "82198810841029460"
        });

        let channel = Channel::marshal(&raw).expect("valid channel");
        assert_eq!(channel.kind(), ChannelType::GroupDm);
        assert_eq!(channel.recipients().len(), 2);
        assert_eq!(channel.owner_id(), Some("82198810841029460"));
    }

    #[test]
    fn category_without_recipients_gets_empty_list() {
        let raw = json!({
            "permission_overwrites": [],
            "name": "Test",
            "parent_id": null,
            "nsfw": false,
            "position": 0,
            "guild_id": "290926798629997250",
            "type": 4,
            "id": "399942396007890945"
        });

        let channel = Channel::marshal(&raw).expect("valid channel");
        assert_eq!(channel.kind(), ChannelType::GuildCategory);
        assert_eq!(channel.record().list("recipients"), Some(&[][..]));

        let out = channel.serialize();
        assert_eq!(out.get("recipients"), Some(&json!([])));
    }

    #[test]
    fn every_known_code_maps_to_a_distinct_kind() {
        let mut seen = Vec::new();
        for code in 0..5 {
            let channel =
                Channel::marshal(&json!({"id": "1", "type": code})).expect("known channel type");
            assert_eq!(channel.kind().code(), code);
            assert!(!seen.contains(&channel.kind()));
            seen.push(channel.kind());
        }
        assert_eq!(CHANNEL_TYPES.len(), ChannelType::ALL.len());
    }

    #[test]
    fn unknown_channel_type_is_rejected() {
        let err = Channel::marshal(&json!({"id": "1", "type": 13})).unwrap_err();
        assert_eq!(
            err,
            ModelError::Validation {
                kind: "channel",
                key: "type".to_string(),
                violation: Violation::UnknownDiscriminator { code: 13 },
            }
        );
    }

    #[test]
    fn voice_fields_on_text_channel_are_accepted() {
        let channel = Channel::marshal(&json!({"id": "1", "type": 0, "bitrate": 64000}))
            .expect("flat table accepts any optional field");
        assert_eq!(channel.kind(), ChannelType::GuildText);
        assert_eq!(channel.bitrate(), Some(64000));
    }

    #[test]
    fn bad_recipient_fails_the_channel() {
        let err = Channel::marshal(&json!({
            "id": "1",
            "type": 1,
            "recipients": [{"id": "2", "discriminator": "0001"}]
        }))
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingRequiredKey {
                kind: "user",
                key: "username".to_string()
            }
        );
    }

    #[test]
    fn overwrites_are_typed() {
        let channel = Channel::marshal(&json!({
            "id": "1",
            "type": 0,
            "permission_overwrites": [{"id": "9", "type": "role", "allow": 1024, "deny": 0}]
        }))
        .expect("valid channel");
        let ow = channel.permission_overwrites();
        assert_eq!(ow[0].target(), "role");
        assert_eq!(ow[0].allow(), 1024);
    }
}
