use crate::{
    models::model,
    schema::{FieldSpec, Schema},
};

pub static USER: Schema = Schema {
    kind: "user",
    fields: &[
        FieldSpec::string("id").required(),
        FieldSpec::string("username").named("name").required(),
        FieldSpec::string("discriminator").required(),
        FieldSpec::string("avatar"),
        FieldSpec::boolean("bot"),
        FieldSpec::boolean("mfa_enabled"),
        FieldSpec::string("locale"),
        FieldSpec::boolean("verified"),
        FieldSpec::string("email"),
        FieldSpec::int("flags"),
        FieldSpec::int("premium_type"),
    ],
};

model!(
    /// A platform account. The wire `username` is exposed as [`User::name`].
    User => USER
);

impl User {
    /// Snowflake id, kept as the decimal string it arrived as.
    pub fn id(&self) -> &str {
        self.0.str("id").unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.0.str("name").unwrap_or_default()
    }

    pub fn discriminator(&self) -> &str {
        self.0.str("discriminator").unwrap_or_default()
    }

    /// `name#discriminator`, the way the client displays it.
    pub fn tag(&self) -> String {
        format!("{}#{}", self.name(), self.discriminator())
    }

    pub fn avatar(&self) -> Option<&str> {
        self.0.str("avatar")
    }

    pub fn is_bot(&self) -> bool {
        self.0.boolean("bot").unwrap_or(false)
    }

    pub fn email(&self) -> Option<&str> {
        self.0.str("email")
    }

    pub fn verified(&self) -> Option<bool> {
        self.0.boolean("verified")
    }

    pub fn locale(&self) -> Option<&str> {
        self.0.str("locale")
    }

    pub fn flags(&self) -> Option<i64> {
        self.0.int("flags")
    }

    pub fn premium_type(&self) -> Option<i64> {
        self.0.int("premium_type")
    }

    pub fn mention(&self) -> String {
        format!("<@{}>", self.id())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::{models::Model, schema::ModelError};

    fn nelly() -> Value {
        json!({
            "id": "80351110224678912",
            "username": "Nelly",
            "discriminator": "1337",
            "avatar": "8342729096ea3675442027381ff50dfe",
            "verified": true,
            "email": "nelly@discordapp.com",
            "flags": 64,
            "premium_type": 1
        })
    }

    #[test]
    fn marshals_username_into_name() {
        let user = User::marshal(&nelly()).expect("valid user");
        assert_eq!(user.id(), "80351110224678912");
        assert_eq!(user.name(), "Nelly");
        assert_eq!(user.email(), Some("nelly@discordapp.com"));
        assert_eq!(user.tag(), "Nelly#1337");
        assert_eq!(user.flags(), Some(64));
        assert!(!user.is_bot());
    }

    #[test]
    fn serializes_name_back_as_username() {
        let raw = nelly();
        let out = User::marshal(&raw).expect("valid user").serialize();
        assert_eq!(out.get("username"), Some(&json!("Nelly")));
        assert!(!out.contains_key("name"));
        assert_eq!(Value::Object(out), raw);
    }

    #[test]
    fn snowflakes_are_not_numbers() {
        let mut raw = nelly();
        raw["id"] = json!(80351110224678912u64);
        let err = User::marshal(&raw).unwrap_err();
        assert_eq!(err.key(), Some("id"));
    }

    #[test]
    fn each_identity_field_is_required() {
        for key in ["id", "username", "discriminator"] {
            let mut raw = nelly();
            if let Some(obj) = raw.as_object_mut() {
                obj.remove(key);
            }
            assert_eq!(
                User::marshal(&raw).unwrap_err(),
                ModelError::MissingRequiredKey {
                    kind: "user",
                    key: key.to_string()
                }
            );
        }
    }
}
