//! Chat-platform record kinds.
//!
//! Each kind is a `static` field table plus a thin typed wrapper around the
//! generic [`Record`]. The wrappers only add named accessors; all validation
//! lives in the tables.

pub mod channel;
pub mod embed;
pub mod guild;
pub mod message;
pub mod timestamp;
pub mod user;

use serde_json::{Map, Value as Json};

use crate::schema::{self, ModelError, Record, Schema, SchemaError, SchemaRegistry};

pub use channel::{Channel, ChannelType, Overwrite};
pub use embed::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia, EmbedProvider};
pub use guild::{Emoji, Guild, Role};
pub use message::{Message, NewMessage};
pub use user::User;

/// A typed view over one record kind.
pub trait Model: Sized {
    fn schema() -> &'static Schema;

    fn from_record(record: Record) -> Self;

    fn record(&self) -> &Record;

    fn marshal(raw: &Json) -> Result<Self, ModelError> {
        schema::marshal(raw, Self::schema()).map(Self::from_record)
    }

    fn serialize(&self) -> Map<String, Json> {
        schema::serialize(self.record())
    }
}

/// Declares a newtype wrapper implementing [`Model`] for a static table.
macro_rules! model {
    ($(#[$meta:meta])* $name:ident => $schema:path) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name(crate::schema::Record);

        impl crate::models::Model for $name {
            fn schema() -> &'static crate::schema::Schema {
                &$schema
            }

            fn from_record(record: crate::schema::Record) -> Self {
                Self(record)
            }

            fn record(&self) -> &crate::schema::Record {
                &self.0
            }
        }
    };
}
pub(crate) use model;

/// Wrap each nested record of a list field in its typed view.
pub(crate) fn nested<M: Model>(record: &Record, name: &str) -> Vec<M> {
    record.records(name).cloned().map(M::from_record).collect()
}

impl SchemaRegistry {
    /// Registry of every record kind the platform sends.
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::new([
            User::schema(),
            Channel::schema(),
            Embed::schema(),
            Guild::schema(),
            Message::schema(),
            NewMessage::schema(),
        ])
    }
}
