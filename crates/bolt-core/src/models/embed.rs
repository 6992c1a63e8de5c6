use crate::{
    models::{model, nested, Model},
    schema::{DefaultValue, FieldSpec, Schema},
};

pub const TITLE_LIMIT: usize = 256;
pub const DESCRIPTION_LIMIT: usize = 2048;
pub const FIELD_COUNT_LIMIT: usize = 25;
pub const FIELD_NAME_LIMIT: usize = 256;
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const FOOTER_TEXT_LIMIT: usize = 2048;
pub const AUTHOR_NAME_LIMIT: usize = 256;

pub static EMBED_FOOTER: Schema = Schema {
    kind: "embed_footer",
    fields: &[
        FieldSpec::string("text").required().max_length(FOOTER_TEXT_LIMIT),
        FieldSpec::string("icon_url"),
        FieldSpec::string("proxy_icon_url"),
    ],
};

/// Shared by `image`, `thumbnail` and `video`.
pub static EMBED_MEDIA: Schema = Schema {
    kind: "embed_media",
    fields: &[
        FieldSpec::string("url"),
        FieldSpec::string("proxy_url"),
        FieldSpec::int("height"),
        FieldSpec::int("width"),
    ],
};

pub static EMBED_PROVIDER: Schema = Schema {
    kind: "embed_provider",
    fields: &[FieldSpec::string("name"), FieldSpec::string("url")],
};

pub static EMBED_AUTHOR: Schema = Schema {
    kind: "embed_author",
    fields: &[
        FieldSpec::string("name").max_length(AUTHOR_NAME_LIMIT),
        FieldSpec::string("url"),
        FieldSpec::string("icon_url"),
        FieldSpec::string("proxy_icon_url"),
    ],
};

pub static EMBED_FIELD: Schema = Schema {
    kind: "embed_field",
    fields: &[
        FieldSpec::string("name").required().max_length(FIELD_NAME_LIMIT),
        FieldSpec::string("value").required().max_length(FIELD_VALUE_LIMIT),
        FieldSpec::boolean("inline").default(DefaultValue::Bool(false)),
    ],
};

pub static EMBED: Schema = Schema {
    kind: "embed",
    fields: &[
        FieldSpec::string("title").max_length(TITLE_LIMIT),
        FieldSpec::string("type"),
        FieldSpec::string("description").max_length(DESCRIPTION_LIMIT),
        FieldSpec::string("url"),
        // ISO-8601, kept opaque.
        FieldSpec::string("timestamp"),
        FieldSpec::int("color"),
        FieldSpec::record("footer", &EMBED_FOOTER),
        FieldSpec::record("image", &EMBED_MEDIA),
        FieldSpec::record("thumbnail", &EMBED_MEDIA),
        FieldSpec::record("video", &EMBED_MEDIA),
        FieldSpec::record("provider", &EMBED_PROVIDER),
        FieldSpec::record("author", &EMBED_AUTHOR),
        FieldSpec::records("fields", &EMBED_FIELD)
            .max_items(FIELD_COUNT_LIMIT)
            .default(DefaultValue::EmptyList),
    ],
};

model!(EmbedFooter => EMBED_FOOTER);
model!(EmbedMedia => EMBED_MEDIA);
model!(EmbedProvider => EMBED_PROVIDER);
model!(EmbedAuthor => EMBED_AUTHOR);
model!(EmbedField => EMBED_FIELD);
model!(
    /// Rich content block attached to a message.
    Embed => EMBED
);

impl EmbedFooter {
    pub fn text(&self) -> &str {
        self.0.str("text").unwrap_or_default()
    }

    pub fn icon_url(&self) -> Option<&str> {
        self.0.str("icon_url")
    }
}

impl EmbedMedia {
    pub fn url(&self) -> Option<&str> {
        self.0.str("url")
    }

    /// `(width, height)` when both are known.
    pub fn size(&self) -> Option<(i64, i64)> {
        Some((self.0.int("width")?, self.0.int("height")?))
    }
}

impl EmbedProvider {
    pub fn name(&self) -> Option<&str> {
        self.0.str("name")
    }
}

impl EmbedAuthor {
    pub fn name(&self) -> Option<&str> {
        self.0.str("name")
    }

    pub fn url(&self) -> Option<&str> {
        self.0.str("url")
    }
}

impl EmbedField {
    pub fn name(&self) -> &str {
        self.0.str("name").unwrap_or_default()
    }

    pub fn value(&self) -> &str {
        self.0.str("value").unwrap_or_default()
    }

    pub fn inline(&self) -> bool {
        self.0.boolean("inline").unwrap_or(false)
    }
}

impl Embed {
    pub fn title(&self) -> Option<&str> {
        self.0.str("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.0.str("description")
    }

    pub fn url(&self) -> Option<&str> {
        self.0.str("url")
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.0.str("timestamp")
    }

    pub fn color(&self) -> Option<i64> {
        self.0.int("color")
    }

    pub fn footer(&self) -> Option<EmbedFooter> {
        self.0.record("footer").cloned().map(EmbedFooter::from_record)
    }

    pub fn image(&self) -> Option<EmbedMedia> {
        self.0.record("image").cloned().map(EmbedMedia::from_record)
    }

    pub fn thumbnail(&self) -> Option<EmbedMedia> {
        self.0.record("thumbnail").cloned().map(EmbedMedia::from_record)
    }

    pub fn video(&self) -> Option<EmbedMedia> {
        self.0.record("video").cloned().map(EmbedMedia::from_record)
    }

    pub fn provider(&self) -> Option<EmbedProvider> {
        self.0.record("provider").cloned().map(EmbedProvider::from_record)
    }

    pub fn author(&self) -> Option<EmbedAuthor> {
        self.0.record("author").cloned().map(EmbedAuthor::from_record)
    }

    pub fn fields(&self) -> Vec<EmbedField> {
        nested(&self.0, "fields")
    }
}
