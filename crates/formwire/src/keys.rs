//! Attribute key tables for each wire format.
//!
//! Both formats carry the same logical schema. The text format spells
//! attributes out in full; the binary format uses short keys. An attribute a
//! format does not carry at all has no key (`None`) and is skipped in both
//! directions.

use formwire_pack::EncodingFormat;

/// An attribute name and its emptiness policy on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub name: &'static str,
    /// Leave the attribute out of encoded output when its value is empty,
    /// zero or false.
    pub omit_empty: bool,
}

/// Always-emitted attribute.
pub const fn key(name: &'static str) -> Option<Key> {
    Some(Key {
        name,
        omit_empty: false,
    })
}

/// Attribute omitted when empty.
pub const fn opt(name: &'static str) -> Option<Key> {
    Some(Key {
        name,
        omit_empty: true,
    })
}

/// Name of `key` for error messages, or `fallback` when the format lacks it.
pub(crate) fn key_name(key: Option<Key>, fallback: &'static str) -> &'static str {
    key.map_or(fallback, |k| k.name)
}

#[derive(Debug, Clone, Copy)]
pub struct FormKeys {
    pub title: Option<Key>,
    pub tags: Option<Key>,
    pub webhook_url: Option<Key>,
    pub fields: Option<Key>,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldKeys {
    pub field_type: Option<Key>,
    pub question: Option<Key>,
    pub reference: Option<Key>,
    pub description: Option<Key>,
    pub required: Option<Key>,
    pub tags: Option<Key>,
    pub value: Option<Key>,
    pub steps: Option<Key>,
    pub start_at_one: Option<Key>,
    pub labels: Option<Key>,
    pub left: Option<Key>,
    pub center: Option<Key>,
    pub right: Option<Key>,
    pub choices: Option<Key>,
    pub label: Option<Key>,
    pub button_text: Option<Key>,
    pub hide_marks: Option<Key>,
}

#[derive(Debug, Clone, Copy)]
pub struct AnswerKeys {
    pub field_id: Option<Key>,
    pub answer_type: Option<Key>,
    pub tags: Option<Key>,
    pub value: Option<Key>,
    pub amount: Option<Key>,
    pub label: Option<Key>,
    pub labels: Option<Key>,
    pub other: Option<Key>,
    pub empty_other: Option<Key>,
}

#[derive(Debug, Clone, Copy)]
pub struct ResultsKeys {
    pub uid: Option<Key>,
    /// Older documents name the identifier differently; read-only.
    pub legacy_id: Option<Key>,
    pub token: Option<Key>,
    pub answers: Option<Key>,
}

/// Complete key table for one wire format.
#[derive(Debug, Clone, Copy)]
pub struct Keys {
    pub format: EncodingFormat,
    pub form: FormKeys,
    pub field: FieldKeys,
    pub answer: AnswerKeys,
    pub results: ResultsKeys,
}

pub const JSON_KEYS: Keys = Keys {
    format: EncodingFormat::Json,
    form: FormKeys {
        title: key("title"),
        tags: opt("tags"),
        webhook_url: opt("webhook_submit_url"),
        fields: key("fields"),
    },
    field: FieldKeys {
        field_type: key("type"),
        question: key("question"),
        reference: opt("ref"),
        description: opt("description"),
        required: opt("required"),
        tags: opt("tags"),
        value: opt("value"),
        steps: key("steps"),
        start_at_one: opt("start_at_one"),
        labels: key("labels"),
        left: opt("left"),
        center: opt("center"),
        right: opt("right"),
        choices: key("choices"),
        label: key("label"),
        button_text: None,
        hide_marks: None,
    },
    answer: AnswerKeys {
        field_id: key("field_id"),
        answer_type: key("type"),
        tags: opt("tags"),
        value: key("value"),
        amount: key("amount"),
        label: key("label"),
        labels: key("labels"),
        other: key("other"),
        empty_other: None,
    },
    results: ResultsKeys {
        uid: key("uid"),
        legacy_id: key("id"),
        token: key("token"),
        answers: key("answers"),
    },
};

pub const BSON_KEYS: Keys = Keys {
    format: EncodingFormat::Bson,
    form: FormKeys {
        title: key("t"),
        tags: opt("g"),
        webhook_url: opt("w"),
        fields: key("f"),
    },
    field: FieldKeys {
        field_type: key("t"),
        question: key("q"),
        reference: opt("r"),
        description: key("d"),
        required: opt("req"),
        tags: opt("g"),
        value: None,
        steps: key("s"),
        start_at_one: opt("sao"),
        labels: opt("l"),
        left: opt("l"),
        center: opt("c"),
        right: opt("r"),
        choices: key("c"),
        label: key("l"),
        button_text: opt("bt"),
        hide_marks: opt("hm"),
    },
    answer: AnswerKeys {
        field_id: key("i"),
        answer_type: key("t"),
        tags: opt("g"),
        value: key("v"),
        amount: key("a"),
        label: opt("l"),
        labels: opt("l"),
        other: key("o"),
        empty_other: opt("eo"),
    },
    results: ResultsKeys {
        uid: key("i"),
        legacy_id: None,
        token: key("t"),
        answers: key("a"),
    },
};
