//! Variant registry: discriminator string to empty concrete instance.
//!
//! Each table is a closed list of `(tag, constructor)` pairs plus a fallback
//! constructor. Resolving never fails; an unknown tag yields the fallback,
//! which keeps the shared attributes decodable.

use formwire_pack::EncodingFormat;

use crate::answer::{AnswerValue, ChoiceValue, ChoicesValue, NumberValue};
use crate::field::{
    FieldKind, MultipleChoice, OpinionScale, Statement, TYPE_MULTIPLE_CHOICE, TYPE_OPINION_SCALE,
    TYPE_STATEMENT, TYPE_YES_NO,
};

pub type Constructor<V> = fn() -> V;

pub struct VariantTable<V: 'static> {
    name: &'static str,
    entries: &'static [(&'static str, Constructor<V>)],
    fallback: Constructor<V>,
}

impl<V: 'static> VariantTable<V> {
    pub const fn new(
        name: &'static str,
        entries: &'static [(&'static str, Constructor<V>)],
        fallback: Constructor<V>,
    ) -> Self {
        Self {
            name,
            entries,
            fallback,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn lookup(&self, tag: &str) -> Option<Constructor<V>> {
        self.entries
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, ctor)| *ctor)
    }

    pub fn is_known(&self, tag: &str) -> bool {
        self.lookup(tag).is_some()
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(t, _)| *t)
    }

    /// A freshly constructed, zero-valued instance for `tag`.
    pub fn resolve(&self, tag: &str) -> V {
        match self.lookup(tag) {
            Some(ctor) => ctor(),
            None => {
                tracing::debug!(table = self.name, tag, "unrecognised discriminator, using fallback");
                (self.fallback)()
            }
        }
    }
}

fn statement() -> FieldKind {
    FieldKind::Statement(Statement::default())
}

fn opinion_scale() -> FieldKind {
    FieldKind::OpinionScale(OpinionScale::default())
}

fn multiple_choice() -> FieldKind {
    FieldKind::MultipleChoice(MultipleChoice::default())
}

fn yes_no() -> FieldKind {
    FieldKind::YesNo
}

fn base_field() -> FieldKind {
    FieldKind::Base
}

pub static FIELD_VARIANTS: VariantTable<FieldKind> = VariantTable::new(
    "field",
    &[
        (TYPE_STATEMENT, statement),
        (TYPE_OPINION_SCALE, opinion_scale),
        (TYPE_MULTIPLE_CHOICE, multiple_choice),
    ],
    base_field,
);

/// The binary format additionally knows `yes_no`.
pub static BINARY_FIELD_VARIANTS: VariantTable<FieldKind> = VariantTable::new(
    "field (binary)",
    &[
        (TYPE_STATEMENT, statement),
        (TYPE_OPINION_SCALE, opinion_scale),
        (TYPE_MULTIPLE_CHOICE, multiple_choice),
        (TYPE_YES_NO, yes_no),
    ],
    base_field,
);

pub fn field_variants(format: EncodingFormat) -> &'static VariantTable<FieldKind> {
    match format {
        EncodingFormat::Json => &FIELD_VARIANTS,
        EncodingFormat::Bson => &BINARY_FIELD_VARIANTS,
    }
}

fn number() -> Option<AnswerValue> {
    Some(AnswerValue::Number(NumberValue::default()))
}

fn choice() -> Option<AnswerValue> {
    Some(AnswerValue::Choice(ChoiceValue::default()))
}

fn choices() -> Option<AnswerValue> {
    Some(AnswerValue::Choices(ChoicesValue::default()))
}

fn text() -> Option<AnswerValue> {
    Some(AnswerValue::Text(String::new()))
}

fn boolean() -> Option<AnswerValue> {
    Some(AnswerValue::Boolean(false))
}

fn no_value() -> Option<AnswerValue> {
    None
}

/// Answer value shapes, keyed by the answer's `type`. Unknown types carry no
/// value at all.
pub static ANSWER_VARIANTS: VariantTable<Option<AnswerValue>> = VariantTable::new(
    "answer",
    &[
        ("number", number),
        ("choice", choice),
        ("choices", choices),
        ("text", text),
        ("boolean", boolean),
    ],
    no_value,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_tags_resolve_to_their_variants() {
        assert!(matches!(FIELD_VARIANTS.resolve("statement"), FieldKind::Statement(_)));
        assert!(matches!(FIELD_VARIANTS.resolve("opinion_scale"), FieldKind::OpinionScale(_)));
        assert!(matches!(FIELD_VARIANTS.resolve("multiple_choice"), FieldKind::MultipleChoice(_)));
        assert_eq!(FIELD_VARIANTS.resolve("essay"), FieldKind::Base);
        assert_eq!(FIELD_VARIANTS.resolve(""), FieldKind::Base);
    }

    #[test]
    fn yes_no_is_binary_only() {
        assert_eq!(FIELD_VARIANTS.resolve("yes_no"), FieldKind::Base);
        assert_eq!(BINARY_FIELD_VARIANTS.resolve("yes_no"), FieldKind::YesNo);
        assert!(field_variants(EncodingFormat::Bson).is_known("yes_no"));
        assert!(!field_variants(EncodingFormat::Json).is_known("yes_no"));
    }

    #[test]
    fn answer_tags_resolve_to_empty_values() {
        assert_eq!(
            ANSWER_VARIANTS.resolve("number"),
            Some(AnswerValue::Number(NumberValue { amount: 0 }))
        );
        assert_eq!(ANSWER_VARIANTS.resolve("boolean"), Some(AnswerValue::Boolean(false)));
        assert_eq!(ANSWER_VARIANTS.resolve("text"), Some(AnswerValue::Text(String::new())));
        assert!(matches!(
            ANSWER_VARIANTS.resolve("choice"),
            Some(AnswerValue::Choice(ChoiceValue { empty_other: true, .. }))
        ));
        assert!(matches!(
            ANSWER_VARIANTS.resolve("choices"),
            Some(AnswerValue::Choices(_))
        ));
        assert_eq!(ANSWER_VARIANTS.resolve("essay"), None);
    }

    #[test]
    fn tables_list_their_tags() {
        assert_eq!(
            ANSWER_VARIANTS.tags().collect::<Vec<_>>(),
            ["number", "choice", "choices", "text", "boolean"]
        );
        assert_eq!(BINARY_FIELD_VARIANTS.tags().count(), 4);
        assert_eq!(FIELD_VARIANTS.name(), "field");
    }
}
