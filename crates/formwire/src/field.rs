//! Form fields: a shared header plus one of a closed set of variants.

use serde_json::Value;

use crate::collection::decode_list;
use crate::error::DecodeError;
use crate::format::Record;
use crate::keys::{key_name, FieldKeys, Keys};
use crate::node::{Doc, Node, ObjectBuilder};
use crate::registry::{field_variants, VariantTable};
use crate::two_pass::{decode_polymorphic, Polymorphic};

pub const TYPE_STATEMENT: &str = "statement";
pub const TYPE_OPINION_SCALE: &str = "opinion_scale";
pub const TYPE_MULTIPLE_CHOICE: &str = "multiple_choice";
pub const TYPE_YES_NO: &str = "yes_no";

/// Text only, nothing to answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statement {
    /// Binary format only.
    pub button_text: String,
    /// Binary format only.
    pub hide_marks: bool,
}

/// Labels for the left, center and right of an opinion scale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpinionLabels {
    pub left: String,
    pub center: String,
    pub right: String,
}

/// A scale from 0 (or 1) to `steps - 1` (or `steps`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpinionScale {
    pub steps: i64,
    pub start_at_one: bool,
    pub labels: OpinionLabels,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipleChoiceChoice {
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipleChoice {
    pub choices: Vec<MultipleChoiceChoice>,
}

/// Variant payload of a [`Field`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldKind {
    Statement(Statement),
    OpinionScale(OpinionScale),
    MultipleChoice(MultipleChoice),
    YesNo,
    /// The tag was not recognised; only the shared attributes were read.
    #[default]
    Base,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Statement(_) => TYPE_STATEMENT,
            FieldKind::OpinionScale(_) => TYPE_OPINION_SCALE,
            FieldKind::MultipleChoice(_) => TYPE_MULTIPLE_CHOICE,
            FieldKind::YesNo => TYPE_YES_NO,
            FieldKind::Base => "base",
        }
    }

    fn read<N: Node>(&mut self, doc: &Doc<'_, N>, k: &FieldKeys) -> Result<(), DecodeError> {
        match self {
            FieldKind::Statement(s) => {
                s.button_text = doc.string(k.button_text)?;
                s.hide_marks = doc.boolean(k.hide_marks)?;
            }
            FieldKind::OpinionScale(o) => {
                o.steps = doc.int64(k.steps)?;
                o.start_at_one = doc.boolean(k.start_at_one)?;
                if let Some(labels) = doc.child(k.labels)? {
                    o.labels = OpinionLabels {
                        left: labels.string(k.left)?,
                        center: labels.string(k.center)?,
                        right: labels.string(k.right)?,
                    };
                }
            }
            FieldKind::MultipleChoice(m) => {
                let name = key_name(k.choices, "choices");
                m.choices = decode_list(doc.array(k.choices)?, |item| {
                    let choice = Doc::new(item, name)?;
                    Ok(MultipleChoiceChoice {
                        label: choice.string(k.label)?,
                    })
                })?;
            }
            FieldKind::YesNo | FieldKind::Base => {}
        }
        Ok(())
    }

    fn write<N: Node>(&self, b: &mut ObjectBuilder<N>, k: &FieldKeys) {
        match self {
            FieldKind::Statement(s) => {
                b.string(k.button_text, &s.button_text);
                b.boolean(k.hide_marks, s.hide_marks);
            }
            FieldKind::OpinionScale(o) => {
                b.integer(k.steps, o.steps);
                b.boolean(k.start_at_one, o.start_at_one);
                let mut labels = ObjectBuilder::new();
                labels.string(k.left, &o.labels.left);
                labels.string(k.center, &o.labels.center);
                labels.string(k.right, &o.labels.right);
                b.child(k.labels, labels);
            }
            FieldKind::MultipleChoice(m) => {
                let choices = m
                    .choices
                    .iter()
                    .map(|c| {
                        let mut choice = ObjectBuilder::new();
                        choice.string(k.label, &c.label);
                        choice.build()
                    })
                    .collect();
                b.array(k.choices, choices);
            }
            FieldKind::YesNo | FieldKind::Base => {}
        }
    }
}

/// A single field of a [`Form`](crate::form::Form).
///
/// `field_type` is the discriminator exactly as it appeared on the wire;
/// `kind` is the variant it resolved to. The constructors keep the two in
/// step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    pub field_type: String,
    pub question: String,
    pub reference: String,
    pub description: String,
    pub required: bool,
    pub tags: Vec<String>,
    /// Pairs the field with a user's answer. Text format only. A JSON null
    /// is not written and reads back as `None`.
    pub value: Option<Value>,
    pub kind: FieldKind,
}

impl Field {
    /// A field of an arbitrary type carrying only the shared attributes.
    pub fn new(field_type: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            question: question.into(),
            ..Self::default()
        }
    }

    fn with_kind(question: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            field_type: kind.name().to_owned(),
            question: question.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn statement(question: impl Into<String>) -> Self {
        Self::with_kind(question, FieldKind::Statement(Statement::default()))
    }

    pub fn opinion_scale(question: impl Into<String>, steps: i64) -> Self {
        Self::with_kind(
            question,
            FieldKind::OpinionScale(OpinionScale {
                steps,
                ..OpinionScale::default()
            }),
        )
    }

    pub fn multiple_choice<I, S>(question: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices = labels
            .into_iter()
            .map(|l| MultipleChoiceChoice { label: l.into() })
            .collect();
        Self::with_kind(question, FieldKind::MultipleChoice(MultipleChoice { choices }))
    }

    pub fn yes_no(question: impl Into<String>) -> Self {
        Self::with_kind(question, FieldKind::YesNo)
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: Option<Value>) {
        self.value = value;
    }
}

impl Polymorphic for Field {
    type Header = Field;
    type Variant = FieldKind;

    fn read_header<N: Node>(doc: &Doc<'_, N>, keys: &Keys) -> Result<Field, DecodeError> {
        let k = &keys.field;
        Ok(Field {
            field_type: doc.string(k.field_type)?,
            question: doc.string(k.question)?,
            reference: doc.string(k.reference)?,
            description: doc.string(k.description)?,
            required: doc.boolean(k.required)?,
            tags: doc.strings(k.tags)?,
            value: doc.field(k.value).map(|v| v.to_json()),
            kind: FieldKind::Base,
        })
    }

    fn tag(header: &Field) -> &str {
        &header.field_type
    }

    fn variants(keys: &Keys) -> &'static VariantTable<FieldKind> {
        field_variants(keys.format)
    }

    fn read_variant<N: Node>(
        variant: &mut FieldKind,
        doc: &Doc<'_, N>,
        keys: &Keys,
    ) -> Result<(), DecodeError> {
        variant.read(doc, &keys.field)
    }

    fn assemble(mut header: Field, variant: FieldKind) -> Field {
        header.kind = variant;
        header
    }
}

impl Record for Field {
    const NAME: &'static str = "field";

    fn read<N: Node>(doc: Doc<'_, N>, keys: &Keys) -> Result<Self, DecodeError> {
        decode_polymorphic(&doc, keys)
    }

    fn write<N: Node>(&self, keys: &Keys) -> N {
        let k = &keys.field;
        let mut b = ObjectBuilder::new();
        b.string(k.field_type, &self.field_type);
        b.string(k.question, &self.question);
        b.string(k.reference, &self.reference);
        b.string(k.description, &self.description);
        b.boolean(k.required, self.required);
        b.strings(k.tags, &self.tags);
        if let Some(value) = self.value.as_ref().filter(|v| !v.is_null()) {
            b.put(k.value, N::from_json(value));
        }
        self.kind.write(&mut b, k);
        b.build()
    }
}
