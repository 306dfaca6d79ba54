//! Answers in a results submission.

use std::fmt;

use crate::error::DecodeError;
use crate::format::Record;
use crate::keys::Keys;
use crate::node::{Doc, Node, ObjectBuilder};
use crate::registry::{VariantTable, ANSWER_VARIANTS};
use crate::two_pass::{decode_polymorphic, Polymorphic};
use crate::value::{encode_value, fill_value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberValue {
    pub amount: i64,
}

/// A single pick, optionally replaced by a free-form "other" entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceValue {
    pub label: String,
    pub other: String,
    /// No other entry was given. Distinct from an empty `other`.
    pub empty_other: bool,
}

impl Default for ChoiceValue {
    fn default() -> Self {
        Self {
            label: String::new(),
            other: String::new(),
            empty_other: true,
        }
    }
}

impl ChoiceValue {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_other(mut self, other: impl Into<String>) -> Self {
        self.other = other.into();
        self.empty_other = false;
        self
    }
}

/// Several picks plus an optional "other" entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicesValue {
    pub labels: Vec<String>,
    pub other: String,
    pub empty_other: bool,
}

impl Default for ChoicesValue {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            other: String::new(),
            empty_other: true,
        }
    }
}

impl ChoicesValue {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_other(mut self, other: impl Into<String>) -> Self {
        self.other = other.into();
        self.empty_other = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Number(NumberValue),
    Boolean(bool),
    Text(String),
    Choice(ChoiceValue),
    Choices(ChoicesValue),
}

impl AnswerValue {
    /// The answer type tag this value is stored under.
    pub fn type_name(&self) -> &'static str {
        match self {
            AnswerValue::Number(_) => "number",
            AnswerValue::Boolean(_) => "boolean",
            AnswerValue::Text(_) => "text",
            AnswerValue::Choice(_) => "choice",
            AnswerValue::Choices(_) => "choices",
        }
    }
}

impl From<NumberValue> for AnswerValue {
    fn from(v: NumberValue) -> Self {
        AnswerValue::Number(v)
    }
}

impl From<ChoiceValue> for AnswerValue {
    fn from(v: ChoiceValue) -> Self {
        AnswerValue::Choice(v)
    }
}

impl From<ChoicesValue> for AnswerValue {
    fn from(v: ChoicesValue) -> Self {
        AnswerValue::Choices(v)
    }
}

impl From<bool> for AnswerValue {
    fn from(v: bool) -> Self {
        AnswerValue::Boolean(v)
    }
}

impl From<String> for AnswerValue {
    fn from(v: String) -> Self {
        AnswerValue::Text(v)
    }
}

impl From<&str> for AnswerValue {
    fn from(v: &str) -> Self {
        AnswerValue::Text(v.to_owned())
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) => write!(f, "{}", n.amount),
            AnswerValue::Boolean(b) => write!(f, "{b}"),
            AnswerValue::Text(t) => f.write_str(t),
            AnswerValue::Choice(c) if !c.empty_other => f.write_str(&c.other),
            AnswerValue::Choice(c) => f.write_str(&c.label),
            AnswerValue::Choices(c) if !c.empty_other => f.write_str(&c.other),
            AnswerValue::Choices(c) => f.write_str(&c.labels.join(",")),
        }
    }
}

/// One answer. `value` is `None` when `answer_type` is not a known type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsAnswer {
    pub field_id: i64,
    pub answer_type: String,
    pub tags: Vec<String>,
    pub value: Option<AnswerValue>,
}

impl ResultsAnswer {
    /// An answer whose type tag follows from `value`.
    pub fn new(field_id: i64, value: impl Into<AnswerValue>) -> Self {
        let value = value.into();
        Self {
            field_id,
            answer_type: value.type_name().to_owned(),
            tags: Vec::new(),
            value: Some(value),
        }
    }

    pub fn number(field_id: i64, amount: i64) -> Self {
        Self::new(field_id, NumberValue { amount })
    }
}

impl fmt::Display for ResultsAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => fmt::Display::fmt(value, f),
            None => Ok(()),
        }
    }
}

impl Polymorphic for ResultsAnswer {
    type Header = ResultsAnswer;
    type Variant = Option<AnswerValue>;

    fn read_header<N: Node>(doc: &Doc<'_, N>, keys: &Keys) -> Result<ResultsAnswer, DecodeError> {
        let k = &keys.answer;
        Ok(ResultsAnswer {
            field_id: doc.required_int64(k.field_id)?,
            answer_type: doc.string(k.answer_type)?,
            tags: doc.strings(k.tags)?,
            value: None,
        })
    }

    fn tag(header: &ResultsAnswer) -> &str {
        &header.answer_type
    }

    fn variants(_keys: &Keys) -> &'static VariantTable<Option<AnswerValue>> {
        &ANSWER_VARIANTS
    }

    fn read_variant<N: Node>(
        variant: &mut Option<AnswerValue>,
        doc: &Doc<'_, N>,
        keys: &Keys,
    ) -> Result<(), DecodeError> {
        fill_value(variant, doc.raw(keys.answer.value), keys)
    }

    fn assemble(mut header: ResultsAnswer, variant: Option<AnswerValue>) -> ResultsAnswer {
        header.value = variant;
        header
    }
}

impl Record for ResultsAnswer {
    const NAME: &'static str = "answer";

    fn read<N: Node>(doc: Doc<'_, N>, keys: &Keys) -> Result<Self, DecodeError> {
        decode_polymorphic(&doc, keys)
    }

    fn write<N: Node>(&self, keys: &Keys) -> N {
        let k = &keys.answer;
        let mut b = ObjectBuilder::new();
        b.integer(k.field_id, self.field_id);
        b.string(k.answer_type, &self.answer_type);
        b.strings(k.tags, &self.tags);
        b.put(k.value, encode_value(self.value.as_ref(), keys));
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Bson, Json};

    fn json(answer: &ResultsAnswer) -> String {
        String::from_utf8(answer.to_bytes::<Json>().unwrap()).unwrap()
    }

    #[test]
    fn known_json_encodings() {
        assert_eq!(
            json(&ResultsAnswer::number(0, 5)),
            r#"{"field_id":0,"type":"number","value":{"amount":5}}"#
        );
        assert_eq!(
            json(&ResultsAnswer::new(0, ChoiceValue::new("val"))),
            r#"{"field_id":0,"type":"choice","value":{"label":"val"}}"#
        );
    }

    #[test]
    fn field_id_in_exponent_notation() {
        let bytes = br#"{"field_id":1.774766e+06,"type":"number","value":{"amount":1111111}}"#;
        let answer = ResultsAnswer::from_bytes::<Json>(bytes).unwrap();
        assert_eq!(answer.field_id, 1_774_766);
        assert_eq!(answer.value, Some(AnswerValue::Number(NumberValue { amount: 1_111_111 })));
    }

    #[test]
    fn unknown_type_has_no_value() {
        let bytes = br#"{"field_id":3,"type":"essay","value":{"words":["a"]}}"#;
        let answer = ResultsAnswer::from_bytes::<Json>(bytes).unwrap();
        assert_eq!(answer.answer_type, "essay");
        assert_eq!(answer.value, None);
        assert_eq!(answer.to_string(), "");
    }

    #[test]
    fn round_trips_every_value_shape() {
        let answers = [
            ResultsAnswer::number(1, -12),
            ResultsAnswer::new(2, true),
            ResultsAnswer::new(3, false),
            ResultsAnswer::new(4, "free text"),
            ResultsAnswer::new(5, ChoiceValue::new("a")),
            ResultsAnswer::new(6, ChoiceValue::new("a").with_other("")),
            ResultsAnswer::new(7, ChoicesValue::new(["a", "b"])),
            ResultsAnswer::new(8, ChoicesValue::new(["a"]).with_other("c")),
        ];
        for answer in answers {
            let via_json = ResultsAnswer::from_bytes::<Json>(&answer.to_bytes::<Json>().unwrap());
            assert_eq!(via_json.unwrap(), answer);
            let via_bson = ResultsAnswer::from_bytes::<Bson>(&answer.to_bytes::<Bson>().unwrap());
            assert_eq!(via_bson.unwrap(), answer);
        }
    }

    #[test]
    fn display() {
        assert_eq!(ResultsAnswer::number(1, 42).to_string(), "42");
        assert_eq!(ResultsAnswer::new(1, true).to_string(), "true");
        assert_eq!(ResultsAnswer::new(1, "hi").to_string(), "hi");
        assert_eq!(ResultsAnswer::new(1, ChoiceValue::new("a")).to_string(), "a");
        assert_eq!(
            ResultsAnswer::new(1, ChoiceValue::new("a").with_other("b")).to_string(),
            "b"
        );
        assert_eq!(ResultsAnswer::new(1, ChoicesValue::new(["x", "y"])).to_string(), "x,y");
        assert_eq!(
            ResultsAnswer::new(1, ChoicesValue::new(["x"]).with_other("z")).to_string(),
            "z"
        );
    }
}
