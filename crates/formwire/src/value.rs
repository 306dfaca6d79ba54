//! Answer values whose shape depends on the enclosing answer's type tag.
//!
//! The outer answer has already been read by the time its value is, so the
//! tag is known and the value sub-document is decoded exactly once.

use crate::answer::{AnswerValue, ChoiceValue, ChoicesValue};
use crate::error::DecodeError;
use crate::keys::{key_name, AnswerKeys, Keys};
use crate::node::{mismatch, Doc, Node, ObjectBuilder};
use crate::registry::ANSWER_VARIANTS;

/// Decodes the value of an answer typed `tag`.
///
/// Unknown tags yield `None` without looking at `raw`. For known tags an
/// absent value is an error and an explicit null yields the empty value,
/// except for numbers, which always need an `amount`.
pub fn decode_value<N: Node>(
    tag: &str,
    raw: Option<&N>,
    keys: &Keys,
) -> Result<Option<AnswerValue>, DecodeError> {
    let mut value = ANSWER_VARIANTS.resolve(tag);
    fill_value(&mut value, raw, keys)?;
    Ok(value)
}

/// Fills a value freshly resolved from the registry.
pub fn fill_value<N: Node>(
    value: &mut Option<AnswerValue>,
    raw: Option<&N>,
    keys: &Keys,
) -> Result<(), DecodeError> {
    let Some(value) = value else {
        return Ok(());
    };
    let k = &keys.answer;
    let name = key_name(k.value, "value");
    let node = match raw {
        None => return Err(DecodeError::Missing { key: name }),
        Some(n) if n.is_null() => {
            return match value {
                AnswerValue::Number(_) => Err(DecodeError::Missing {
                    key: key_name(k.amount, "amount"),
                }),
                _ => Ok(()),
            };
        }
        Some(n) => n,
    };
    match value {
        AnswerValue::Number(number) => {
            number.amount = Doc::new(node, name)?.required_int64(k.amount)?;
        }
        AnswerValue::Boolean(b) => {
            *b = node.as_bool().ok_or_else(|| mismatch(name, "boolean", node))?;
        }
        AnswerValue::Text(text) => {
            *text = node
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| mismatch(name, "string", node))?;
        }
        AnswerValue::Choice(choice) => {
            let doc = Doc::new(node, name)?;
            choice.label = doc.string(k.label)?;
            (choice.other, choice.empty_other) = read_other(&doc, k)?;
        }
        AnswerValue::Choices(choices) => {
            let doc = Doc::new(node, name)?;
            choices.labels = doc.strings(k.labels)?;
            (choices.other, choices.empty_other) = read_other(&doc, k)?;
        }
    }
    Ok(())
}

fn read_other<N: Node>(doc: &Doc<'_, N>, k: &AnswerKeys) -> Result<(String, bool), DecodeError> {
    let name = key_name(k.other, "other");
    match doc.optional_bool(k.empty_other)? {
        Some(true) => Ok((String::new(), true)),
        Some(false) => Ok((coerce_other(doc.raw(k.other), name)?.0, false)),
        None => coerce_other(doc.raw(k.other), name),
    }
}

/// Normalises a free-form `other` value to `(other, empty_other)`.
///
/// Absent or null is empty; a string is taken verbatim; an integer is
/// rendered in decimal. Anything else is a coercion failure.
pub fn coerce_other<N: Node>(raw: Option<&N>, key: &'static str) -> Result<(String, bool), DecodeError> {
    let Some(node) = raw.filter(|n| !n.is_null()) else {
        return Ok((String::new(), true));
    };
    if let Some(s) = node.as_str() {
        return Ok((s.to_owned(), false));
    }
    if let Some(i) = node.as_exact_i64() {
        return Ok((i.to_string(), false));
    }
    Err(DecodeError::Coercion {
        key,
        found: node.kind(),
    })
}

/// Encodes an answer value. A missing value is written as null.
pub fn encode_value<N: Node>(value: Option<&AnswerValue>, keys: &Keys) -> N {
    let k = &keys.answer;
    match value {
        None => N::null(),
        Some(AnswerValue::Boolean(b)) => N::boolean(*b),
        Some(AnswerValue::Text(text)) => N::string(text),
        Some(AnswerValue::Number(number)) => {
            let mut b = ObjectBuilder::new();
            b.integer(k.amount, number.amount);
            b.build()
        }
        Some(AnswerValue::Choice(ChoiceValue {
            label,
            other,
            empty_other,
        })) => {
            let mut b = ObjectBuilder::new();
            b.string(k.label, label);
            write_other(&mut b, k, other, *empty_other);
            b.build()
        }
        Some(AnswerValue::Choices(ChoicesValue {
            labels,
            other,
            empty_other,
        })) => {
            let mut b = ObjectBuilder::new();
            b.strings(k.labels, labels);
            write_other(&mut b, k, other, *empty_other);
            b.build()
        }
    }
}

fn write_other<N: Node>(b: &mut ObjectBuilder<N>, k: &AnswerKeys, other: &str, empty_other: bool) {
    if empty_other {
        b.boolean(k.empty_other, true);
    } else {
        b.put(k.other, N::string(other));
    }
}
