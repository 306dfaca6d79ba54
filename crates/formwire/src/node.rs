//! Untyped document trees.
//!
//! A wire document is parsed once into a tree and then read as many times as
//! needed: first for its discriminator, then as the concrete shape the
//! discriminator selects. [`Node`] abstracts over the two trees in use
//! (`serde_json::Value` for JSON, [`BsonValue`] for BSON) so the record
//! readers and writers are written once.

use std::borrow::Cow;

use formwire_pack::bson::BsonValue;
use serde_json::{Number, Value};

use crate::error::DecodeError;
use crate::keys::Key;
use crate::numeric::NumberRepr;

/// A parsed-but-untyped document tree.
pub trait Node: Sized + Clone + std::fmt::Debug {
    /// Short type name for error messages.
    fn kind(&self) -> &'static str;
    fn is_null(&self) -> bool;
    fn is_object(&self) -> bool;
    /// Looks up `key` in an object node. The last occurrence of a repeated
    /// key wins.
    fn get(&self, key: &str) -> Option<&Self>;
    fn as_str(&self) -> Option<&str>;
    fn as_bool(&self) -> Option<bool>;
    /// Integer values that need no coercion at all.
    fn as_exact_i64(&self) -> Option<i64>;
    /// Anything that may be read as a number, numeric strings included.
    fn as_number(&self) -> Option<NumberRepr<'_>>;
    fn as_array(&self) -> Option<&[Self]>;
    fn to_json(&self) -> Value;

    fn null() -> Self;
    fn string(s: &str) -> Self;
    fn boolean(b: bool) -> Self;
    fn integer(i: i64) -> Self;
    fn array(items: Vec<Self>) -> Self;
    fn object(entries: Vec<(String, Self)>) -> Self;
    fn from_json(value: &Value) -> Self;
}

impl Node for Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }

    fn is_object(&self) -> bool {
        Value::is_object(self)
    }

    fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn as_str(&self) -> Option<&str> {
        Value::as_str(self)
    }

    fn as_bool(&self) -> Option<bool> {
        Value::as_bool(self)
    }

    fn as_exact_i64(&self) -> Option<i64> {
        Value::as_i64(self)
    }

    fn as_number(&self) -> Option<NumberRepr<'_>> {
        match self {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => NumberRepr::Int(i),
                None => NumberRepr::Literal(Cow::Owned(n.to_string())),
            }),
            Value::String(s) => Some(NumberRepr::Literal(Cow::Borrowed(s))),
            _ => None,
        }
    }

    fn as_array(&self) -> Option<&[Self]> {
        Value::as_array(self).map(Vec::as_slice)
    }

    fn to_json(&self) -> Value {
        self.clone()
    }

    fn null() -> Self {
        Value::Null
    }

    fn string(s: &str) -> Self {
        Value::String(s.to_owned())
    }

    fn boolean(b: bool) -> Self {
        Value::Bool(b)
    }

    fn integer(i: i64) -> Self {
        Value::Number(i.into())
    }

    fn array(items: Vec<Self>) -> Self {
        Value::Array(items)
    }

    fn object(entries: Vec<(String, Self)>) -> Self {
        Value::Object(entries.into_iter().collect())
    }

    fn from_json(value: &Value) -> Self {
        value.clone()
    }
}

impl Node for BsonValue {
    fn kind(&self) -> &'static str {
        self.type_name()
    }

    fn is_null(&self) -> bool {
        matches!(self, BsonValue::Null | BsonValue::Undefined)
    }

    fn is_object(&self) -> bool {
        matches!(self, BsonValue::Document(_))
    }

    fn get(&self, key: &str) -> Option<&Self> {
        match self {
            BsonValue::Document(fields) => fields.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            BsonValue::Str(s) => Some(s),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            BsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn as_exact_i64(&self) -> Option<i64> {
        match self {
            BsonValue::Int32(i) => Some(i64::from(*i)),
            BsonValue::Int64(i) => Some(*i),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<NumberRepr<'_>> {
        match self {
            BsonValue::Int32(i) => Some(NumberRepr::Int(i64::from(*i))),
            BsonValue::Int64(i) => Some(NumberRepr::Int(*i)),
            BsonValue::Float(f) => Some(NumberRepr::Float(*f)),
            BsonValue::Str(s) => Some(NumberRepr::Literal(Cow::Borrowed(s))),
            _ => None,
        }
    }

    fn as_array(&self) -> Option<&[Self]> {
        match self {
            BsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            BsonValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            BsonValue::Str(s) => Value::String(s.clone()),
            BsonValue::Document(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            BsonValue::Array(items) => Value::Array(items.iter().map(Node::to_json).collect()),
            BsonValue::Binary(bin) => {
                Value::Array(bin.data.iter().map(|b| Value::from(*b)).collect())
            }
            BsonValue::Undefined | BsonValue::Null => Value::Null,
            BsonValue::Boolean(b) => Value::Bool(*b),
            BsonValue::DateTime(ms) => Value::from(*ms),
            BsonValue::Int32(i) => Value::from(*i),
            BsonValue::Int64(i) => Value::from(*i),
        }
    }

    fn null() -> Self {
        BsonValue::Null
    }

    fn string(s: &str) -> Self {
        BsonValue::Str(s.to_owned())
    }

    fn boolean(b: bool) -> Self {
        BsonValue::Boolean(b)
    }

    fn integer(i: i64) -> Self {
        BsonValue::Int64(i)
    }

    fn array(items: Vec<Self>) -> Self {
        BsonValue::Array(items)
    }

    fn object(entries: Vec<(String, Self)>) -> Self {
        BsonValue::Document(entries)
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => BsonValue::Null,
            Value::Bool(b) => BsonValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => BsonValue::Int64(i),
                None => BsonValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => BsonValue::Str(s.clone()),
            Value::Array(items) => BsonValue::Array(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => BsonValue::Document(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }
}

/// Keyed reads over an object node.
///
/// Absent attributes and explicit nulls read as the zero value of the
/// requested type; a present value of the wrong type is an error naming the
/// attribute.
#[derive(Debug)]
pub struct Doc<'a, N> {
    node: &'a N,
}

impl<N> Clone for Doc<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Doc<'_, N> {}

impl<'a, N: Node> Doc<'a, N> {
    /// Wraps `node`, which must be an object. `name` labels the error.
    pub fn new(node: &'a N, name: &'static str) -> Result<Self, DecodeError> {
        if node.is_object() {
            Ok(Self { node })
        } else {
            Err(DecodeError::Mismatch {
                key: name,
                expected: "document",
                found: node.kind(),
            })
        }
    }

    pub fn node(&self) -> &'a N {
        self.node
    }

    /// The attribute as stored, explicit null included.
    pub fn raw(&self, key: Option<Key>) -> Option<&'a N> {
        key.and_then(|k| self.node.get(k.name))
    }

    fn lookup(&self, key: Option<Key>) -> Option<(&'static str, &'a N)> {
        let key = key?;
        self.node
            .get(key.name)
            .filter(|n| !n.is_null())
            .map(|n| (key.name, n))
    }

    /// The attribute unless it is absent or null.
    pub fn field(&self, key: Option<Key>) -> Option<&'a N> {
        self.lookup(key).map(|(_, n)| n)
    }

    pub fn string(&self, key: Option<Key>) -> Result<String, DecodeError> {
        match self.lookup(key) {
            None => Ok(String::new()),
            Some((name, n)) => n
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| mismatch(name, "string", n)),
        }
    }

    pub fn boolean(&self, key: Option<Key>) -> Result<bool, DecodeError> {
        Ok(self.optional_bool(key)?.unwrap_or(false))
    }

    pub fn optional_bool(&self, key: Option<Key>) -> Result<Option<bool>, DecodeError> {
        match self.lookup(key) {
            None => Ok(None),
            Some((name, n)) => n
                .as_bool()
                .map(Some)
                .ok_or_else(|| mismatch(name, "boolean", n)),
        }
    }

    /// Integer attribute, tolerant of float and exponential literals.
    pub fn int64(&self, key: Option<Key>) -> Result<i64, DecodeError> {
        match self.lookup(key) {
            None => Ok(0),
            Some((name, n)) => n
                .as_number()
                .ok_or_else(|| mismatch(name, "number", n))?
                .to_int64()
                .map_err(|source| DecodeError::Numeric { key: name, source }),
        }
    }

    /// Like [`Doc::int64`], but an absent or null attribute is
    /// [`DecodeError::Missing`].
    pub fn required_int64(&self, key: Option<Key>) -> Result<i64, DecodeError> {
        match self.lookup(key) {
            Some(_) => self.int64(key),
            None => Err(DecodeError::Missing {
                key: key.map_or("", |k| k.name),
            }),
        }
    }

    pub fn array(&self, key: Option<Key>) -> Result<&'a [N], DecodeError> {
        match self.lookup(key) {
            None => Ok(&[]),
            Some((name, n)) => n.as_array().ok_or_else(|| mismatch(name, "array", n)),
        }
    }

    pub fn strings(&self, key: Option<Key>) -> Result<Vec<String>, DecodeError> {
        let Some((name, _)) = self.lookup(key) else {
            return Ok(Vec::new());
        };
        self.array(key)?
            .iter()
            .map(|item| match item.as_str() {
                Some(s) => Ok(s.to_owned()),
                None if item.is_null() => Ok(String::new()),
                None => Err(mismatch(name, "string", item)),
            })
            .collect()
    }

    pub fn child(&self, key: Option<Key>) -> Result<Option<Doc<'a, N>>, DecodeError> {
        match self.lookup(key) {
            None => Ok(None),
            Some((name, n)) => Doc::new(n, name).map(Some),
        }
    }
}

pub(crate) fn mismatch<N: Node>(key: &'static str, expected: &'static str, found: &N) -> DecodeError {
    DecodeError::Mismatch {
        key,
        expected,
        found: found.kind(),
    }
}

/// Builds an object node entry by entry, applying each key's omit-empty
/// policy.
#[derive(Debug)]
pub struct ObjectBuilder<N> {
    entries: Vec<(String, N)>,
}

impl<N: Node> Default for ObjectBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> ObjectBuilder<N> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes `value` whenever the format has the key, ignoring omit-empty.
    pub fn put(&mut self, key: Option<Key>, value: N) {
        if let Some(k) = key {
            self.entries.push((k.name.to_owned(), value));
        }
    }

    fn put_unless_empty(&mut self, key: Option<Key>, empty: bool, value: impl FnOnce() -> N) {
        match key {
            Some(k) if !(k.omit_empty && empty) => self.entries.push((k.name.to_owned(), value())),
            _ => {}
        }
    }

    pub fn string(&mut self, key: Option<Key>, value: &str) {
        self.put_unless_empty(key, value.is_empty(), || N::string(value));
    }

    pub fn boolean(&mut self, key: Option<Key>, value: bool) {
        self.put_unless_empty(key, !value, || N::boolean(value));
    }

    pub fn integer(&mut self, key: Option<Key>, value: i64) {
        self.put_unless_empty(key, value == 0, || N::integer(value));
    }

    pub fn strings(&mut self, key: Option<Key>, values: &[String]) {
        self.put_unless_empty(key, values.is_empty(), || {
            N::array(values.iter().map(|s| N::string(s)).collect())
        });
    }

    pub fn array(&mut self, key: Option<Key>, items: Vec<N>) {
        let empty = items.is_empty();
        self.put_unless_empty(key, empty, || N::array(items));
    }

    pub fn child(&mut self, key: Option<Key>, child: ObjectBuilder<N>) {
        let empty = child.is_empty();
        self.put_unless_empty(key, empty, || child.build());
    }

    pub fn build(self) -> N {
        N::object(self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{key, opt};
    use serde_json::json;

    #[test]
    fn doc_reads_zero_values_for_absent_and_null() {
        let v = json!({"a": null});
        let doc = Doc::new(&v, "test").unwrap();
        assert_eq!(doc.string(key("a")).unwrap(), "");
        assert_eq!(doc.string(key("missing")).unwrap(), "");
        assert_eq!(doc.int64(key("a")).unwrap(), 0);
        assert!(!doc.boolean(key("a")).unwrap());
        assert!(doc.strings(key("a")).unwrap().is_empty());
        assert!(doc.raw(key("a")).is_some());
        assert!(doc.field(key("a")).is_none());
        assert!(doc.raw(None).is_none());
    }

    #[test]
    fn doc_reports_type_mismatch_with_key() {
        let v = json!({"q": 5, "tags": ["a", 1]});
        let doc = Doc::new(&v, "test").unwrap();
        assert!(matches!(
            doc.string(key("q")),
            Err(DecodeError::Mismatch { key: "q", expected: "string", found: "number" })
        ));
        assert!(matches!(
            doc.strings(key("tags")),
            Err(DecodeError::Mismatch { key: "tags", found: "number", .. })
        ));
        assert!(matches!(
            Doc::new(&json!([1]), "form"),
            Err(DecodeError::Mismatch { key: "form", found: "array", .. })
        ));
    }

    #[test]
    fn int64_accepts_numeric_strings_and_exponents() {
        let v = json!({"a": 1.774766e6, "b": "1.111111e+06", "c": "x"});
        let doc = Doc::new(&v, "test").unwrap();
        assert_eq!(doc.int64(key("a")).unwrap(), 1_774_766);
        assert_eq!(doc.int64(key("b")).unwrap(), 1_111_111);
        assert!(matches!(
            doc.int64(key("c")),
            Err(DecodeError::Numeric { key: "c", .. })
        ));
    }

    #[test]
    fn required_int64_rejects_absent_and_null() {
        let v = json!({"a": null, "b": "7"});
        let doc = Doc::new(&v, "test").unwrap();
        assert!(matches!(
            doc.required_int64(key("a")),
            Err(DecodeError::Missing { key: "a" })
        ));
        assert!(matches!(
            doc.required_int64(key("missing")),
            Err(DecodeError::Missing { key: "missing" })
        ));
        assert_eq!(doc.required_int64(key("b")).unwrap(), 7);
    }

    #[test]
    fn null_string_elements_read_as_empty() {
        let v = json!({"tags": ["a", null, "b"]});
        let doc = Doc::new(&v, "test").unwrap();
        assert_eq!(doc.strings(key("tags")).unwrap(), ["a", "", "b"]);
    }

    #[test]
    fn bson_last_duplicate_key_wins() {
        let v = BsonValue::Document(vec![
            ("t".into(), BsonValue::Str("a".into())),
            ("t".into(), BsonValue::Str("b".into())),
        ]);
        let doc = Doc::new(&v, "test").unwrap();
        assert_eq!(doc.string(key("t")).unwrap(), "b");
    }

    #[test]
    fn builder_applies_omit_empty() {
        let mut b = ObjectBuilder::<Value>::new();
        b.string(key("title"), "");
        b.string(opt("ref"), "");
        b.boolean(opt("required"), false);
        b.integer(key("steps"), 0);
        b.strings(opt("tags"), &[]);
        b.child(opt("labels"), ObjectBuilder::new());
        b.child(key("always"), ObjectBuilder::new());
        b.string(None, "dropped");
        assert_eq!(b.build(), json!({"title": "", "steps": 0, "always": {}}));
    }

    #[test]
    fn json_bson_tree_conversion() {
        let v = json!({"a": [1, "x", true, null], "b": {"c": 1.5}});
        let bson = BsonValue::from_json(&v);
        assert_eq!(bson.get("b").and_then(|b| b.get("c")), Some(&BsonValue::Float(1.5)));
        assert_eq!(bson.to_json(), v);
    }
}
