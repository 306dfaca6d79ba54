//! A form: metadata plus an ordered list of polymorphic fields.

use crate::collection::decode_records;
use crate::error::DecodeError;
use crate::field::Field;
use crate::format::Record;
use crate::keys::Keys;
use crate::node::{Doc, Node, ObjectBuilder};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    pub title: String,
    pub tags: Vec<String>,
    /// Where submissions are delivered.
    pub webhook_url: String,
    /// Field order is preserved in both directions.
    pub fields: Vec<Field>,
}

impl Form {
    pub fn new(title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            title: title.into(),
            fields,
            ..Self::default()
        }
    }
}

impl Record for Form {
    const NAME: &'static str = "form";

    fn read<N: Node>(doc: Doc<'_, N>, keys: &Keys) -> Result<Self, DecodeError> {
        let k = &keys.form;
        Ok(Form {
            title: doc.string(k.title)?,
            tags: doc.strings(k.tags)?,
            webhook_url: doc.string(k.webhook_url)?,
            fields: decode_records(doc.array(k.fields)?, keys)?,
        })
    }

    fn write<N: Node>(&self, keys: &Keys) -> N {
        let k = &keys.form;
        let mut b = ObjectBuilder::new();
        b.string(k.title, &self.title);
        b.strings(k.tags, &self.tags);
        b.string(k.webhook_url, &self.webhook_url);
        b.array(k.fields, self.fields.iter().map(|f| f.write(keys)).collect());
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Bson, Json};

    #[test]
    fn known_json_encoding() {
        let form = Form::new("", vec![Field::statement("")]);
        let bytes = form.to_bytes::<Json>().unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"title":"","fields":[{"type":"statement","question":""}]}"#
        );
    }

    #[test]
    fn field_order_and_variants_survive() {
        let mut form = Form::new(
            "Survey",
            vec![
                Field::multiple_choice("Pick", ["a", "b"]),
                Field::statement("Hello"),
                Field::opinion_scale("Rate", 10),
            ],
        );
        form.tags = vec!["t1".into()];
        form.webhook_url = "https://example.com/hook".into();
        for decoded in [
            Form::from_bytes::<Json>(&form.to_bytes::<Json>().unwrap()).unwrap(),
            Form::from_bytes::<Bson>(&form.to_bytes::<Bson>().unwrap()).unwrap(),
        ] {
            assert_eq!(decoded, form);
        }
    }

    #[test]
    fn failing_field_fails_the_form() {
        let bytes = br#"{"title":"x","fields":[{"type":"statement","question":"ok"},{"type":"opinion_scale","question":"q","steps":"many"}]}"#;
        let err = Form::from_bytes::<Json>(bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Element { index: 1, .. }));
        assert!(matches!(err.root(), DecodeError::Numeric { key: "steps", .. }));
    }

    #[test]
    fn missing_fields_decode_empty() {
        let form = Form::from_bytes::<Json>(b"{}").unwrap();
        assert_eq!(form, Form::default());
    }
}
