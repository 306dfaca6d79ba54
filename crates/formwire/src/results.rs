//! A results submission: an identifier, a token and answers ordered by field.

use crate::answer::ResultsAnswer;
use crate::collection::decode_sorted_by;
use crate::error::DecodeError;
use crate::format::Record;
use crate::keys::Keys;
use crate::node::{Doc, Node, ObjectBuilder};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Results {
    pub uid: String,
    pub token: String,
    /// Ascending by `field_id` after decode; equal ids keep input order.
    pub answers: Vec<ResultsAnswer>,
}

impl Record for Results {
    const NAME: &'static str = "results";

    fn read<N: Node>(doc: Doc<'_, N>, keys: &Keys) -> Result<Self, DecodeError> {
        let k = &keys.results;
        let uid = match doc.field(k.uid) {
            Some(_) => doc.string(k.uid)?,
            None => doc.string(k.legacy_id)?,
        };
        Ok(Results {
            uid,
            token: doc.string(k.token)?,
            answers: decode_sorted_by(
                doc.array(k.answers)?,
                |item| ResultsAnswer::read_node(item, keys),
                |answer| answer.field_id,
            )?,
        })
    }

    fn write<N: Node>(&self, keys: &Keys) -> N {
        let k = &keys.results;
        let mut b = ObjectBuilder::new();
        b.string(k.uid, &self.uid);
        b.string(k.token, &self.token);
        b.array(k.answers, self.answers.iter().map(|a| a.write(keys)).collect());
        b.build()
    }
}
