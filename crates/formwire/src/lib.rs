//! Type-tag-driven records over JSON and BSON.
//!
//! A [`Form`] holds polymorphic [`Field`]s and a [`Results`] submission holds
//! polymorphic [`ResultsAnswer`]s. In both, the `type` attribute of each
//! element selects its concrete shape at decode time:
//!
//! ```
//! use formwire::{FieldKind, Form, Json, Record};
//!
//! let bytes = br#"{"title":"T","fields":[{"type":"opinion_scale","question":"?","steps":7}]}"#;
//! let form = Form::from_bytes::<Json>(bytes).unwrap();
//! assert!(matches!(&form.fields[0].kind, FieldKind::OpinionScale(o) if o.steps == 7));
//! assert_eq!(form.to_bytes::<Json>().unwrap().len(), bytes.len() + r#","labels":{}"#.len());
//! ```

pub mod answer;
pub mod api;
pub mod collection;
pub mod error;
pub mod field;
pub mod form;
pub mod format;
pub mod keys;
pub mod node;
pub mod numeric;
pub mod registry;
pub mod results;
pub mod two_pass;
pub mod value;
pub mod webhook;

pub use answer::{AnswerValue, ChoiceValue, ChoicesValue, NumberValue, ResultsAnswer};
pub use error::{DecodeError, EncodeError, ErrorKind};
pub use field::{
    Field, FieldKind, MultipleChoice, MultipleChoiceChoice, OpinionLabels, OpinionScale, Statement,
};
pub use form::Form;
pub use format::{decode, decode_with, encode, encode_with, Bson, Json, Record, WireFormat};
pub use formwire_pack::EncodingFormat;
pub use results::Results;
