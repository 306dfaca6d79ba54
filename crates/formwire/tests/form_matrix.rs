use formwire::{
    Bson, DecodeError, Field, FieldKind, Form, Json, MultipleChoice, MultipleChoiceChoice,
    OpinionLabels, OpinionScale, Record, Statement,
};
use formwire_pack::bson::{BsonEncoder, BsonValue};
use serde_json::json;

fn populated_form() -> Form {
    let mut scale = Field::opinion_scale("How likely?", 11);
    scale.reference = "nps".into();
    scale.required = true;
    scale.tags = vec!["score".into()];
    if let FieldKind::OpinionScale(o) = &mut scale.kind {
        o.start_at_one = true;
        o.labels.left = "no".into();
        o.labels.right = "yes".into();
    }
    let mut intro = Field::statement("Welcome");
    intro.description = "Takes a minute".into();

    Form {
        title: "Feedback".into(),
        tags: vec!["q3".into(), "beta".into()],
        webhook_url: "https://example.com/hook".into(),
        fields: vec![
            intro,
            scale,
            Field::multiple_choice("Pick one", ["red", "green", "blue"]),
            Field::new("essay", "Tell us more"),
        ],
    }
}

#[test]
fn json_form_matrix() {
    let bytes = br#"{
        "title": "Feedback",
        "tags": ["q3"],
        "webhook_submit_url": "https://example.com/hook",
        "fields": [
            {"type": "statement", "question": "Hey"},
            {"type": "opinion_scale", "question": "Rate", "steps": 5.0, "labels": {"center": "meh"}},
            {"type": "multiple_choice", "question": "Pick", "choices": [{"label": "a"}, {"label": "b"}]},
            {"type": "yes_no", "question": "Sure?"},
            {"type": "essay", "question": "Why?", "description": "long"}
        ]
    }"#;
    let form = Form::from_bytes::<Json>(bytes).expect("decode");
    assert_eq!(form.title, "Feedback");
    assert_eq!(form.tags, ["q3"]);
    assert_eq!(form.webhook_url, "https://example.com/hook");

    let kinds: Vec<&FieldKind> = form.fields.iter().map(|f| &f.kind).collect();
    assert_eq!(
        kinds,
        [
            &FieldKind::Statement(Statement::default()),
            &FieldKind::OpinionScale(OpinionScale {
                steps: 5,
                start_at_one: false,
                labels: OpinionLabels {
                    center: "meh".into(),
                    ..OpinionLabels::default()
                },
            }),
            &FieldKind::MultipleChoice(MultipleChoice {
                choices: vec![
                    MultipleChoiceChoice { label: "a".into() },
                    MultipleChoiceChoice { label: "b".into() },
                ],
            }),
            &FieldKind::Base,
            &FieldKind::Base,
        ]
    );
    assert_eq!(form.fields[3].field_type, "yes_no");
    assert_eq!(form.fields[4].description, "long");
}

#[test]
fn yes_no_is_a_binary_variant() {
    let form = Form::new("Binary", vec![Field::yes_no("Sure?")]);
    let bson = Form::from_bytes::<Bson>(&form.to_bytes::<Bson>().expect("bson")).expect("bson");
    assert_eq!(bson.fields[0].kind, FieldKind::YesNo);
    let json = Form::from_bytes::<Json>(&form.to_bytes::<Json>().expect("json")).expect("json");
    assert_eq!(json.fields[0].kind, FieldKind::Base);
    assert_eq!(json.fields[0].field_type, "yes_no");
}

#[test]
fn round_trip_through_both_formats() {
    let form = populated_form();
    let json = Form::from_bytes::<Json>(&form.to_bytes::<Json>().expect("json")).expect("json");
    assert_eq!(json, form);
    let bson = Form::from_bytes::<Bson>(&form.to_bytes::<Bson>().expect("bson")).expect("bson");
    assert_eq!(bson, form);
}

#[test]
fn json_layout_uses_long_keys_and_omits_empty() {
    let bytes = populated_form().to_bytes::<Json>().expect("json");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("parse");
    assert_eq!(
        value,
        json!({
            "title": "Feedback",
            "tags": ["q3", "beta"],
            "webhook_submit_url": "https://example.com/hook",
            "fields": [
                {"type": "statement", "question": "Welcome", "description": "Takes a minute"},
                {
                    "type": "opinion_scale",
                    "question": "How likely?",
                    "ref": "nps",
                    "required": true,
                    "tags": ["score"],
                    "steps": 11,
                    "start_at_one": true,
                    "labels": {"left": "no", "right": "yes"}
                },
                {
                    "type": "multiple_choice",
                    "question": "Pick one",
                    "choices": [{"label": "red"}, {"label": "green"}, {"label": "blue"}]
                },
                {"type": "essay", "question": "Tell us more"}
            ]
        })
    );
}

#[test]
fn bson_layout_uses_short_keys() {
    let form = Form::new("T", vec![Field::multiple_choice("Q", ["a"])]);
    let str_ = |s: &str| BsonValue::Str(s.into());
    let expected = BsonValue::Document(vec![
        ("t".into(), str_("T")),
        (
            "f".into(),
            BsonValue::Array(vec![BsonValue::Document(vec![
                ("t".into(), str_("multiple_choice")),
                ("q".into(), str_("Q")),
                ("d".into(), str_("")),
                (
                    "c".into(),
                    BsonValue::Array(vec![BsonValue::Document(vec![("l".into(), str_("a"))])]),
                ),
            ])]),
        ),
    ]);
    assert_eq!(
        form.to_bytes::<Bson>().expect("bson"),
        BsonEncoder::new().encode_value(&expected).expect("encode")
    );
}

#[test]
fn malformed_documents_fail_without_partial_value() {
    let bad_json: [&[u8]; 3] = [b"{\"title\":", b"{\"title\":\"x\"} trailing", b"nul"];
    for input in bad_json {
        assert!(matches!(
            Form::from_bytes::<Json>(input),
            Err(DecodeError::Syntax(_))
        ));
    }

    let wrong_shape: [&[u8]; 4] = [
        br#"{"title":7}"#,
        br#"{"fields":{}}"#,
        br#"{"fields":[7]}"#,
        br#"{"fields":[{"type":"statement","required":"yes"}]}"#,
    ];
    for input in wrong_shape {
        let err = Form::from_bytes::<Json>(input).expect_err("must fail");
        assert!(matches!(err.root(), DecodeError::Mismatch { .. }), "{err}");
    }
}

#[test]
fn field_value_pairs_with_an_answer() {
    let bytes = br#"{"type":"statement","question":"Hey","value":{"amount":5}}"#;
    let mut field = Field::from_bytes::<Json>(bytes).expect("decode");
    assert_eq!(field.value(), Some(&json!({"amount": 5})));
    field.set_value(None);
    assert_eq!(
        field.to_bytes::<Json>().expect("json"),
        br#"{"type":"statement","question":"Hey"}"#
    );
}
