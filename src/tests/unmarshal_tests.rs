//! Unmarshal-path tests: empty documents, strict mode, error surfacing,
//! round-trips.

use serde::{Deserialize, Serialize};

use crate::codec::{Marshaler, Unmarshaler};
use crate::context::Context;
use crate::error::CodecError;
use crate::yaml::{
    YamlCodec, known_fields_only, set_indent, with_decoder_options, wrap_marshaler,
    wrap_unmarshaler,
};

#[derive(Debug, Default, Deserialize, PartialEq)]
struct Empty {}

#[derive(Debug, Default, Deserialize, PartialEq)]
struct Narrow {
    f: Option<String>,
}

#[test]
fn empty_input_leaves_target_untouched() {
    let mut target = Narrow {
        f: Some("keep".into()),
    };
    YamlCodec
        .unmarshal(&Context::new(), b"", &mut target)
        .expect("empty input is a well-formed empty document");
    assert_eq!(target.f.as_deref(), Some("keep"));

    YamlCodec
        .unmarshal(&Context::new(), b" \n\t \n", &mut target)
        .expect("whitespace-only input counts as empty");
    assert_eq!(target.f.as_deref(), Some("keep"));
}

#[test]
fn empty_mapping_decodes_into_empty_shape() {
    let mut target = Empty {};
    YamlCodec
        .unmarshal(&Context::new(), b"{}", &mut target)
        .expect("decode {}");
}

#[test]
fn unknown_field_rejected_in_strict_mode() {
    let cx = with_decoder_options(&Context::new(), [known_fields_only(true)]);
    let mut target = Narrow::default();
    let err = YamlCodec
        .unmarshal(&cx, b"k: true", &mut target)
        .expect_err("strict decode must reject undeclared fields");
    assert!(matches!(err, CodecError::UnknownField(field) if field == "k"));
}

#[test]
fn unknown_field_ignored_by_default() {
    let mut target = Narrow::default();
    YamlCodec
        .unmarshal(&Context::new(), b"k: true", &mut target)
        .expect("lenient decode");
    assert_eq!(target, Narrow { f: None });
}

#[test]
fn strict_mode_accepts_declared_fields() {
    let cx = with_decoder_options(&Context::new(), [known_fields_only(true)]);
    let mut target = Narrow::default();
    YamlCodec
        .unmarshal(&cx, b"f: hi", &mut target)
        .expect("declared field");
    assert_eq!(target.f.as_deref(), Some("hi"));
}

#[test]
fn strict_mode_can_be_switched_back_off() {
    let cx = with_decoder_options(
        &Context::new(),
        [known_fields_only(true), known_fields_only(false)],
    );
    let mut target = Narrow::default();
    YamlCodec
        .unmarshal(&cx, b"k: true", &mut target)
        .expect("later mutator wins");
}

#[test]
fn wrapped_unmarshaler_applies_strict_mode() {
    let strict = wrap_unmarshaler(YamlCodec, [known_fields_only(true)]);

    let mut target = Narrow::default();
    assert!(
        strict
            .unmarshal(&Context::new(), b"k: true", &mut target)
            .is_err()
    );

    let mut target = Narrow::default();
    strict
        .unmarshal(&Context::new(), b"f: hi", &mut target)
        .expect("declared field");
    assert_eq!(target.f.as_deref(), Some("hi"));
}

#[test]
fn wrapper_overrides_caller_attached_options() {
    let strict = wrap_unmarshaler(YamlCodec, [known_fields_only(true)]);
    let lenient_cx = with_decoder_options(&Context::new(), [known_fields_only(false)]);
    let mut target = Narrow::default();
    assert!(strict.unmarshal(&lenient_cx, b"k: true", &mut target).is_err());
}

#[test]
fn malformed_input_surfaces_decode_error() {
    let mut target = Narrow::default();
    let err = YamlCodec
        .unmarshal(&Context::new(), b"f: [unclosed", &mut target)
        .expect_err("malformed yaml");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn multiline_strings_roundtrip() {
    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Note {
        text: String,
    }

    let note = Note {
        text: "line1\n  indented\nline3".into(),
    };
    let cx = Context::new();
    let bytes = YamlCodec.marshal(&cx, &note).expect("marshal");
    let mut back = Note::default();
    YamlCodec.unmarshal(&cx, &bytes, &mut back).expect("unmarshal");
    assert_eq!(back, note);
}

#[test]
fn multiline_strings_survive_set_indent() {
    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Meta {
        text: String,
    }
    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Doc {
        meta: Meta,
    }

    // Interior indentation and a blank line are string content; widening the
    // structural indent must not reshape them.
    let doc = Doc {
        meta: Meta {
            text: "line1\n  indented\nline3\n\ntrailing".into(),
        },
    };
    let pretty = wrap_marshaler(YamlCodec, [set_indent(4)]);
    let bytes = pretty.marshal(&Context::new(), &doc).expect("marshal");
    let mut back = Doc::default();
    YamlCodec
        .unmarshal(&Context::new(), &bytes, &mut back)
        .expect("unmarshal");
    assert_eq!(back, doc);
}

#[test]
fn roundtrip_under_default_options() {
    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        count: i64,
        ratio: f64,
        tags: Vec<String>,
    }

    let sample = Sample {
        name: "edge".into(),
        count: i64::MAX,
        ratio: 0.25,
        tags: vec!["a".into(), "b".into()],
    };

    let cx = Context::new();
    let bytes = YamlCodec.marshal(&cx, &sample).expect("marshal");
    let mut back = Sample::default();
    YamlCodec.unmarshal(&cx, &bytes, &mut back).expect("unmarshal");
    assert_eq!(back, sample);
}
