//! End-to-end registration and codec use through the public API.

use serde::{Deserialize, Serialize};
use yamlcodec::yaml::{
    self, YamlCodec, known_fields_only, set_indent, wrap_marshaler, wrap_unmarshaler,
};
use yamlcodec::{Context, Marshaler, Unmarshaler, global_registry};

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
struct Service {
    name: String,
    replicas: i64,
}

#[test]
fn startup_registration_and_roundtrip() {
    yaml::register(yaml::NAME);
    let marshaler = global_registry()
        .marshaler(yaml::NAME)
        .expect("marshaler registered");
    let unmarshaler = global_registry()
        .unmarshaler(yaml::NAME)
        .expect("unmarshaler registered");

    let cx = Context::new();
    let service = Service {
        name: "edge".into(),
        replicas: 4,
    };
    let bytes = marshaler.marshal(&cx, &service).expect("marshal");
    let mut back = Service::default();
    unmarshaler.unmarshal(&cx, &bytes, &mut back).expect("unmarshal");
    assert_eq!(back, service);
}

#[test]
fn direct_use_without_registration() {
    #[derive(Serialize)]
    struct Inner {
        b: bool,
    }
    #[derive(Serialize)]
    struct Outer {
        i: Inner,
    }

    let pretty = wrap_marshaler(YamlCodec, [set_indent(4)]);
    let bytes = pretty
        .marshal(&Context::new(), &Outer { i: Inner { b: false } })
        .expect("marshal");
    assert_eq!(bytes, b"i:\n    b: false\n");
}

#[test]
fn strict_decoding_through_a_wrapper() {
    let strict = wrap_unmarshaler(YamlCodec, [known_fields_only(true)]);
    let mut target = Service::default();
    assert!(
        strict
            .unmarshal(&Context::new(), b"owner: ops\n", &mut target)
            .is_err()
    );
    strict
        .unmarshal(&Context::new(), b"name: edge\nreplicas: 4\n", &mut target)
        .expect("declared fields only");
    assert_eq!(
        target,
        Service {
            name: "edge".into(),
            replicas: 4
        }
    );
}
