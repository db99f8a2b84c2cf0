// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Round-trip tests over the message catalog.

mod common;

use std::collections::BTreeMap;

use rpclib::service::{
    self, CallGet, CallGetTimingInfo, CallImportCapture, CallSet, Device, ErrInvalidPath,
    FmtPackedUint32, Info, RenderSettings, ResultGetCaptures, ResultGetFeatures, StringTable,
    TimingFlags, VectorElement,
};
use rpclib::{BinaryObject, CodecError, Encoder, Message, ObjectCodec, Registry, TypeId, Value};

use common::{atom, capture, catalog, codec, pixel, round_trip};

#[test]
fn test_device_scenario() {
    let device = Device::default()
        .with_name("Pixel")
        .with_pointer_size(8)
        .with_max_memory_size(4_294_967_296);
    let decoded = round_trip(&device);
    assert_eq!(decoded.name, "Pixel");
    assert_eq!(decoded.pointer_size, 8);
    assert_eq!(decoded.max_memory_size, 4_294_967_296);
    assert_eq!(decoded, device);
}

#[test]
fn test_device_full() {
    let device = pixel().with_max_memory_size(u64::MAX);
    assert_eq!(round_trip(&device), device);
}

#[test]
fn test_null_optional_objects() {
    let call = CallGetTimingInfo::default();
    assert!(call.device.is_none());
    let decoded = round_trip(&call);
    assert!(decoded.device.is_none());
    assert!(decoded.capture.is_none());
    assert_eq!(decoded, call);
}

#[test]
fn test_null_interface_stays_null() {
    let decoded = round_trip(&ErrInvalidPath::new("gone", None));
    assert!(decoded.path.is_none());
    assert_eq!(decoded.reason, "gone");
}

#[test]
fn test_empty_arrays() {
    let result = ResultGetCaptures::default();
    assert!(round_trip(&result).value.is_empty());
    assert!(round_trip(&ResultGetFeatures::default()).value.is_empty());
}

#[test]
fn test_populated_array_of_objects_keeps_order() {
    let result = ResultGetCaptures {
        value: vec![capture("a"), capture("b"), capture("c")],
    };
    let decoded = round_trip(&result);
    assert_eq!(decoded.value, result.value);
    assert_eq!(decoded.value[0], capture("a"));
    assert_eq!(decoded.value[2], capture("c"));
}

#[test]
fn test_non_ascii_string() {
    let call = CallImportCapture {
        name: "トレース-ü-🚀".to_string(),
        data: vec![0, 1, 2, 255],
    };
    assert_eq!(round_trip(&call), call);
}

#[test]
fn test_nested_pointer_chain() {
    let path = atom("capture-1", 42);
    let decoded = round_trip(&path);
    assert_eq!(decoded.index, 42);
    let capture_id = decoded.atoms.unwrap().capture.unwrap().id;
    assert_eq!(capture_id, TypeId::from_name("capture-1"));
}

#[test]
fn test_by_value_struct_fields() {
    let table = StringTable {
        info: Info {
            culture_code: "de-de".into(),
            entry_count: 2,
        },
        entries: BTreeMap::from([
            ("ERR_NOT_FOUND".to_string(), "nicht gefunden".to_string()),
            ("OK".to_string(), "gut".to_string()),
        ]),
    };
    let decoded = round_trip(&table);
    assert_eq!(decoded.get("OK"), Some("gut"));
    assert_eq!(decoded, table);
}

#[test]
fn test_enum_fields() {
    let format = FmtPackedUint32 {
        order: vec![VectorElement::W, VectorElement::Z, VectorElement::Y, VectorElement::X],
        signed: true,
        normalized: false,
        bit_counts: vec![2, 10, 10, 10],
    };
    assert_eq!(round_trip(&format), format);

    let call = CallGetTimingInfo {
        device: None,
        capture: Some(capture("c")),
        flags: TimingFlags::GPU | TimingFlags::PER_DRAW_CALL,
    };
    let decoded = round_trip(&call);
    assert!(decoded.flags.contains(TimingFlags::PER_DRAW_CALL));
    assert_eq!(decoded, call);
}

#[test]
fn test_get_call_carries_path_by_runtime_type() {
    let call = CallGet {
        p: service::path::boxed(atom("capture-1", 7)),
    };
    let decoded = round_trip(&call);
    let path = decoded.p.unwrap();
    assert!(path.is::<service::AtomPath>());
    assert_eq!(path.downcast_ref::<service::AtomPath>().unwrap().index, 7);
}

#[test]
fn test_variant_values() {
    let values = vec![
        Value::Null,
        Value::Bool(true),
        Value::Int8(-8),
        Value::Uint16(65535),
        Value::Int32(-1),
        Value::Int64(i64::MIN),
        Value::Uint64(u64::MAX),
        Value::Float32(1.5),
        Value::Float64(-0.25),
        Value::String("ünïcode".into()),
        Value::Bytes(vec![9, 8, 7]),
        Value::Array(vec![Value::Int32(1), Value::String("two".into())]),
        Value::Map(vec![(Value::String("k".into()), Value::Uint32(3))]),
        Value::object(RenderSettings {
            max_width: 1920,
            max_height: 1080,
            wireframe: true,
        }),
    ];
    for value in values {
        let call = CallSet {
            p: service::path::boxed(capture("c")),
            v: value.clone(),
        };
        assert_eq!(round_trip(&call).v, value, "value {value:?}");
    }
}

#[test]
fn test_null_top_level_object() {
    let codec = codec();
    let mut buf = Vec::new();
    Encoder::new(&mut buf).object(None).unwrap();
    assert_eq!(buf, vec![0u8; 20]);
    assert!(codec.decode(&buf).unwrap().is_none());
}

/// A type the receiving registry has never heard of.
#[derive(Debug, Clone, Default, PartialEq)]
struct Secret {
    payload: String,
}

impl Message for Secret {
    const NAME: &'static str = "test.Secret";

    fn type_identity() -> TypeId {
        TypeId::from_name("test.Secret")
    }

    fn encode_fields(&self, e: &mut Encoder<'_>) -> rpclib::Result<()> {
        e.string(&self.payload)
    }

    fn decode_fields(&mut self, d: &mut rpclib::Decoder<'_>) -> rpclib::Result<()> {
        self.payload = d.string()?;
        Ok(())
    }
}

#[test]
fn test_unknown_type_is_isolated() {
    let call = CallSet {
        p: service::path::boxed(capture("c")),
        v: Value::object(Secret {
            payload: "hidden".into(),
        }),
    };
    let bytes = codec().encode(&call).unwrap();

    let err = codec().decode(&bytes).unwrap_err();
    assert!(err.is_unknown_type(), "unexpected error: {err}");
    match err {
        CodecError::UnknownType { id, .. } => assert_eq!(id, Secret::type_identity()),
        other => panic!("unexpected error: {other}"),
    }

    // The same bytes decode once the type is known.
    let mut registry = Registry::with_builtin_types().unwrap();
    registry.register::<Secret>().unwrap();
    let decoded = ObjectCodec::new(std::sync::Arc::new(registry))
        .decode_as::<CallSet>(&bytes)
        .unwrap();
    assert_eq!(decoded.v.downcast_ref::<Secret>().unwrap().payload, "hidden");
}

#[test]
fn test_unknown_top_level_type() {
    let bytes = codec().encode(&Secret::default()).unwrap();
    assert!(codec().decode(&bytes).unwrap_err().is_unknown_type());
}

#[test]
fn test_every_catalog_type_round_trips_default() {
    let registry = catalog();
    let codec = ObjectCodec::new(registry.clone());
    for class in registry.classes() {
        let obj = class.create();
        let bytes = codec.encode(obj.as_ref()).unwrap();
        let decoded = codec.decode(&bytes).unwrap().unwrap();
        assert_eq!(decoded.identity(), class.id(), "{}", class.name());
        assert!(decoded.eq_object(obj.as_ref()), "{}", class.name());
    }
}
