use bytes::Bytes;
use traverse::{
    BinaryReader, ByteString, decode, render, to_vec, traverse_enum, traverse_mut, traverse_record,
    traverse_variant,
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Shade {
    #[default]
    Light,
    Dark,
}

traverse_enum!(Shade: i8 { Light, Dark });

#[derive(Debug, Default, PartialEq)]
struct TestRecord {
    flag: bool,
    byte_val: u8,
    short_val: i16,
    int_val: i32,
    long_val: u64,
    float_val: f32,
    double_val: f64,
    shade: Shade,
    string_val: String,
    raw: ByteString,
    list_ints: Vec<i32>,
    list_strings: Vec<String>,
    nested: Vec<Box<TestRecord>>,
}

traverse_record!(TestRecord {
    flag,
    byte_val,
    short_val,
    int_val,
    long_val,
    float_val,
    double_val,
    shade,
    string_val,
    raw,
    list_ints,
    list_strings,
    nested,
});

#[derive(Debug, Default, PartialEq)]
struct SimpleRecord {
    value: i32,
    name: String,
}

traverse_record!(SimpleRecord { value, name });

#[derive(Debug, PartialEq)]
enum TestVariant {
    Simple(SimpleRecord),
    Full(TestRecord),
    Ints(SimpleRecord),
}

traverse_variant!(TestVariant {
    Simple(SimpleRecord),
    Full(TestRecord),
    Ints(SimpleRecord),
});

/// Decodes, re-encodes and re-decodes `data` as `T`. A re-encoded value must
/// decode cleanly and render the same.
fn check<T: traverse::Traverse + Default>(data: &[u8]) {
    let decoded = decode::<T>(data);
    let bytes = to_vec(&decoded.value);
    let again = decode::<T>(&bytes);
    assert!(again.diagnostics.is_empty(), "{}", again.diagnostics);
    assert_eq!(render(&again.value), render(&decoded.value));
}

pub fn test_binary(data: &[u8]) {
    check::<SimpleRecord>(data);
    check::<TestRecord>(data);
    check::<TestVariant>(data);
    check::<Vec<TestVariant>>(data);
    check::<Vec<i32>>(data);
    check::<Vec<ByteString>>(data);
}

pub fn test_shared(data: &[u8]) {
    let mut reader = BinaryReader::new(Bytes::copy_from_slice(data));
    let mut value = Vec::<TestVariant>::new();
    traverse_mut(&mut reader, &mut value);
    reader.finish();
    assert_eq!(reader.into_diagnostics(), decode::<Vec<TestVariant>>(data).diagnostics);
}

pub fn test_json(data: &[u8]) {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let decoded = traverse::json::from_json::<TestRecord>(&value);
        let _ = traverse::json::to_json(&decoded.value);
        let decoded = traverse::json::from_json::<Vec<TestVariant>>(&value);
        let _ = traverse::json::to_json(&decoded.value);
    }
}

pub fn test(data: &[u8]) {
    test_binary(data);
    test_shared(data);
    test_json(data);
}
