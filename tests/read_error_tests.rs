mod common;

use common::{Color, Mood, Point, Polygon, ufo};
use traverse::{
    BinaryReader, ByteString, DiagnosticKind, Error, ReadOptions, Severity, SliceSource, decode,
    decode_into, from_slice, from_slice_exact, to_vec, traverse_mut, traverse_record,
};

fn messages(diagnostics: &traverse::Diagnostics) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message.as_str()).collect()
}

#[test]
fn test_empty_input_number() {
    let decoded = decode::<u32>(&[]);
    assert_eq!(decoded.value, 0);
    assert_eq!(messages(&decoded.diagnostics), ["insufficient data for number"]);
    assert_eq!(decoded.diagnostics[0].kind, DiagnosticKind::Underflow);
    assert_eq!(decoded.diagnostics[0].severity(), Severity::Error);
}

#[test]
fn test_missing_string_length() {
    let decoded = decode::<String>(&[0x80]);
    assert!(decoded.value.is_empty());
    assert_eq!(
        messages(&decoded.diagnostics),
        ["insufficient data for string length"]
    );
}

#[test]
fn test_truncated_in_half() {
    let bytes = to_vec(&ufo());
    let decoded = decode::<Polygon>(&bytes[..bytes.len() / 2]);
    assert_eq!(decoded.value.color, Color::Blue);
    assert_eq!(decoded.value.mood, Mood::HulkSmash);
    assert_eq!(decoded.value.name, "UFO\"19");
    assert!(decoded.value.points.is_empty());
    assert_eq!(
        messages(&decoded.diagnostics),
        [
            "insufficient data for string body: expected 9 bytes but only found 6",
            "insufficient data for sequence length",
        ]
    );
    assert!(decoded.diagnostics.has_errors());
}

#[test]
fn test_every_truncation_reports_errors() {
    let bytes = to_vec(&ufo());
    for len in 0..bytes.len() {
        let decoded = decode::<Polygon>(&bytes[..len]);
        assert!(decoded.diagnostics.has_errors(), "prefix of {len} bytes");
        assert!(!decoded.diagnostics.contains(DiagnosticKind::TrailingData));
    }
}

#[test]
fn test_all_bytes_corrupted() {
    let bytes = vec![0x7f; to_vec(&ufo()).len()];
    let decoded = decode::<Polygon>(&bytes);
    assert_eq!(decoded.value.color, Color::Red);
    assert_eq!(decoded.value.mood, Mood::Happy);
    assert_eq!(decoded.value.name.len(), 16);
    assert!(decoded.value.points.is_empty());
    assert_eq!(
        messages(&decoded.diagnostics),
        [
            "value 127 out of range for Color",
            "value 127 out of range for Mood",
            "insufficient data for string body: expected 127 bytes but only found 16",
            "insufficient data for sequence length",
        ]
    );
    assert!(decoded.diagnostics.contains(DiagnosticKind::Range));
}

#[test]
fn test_trailing_data_is_not_fatal() {
    let mut bytes = to_vec(&ufo());
    bytes.extend_from_slice(b"12345");

    let decoded = decode::<Polygon>(&bytes);
    assert_eq!(decoded.value, ufo());
    assert_eq!(
        messages(&decoded.diagnostics),
        ["5 extra bytes after end of message"]
    );
    assert_eq!(decoded.diagnostics[0].kind, DiagnosticKind::TrailingData);
    assert_eq!(decoded.diagnostics[0].severity(), Severity::Error);
    assert!(!decoded.diagnostics[0].is_fatal());
    assert!(!decoded.diagnostics.has_errors());
    assert!(decoded.is_ok());

    assert_eq!(from_slice::<Polygon>(&bytes).unwrap(), ufo());
    assert!(matches!(
        from_slice_exact::<Polygon>(&bytes),
        Err(Error::TrailingData(5))
    ));
}

#[test]
fn test_finish_reports_remaining() {
    let bytes = [6, 10, 1, 2];
    let mut reader = BinaryReader::new(SliceSource::new(&bytes));
    let mut point = Point::default();
    traverse_mut(&mut reader, &mut point);
    assert_eq!(point, Point { x: 3, y: 5 });
    assert!(reader.diagnostics().is_empty());
    assert_eq!(reader.finish(), 2);
    assert!(reader.diagnostics().contains(DiagnosticKind::TrailingData));
}

#[test]
fn test_fields_after_failure_still_read() {
    let decoded = decode::<Polygon>(&[5, 2, 3, b'a', b'b', b'c', 1, 6, 10]);
    assert_eq!(decoded.value.color, Color::Red);
    assert_eq!(decoded.value.mood, Mood::HulkSmash);
    assert_eq!(decoded.value.name, "abc");
    assert_eq!(decoded.value.points, [Point { x: 3, y: 5 }]);
    assert_eq!(
        messages(&decoded.diagnostics),
        ["value 5 out of range for Color"]
    );
}

#[test]
fn test_enum_out_of_range_keeps_prior_value() {
    let mut mood = Mood::Sad;
    let diagnostics = decode_into(&[9], &mut mood);
    assert_eq!(mood, Mood::Sad);
    assert_eq!(messages(&diagnostics), ["value 9 out of range for Mood"]);
}

#[test]
fn test_sequence_stops_when_source_runs_out() {
    let decoded = decode::<Polygon>(&[1, 0, 0, 3, 6, 10]);
    assert_eq!(decoded.value.points, [Point { x: 3, y: 5 }]);
    assert_eq!(
        messages(&decoded.diagnostics),
        ["expected 3 elements in sequence but only found 1"]
    );
}

#[test]
fn test_partial_final_element_is_kept() {
    let decoded = decode::<Polygon>(&[0, 0, 0, 2, 6, 10, 8]);
    assert_eq!(
        decoded.value.points,
        [Point { x: 3, y: 5 }, Point { x: 4, y: 0 }]
    );
    assert_eq!(messages(&decoded.diagnostics), ["insufficient data for number"]);
}

#[test]
fn test_huge_claimed_string_length() {
    let decoded = decode::<String>(&[0xff, 0xff, 0xff, 0xff, 0x0f, b'a']);
    assert_eq!(decoded.value, "a");
    assert_eq!(
        messages(&decoded.diagnostics),
        ["insufficient data for string body: expected 4294967295 bytes but only found 1"]
    );
}

#[test]
fn test_huge_claimed_sequence_count() {
    let decoded = decode::<Vec<u8>>(&[0xff, 0xff, 0xff, 0xff, 0x0f, 1, 2]);
    assert_eq!(decoded.value, [1, 2]);
    assert_eq!(
        messages(&decoded.diagnostics),
        ["expected 4294967295 elements in sequence but only found 2"]
    );
}

#[derive(Debug, Default, PartialEq)]
struct Empty {}

traverse_record!(Empty {});

#[test]
fn test_zero_width_elements_are_bounded() {
    let mut bytes = to_vec(&10_000_000u64);
    bytes.push(0);
    let decoded = decode::<Vec<Empty>>(&bytes);
    assert_eq!(decoded.value.len(), 1);
    assert_eq!(
        messages(&decoded.diagnostics),
        [
            "sequence element consumed no input; stopped after 1 elements",
            "expected 10000000 elements in sequence but only found 1",
            "1 extra bytes after end of message",
        ]
    );
    assert!(decoded.diagnostics.has_errors());

    let mut bytes = to_vec(&u64::MAX);
    bytes.extend_from_slice(&[7; 4]);
    let decoded = decode::<Vec<Empty>>(&bytes);
    assert_eq!(decoded.value.len(), 1);
    assert!(decoded.diagnostics.contains(DiagnosticKind::Underflow));
}

#[test]
fn test_zero_width_elements_inside_sequences() {
    // Outer elements consume their own count byte, so only the inner
    // sequences are cut short.
    let bytes = [3, 5, 5, 5, 9];
    let decoded = decode::<Vec<Vec<Empty>>>(&bytes);
    assert_eq!(decoded.value.len(), 3);
    assert!(decoded.value.iter().all(|inner| inner.len() == 1));
    assert_eq!(
        decoded
            .diagnostics
            .iter()
            .filter(|d| d.message.starts_with("sequence element consumed no input"))
            .count(),
        3
    );
}

#[test]
fn test_sequence_position_tracking() {
    let bytes = to_vec(&vec![1u32, 300, 70_000]);
    let mut reader = BinaryReader::new(SliceSource::new(&bytes));
    let mut value = Vec::<u32>::new();
    traverse_mut(&mut reader, &mut value);
    assert_eq!(value, [1, 300, 70_000]);
    assert_eq!(reader.position(), bytes.len() as u64);
    assert!(reader.diagnostics().is_empty());
}

#[test]
fn test_invalid_utf8_string() {
    let bytes = [3, b'o', 0xff, b'k'];
    let decoded = decode::<String>(&bytes);
    assert_eq!(decoded.value, "o\u{fffd}k");
    assert_eq!(
        messages(&decoded.diagnostics),
        ["string is not valid UTF-8 after byte 1"]
    );
    assert_eq!(decoded.diagnostics[0].kind, DiagnosticKind::Encoding);

    let raw = decode::<ByteString>(&bytes);
    assert!(raw.diagnostics.is_empty());
    assert_eq!(raw.value.as_slice(), &bytes[1..]);
}

#[test]
fn test_small_chunks_report_same_count() {
    let bytes = [5, b'a', b'b', b'c'];
    let options = ReadOptions::new().chunk_size(2);
    let mut reader = BinaryReader::with_options(SliceSource::new(&bytes), options);
    let mut text = String::new();
    traverse_mut(&mut reader, &mut text);
    assert_eq!(text, "abc");
    assert_eq!(
        messages(reader.diagnostics()),
        ["insufficient data for string body: expected 5 bytes but only found 3"]
    );
}

#[test]
fn test_chunk_size_is_at_least_one() {
    assert_eq!(ReadOptions::new().chunk_size(0).get_chunk_size(), 1);
    assert_eq!(ReadOptions::default().get_chunk_size(), 4096);
    assert!(!ReadOptions::default().rejects_trailing_data());
}

#[test]
fn test_malformed_error_display() {
    let bytes = to_vec(&ufo());
    let error = from_slice::<Polygon>(&bytes[..9]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "malformed input: insufficient data for string body: expected 9 bytes but only found 6"
    );
    let Error::Malformed(diagnostics) = error else {
        panic!("expected malformed input");
    };
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics.to_string(),
        "Error: insufficient data for string body: expected 9 bytes but only found 6\n\
         Error: insufficient data for sequence length\n"
    );
}

#[test]
fn test_into_result() {
    assert_eq!(decode::<Point>(&[6, 10]).into_result().unwrap(), Point { x: 3, y: 5 });
    assert!(matches!(
        decode::<Point>(&[6]).into_result(),
        Err(Error::Malformed(_))
    ));
}
