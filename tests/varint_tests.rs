use traverse::{SliceSource, varint};

fn encode_u(value: u64) -> Vec<u8> {
    let mut buf = Vec::new();
    varint::encode_unsigned(&mut buf, value);
    buf
}

fn encode_s(value: i64) -> Vec<u8> {
    let mut buf = Vec::new();
    varint::encode_signed(&mut buf, value);
    buf
}

fn roundtrip_u(value: u64) -> Option<u64> {
    let buf = encode_u(value);
    let mut source = SliceSource::new(&buf);
    let decoded = varint::decode_unsigned(&mut source);
    assert!(source.remaining().is_empty());
    decoded
}

fn roundtrip_s(value: i64) -> Option<i64> {
    let buf = encode_s(value);
    let mut source = SliceSource::new(&buf);
    let decoded = varint::decode_signed(&mut source);
    assert!(source.remaining().is_empty());
    decoded
}

#[test]
fn test_unsigned_known_encodings() {
    assert_eq!(encode_u(0), [0x00]);
    assert_eq!(encode_u(1), [0x01]);
    assert_eq!(encode_u(127), [0x7f]);
    assert_eq!(encode_u(128), [0x80, 0x01]);
    assert_eq!(encode_u(300), [0xac, 0x02]);
    assert_eq!(encode_u(16384), [0x80, 0x80, 0x01]);
    assert_eq!(
        encode_u(u64::MAX),
        [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
    );
}

#[test]
fn test_signed_known_encodings() {
    assert_eq!(encode_s(0), [0b0000_0000]);
    assert_eq!(encode_s(-1), [0b0000_0001]);
    assert_eq!(encode_s(1), [0b0000_0010]);
    assert_eq!(encode_s(-2), [0b0000_0011]);
    assert_eq!(encode_s(-64), [0x7f]);
    assert_eq!(encode_s(64), [0x80, 0x01]);
}

#[test]
fn test_zigzag_extremes() {
    assert_eq!(varint::zigzag(i64::MAX), u64::MAX - 1);
    assert_eq!(varint::zigzag(i64::MIN), u64::MAX);
    assert_eq!(varint::unzigzag(u64::MAX), i64::MIN);
    assert_eq!(varint::unzigzag(u64::MAX - 1), i64::MAX);
    assert_eq!(encode_s(i64::MIN).len(), varint::MAX_LEN);
}

#[test]
fn test_unsigned_roundtrip_edges() {
    for value in [
        0,
        1,
        0x7fff_ffff_ffff_fffe,
        0x7fff_ffff_ffff_ffff,
        0x8000_0000_0000_0000,
        0x8000_0000_0000_0001,
        0xffff_ffff_ffff_fffe,
        0xffff_ffff_ffff_ffff,
    ] {
        assert_eq!(roundtrip_u(value), Some(value), "value {value:#x}");
    }
}

#[test]
fn test_unsigned_roundtrip_powers_of_two() {
    for shift in 0..64 {
        let x = 1u64 << shift;
        for value in [x - 1, x, x.wrapping_add(1)] {
            assert_eq!(roundtrip_u(value), Some(value));
        }
    }
}

#[test]
fn test_signed_roundtrip_edges() {
    for value in [
        0,
        1,
        -1,
        -2,
        i64::MAX - 1,
        i64::MAX,
        i64::MIN,
        i64::MIN + 1,
    ] {
        assert_eq!(roundtrip_s(value), Some(value), "value {value}");
    }
}

#[test]
fn test_signed_roundtrip_near_zero() {
    for value in -100_000..100_000 {
        assert_eq!(roundtrip_s(value), Some(value));
    }
}

#[test]
fn test_encoded_len_matches_output() {
    for shift in 0..64 {
        let value = 1u64 << shift;
        assert_eq!(varint::encoded_len(value), encode_u(value).len());
        assert_eq!(varint::encoded_len(value - 1), encode_u(value - 1).len());
    }
    assert_eq!(varint::encoded_len(0), 1);
    assert_eq!(varint::encoded_len(u64::MAX), varint::MAX_LEN);
}

#[test]
fn test_decode_empty_source() {
    let mut source = SliceSource::new(&[]);
    assert_eq!(varint::decode_unsigned(&mut source), None);
    assert_eq!(varint::decode_signed(&mut source), None);
}

#[test]
fn test_decode_missing_terminator() {
    let mut source = SliceSource::new(&[0x80, 0x80, 0x80]);
    assert_eq!(varint::decode_unsigned(&mut source), None);
    assert!(source.remaining().is_empty());
}

#[test]
fn test_decode_stops_at_terminator() {
    let data = [0xac, 0x02, 0x05];
    let mut source = SliceSource::new(&data);
    assert_eq!(varint::decode_unsigned(&mut source), Some(300));
    assert_eq!(source.remaining(), [0x05]);
    assert_eq!(varint::decode_unsigned(&mut source), Some(5));
}

#[test]
fn test_decode_overlong_input_terminates() {
    let mut data = vec![0xff; 32];
    data.push(0x00);
    let mut source = SliceSource::new(&data);
    assert_eq!(varint::decode_unsigned(&mut source), Some(u64::MAX));
    assert!(source.remaining().is_empty());
}
