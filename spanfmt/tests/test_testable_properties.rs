use spanfmt::{encode, FormatError, IntBuffer, Options, Recorder, Scanner};

fn render_recorded(template: &str, f: impl FnOnce(&mut Scanner<'_, '_>)) -> Recorder {
    let mut rec = Recorder::new();
    let mut scanner = Scanner::new(template, &mut rec, Options::default());
    f(&mut scanner);
    scanner.finish().unwrap();
    rec
}

#[test]
fn test_identity_without_placeholders() {
    for template in ["", "foo\n", "no markers at all", "héllo wörld ✓\n", "{{escaped}}"] {
        let expected = template.replace("{{", "{").replace("}}", "}");
        assert_eq!(spanfmt::format!(template).unwrap(), expected);
    }
}

#[test]
fn test_hello_world() {
    let mut out = Vec::new();
    spanfmt::print_to!(&mut out, "hello {} nyan\n", "world");
    assert_eq!(out, b"hello world nyan\n");
}

#[test]
fn test_years() {
    assert_eq!(spanfmt::format!("it's {}\n", 2021).unwrap(), "it's 2021\n");
    assert_eq!(spanfmt::format!("it's {}\n", -1999).unwrap(), "it's -1999\n");
}

#[test]
fn test_encoder_round_trip() {
    let mut buf = IntBuffer::new();
    for n in [0u64, 9, 10, 99, 100, 101, 999, 1000, 65535, 4294967296, u64::MAX] {
        let text = std::str::from_utf8(encode(n, &mut buf)).unwrap().to_string();
        assert_eq!(text.parse::<u64>().unwrap(), n);
    }
    assert_eq!(encode(0u8, &mut buf), b"0");
}

#[test]
fn test_encoder_negative() {
    let mut buf = IntBuffer::new();
    for n in [-1i64, -9, -10, -99, -100, -12345, i64::MIN + 1, i64::MIN] {
        let bytes = encode(n, &mut buf);
        assert_eq!(bytes[0], b'-');
        let magnitude = std::str::from_utf8(&bytes[1..]).unwrap();
        assert_eq!(magnitude.parse::<u64>().unwrap(), n.unsigned_abs());
    }
}

#[test]
fn test_positional_binding_across_types() {
    let text = spanfmt::format!(
        "{}|{}|{}|{}|{}|{:?}",
        "first",
        2u8,
        -3i16,
        'd',
        true,
        "sixth"
    )
    .unwrap();
    assert_eq!(text, "first|2|-3|d|true|\"sixth\"");
}

#[test]
fn test_adjacent_placeholders_make_no_empty_writes() {
    let rec = render_recorded("{}{}", |s| {
        s.feed(&"a").unwrap();
        s.feed(&1).unwrap();
    });
    assert_eq!(rec.writes(), &[b"a".to_vec(), b"1".to_vec()]);
    assert!(rec.writes().iter().all(|w| !w.is_empty()));
}

#[test]
fn test_literal_and_argument_never_share_a_write() {
    let rec = render_recorded("x={} y={}.", |s| {
        s.feed(&10).unwrap();
        s.feed(&20).unwrap();
    });
    let writes: Vec<&[u8]> = rec.writes().iter().map(|w| w.as_slice()).collect();
    assert_eq!(
        writes,
        vec![&b"x="[..], &b"10"[..], &b" y="[..], &b"20"[..], &b"."[..]]
    );
}

#[test]
fn test_malformed_template_writes_nothing_past_marker() {
    let mut rec = Recorder::new();
    let err = spanfmt::try_print_to!(&mut rec, "value {oops} tail", 1).unwrap_err();

    assert!(matches!(err, FormatError::UnclosedPlaceholder { offset: 6 }));
    assert!(rec.writes().is_empty());
}

#[test]
fn test_too_few_arguments() {
    let err = spanfmt::format!("{} {} {}", 1, 2).unwrap_err();
    assert!(matches!(err, FormatError::MissingArgument { index: 2, offset: 6 }));
}

#[test]
fn test_too_many_arguments() {
    assert_eq!(spanfmt::format!("{}", 1, 2, 3).unwrap(), "1");

    let mut out = Vec::new();
    let err = spanfmt::try_write_to(&mut out, "{}", (1, 2), Options::new().strict()).unwrap_err();
    assert!(matches!(
        err,
        FormatError::SurplusArguments {
            placeholders: 1,
            supplied: 2
        }
    ));
}
