use spanfmt::{FormatError, IoSink};
use std::fs;

#[test]
fn test_write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let mut sink = IoSink::create(&path).unwrap();
    spanfmt::print_to!(&mut sink, "it's {}\n", 2021);
    spanfmt::print_to!(&mut sink, "it's not {}\n", -1999);
    sink.flush();
    assert!(!sink.has_failed());
    drop(sink);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "it's 2021\nit's not -1999\n"
    );
}

#[test]
fn test_unavailable_destination() {
    let dir = tempfile::tempdir().unwrap();
    let err = IoSink::create(dir.path()).err().unwrap();

    match &err {
        FormatError::SinkUnavailable { destination, .. } => {
            assert_eq!(destination, &dir.path().display().to_string());
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(err.to_string().starts_with("cannot open output"));
}
