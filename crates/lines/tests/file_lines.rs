use std::fs;

use lines::{Charset, LineBuffer, LinesBuilder, LinesError, Termination, UNBOUNDED, lines};
use proptest::prelude::*;
use test_support::write_lines;

#[test]
fn reads_file_lines_in_order_across_requests() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_lines(dir.path(), "five.txt", &["1", "2", "3", "4", "5"], "\n", true)
        .expect("write");

    let mut producer = lines(&path).expect("open");
    let mut buffer = LineBuffer::new();
    producer.request(2, &mut buffer);
    assert_eq!(buffer.lines(), ["1", "2"]);
    producer.request(3, &mut buffer);
    assert_eq!(buffer.lines(), ["1", "2", "3", "4", "5"]);
    assert!(!buffer.is_completed());

    producer.request(1, &mut buffer);
    assert!(buffer.is_completed());
    assert_eq!(producer.termination(), Some(Termination::Completed));
    assert!(!producer.is_open());
}

#[test]
fn mixed_terminators_split_into_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mixed.txt");
    fs::write(&path, "unix\nwindows\r\nmac\rlast").expect("write");

    let collected: Vec<String> = lines(&path)
        .expect("open")
        .collect::<Result<_, _>>()
        .expect("read");
    assert_eq!(collected, ["unix", "windows", "mac", "last"]);
}

#[test]
fn empty_file_completes_without_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").expect("write");

    let mut producer = lines(&path).expect("open");
    let mut buffer = LineBuffer::new();
    producer.request(UNBOUNDED, &mut buffer);
    assert!(buffer.lines().is_empty());
    assert!(buffer.is_completed());
}

#[test]
fn missing_file_fails_at_call_time() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.txt");

    let error = lines(&path).expect_err("missing file");
    assert!(matches!(error, LinesError::Open { .. }));
    assert_eq!(error.path(), Some(path.as_path()));
}

#[test]
fn deferred_missing_file_fails_through_the_sequence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.txt");

    let mut producer = LinesBuilder::new(&path)
        .deferred(true)
        .open()
        .expect("deferred open never fails");
    let first = producer.next().expect("one item");
    assert!(matches!(first, Err(LinesError::Open { .. })));
    assert!(producer.next().is_none());
}

#[test]
fn decodes_latin1_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("latin1.txt");
    fs::write(&path, b"caf\xe9\nna\xefve\n").expect("write");

    let charset = Charset::for_label("latin1").expect("charset");
    let collected: Vec<String> = lines::lines_with_charset(&path, charset)
        .expect("open")
        .collect::<Result<_, _>>()
        .expect("decode");
    assert_eq!(collected, ["café", "naïve"]);
}

#[test]
fn malformed_utf8_is_a_decode_failure_after_good_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.txt");
    fs::write(&path, b"good\nbad \xff byte\n").expect("write");

    let mut producer = lines(&path).expect("open");
    let mut buffer = LineBuffer::new();
    producer.request(UNBOUNDED, &mut buffer);
    assert_eq!(buffer.lines(), ["good"]);
    assert!(matches!(buffer.error(), Some(LinesError::Decode { .. })));
    assert_eq!(producer.termination(), Some(Termination::Failed));
}

#[test]
fn cancel_mid_file_releases_the_handle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_lines(dir.path(), "long.txt", &["a", "b", "c", "d"], "\n", false)
        .expect("write");

    let mut producer = lines(&path).expect("open");
    let mut buffer = LineBuffer::new();
    producer.request(1, &mut buffer);
    producer.cancel().expect("cancel");
    assert!(!producer.is_open());
    producer.cancel().expect("cancel again");
    producer.request(UNBOUNDED, &mut buffer);
    assert_eq!(buffer.lines(), ["a"]);
}

proptest! {
    #[test]
    fn chunked_demand_yields_exactly_the_file(
        content in prop::collection::vec("[a-z ]{0,12}", 0..24),
        demands in prop::collection::vec(0u64..5, 0..8),
    ) {
        let dir = tempfile::tempdir().expect("tempdir");
        let refs: Vec<&str> = content.iter().map(String::as_str).collect();
        let path = write_lines(dir.path(), "gen.txt", &refs, "\n", !refs.is_empty())
            .expect("write");

        let mut producer = lines(&path).expect("open");
        let mut buffer = LineBuffer::new();
        let mut granted = 0u64;
        for demand in demands {
            producer.request(demand, &mut buffer);
            granted += demand;
            let expected = usize::try_from(granted).unwrap_or(usize::MAX).min(content.len());
            prop_assert_eq!(buffer.lines().len(), expected);
        }
        producer.request(UNBOUNDED, &mut buffer);

        prop_assert_eq!(buffer.lines(), content.as_slice());
        prop_assert!(buffer.is_completed());
        prop_assert!(!producer.is_open());
    }
}
