use super::*;

/// Word count of the first message stamped exactly `ts`, or 0. The index
/// must agree with this scan.
fn reply_word_count(messages: &[Message], ts: &str) -> u64 {
    messages
        .iter()
        .find(|m| m.timestamp == ts)
        .map_or(0, |m| word_count(&m.text))
}

fn indexed(messages: &[Message], ts: &str) -> u64 {
    TimestampIndex::build(messages).get(ts).unwrap_or(0)
}

fn msg(ts: &str, text: &str) -> Message {
    Message {
        sender_id: "U1".to_string(),
        text: text.to_string(),
        timestamp: ts.to_string(),
        replies: vec![],
    }
}

#[test]
fn word_count_empty_text_is_one() {
    assert_eq!(word_count(""), 1);
}

#[test]
fn word_count_simple() {
    assert_eq!(word_count("a b c"), 3);
    assert_eq!(word_count("hello"), 1);
}

#[test]
fn word_count_repeated_spaces_make_empty_tokens() {
    assert_eq!(word_count("a  b"), 3);
    assert_eq!(word_count(" a "), 3);
}

#[test]
fn word_count_only_splits_on_space() {
    assert_eq!(word_count("a\nb\tc"), 1);
}

#[test]
fn index_found() {
    let messages = vec![msg("1.0", "hello world"), msg("2.0", "hi there friend")];
    assert_eq!(indexed(&messages, "2.0"), 3);
}

#[test]
fn index_missing_is_zero() {
    let messages = vec![msg("1.0", "hello world")];
    assert_eq!(indexed(&messages, "9.0"), 0);
    assert_eq!(indexed(&[], "1.0"), 0);
}

#[test]
fn index_exact_string_match() {
    let messages = vec![msg("1.10", "one two")];
    assert_eq!(indexed(&messages, "1.1"), 0);
    assert_eq!(indexed(&messages, "1.100"), 0);
    assert_eq!(indexed(&messages, "1.10"), 2);
}

#[test]
fn index_first_match_wins() {
    let messages = vec![msg("1.0", "first"), msg("1.0", "second one here")];
    assert_eq!(indexed(&messages, "1.0"), 1);
}

#[test]
fn index_agrees_with_linear_scan() {
    let messages = vec![
        msg("1.0", "hello world"),
        msg("2.0", ""),
        msg("2.0", "duplicate stamp here"),
        msg("3.0", "a  b"),
    ];
    let index = TimestampIndex::build(&messages);
    for ts in ["1.0", "2.0", "3.0", "4.0", ""] {
        assert_eq!(
            index.get(ts).unwrap_or(0),
            reply_word_count(&messages, ts),
            "mismatch for ts {ts:?}"
        );
    }
}

#[test]
fn index_get_distinguishes_missing_from_present() {
    let messages = vec![msg("1.0", "x")];
    let index = TimestampIndex::build(&messages);
    assert_eq!(index.get("1.0"), Some(1));
    assert_eq!(index.get("2.0"), None);
}
