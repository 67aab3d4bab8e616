use std::collections::HashMap;

use crate::archive::Message;

/// Words in a message: tokens between single spaces. An empty text is one
/// (empty) token, and runs of spaces produce empty tokens too.
pub fn word_count(text: &str) -> u64 {
    text.split(' ').count() as u64
}

/// Timestamp → word count for one feed, built once so every reply lookup
/// is a hash probe. A reply's words are those of the first message in the
/// feed stamped exactly with the reply's timestamp; later duplicates are
/// ignored, and a timestamp no message carries is absent.
pub struct TimestampIndex<'a> {
    counts: HashMap<&'a str, u64>,
}

impl<'a> TimestampIndex<'a> {
    pub fn build(messages: &'a [Message]) -> Self {
        let mut counts = HashMap::with_capacity(messages.len());
        for m in messages {
            counts
                .entry(m.timestamp.as_str())
                .or_insert_with(|| word_count(&m.text));
        }
        Self { counts }
    }

    pub fn get(&self, ts: &str) -> Option<u64> {
        self.counts.get(ts).copied()
    }
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
