//! Reply scoring: turns threaded replies into directed word-count weights
//! between people and between departments.
//!
//! For every reply to a message from an included sender, the weight is the
//! parent's word count plus the word count of the reply's own message
//! (looked up by timestamp in the same feed). The weight is added to
//! `sender -> replier` in both matrices. Matrices stay directed here;
//! the formatter combines both directions.

use std::collections::{BTreeSet, HashMap};

use crate::archive::ChannelFeed;
use crate::directory::Directory;
use crate::util::ts_seconds;

use super::matcher::{TimestampIndex, word_count};

/// Directed weights keyed by `(source, target)`. Missing pairs read as 0.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    cells: HashMap<(String, String), u64>,
}

impl ScoreMatrix {
    pub fn add(&mut self, source: &str, target: &str, weight: u64) {
        *self
            .cells
            .entry((source.to_string(), target.to_string()))
            .or_insert(0) += weight;
    }

    pub fn get(&self, source: &str, target: &str) -> u64 {
        self.cells
            .get(&(source.to_string(), target.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Every label that appears as a source or a target, in sorted order.
    pub fn keys(&self) -> BTreeSet<&str> {
        self.cells
            .keys()
            .flat_map(|(s, t)| [s.as_str(), t.as_str()])
            .collect()
    }

    /// Number of non-empty directed cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AggregateStats {
    pub messages: usize,
    /// Messages with a sender and at least one reply.
    pub threads: usize,
    pub replies_scored: usize,
    /// Replies under a message whose sender is not included.
    pub replies_skipped: usize,
    /// Scored replies whose timestamp matched no message in the feed.
    pub replies_unmatched: usize,
    pub first_ts: Option<i64>,
    pub last_ts: Option<i64>,
}

impl AggregateStats {
    fn observe(&mut self, ts: &str) {
        if let Some(secs) = ts_seconds(ts) {
            self.first_ts = Some(self.first_ts.map_or(secs, |t| t.min(secs)));
            self.last_ts = Some(self.last_ts.map_or(secs, |t| t.max(secs)));
        }
    }
}

pub struct Scores {
    pub people: ScoreMatrix,
    pub departments: ScoreMatrix,
    pub stats: AggregateStats,
}

/// Score every feed against `directory`. Feeds are independent: a reply is
/// only matched against messages of its own feed.
pub fn aggregate(feeds: &[ChannelFeed], directory: &Directory) -> Scores {
    let mut people = ScoreMatrix::default();
    let mut departments = ScoreMatrix::default();
    let mut stats = AggregateStats::default();

    for feed in feeds {
        let index = TimestampIndex::build(&feed.messages);

        for message in &feed.messages {
            stats.messages += 1;
            stats.observe(&message.timestamp);

            if message.sender_id.is_empty() || message.replies.is_empty() {
                continue;
            }
            stats.threads += 1;

            if !directory.is_included(&message.sender_id) {
                stats.replies_skipped += message.replies.len();
                continue;
            }

            let parent_words = word_count(&message.text);
            let sender_name = directory.name_of(&message.sender_id);
            let sender_dept = directory.department_of(&message.sender_id);

            for reply in &message.replies {
                let reply_words = match index.get(&reply.timestamp) {
                    Some(n) => n,
                    None => {
                        stats.replies_unmatched += 1;
                        0
                    }
                };
                let weight = parent_words + reply_words;

                people.add(sender_name, directory.name_of(&reply.sender_id), weight);
                departments.add(
                    sender_dept,
                    directory.department_of(&reply.sender_id),
                    weight,
                );
                stats.replies_scored += 1;
            }
        }

        tracing::debug!(
            "{} ({}): {} messages",
            feed.channel,
            feed.source.display(),
            feed.messages.len()
        );
    }

    Scores {
        people,
        departments,
        stats,
    }
}

#[cfg(test)]
#[path = "aggregator_test.rs"]
mod tests;
