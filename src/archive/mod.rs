//! Channel archive: the exported message history the graph is built from.
//!
//! An export is a directory of channel folders, each holding JSON files
//! with an array of messages. Threaded messages list their replies by
//! author and timestamp; the text of a reply lives in its own message
//! entry with that timestamp.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

use crate::util::ts_seconds;
use crate::walk::{self, ChannelFilter};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Message {
    #[serde(rename = "user", default)]
    pub sender_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "ts", default)]
    pub timestamp: String,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Reply {
    #[serde(rename = "user", default)]
    pub sender_id: String,
    #[serde(rename = "ts", default)]
    pub timestamp: String,
}

/// How much of the archive a reply's timestamp is looked up in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchScope {
    /// Each export file is its own feed.
    #[default]
    File,
    /// All files of a channel directory form one feed.
    Channel,
}

/// The message list replies are matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelFeed {
    pub channel: String,
    pub source: PathBuf,
    pub messages: Vec<Message>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArchiveStats {
    pub channels: usize,
    pub files: usize,
    pub messages: usize,
    pub dropped_before_since: usize,
}

pub struct Archive {
    pub feeds: Vec<ChannelFeed>,
    pub stats: ArchiveStats,
}

/// Parse one export file. Any read or JSON error is fatal and names the file.
pub fn parse_messages(path: &Path) -> Result<Vec<Message>, Box<dyn Error>> {
    let content = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let messages: Vec<Message> =
        serde_json::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(messages)
}

/// Discover and parse every channel export under `data_dir`.
///
/// With `since`, messages whose timestamp is earlier than the cutoff are
/// dropped before they can be matched or scored. Messages with an
/// unparseable timestamp are kept.
pub fn load(
    data_dir: &Path,
    filter: &ChannelFilter,
    scope: MatchScope,
    since: Option<i64>,
) -> Result<Archive, Box<dyn Error>> {
    let files = walk::channel_files(data_dir, filter)?;
    let mut stats = ArchiveStats::default();
    let mut feeds: Vec<ChannelFeed> = Vec::new();

    for file in files {
        let mut messages = parse_messages(&file.path)?;
        tracing::debug!("{}: {} messages", file.path.display(), messages.len());
        stats.files += 1;

        if let Some(cutoff) = since {
            let before = messages.len();
            messages.retain(|m| ts_seconds(&m.timestamp).is_none_or(|secs| secs >= cutoff));
            stats.dropped_before_since += before - messages.len();
        }
        stats.messages += messages.len();

        let new_channel = feeds.last().is_none_or(|f| f.channel != file.channel);
        if new_channel {
            stats.channels += 1;
        }

        match scope {
            MatchScope::Channel if !new_channel => {
                if let Some(feed) = feeds.last_mut() {
                    feed.messages.extend(messages);
                }
            }
            MatchScope::Channel => {
                let source = file
                    .path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| file.path.clone());
                feeds.push(ChannelFeed {
                    channel: file.channel,
                    source,
                    messages,
                });
            }
            MatchScope::File => feeds.push(ChannelFeed {
                channel: file.channel,
                source: file.path,
                messages,
            }),
        }
    }

    Ok(Archive { feeds, stats })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
