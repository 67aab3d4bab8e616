use std::error::Error;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

/// Channel-name exclusion built from `--exclude-channel` globs.
#[derive(Clone)]
pub struct ChannelFilter {
    excludes: GlobSet,
}

impl ChannelFilter {
    pub fn new(patterns: &[String]) -> Result<Self, Box<dyn Error>> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| format!("invalid channel pattern {pattern:?}: {e}"))?;
            builder.add(glob);
        }
        Ok(Self {
            excludes: builder.build()?,
        })
    }

    pub fn excludes(&self, channel: &str) -> bool {
        self.excludes.is_match(channel)
    }
}

/// One export file inside a channel directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelFile {
    pub channel: String,
    pub path: PathBuf,
}

fn is_export_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// List the `*.json` exports of every channel directory directly under
/// `data_dir`, in file-name order. Top-level files (`users.json`,
/// `channels.json`) are not channels. Hidden entries are skipped;
/// `.gitignore` rules are not applied.
pub fn channel_files(
    data_dir: &Path,
    filter: &ChannelFilter,
) -> Result<Vec<ChannelFile>, Box<dyn Error>> {
    if !data_dir.is_dir() {
        return Err(format!("data directory not found: {}", data_dir.display()).into());
    }

    let dir_filter = filter.clone();
    let walker = WalkBuilder::new(data_dir)
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .max_depth(Some(2))
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            if entry.depth() == 1 && entry.file_type().is_some_and(|ft| ft.is_dir()) {
                let name = entry.file_name().to_string_lossy();
                if dir_filter.excludes(&name) {
                    tracing::debug!("skipping excluded channel {name}");
                    return false;
                }
            }
            true
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| format!("{}: {e}", data_dir.display()))?;
        if entry.depth() != 2 || !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if !is_export_file(path) {
            continue;
        }
        let Some(channel) = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
        else {
            continue;
        };
        files.push(ChannelFile {
            channel,
            path: path.to_path_buf(),
        });
    }

    Ok(files)
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
