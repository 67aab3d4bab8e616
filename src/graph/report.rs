//! Output for `tg graph`: the two CSV edge lists written to disk, and the
//! summary printed to stdout.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use super::aggregator::AggregateStats;
use super::formatter::Edge;
use crate::archive::ArchiveStats;
use crate::report_helpers::{self, max_label_width, pad};
use crate::util::format_day;

pub const PEOPLE_HEADER: [&str; 3] = ["name", "talks to", "word count"];
pub const DEPARTMENTS_HEADER: [&str; 3] = ["department", "talks to", "word count"];

/// Render `edges` as CSV with `header` as the first row.
pub fn render_csv(header: [&str; 3], edges: &[Edge]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for edge in edges {
        let weight = edge.weight.to_string();
        writer.write_record([edge.source.as_str(), edge.target.as_str(), weight.as_str()])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    Ok(bytes)
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

fn remove_staged(staged: &[PathBuf]) {
    for tmp in staged {
        let _ = fs::remove_file(tmp);
    }
}

/// Replace every `(path, content)` pair or none of them.
///
/// Targets that exist but are not regular files fail the whole batch up
/// front. Contents are staged next to their targets and renamed into place
/// only once every one of them has been written.
pub fn write_outputs(outputs: &[(PathBuf, Vec<u8>)]) -> Result<(), Box<dyn Error>> {
    for (path, _) in outputs {
        if let Ok(meta) = fs::metadata(path)
            && !meta.is_file()
        {
            return Err(format!("{}: not a regular file", path.display()).into());
        }
    }

    let mut staged = Vec::with_capacity(outputs.len());
    for (path, content) in outputs {
        let tmp = staging_path(path);
        if let Err(e) = fs::write(&tmp, content) {
            remove_staged(&staged);
            let _ = fs::remove_file(&tmp);
            return Err(format!("{}: {e}", path.display()).into());
        }
        staged.push(tmp);
    }

    for (i, (path, _)) in outputs.iter().enumerate() {
        if let Err(e) = fs::rename(&staged[i], path) {
            remove_staged(&staged[i..]);
            return Err(format!("{}: {e}", path.display()).into());
        }
    }
    Ok(())
}

/// Print the first rows of one edge table. `total` is the number of rows
/// before truncation.
pub fn print_report(title: &str, header: [&str; 3], edges: &[Edge], total: usize) {
    println!("{title}");
    if edges.is_empty() {
        println!("No pairs above the word-count threshold.");
        return;
    }

    let source_w = max_label_width(edges.iter().map(|e| e.source.as_str()), header[0].len());
    let target_w = max_label_width(edges.iter().map(|e| e.target.as_str()), header[1].len());
    let separator = report_helpers::separator((source_w + target_w + 17).max(50));

    println!("{separator}");
    println!(
        " {}  {}  {:>10}",
        pad(header[0], source_w),
        pad(header[1], target_w),
        header[2]
    );
    println!("{separator}");

    for e in edges {
        println!(
            " {}  {}  {:>10}",
            pad(&e.source, source_w),
            pad(&e.target, target_w),
            e.weight
        );
    }

    println!("{separator}");
    if total > edges.len() {
        println!(" {total} pairs ({shown} shown).", shown = edges.len());
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    people: &'a [Edge],
    departments: &'a [Edge],
}

pub fn print_json(people: &[Edge], departments: &[Edge]) -> Result<(), Box<dyn Error>> {
    report_helpers::print_json_stdout(&JsonReport {
        people,
        departments,
    })
}

/// Run statistics shown with `--verbose`.
pub fn print_stats(archive: &ArchiveStats, scores: &AggregateStats, elapsed: Duration) {
    let span = match (scores.first_ts, scores.last_ts) {
        (Some(first), Some(last)) => format!("{} .. {}", format_day(first), format_day(last)),
        _ => "-".to_string(),
    };

    println!();
    println!(" Channels:          {}", archive.channels);
    println!(" Files:             {}", archive.files);
    println!(" Messages:          {}", archive.messages);
    if archive.dropped_before_since > 0 {
        println!(" Before --since:    {}", archive.dropped_before_since);
    }
    println!(" Threads:           {}", scores.threads);
    println!(" Replies scored:    {}", scores.replies_scored);
    println!(" Replies skipped:   {}", scores.replies_skipped);
    println!(" Replies unmatched: {}", scores.replies_unmatched);
    println!(" Date span:         {span}");
    println!(" Elapsed:           {:.2?}", elapsed);
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
