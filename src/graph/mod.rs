//! Communication graph: who replies to whom, weighted by words exchanged.
//!
//! Loads the directory and the channel archive, scores every thread reply
//! into a person matrix and a department matrix, and writes both as
//! edge lists (`people.csv`, `departments.csv`) in the output directory.

pub mod aggregator;
pub mod formatter;
pub mod matcher;
mod report;

use std::error::Error;
use std::fs;
use std::time::Instant;

use chrono::Utc;

use crate::archive;
use crate::config::Settings;
use crate::directory;
use crate::util::parse_since;
use crate::walk::ChannelFilter;
use aggregator::aggregate;
use formatter::{ReportOptions, edges};
use report::{
    DEPARTMENTS_HEADER, PEOPLE_HEADER, print_json, print_report, print_stats, render_csv,
    write_outputs,
};

pub const PEOPLE_FILE: &str = "people.csv";
pub const DEPARTMENTS_FILE: &str = "departments.csv";

/// `tg graph`: build both edge lists, write them, and print the top `top`
/// rows of each (or everything as JSON).
pub fn run(settings: &Settings, json: bool, top: usize, verbose: bool) -> Result<(), Box<dyn Error>> {
    let started = Instant::now();

    let directory = directory::load(settings)?;
    let filter = ChannelFilter::new(&settings.exclude_channels)?;
    let since = match settings.since.as_deref() {
        Some(s) => Some(parse_since(s, Utc::now())?),
        None => None,
    };
    let archive = archive::load(&settings.data_dir, &filter, settings.match_scope, since)?;

    let scores = aggregate(&archive.feeds, &directory);
    if scores.people.is_empty() {
        tracing::warn!("no replies were scored: check org chart emails and --since");
    } else {
        tracing::info!(
            "{} person cells, {} department cells",
            scores.people.len(),
            scores.departments.len()
        );
    }
    let people = edges(
        &scores.people,
        &ReportOptions {
            threshold: settings.minimum_word_count,
            anonymize: settings.obfuscate_names,
        },
    );
    let departments = edges(
        &scores.departments,
        &ReportOptions {
            threshold: settings.minimum_word_count,
            anonymize: false,
        },
    );

    let people_csv = render_csv(PEOPLE_HEADER, &people)?;
    let departments_csv = render_csv(DEPARTMENTS_HEADER, &departments)?;

    let out = &settings.output_dir;
    fs::create_dir_all(out).map_err(|e| format!("{}: {e}", out.display()))?;
    let people_path = out.join(PEOPLE_FILE);
    let departments_path = out.join(DEPARTMENTS_FILE);
    write_outputs(&[
        (people_path.clone(), people_csv),
        (departments_path.clone(), departments_csv),
    ])?;
    tracing::info!(
        "wrote {} ({} rows) and {} ({} rows)",
        people_path.display(),
        people.len(),
        departments_path.display(),
        departments.len()
    );

    if json {
        print_json(&people, &departments)?;
    } else {
        print_report("People", PEOPLE_HEADER, &people[..top.min(people.len())], people.len());
        println!();
        print_report(
            "Departments",
            DEPARTMENTS_HEADER,
            &departments[..top.min(departments.len())],
            departments.len(),
        );
        println!();
        println!(
            "Wrote {} and {}.",
            people_path.display(),
            departments_path.display()
        );
        if verbose {
            print_stats(&archive.stats, &scores.stats, started.elapsed());
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
