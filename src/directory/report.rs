use serde::Serialize;

use super::resolver::Identity;
use crate::report_helpers::{self, max_label_width, pad};

pub fn print_report(identities: &[&Identity]) {
    if identities.is_empty() {
        println!("No users found in the directory.");
        return;
    }

    let id_w = max_label_width(identities.iter().map(|i| i.id.as_str()), 2);
    let name_w = max_label_width(identities.iter().map(|i| i.display_name.as_str()), 4);
    let dept_w = max_label_width(
        identities.iter().map(|i| i.department.as_deref().unwrap_or("-")),
        10,
    );
    // id + 2 + name + 2 + dept + 2 + status(16) + 1
    let separator = report_helpers::separator((id_w + name_w + dept_w + 23).max(60));

    println!("People Directory");
    println!("{separator}");
    println!(
        " {}  {}  {}  {}",
        pad("Id", id_w),
        pad("Name", name_w),
        pad("Department", dept_w),
        "Status"
    );
    println!("{separator}");

    for i in identities {
        println!(
            " {}  {}  {}  {}",
            pad(&i.id, id_w),
            pad(&i.display_name, name_w),
            pad(i.department.as_deref().unwrap_or("-"), dept_w),
            i.status.label()
        );
    }

    println!("{separator}");
    let included = identities.iter().filter(|i| i.included).count();
    println!(
        " {included} of {} users seed the graph.",
        identities.len()
    );
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    id: &'a str,
    name: &'a str,
    department: Option<&'a str>,
    included: bool,
    status: &'static str,
}

pub fn print_json(identities: &[&Identity]) -> Result<(), Box<dyn std::error::Error>> {
    let entries: Vec<JsonEntry> = identities
        .iter()
        .map(|i| JsonEntry {
            id: &i.id,
            name: &i.display_name,
            department: i.department.as_deref(),
            included: i.included,
            status: i.status.label(),
        })
        .collect();

    report_helpers::print_json_stdout(&entries)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
