//! People directory: who takes part in the graph and under which name
//! and department.
//!
//! Joins the workspace user export against the org-chart CSV by email.
//! Deleted, bot and guest accounts never get a name; people listed in the
//! optional ignore file keep their name and department (so replies to
//! them still resolve) but their own threads are not scored.

mod report;
pub mod resolver;

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::config::Settings;
use report::{print_json, print_report};
pub use resolver::{Directory, Identity, OrgRow, UserRecord};

/// Zero-based org-chart columns holding the department and the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrgColumns {
    pub department: usize,
    pub email: usize,
}

impl Default for OrgColumns {
    fn default() -> Self {
        Self {
            department: 1,
            email: 4,
        }
    }
}

pub fn load_users(path: &Path) -> Result<Vec<UserRecord>, Box<dyn Error>> {
    let content = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let users = serde_json::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(users)
}

/// Read the org chart, skipping its header row. Every row must have the
/// same number of fields and reach both configured columns.
pub fn load_org_chart(path: &Path, columns: OrgColumns) -> Result<Vec<OrgRow>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| format!("{}: {e}", path.display()))?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| format!("{}: {e}", path.display()))?;
        // header is line 1
        let line = i + 2;
        let field = |col: usize| {
            record.get(col).map(str::to_string).ok_or_else(|| {
                format!(
                    "{}: line {line} has {} columns, expected at least {}",
                    path.display(),
                    record.len(),
                    col + 1
                )
            })
        };
        rows.push(OrgRow {
            department: field(columns.department)?,
            email: field(columns.email)?,
        });
    }
    Ok(rows)
}

/// Read the optional ignore list. A missing file means nobody is ignored.
pub fn load_ignore_list(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Load all three inputs named in `settings` and resolve them.
pub fn load(settings: &Settings) -> Result<Directory, Box<dyn Error>> {
    let users = load_users(&settings.users)?;
    let org_chart = load_org_chart(&settings.org_chart, settings.org_columns)?;
    let ignored = load_ignore_list(&settings.ignore)?;

    let directory = Directory::resolve(&users, &org_chart, &ignored);
    tracing::info!(
        "{} users, {} org chart rows, {} included",
        users.len(),
        org_chart.len(),
        directory.included_count()
    );
    Ok(directory)
}

/// `tg directory`: print the resolved people table.
pub fn run(settings: &Settings, json: bool, included_only: bool) -> Result<(), Box<dyn Error>> {
    let directory = load(settings)?;

    let mut identities: Vec<&Identity> = directory
        .identities()
        .iter()
        .filter(|i| !included_only || i.included)
        .collect();
    identities.sort_by(|a, b| {
        a.status
            .sort_key()
            .cmp(&b.status.sort_key())
            .then_with(|| a.display_name.cmp(&b.display_name))
    });

    if json {
        print_json(&identities)
    } else {
        print_report(&identities);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
