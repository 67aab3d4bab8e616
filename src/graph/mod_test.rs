use super::*;

use std::path::Path;

use crate::archive::MatchScope;
use crate::config::Layer;

const USERS: &str = r#"[
  {"id": "U1", "real_name": "Jane Doe", "profile": {"email": "jane@acme.com"}},
  {"id": "U2", "real_name": "Raj Patel", "profile": {"email": "raj@acme.com"}}
]"#;

const ORG_CHART: &str = "\
Name,Department,Title,Manager,Email
Jane Doe,Engineering,Engineer,Raj Patel,jane@acme.com
Raj Patel,\"Sales, EMEA\",Director,,raj@acme.com
";

const DAY_ONE: &str = r#"[
  {"user": "U1", "text": "hello world", "ts": "1700000000.000100",
   "replies": [{"user": "U2", "ts": "1700000060.000200"}]},
  {"user": "U2", "text": "hi there friend", "ts": "1700000060.000200"}
]"#;

fn write_export(root: &Path) {
    let data = root.join("data");
    fs::create_dir_all(data.join("general")).unwrap();
    fs::write(data.join("users.json"), USERS).unwrap();
    fs::write(data.join("org_chart.csv"), ORG_CHART).unwrap();
    fs::write(data.join("general/2023-11-14.json"), DAY_ONE).unwrap();
}

fn settings(root: &Path, threshold: i64) -> Settings {
    Settings::resolve(Layer {
        data_dir: Some(root.join("data")),
        output_dir: Some(root.join("out")),
        minimum_word_count: Some(threshold),
        ..Layer::default()
    })
}

fn read(root: &Path, file: &str) -> String {
    fs::read_to_string(root.join("out").join(file)).unwrap()
}

#[test]
fn test_writes_edge_above_threshold() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    run(&settings(dir.path(), 4), false, 20, true).unwrap();

    assert_eq!(
        read(dir.path(), PEOPLE_FILE),
        "name,talks to,word count\nJane Doe,Raj Patel,5\n"
    );
    assert_eq!(
        read(dir.path(), DEPARTMENTS_FILE),
        "department,talks to,word count\nEngineering,\"Sales, EMEA\",5\n"
    );
}

#[test]
fn test_threshold_is_strict() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    run(&settings(dir.path(), 5), false, 20, false).unwrap();

    assert_eq!(read(dir.path(), PEOPLE_FILE), "name,talks to,word count\n");
    assert_eq!(
        read(dir.path(), DEPARTMENTS_FILE),
        "department,talks to,word count\n"
    );
}

#[test]
fn test_obfuscate_hides_people_not_departments() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    let mut s = settings(dir.path(), 4);
    s.obfuscate_names = true;
    run(&s, true, 20, false).unwrap();

    let people = read(dir.path(), PEOPLE_FILE);
    assert!(!people.contains("Jane"), "got: {people}");
    assert!(people.contains(&format!(
        "{},{},5",
        formatter::pseudonym("Jane Doe"),
        formatter::pseudonym("Raj Patel")
    )));
    assert!(read(dir.path(), DEPARTMENTS_FILE).contains("Engineering"));
}

#[test]
fn test_excluded_channel_is_not_scored() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    let mut s = settings(dir.path(), 4);
    s.exclude_channels = vec!["gen*".to_string()];
    run(&s, false, 20, false).unwrap();
    assert_eq!(read(dir.path(), PEOPLE_FILE), "name,talks to,word count\n");
}

#[test]
fn test_channel_scope_matches_across_files() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    let general = dir.path().join("data/general");
    fs::write(
        general.join("2023-11-14.json"),
        r#"[{"user": "U1", "text": "hello world", "ts": "1700000000.1",
             "replies": [{"user": "U2", "ts": "1700090000.2"}]}]"#,
    )
    .unwrap();
    fs::write(
        general.join("2023-11-15.json"),
        r#"[{"user": "U2", "text": "hi there friend", "ts": "1700090000.2"}]"#,
    )
    .unwrap();

    run(&settings(dir.path(), 4), false, 20, false).unwrap();
    assert_eq!(read(dir.path(), PEOPLE_FILE), "name,talks to,word count\n");

    let mut s = settings(dir.path(), 4);
    s.match_scope = MatchScope::Channel;
    run(&s, false, 20, false).unwrap();
    assert!(read(dir.path(), PEOPLE_FILE).contains("Jane Doe,Raj Patel,5"));
}

#[test]
fn test_leaves_other_output_files_alone() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("notes.txt"), "keep me").unwrap();

    run(&settings(dir.path(), 4), false, 20, false).unwrap();
    assert_eq!(fs::read_to_string(out.join("notes.txt")).unwrap(), "keep me");
}

#[test]
fn test_missing_users_is_fatal_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    fs::remove_file(dir.path().join("data/users.json")).unwrap();

    let err = run(&settings(dir.path(), 4), false, 20, false).unwrap_err();
    assert!(err.to_string().contains("users.json"), "got: {err}");
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_malformed_export_is_fatal_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    fs::write(dir.path().join("data/general/2023-11-16.json"), "[{").unwrap();

    let err = run(&settings(dir.path(), 4), false, 20, false).unwrap_err();
    assert!(err.to_string().contains("2023-11-16.json"), "got: {err}");
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_bad_since_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    let mut s = settings(dir.path(), 4);
    s.since = Some("soon".to_string());
    assert!(run(&s, false, 20, false).is_err());
}

#[test]
fn test_since_drops_old_threads() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    let mut s = settings(dir.path(), 4);
    s.since = Some("2024-01-01".to_string());
    run(&s, false, 20, false).unwrap();
    assert_eq!(read(dir.path(), PEOPLE_FILE), "name,talks to,word count\n");
}

#[test]
fn test_failed_write_leaves_no_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    let out = dir.path().join("out");
    fs::create_dir_all(out.join(DEPARTMENTS_FILE)).unwrap();

    let err = run(&settings(dir.path(), 4), false, 20, false).unwrap_err();
    assert!(err.to_string().contains(DEPARTMENTS_FILE), "got: {err}");
    assert!(!out.join(PEOPLE_FILE).exists());
}

#[test]
fn test_negative_threshold_writes_every_pair() {
    let dir = tempfile::tempdir().unwrap();
    write_export(dir.path());
    let general = dir.path().join("data/general");
    fs::write(
        general.join("2023-11-15.json"),
        r#"[{"user": "U1", "text": "ping", "ts": "1700090000.1",
             "replies": [{"user": "U404", "ts": "1700090001.1"}]}]"#,
    )
    .unwrap();

    run(&settings(dir.path(), -1), false, 20, false).unwrap();
    assert_eq!(
        read(dir.path(), PEOPLE_FILE),
        "name,talks to,word count\nJane Doe,Raj Patel,5\n,Jane Doe,1\n,Raj Patel,0\n"
    );
}
