use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use ketodot::config::AppConfig;
use ketodot::error::AppError;
use ketodot::input::Source;
use ketodot::pipeline::{run_and_emit, run_once};
use ketodot_core::{ColorError, ParseError};

const DOCUMENTS: &str = r#"
// document ownership
docs:readme#owner@alice
docs:readme#viewer@(groups:eng#member)

// group membership
groups:eng#member@bob
groups:eng#member@(groups:ops#member)
groups:ops#member@carol
"#;

const FILES: &str = r#"
files:report#owner@dave
files:report#viewer@(files:report#owner)
"#;

fn write(dir: &Path, name: &str, contents: &str) -> Source {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    Source::File(path)
}

/// Edge lines grouped by their color attribute.
fn edges_by_color(dot: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for line in dot.lines().filter(|l| l.contains(" -> ")) {
        let (edge, attrs) = line.split_once(" [").unwrap();
        let color = attrs
            .split("color=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap()
            .to_string();
        groups.entry(color).or_default().insert(edge.trim().to_string());
    }
    groups
}

#[test]
fn renders_colored_graph_from_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "docs.keto", DOCUMENTS);

    let outcome = run_once(&[source], &AppConfig::default()).unwrap();

    assert_eq!(outcome.tuples, 5);
    assert_eq!(outcome.summary.groups, 2);
    assert!(outcome.dot.starts_with("digraph {\n"));
    assert!(outcome.dot.ends_with("}\n"));

    let groups = edges_by_color(&outcome.dot);
    assert_eq!(groups.len(), 2);
    let chain = groups.values().find(|g| g.len() == 4).unwrap();
    assert!(chain.contains("\"docs:readme\" -> \"groups:eng\""));
    assert!(chain.contains("\"groups:ops\" -> \"carol\""));
}

#[test]
fn tuples_from_all_files_are_colored_together() {
    let dir = tempfile::tempdir().unwrap();
    let first = write(dir.path(), "docs.keto", DOCUMENTS);
    let second = write(dir.path(), "files.keto", FILES);

    let outcome = run_once(&[first, second], &AppConfig::default()).unwrap();

    assert_eq!(outcome.sources, 2);
    assert_eq!(outcome.tuples, 7);
    assert_eq!(outcome.summary.groups, 3);

    let lines: Vec<_> = outcome.dot.lines().collect();
    assert!(lines[1].contains("\"docs:readme\" -> \"alice\""));
    assert!(lines[7].contains("\"files:report\" -> \"files:report\""));
}

#[test]
fn repeated_runs_produce_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "docs.keto", DOCUMENTS);
    let config = AppConfig::default();

    let first = run_once(std::slice::from_ref(&source), &config).unwrap();
    let second = run_once(std::slice::from_ref(&source), &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn decode_error_names_file_and_line() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "good.keto", FILES);
    let bad = write(dir.path(), "bad.keto", "// header\ndocs:readme#owner@alice\ndocs:readme\n");

    let err = run_once(&[good, bad], &AppConfig::default()).unwrap_err();

    match err {
        AppError::Decode { ref file, ref error } => {
            assert!(file.ends_with("bad.keto"));
            assert_eq!(error.line, 3);
            assert_eq!(error.source, ParseError::MissingSeparator { separator: '#' });
        }
        other => panic!("expected Decode error, got: {other:?}"),
    }
    assert!(err.to_string().contains("bad.keto:3"));
}

#[test]
fn configured_palette_is_used_and_can_run_out() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "docs.keto", DOCUMENTS);
    let mut config = AppConfig::default();

    config.palette.colors = Some(vec!["red".into(), "blue".into()]);
    let outcome = run_once(std::slice::from_ref(&source), &config).unwrap();
    let colors: BTreeSet<_> = edges_by_color(&outcome.dot).into_keys().collect();
    assert_eq!(colors, BTreeSet::from(["red".to_string(), "blue".to_string()]));

    config.palette.colors = Some(vec!["red".into()]);
    let err = run_once(std::slice::from_ref(&source), &config).unwrap_err();
    assert!(matches!(
        err,
        AppError::Color(ColorError::PaletteExhausted { palette_size: 1 })
    ));
}

#[test]
fn missing_input_file_is_reported() {
    let source = Source::File(PathBuf::from("/nonexistent/tuples.keto"));

    let err = run_once(&[source], &AppConfig::default()).unwrap_err();

    assert!(matches!(err, AppError::Input(_)));
}

#[test]
fn run_and_emit_writes_dot_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "files.keto", FILES);
    let mut stdout = Vec::new();

    let outcome = run_and_emit(&[source], &AppConfig::default(), &mut stdout).unwrap();

    assert_eq!(String::from_utf8(stdout).unwrap(), outcome.dot);
}

#[test]
fn run_and_emit_writes_dot_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "files.keto", FILES);
    let target = dir.path().join("graph.dot");
    let mut config = AppConfig::default();
    config.output.path = Some(target.clone());
    let mut stdout = Vec::new();

    let outcome = run_and_emit(&[source], &config, &mut stdout).unwrap();

    assert!(stdout.is_empty());
    assert_eq!(std::fs::read_to_string(target).unwrap(), outcome.dot);
}

#[test]
fn failed_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "bad.keto", "broken\n");
    let mut stdout = Vec::new();

    let result = run_and_emit(&[source], &AppConfig::default(), &mut stdout);

    assert!(result.is_err());
    assert!(stdout.is_empty());
}
