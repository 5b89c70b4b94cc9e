//! Conformance tests that run YAML fixtures against casekit
//!
//! Run with: cargo test -p casekit-test --test conformance --features casekit-test/fixtures

#![cfg(feature = "fixtures")]

use casekit_test::fixture::Fixture;
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and run all fixtures in a directory
fn run_fixtures_in_dir(dir: &Path) {
    assert!(dir.exists(), "Fixtures directory does not exist: {}", dir.display());

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|e| e == "yaml" || e == "yml"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "No fixtures in {}", dir.display());

    for path in paths {
        println!("Running fixture: {}", path.display());
        let yaml = fs::read_to_string(&path).expect("read yaml");
        let fixtures = Fixture::from_yaml_multi(&yaml)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));

        for fixture in fixtures {
            println!("  Running: {}", fixture.name);
            fixture.run_and_assert();
        }
    }
}

#[test]
fn test_literals() {
    run_fixtures_in_dir(&fixtures_dir().join("01_literals"));
}

#[test]
fn test_tuples() {
    run_fixtures_in_dir(&fixtures_dir().join("02_tuples"));
}

#[test]
fn test_structs() {
    run_fixtures_in_dir(&fixtures_dir().join("03_structs"));
}

#[test]
fn test_semantics() {
    run_fixtures_in_dir(&fixtures_dir().join("04_semantics"));
}

#[test]
fn test_guards() {
    run_fixtures_in_dir(&fixtures_dir().join("05_guards"));
}

#[test]
fn test_invalid_configs() {
    run_fixtures_in_dir(&fixtures_dir().join("06_invalid"));
}
