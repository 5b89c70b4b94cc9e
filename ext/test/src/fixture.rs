//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the casekit engine through the
//! production config path: YAML → `DispatcherConfig<String>` →
//! `GuardRegistry::load()` → `Dispatcher::call()`.
//!
//! # Format
//!
//! ```yaml
//! name: zero_is_strict
//! description: literal 0 never matches "0" or false
//! dispatcher:
//!   cases:
//!     - when: [ { type: literal, value: 0 } ]
//!       then: zero
//! cases:
//!   - name: number zero
//!     args: [0]
//!     expect: zero
//!   - name: string zero
//!     args: ["0"]
//!     expect: ~        # no case matches
//! ```
//!
//! A fixture with `expect_load_error` must fail to load, with an error
//! message containing that text; its `cases` are not run.

use casekit::{ConfigError, Dispatcher, DispatcherConfig, GuardRegistry, Value};
use serde::Deserialize;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub dispatcher: DispatcherConfig<String>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
    /// Expected substring of the load error, for fixtures that must not load.
    #[serde(default)]
    pub expect_load_error: Option<String>,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    /// Positional arguments. Omitted trailing positions are `Undefined`.
    #[serde(default)]
    pub args: Vec<Value>,
    /// The handler value, or `None` when no case should match.
    pub expect: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Compile the fixture's dispatcher against the default guard registry.
    pub fn load(&self) -> Result<Dispatcher<String>, ConfigError> {
        GuardRegistry::default().load(self.dispatcher.clone())
    }

    /// Run all test cases and return results
    ///
    /// # Errors
    ///
    /// Returns the load error if the dispatcher does not compile.
    pub fn run(&self) -> Result<Vec<CaseResult>, ConfigError> {
        let dispatcher = self.load()?;
        Ok(self
            .cases
            .iter()
            .map(|case| {
                let actual = dispatcher.call(&case.args).ok();
                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.expect,
                    expected: case.expect.clone(),
                    actual,
                }
            })
            .collect())
    }

    /// Run the fixture and panic on first failure
    pub fn run_and_assert(&self) {
        if let Some(expected) = &self.expect_load_error {
            match self.load() {
                Ok(_) => panic!(
                    "Fixture '{}' loaded, but expected error containing {expected:?}",
                    self.name
                ),
                Err(err) => assert!(
                    err.to_string().contains(expected.as_str()),
                    "Fixture '{}' failed with {:?}, expected error containing {expected:?}",
                    self.name,
                    err.to_string()
                ),
            }
            return;
        }

        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to load: {e}", self.name));
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?}, got {:?}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
name: inline
dispatcher:
  cases:
    - when: [ { type: literal, value: 1 } ]
      then: one
cases:
  - name: hit
    args: [1]
    expect: one
  - name: miss
    args: ["1"]
    expect: ~
  - name: no args
    expect: ~
"#;

    #[test]
    fn parse_and_run_inline_fixture() {
        let fixture = Fixture::from_yaml(FIXTURE).unwrap();
        assert_eq!(fixture.cases.len(), 3);
        assert!(fixture.cases[2].args.is_empty());

        let results = fixture.run().unwrap();
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn parse_multi_document() {
        let yaml = format!("{FIXTURE}\n---\n{FIXTURE}");
        assert_eq!(Fixture::from_yaml_multi(&yaml).unwrap().len(), 2);
    }

    #[test]
    fn failing_case_is_reported() {
        let mut fixture = Fixture::from_yaml(FIXTURE).unwrap();
        fixture.cases[0].expect = Some("two".into());
        let results = fixture.run().unwrap();
        assert!(!results[0].passed);
        assert_eq!(results[0].actual.as_deref(), Some("one"));
    }

    #[test]
    fn load_error_fixture() {
        let fixture = Fixture::from_yaml(
            r#"
name: bad guard
dispatcher:
  cases:
    - when: [ { type: guard, name: nope } ]
      then: x
expect_load_error: unknown guard
"#,
        )
        .unwrap();
        fixture.run_and_assert();
    }
}
