//! Evaluation trace types for debugging dispatch.
//!
//! Trace types mirror the runtime types ([`Matcher`](crate::Matcher),
//! [`Dispatcher`](crate::Dispatcher)) but capture results instead of inputs.
//! Use `call_with_trace()` to see which cases were tried and which position
//! rejected them.
//!
//! # Two Levels of Trace
//!
//! - [`MatchTrace`] — Per-matcher: which sub-matchers accepted?
//! - [`DispatchTrace`] — Per-call: which cases were tried, which one won?
//!
//! # Example
//!
//! ```
//! use casekit::{Case, Dispatcher, Matcher, Value};
//!
//! let d = Dispatcher::new(vec![
//!     Case::returning([Matcher::literal(1)], "one"),
//!     Case::returning([Matcher::any()], "other"),
//! ]);
//! let trace = d.call_with_trace(&[Value::from(2)]);
//! assert_eq!(trace.result, Ok("other"));
//! assert_eq!(trace.steps.len(), 2);
//! assert!(!trace.steps[0].matched);
//! ```

use crate::MatchError;
use std::fmt;

/// Trace of one matcher against one value.
///
/// Values and guards are rendered to strings so traces can outlive the call.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchTrace {
    /// A guard evaluation.
    Predicate {
        matched: bool,
        /// Debug form of the guard, e.g. `TypeMatcher::Null`.
        guard: String,
        value: String,
    },
    /// A strict-equality check.
    Literal {
        matched: bool,
        expected: String,
        value: String,
    },
    /// A tuple check. `children` is empty when the value was not an array of
    /// the right length.
    Tuple {
        matched: bool,
        expected_len: usize,
        /// `None` when the value was not an array.
        actual_len: Option<usize>,
        children: Vec<MatchTrace>,
    },
    /// A structural object check. `fields` is empty when the value was not
    /// a plain object.
    Struct {
        matched: bool,
        is_object: bool,
        fields: Vec<(String, MatchTrace)>,
    },
}

impl MatchTrace {
    /// Get the overall match result.
    #[must_use]
    pub fn matched(&self) -> bool {
        match self {
            Self::Predicate { matched, .. }
            | Self::Literal { matched, .. }
            | Self::Tuple { matched, .. }
            | Self::Struct { matched, .. } => *matched,
        }
    }
}

/// One case's evaluation in a trace.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseTrace {
    /// Index in the dispatcher's case list (0-based).
    pub index: usize,
    /// Did every position match?
    pub matched: bool,
    /// One trace per matcher position (all evaluated, no short-circuit).
    pub positions: Vec<MatchTrace>,
}

/// Trace of a full [`Dispatcher`](crate::Dispatcher) call.
///
/// # INV: `result` == `call()` result
///
/// Steps stop after the first matching case, preserving first-match-wins.
pub struct DispatchTrace<R> {
    /// The final result (identical to what `call()` returns).
    pub result: Result<R, MatchError>,
    /// Trace of each case that was tried, in order.
    pub steps: Vec<CaseTrace>,
}

impl<R> DispatchTrace<R> {
    /// Index of the winning case, if any.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.steps.iter().find(|s| s.matched).map(|s| s.index)
    }
}

impl<R: fmt::Debug> fmt::Debug for DispatchTrace<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTrace")
            .field("result", &self.result)
            .field("steps", &self.steps)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(matched: bool) -> MatchTrace {
        MatchTrace::Literal {
            matched,
            expected: "1".into(),
            value: "1".into(),
        }
    }

    #[test]
    fn match_trace_matched() {
        assert!(leaf(true).matched());
        assert!(!MatchTrace::Tuple {
            matched: false,
            expected_len: 2,
            actual_len: None,
            children: vec![],
        }
        .matched());
        assert!(MatchTrace::Struct {
            matched: true,
            is_object: true,
            fields: vec![("a".into(), leaf(true))],
        }
        .matched());
    }

    #[test]
    fn dispatch_trace_selected() {
        let trace: DispatchTrace<&str> = DispatchTrace {
            result: Ok("b"),
            steps: vec![
                CaseTrace {
                    index: 0,
                    matched: false,
                    positions: vec![leaf(false)],
                },
                CaseTrace {
                    index: 1,
                    matched: true,
                    positions: vec![leaf(true)],
                },
            ],
        };
        assert_eq!(trace.selected(), Some(1));
        let debug = format!("{trace:?}");
        assert!(debug.contains("DispatchTrace"));
    }

    #[test]
    fn dispatch_trace_no_selection() {
        let trace: DispatchTrace<()> = DispatchTrace {
            result: Err(MatchError::NoMatch {
                args: "1".into(),
            }),
            steps: vec![],
        };
        assert_eq!(trace.selected(), None);
    }
}
