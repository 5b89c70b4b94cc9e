//! Dispatcher — Compiled case list with first-match-wins semantics
//!
//! The `Dispatcher` is the entry point for evaluation. It holds an ordered
//! list of cases and evaluates them against an argument tuple, returning the
//! first matching handler's result.

use crate::{Case, CaseTrace, ConfigError, DispatchTrace, MatchError, Value, MAX_CASES, MAX_DEPTH};
use std::borrow::Borrow;
use std::fmt::{self, Debug};

/// Ordered cases compiled into a callable.
///
/// # INV: First-match-wins
///
/// Cases are evaluated in construction order. The first case whose every
/// matcher accepts terminates evaluation, even if later cases would also match.
///
/// # INV: No match is an error
///
/// When no case matches, [`call`](Self::call) returns [`MatchError::NoMatch`].
/// There is no fallback slot; end the list with a wildcard case to get one.
/// A dispatcher with no cases therefore always fails.
///
/// # Example
///
/// ```
/// use casekit::{guards, Case, Dispatcher, Matcher, Value};
///
/// let describe = Dispatcher::new(vec![
///     Case::returning([Matcher::literal(0)], "zero".to_string()),
///     Case::calling([Matcher::when(guards::is_number)], |args| format!("number {}", args[0])),
///     Case::returning([Matcher::any()], "something else".to_string()),
/// ]);
///
/// assert_eq!(describe.call(&[Value::from(0)]).unwrap(), "zero");
/// assert_eq!(describe.call(&[Value::from(7)]).unwrap(), "number 7");
/// assert_eq!(describe.call(&[Value::from("0")]).unwrap(), "something else");
/// ```
pub struct Dispatcher<R> {
    cases: Vec<Case<R>>,
}

impl<R> Dispatcher<R> {
    /// Compile an ordered case list.
    pub fn new(cases: Vec<Case<R>>) -> Self {
        Self { cases }
    }

    /// A dispatcher with no cases. Every call fails.
    #[must_use]
    pub fn empty() -> Self {
        Self { cases: Vec::new() }
    }

    /// The cases, in evaluation order.
    #[must_use]
    pub fn cases(&self) -> &[Case<R>] {
        &self.cases
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Index of the first case matching `args`, without running its handler.
    pub fn find<V: Borrow<Value>>(&self, args: &[V]) -> Option<usize> {
        self.cases.iter().position(|case| case.matches(args))
    }

    /// The first case matching `args`, without running its handler.
    ///
    /// Works on borrowed arguments, which suits rule tables whose handlers
    /// are static values.
    pub fn select<V: Borrow<Value>>(&self, args: &[V]) -> Option<&Case<R>> {
        self.cases.iter().find(|case| case.matches(args))
    }

    /// Deepest matcher across all cases.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.cases.iter().map(Case::depth).max().unwrap_or(0)
    }

    /// Validate this dispatcher against safety constraints.
    ///
    /// Checks:
    /// - Case count does not exceed [`MAX_CASES`]
    /// - No case has an empty matcher list (it would match everything)
    /// - Matcher nesting depth does not exceed [`MAX_DEPTH`]
    ///
    /// Call this at build time; [`call`](Self::call) never validates.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cases.len() > MAX_CASES {
            return Err(ConfigError::TooManyCases {
                count: self.cases.len(),
                max: MAX_CASES,
            });
        }
        if let Some(index) = self.cases.iter().position(|c| c.matchers.is_empty()) {
            return Err(ConfigError::EmptyCase { index });
        }
        let depth = self.depth();
        if depth > MAX_DEPTH {
            return Err(ConfigError::DepthExceeded {
                depth,
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }
}

impl<R: Clone> Dispatcher<R> {
    /// Evaluate the cases against `args`.
    ///
    /// # First-match-wins semantics (INV)
    ///
    /// Stops at the first case whose matchers all accept. A function handler
    /// is invoked with the full `args`; a static handler is cloned.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NoMatch`] when no case matches. Anything a
    /// handler does (including panicking) is not intercepted.
    pub fn call(&self, args: &[Value]) -> Result<R, MatchError> {
        match self.find(args) {
            Some(index) => {
                tracing::trace!(case = index, "case matched");
                Ok(self.cases[index].handler.resolve(args))
            }
            None => {
                let err = MatchError::no_match(args);
                tracing::debug!(cases = self.cases.len(), error = %err, "dispatch failed");
                Err(err)
            }
        }
    }

    /// Evaluate with a full trace for debugging.
    ///
    /// The `result` field always equals what [`call`](Self::call) returns for
    /// the same arguments. Steps stop after the first matching case.
    pub fn call_with_trace(&self, args: &[Value]) -> DispatchTrace<R> {
        let mut steps = Vec::new();

        for (index, case) in self.cases.iter().enumerate() {
            let positions: Vec<_> = case
                .matchers
                .iter()
                .enumerate()
                .map(|(i, m)| m.matches_with_trace(args.get(i).unwrap_or(&Value::Undefined)))
                .collect();
            let matched = positions.iter().all(crate::MatchTrace::matched);
            steps.push(CaseTrace {
                index,
                matched,
                positions,
            });

            if matched {
                return DispatchTrace {
                    result: Ok(case.handler.resolve(args)),
                    steps,
                };
            }
        }

        DispatchTrace {
            result: Err(MatchError::no_match(args)),
            steps,
        }
    }

    /// Borrow this dispatcher as a plain closure.
    pub fn call_fn(&self) -> impl Fn(&[Value]) -> Result<R, MatchError> + '_ {
        move |args| self.call(args)
    }
}

impl<R: Clone> Clone for Dispatcher<R> {
    fn clone(&self) -> Self {
        Self {
            cases: self.cases.clone(),
        }
    }
}

impl<R> Default for Dispatcher<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> FromIterator<Case<R>> for Dispatcher<R> {
    fn from_iter<I: IntoIterator<Item = Case<R>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<R> Debug for Dispatcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("cases_len", &self.cases.len())
            .finish()
    }
}
