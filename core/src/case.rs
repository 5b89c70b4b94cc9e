//! `Case` — Matchers + `Handler` combination
//!
//! A `Case` binds a positional list of matchers to what happens when all of
//! them match. A [`Dispatcher`](crate::Dispatcher) holds an ordered list of cases.

use crate::{Matcher, Value};
use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::sync::Arc;

type HandlerFn<R> = dyn Fn(&[Value]) -> R + Send + Sync;

/// What a matching case produces.
///
/// Exclusive by construction: either a function that is invoked with the
/// matched arguments, or a static value that is returned as-is.
///
/// Handlers receive the raw argument slice. Destructure it inside the handler;
/// there is no compile-time narrowing of individual positions.
pub enum Handler<R> {
    /// Invoked with every argument passed to the dispatcher.
    Function(Arc<HandlerFn<R>>),

    /// Returned (cloned) without invocation.
    Value(R),
}

impl<R> Handler<R> {
    /// Wrap a closure over the dispatcher's arguments.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// A fixed result.
    pub fn value(value: R) -> Self {
        Self::Value(value)
    }

    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl<R: Clone> Handler<R> {
    /// Produce the handler's result for `args`.
    ///
    /// Panics and errors raised inside a function handler are not caught.
    pub fn resolve(&self, args: &[Value]) -> R {
        match self {
            Self::Function(f) => f(args),
            Self::Value(v) => v.clone(),
        }
    }
}

impl<R: Clone> Clone for Handler<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Function(f) => Self::Function(Arc::clone(f)),
            Self::Value(v) => Self::Value(v.clone()),
        }
    }
}

impl<R: Debug> Debug for Handler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

/// A case: positional matchers + handler.
///
/// The case matches when every matcher accepts the argument at its position.
/// Matcher count and handler expectations are not cross-checked here; use
/// [`Dispatcher::validate`](crate::Dispatcher::validate) at build time.
///
/// # Example
///
/// ```
/// use casekit::{Case, Matcher, Value};
///
/// let case = Case::calling([Matcher::literal("add"), Matcher::any(), Matcher::any()], |args| {
///     args[1].as_f64().unwrap_or(0.0) + args[2].as_f64().unwrap_or(0.0)
/// });
/// assert!(case.matches(&[Value::from("add"), Value::from(1), Value::from(2)]));
/// ```
pub struct Case<R> {
    /// Matchers, one per argument position.
    pub matchers: Vec<Matcher>,

    /// What to produce when every matcher accepts.
    pub handler: Handler<R>,
}

impl<R> Case<R> {
    /// One matcher per argument position, tried left to right.
    pub fn new(matchers: impl IntoIterator<Item = Matcher>, handler: Handler<R>) -> Self {
        Self {
            matchers: matchers.into_iter().collect(),
            handler,
        }
    }

    /// A case whose handler is a static value.
    pub fn returning(matchers: impl IntoIterator<Item = Matcher>, value: R) -> Self {
        Self::new(matchers, Handler::Value(value))
    }

    /// A case whose handler is a function of the arguments.
    pub fn calling<F>(matchers: impl IntoIterator<Item = Matcher>, f: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
    {
        Self::new(matchers, Handler::function(f))
    }

    /// Returns `true` if every matcher accepts its argument.
    ///
    /// Positions beyond `args` are matched against `Undefined`; arguments
    /// beyond the matcher list are ignored.
    ///
    /// Accepts owned values or references, so callers holding borrowed data
    /// need not clone it to test a case.
    pub fn matches<V: Borrow<Value>>(&self, args: &[V]) -> bool {
        self.matchers
            .iter()
            .enumerate()
            .all(|(i, m)| m.matches(args.get(i).map_or(&Value::Undefined, Borrow::borrow)))
    }

    /// Deepest matcher in this case (0 when there are none).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.matchers.iter().map(Matcher::depth).max().unwrap_or(0)
    }
}

impl<R: Clone> Clone for Case<R> {
    fn clone(&self) -> Self {
        Self {
            matchers: self.matchers.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<R: Debug> Debug for Case<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("matchers", &self.matchers)
            .field("handler", &self.handler)
            .finish()
    }
}
