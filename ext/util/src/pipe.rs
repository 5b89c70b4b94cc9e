//! Sequential pipelines over steps that may or may not wait.
//!
//! - [`PipeAsync`] — each step receives the previous step's output; the
//!   result is always a future.
//! - [`PipeTap`] — each step also sees the pipeline's original input; the
//!   result stays [`Eventual::Ready`] until some step goes pending.
//!
//! In both, step N+1 never starts before step N has produced its value, and
//! the first error ends the pipeline.

use crate::Eventual;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════════
// PipeAsync
// ═══════════════════════════════════════════════════════════════════════════════

type AsyncStep<T, E> = dyn Fn(T) -> Eventual<T, E> + Send + Sync;

/// A chain of unary steps, each fed the previous output.
///
/// ```
/// use casekit_util::{pipe_async, Eventual};
///
/// let pipeline = pipe_async::<i64, String>()
///     .then_sync(|x| Ok(x + 1))
///     .then(|x| Eventual::pending(async move { Ok(x * 10) }));
///
/// # futures::executor::block_on(async {
/// assert_eq!(pipeline.run(1).await, Ok(20));
/// # });
/// ```
pub struct PipeAsync<T, E> {
    steps: Vec<Arc<AsyncStep<T, E>>>,
}

/// An empty [`PipeAsync`]; add steps with [`then`](PipeAsync::then).
pub fn pipe_async<T, E>() -> PipeAsync<T, E> {
    PipeAsync { steps: Vec::new() }
}

impl<T, E> PipeAsync<T, E> {
    /// Append a step that may go pending.
    #[must_use]
    pub fn then<F>(mut self, step: F) -> Self
    where
        F: Fn(T) -> Eventual<T, E> + Send + Sync + 'static,
    {
        self.steps.push(Arc::new(step));
        self
    }

    /// Append a synchronous step.
    #[must_use]
    pub fn then_sync<F>(self, step: F) -> Self
    where
        F: Fn(T) -> Result<T, E> + Send + Sync + 'static,
    {
        self.then(move |value| Eventual::Ready(step(value)))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<T: Send + 'static, E: Send + 'static> PipeAsync<T, E> {
    /// Run the steps in order.
    ///
    /// Always returns a future, even when every step is synchronous. An
    /// empty pipeline resolves to `input`.
    pub fn run(&self, input: T) -> BoxFuture<'static, Result<T, E>> {
        let steps = self.steps.clone();
        async move {
            let mut value = input;
            for (index, step) in steps.iter().enumerate() {
                let next = step(value);
                value = next.await.inspect_err(|_| {
                    tracing::debug!(step = index, "pipeline step failed");
                })?;
            }
            Ok(value)
        }
        .boxed()
    }
}

impl<T, E> Clone for PipeAsync<T, E> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<T, E> fmt::Debug for PipeAsync<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipeAsync")
            .field("steps", &self.steps.len())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PipeTap
// ═══════════════════════════════════════════════════════════════════════════════

type TapStep<T, E> = dyn Fn(&T, Option<T>) -> Eventual<T, E> + Send + Sync;

/// A chain of steps that each see `(original input, previous output)`.
///
/// The first step's previous output is `None`.
///
/// ```
/// use casekit_util::{pipe_tap, Eventual};
///
/// let pipeline = pipe_tap::<i64, ()>()
///     .then_sync(|init, _| Ok(init + 1))
///     .then_sync(|_, prev| Ok(prev.unwrap_or_default() + 10))
///     .then_sync(|_, prev| Ok(prev.unwrap_or_default() * 2));
///
/// let result = pipeline.run(10);
/// assert!(result.is_ready());
/// assert_eq!(result.try_ready().ok(), Some(Ok(42)));
/// ```
pub struct PipeTap<T, E> {
    steps: Vec<Arc<TapStep<T, E>>>,
}

/// An empty [`PipeTap`]; add steps with [`then`](PipeTap::then).
pub fn pipe_tap<T, E>() -> PipeTap<T, E> {
    PipeTap { steps: Vec::new() }
}

impl<T, E> PipeTap<T, E> {
    /// Append a step that may go pending.
    #[must_use]
    pub fn then<F>(mut self, step: F) -> Self
    where
        F: Fn(&T, Option<T>) -> Eventual<T, E> + Send + Sync + 'static,
    {
        self.steps.push(Arc::new(step));
        self
    }

    /// Append a synchronous step.
    #[must_use]
    pub fn then_sync<F>(self, step: F) -> Self
    where
        F: Fn(&T, Option<T>) -> Result<T, E> + Send + Sync + 'static,
    {
        self.then(move |input, prev| Eventual::Ready(step(input, prev)))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<T, E> PipeTap<T, E>
where
    T: Send + Sync + 'static,
    E: Send + 'static,
{
    /// Run the steps in order.
    ///
    /// Steps run synchronously until one returns [`Eventual::Pending`]; from
    /// then on the remainder runs inside the returned future. The result is
    /// `Pending` exactly when some step went pending. An empty pipeline
    /// returns `Ready(Ok(input))`.
    pub fn run(&self, input: T) -> Eventual<T, E> {
        let mut prev: Option<T> = None;

        for (index, step) in self.steps.iter().enumerate() {
            match step(&input, prev.take()) {
                Eventual::Ready(Ok(value)) => prev = Some(value),
                Eventual::Ready(Err(error)) => {
                    tracing::debug!(step = index, "pipeline step failed");
                    return Eventual::failed(error);
                }
                Eventual::Pending(pending) => {
                    let rest = self.steps[index + 1..].to_vec();
                    return Eventual::pending(async move {
                        let mut value = pending.await?;
                        for step in &rest {
                            let next = step(&input, Some(value));
                            value = next.await?;
                        }
                        Ok(value)
                    });
                }
            }
        }

        Eventual::ready(prev.unwrap_or(input))
    }
}

impl<T, E> Clone for PipeTap<T, E> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<T, E> fmt::Debug for PipeTap<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipeTap")
            .field("steps", &self.steps.len())
            .finish()
    }
}
