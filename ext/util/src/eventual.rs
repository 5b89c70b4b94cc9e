//! `Eventual` — a result that is either available now or later.

use futures::future::{self, BoxFuture, Either, FutureExt};
use std::fmt;
use std::future::{Future, IntoFuture};

/// A value that is ready now, or a boxed future that will produce it.
///
/// Synchronous steps return `Ready` and stay allocation-free; anything that
/// has to wait returns `Pending`. Both forms can be `.await`ed.
///
/// ```
/// use casekit_util::Eventual;
///
/// # futures::executor::block_on(async {
/// let now: Eventual<i32, String> = Eventual::ready(1);
/// let later: Eventual<i32, String> = Eventual::pending(async { Ok(2) });
/// assert_eq!(now.await.unwrap() + later.await.unwrap(), 3);
/// # });
/// ```
pub enum Eventual<T, E> {
    Ready(Result<T, E>),
    Pending(BoxFuture<'static, Result<T, E>>),
}

impl<T, E> Eventual<T, E> {
    pub fn ready(value: T) -> Self {
        Self::Ready(Ok(value))
    }

    pub fn failed(error: E) -> Self {
        Self::Ready(Err(error))
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::Pending(future.boxed())
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The result, if it is available without waiting.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when pending.
    pub fn try_ready(self) -> Result<Result<T, E>, Self> {
        match self {
            Self::Ready(result) => Ok(result),
            pending @ Self::Pending(_) => Err(pending),
        }
    }
}

impl<T, E> From<Result<T, E>> for Eventual<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Self::Ready(result)
    }
}

impl<T, E> IntoFuture for Eventual<T, E> {
    type Output = Result<T, E>;
    type IntoFuture = Either<future::Ready<Result<T, E>>, BoxFuture<'static, Result<T, E>>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Ready(result) => Either::Left(future::ready(result)),
            Self::Pending(future) => Either::Right(future),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Eventual<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
