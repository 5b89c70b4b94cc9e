//! Pass-through guards that fail on a predicate.

/// The error a [`fail_on`] guard raises. Displays as exactly its message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct GuardViolation {
    pub message: String,
}

/// Build a guard that rejects values satisfying `predicate`.
///
/// Values for which `predicate` is false are returned unchanged.
///
/// ```
/// use casekit::{guards, Value};
/// use casekit_util::fail_on;
///
/// let present = fail_on(guards::is_null, "N/A");
/// assert_eq!(present(Value::from("x")), Ok(Value::from("x")));
/// assert_eq!(present(Value::Null).unwrap_err().to_string(), "N/A");
/// ```
pub fn fail_on<T, P>(
    predicate: P,
    message: impl Into<String>,
) -> impl Fn(T) -> Result<T, GuardViolation>
where
    P: Fn(&T) -> bool,
{
    let message = message.into();
    move |value| {
        if predicate(&value) {
            Err(GuardViolation {
                message: message.clone(),
            })
        } else {
            Ok(value)
        }
    }
}
