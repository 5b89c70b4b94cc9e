//! casekit-test: Test support for casekit conformance testing
//!
//! Provides argument builders, a custom reference value, and a tracing hook
//! shared by the workspace's integration tests. With the `fixtures` feature,
//! [`fixture`] runs YAML dispatcher fixtures.
//!
//! # Example
//!
//! ```
//! use casekit_test::prelude::*;
//! use serde_json::json;
//!
//! let argv = args(json!([1, "a", { "k": null }]));
//! assert_eq!(argv.len(), 3);
//! assert!(argv[2].is_plain_object());
//! ```

use casekit::{CustomValue, Value};
use std::any::Any;
use std::sync::Once;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Build a dispatcher argument list from a JSON array.
///
/// A non-array value becomes a single argument.
#[must_use]
pub fn args(json: serde_json::Value) -> Vec<Value> {
    match Value::from(json) {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// A custom reference value (a point in time, in milliseconds).
///
/// Never a plain object: structural matchers reject it and literal matchers
/// compare it by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Wrap as a [`Value::Custom`].
    #[must_use]
    pub fn value(self) -> Value {
        Value::custom(self)
    }
}

impl CustomValue for Timestamp {
    fn custom_type_name(&self) -> &'static str {
        "timestamp"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

static TRACING: Once = Once::new();

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{args, init_tracing, Timestamp};
    pub use casekit::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use casekit::{Case, Dispatcher, Matcher};
    use serde_json::json;

    #[test]
    fn test_args_from_array() {
        assert_eq!(
            args(json!([1, "x"])),
            vec![Value::from(1), Value::from("x")]
        );
        assert_eq!(args(json!(null)), vec![Value::Null]);
    }

    #[test]
    fn test_timestamp_is_not_structural() {
        let d = Dispatcher::new(vec![
            Case::returning([Matcher::object(Vec::<(String, Matcher)>::new())], "object"),
            Case::returning([Matcher::when(casekit::guards::is_custom)], "custom"),
        ]);
        assert_eq!(d.call(&[Timestamp(0).value()]), Ok("custom"));
        assert_eq!(d.call(&[Value::object()]), Ok("object"));
    }

    #[test]
    fn test_timestamp_literal_is_identity() {
        let stamp = Timestamp(5).value();
        let d = Dispatcher::new(vec![Case::returning([Matcher::literal(stamp.clone())], ())]);
        assert!(d.call(&[stamp]).is_ok());
        assert!(d.call(&[Timestamp(5).value()]).is_err());
    }

    #[test]
    fn test_timestamp_downcast() {
        let v = Timestamp(42).value();
        let stamp = v
            .as_custom()
            .and_then(|c| c.as_any().downcast_ref::<Timestamp>());
        assert_eq!(stamp, Some(&Timestamp(42)));
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
