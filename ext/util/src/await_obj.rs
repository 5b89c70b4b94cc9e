//! Resolve an object whose fields may still be pending.

use crate::Eventual;
use casekit::{Object, Value};
use futures::future::try_join_all;
use std::future::{Future, IntoFuture};

/// Resolve every field, keeping key order.
///
/// Pending fields are driven concurrently. The first failure aborts the
/// remaining fields and is returned unchanged; there is no partial result.
/// If a key repeats, the later value wins and the key keeps its first
/// position.
///
/// ```
/// use casekit::Value;
/// use casekit_util::{await_obj, Eventual};
///
/// # futures::executor::block_on(async {
/// let resolved = await_obj([
///     ("a".to_string(), Eventual::<Value, String>::pending(async { Ok(Value::from(1)) })),
///     ("b".to_string(), Eventual::ready(Value::from(2))),
/// ])
/// .await
/// .unwrap();
///
/// assert_eq!(Value::Object(resolved).to_string(), "{ a: 1, b: 2 }");
/// # });
/// ```
pub fn await_obj<I, E>(fields: I) -> impl Future<Output = Result<Object, E>>
where
    I: IntoIterator<Item = (String, Eventual<Value, E>)>,
{
    let (keys, values): (Vec<String>, Vec<_>) = fields
        .into_iter()
        .map(|(key, value)| (key, value.into_future()))
        .unzip();

    async move {
        let resolved = try_join_all(values).await.inspect_err(|_| {
            tracing::debug!(fields = keys.len(), "object resolution failed");
        })?;
        Ok(keys.into_iter().zip(resolved).collect())
    }
}
