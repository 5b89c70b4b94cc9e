//! casekit-util: Data utilities built on the casekit dispatch engine
//!
//! Synchronous helpers over [`casekit::Value`]:
//!
//! - [`evolve`] — Per-key transforms over an object, recursing into nested objects
//! - [`traverse`] — Deep leaf mapping that keeps the structure
//! - [`list_to_tree`] — Link parent-referencing records into one tree
//! - [`fail_on`] — Pass-through guard that errors on a predicate
//!
//! Asynchronous combinators over [`Eventual`]:
//!
//! - [`await_obj`] — Resolve an object whose fields may be pending
//! - [`pipe_async`] / [`pipe_tap`] — Sequential pipelines of possibly-async steps
//!
//! Each utility that takes configuration has a partially applied form
//! ([`evolver`], [`traverser`], [`tree_builder`]) returning a reusable closure.
//!
//! # Example
//!
//! ```
//! use casekit::Value;
//! use casekit_util::prelude::*;
//! use serde_json::json;
//!
//! let total = evolver(EvolveSpec::new().transform("total", |order| {
//!     let items = order.get("items").as_array().unwrap_or_default();
//!     Value::from(items.iter().filter_map(|i| i.get("price").as_f64()).sum::<f64>())
//! }));
//!
//! let order = Value::from(json!({ "items": [{ "price": 2 }, { "price": 3 }] }));
//! assert_eq!(total(&order).get("total"), &Value::from(5));
//! ```

mod await_obj;
mod eventual;
mod evolve;
mod guard;
mod pipe;
mod traverse;
mod tree;

pub use await_obj::await_obj;
pub use eventual::Eventual;
pub use evolve::{evolve, evolver, EvolveSpec, Evolver};
pub use guard::{fail_on, GuardViolation};
pub use pipe::{pipe_async, pipe_tap, PipeAsync, PipeTap};
pub use traverse::{traverse, traverser};
pub use tree::{list_to_tree, tree_builder, TreeError, TreeKeys};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        await_obj, evolve, evolver, fail_on, list_to_tree, pipe_async, pipe_tap, traverse,
        traverser, tree_builder, EvolveSpec, Eventual, Evolver, GuardViolation, PipeAsync,
        PipeTap, TreeError, TreeKeys,
    };
}
