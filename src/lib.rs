#![deny(missing_docs)]

//! Fuseline — deferred-error chaining for sequences of fallible actions.
//!
//! # Design Goals
//!
//! Fuseline lets a caller run a series of fallible operations and check for
//! failure exactly once, at the end:
//!
//! - **Check once, at the end**: actions run through a shared [`Context`];
//!   the first error blows the fuse and every later action is silently
//!   skipped until [`Context::flush`] hands the error back.
//! - **One engine**: every apply funnels into a single dispatch routine that
//!   decides skip-or-run, picks the value to inject, and stores the outcome.
//! - **Thin adapters**: the nullary/unary and void/value/bool call shapes
//!   are reshaped into that one canonical form, nothing more.
//!
//! # Core Concepts
//!
//! - [`Context`]: holder of the latest result and first error of a chain
//! - [`InjectionBehavior`] / [`ActionArg`]: per-call choice of input value
//! - [`Dispatch`] / [`Dispatcher`]: the atomic skip-or-run step
//! - [`Value`]: owned runtime-typed value threaded between actions
//!
//! # Example
//!
//! ```
//! use fuseline::{expect_value, ActionArg, Context, InjectionBehavior, Value};
//!
//! let mut chain: Context<String> = Context::new();
//! chain.apply_nullary_value(
//!     || Ok(Some(Value::new(6_i32))),
//!     InjectionBehavior::NotSpecified,
//! );
//! chain.apply_unary_value(
//!     |v| Ok(Some(Value::new(expect_value::<i32>(v) * 7))),
//!     ActionArg::use_previous(),
//! );
//!
//! let (result, error) = chain.flush();
//! assert!(error.is_none());
//! assert_eq!(expect_value::<i32>(result), 42);
//! ```

// Modules
pub mod behavior;
pub mod context;
pub mod dispatch;
mod macros;
pub mod outcome;
pub mod value;

// Re-exports for convenience
pub use behavior::{ActionArg, InjectionBehavior};
pub use context::{ChainPhase, ChainState, Context};
pub use dispatch::{BoxedAction, Dispatch, Dispatcher};
pub use outcome::ActionOutcome;
pub use value::{expect_value, ContractViolation, Value};

#[cfg(test)]
mod tests;
