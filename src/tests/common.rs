//! Shared fixtures for context tests.
//!
//! This module contains:
//! - `ChainError`: the error type fixture actions report
//! - Value transforms: `add_one`, `multiply_by_six`, `convert_to_string`
//! - Counting action factories that prove whether an action body ran
//! - `RecordingDispatcher` / `ClobberingDispatcher`: substitute dispatchers

use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::dispatch::BoxedAction;
use crate::{expect_value, ActionArg, ActionOutcome, ChainState, Dispatch, Dispatcher, Value};

// ============================================================================
// Error Type
// ============================================================================

/// Errors reported by fixture actions.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ChainError {
    /// Unconditional fixture failure.
    #[error("boom")]
    Boom,

    /// A second, distinguishable fixture failure.
    #[error("late boom")]
    LateBoom,
}

// ============================================================================
// Value Transforms
// ============================================================================

pub fn add_one(value: Option<Value>) -> Result<Option<Value>, ChainError> {
    Ok(Some(Value::new(expect_value::<i32>(value) + 1)))
}

pub fn multiply_by_six(value: Option<Value>) -> Result<Option<Value>, ChainError> {
    Ok(Some(Value::new(expect_value::<i32>(value) * 6)))
}

pub fn convert_to_string(value: Option<Value>) -> Result<Option<Value>, ChainError> {
    Ok(Some(Value::new(expect_value::<i32>(value).to_string())))
}

// ============================================================================
// Counting Actions
// ============================================================================

/// A unary value action that bumps `counter` when its body runs and passes
/// the injected value through unchanged.
pub fn counting_passthrough(
    counter: &Cell<u32>,
) -> impl FnOnce(Option<Value>) -> Result<Option<Value>, ChainError> + '_ {
    move |value| {
        counter.set(counter.get() + 1);
        Ok(value)
    }
}

/// A boolean action that bumps `counter` when its body runs.
pub fn counting_bool(
    counter: &Cell<u32>,
) -> impl FnOnce(Option<Value>) -> Result<bool, ChainError> + '_ {
    move |_| {
        counter.set(counter.get() + 1);
        Ok(true)
    }
}

// ============================================================================
// Substitute Dispatchers
// ============================================================================

/// A dispatcher that counts the calls reaching it, then delegates to the
/// default [`Dispatcher`].
///
/// Skipped applies still count: the dispatch itself always runs, the action
/// does not.
#[derive(Default)]
pub struct RecordingDispatcher {
    pub dispatched: Arc<AtomicUsize>,
}

impl<E> Dispatch<E> for RecordingDispatcher {
    fn dispatch(&self, state: &mut ChainState<E>, action: BoxedAction<'_, E>, arg: ActionArg) {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        Dispatcher.dispatch(state, action, arg);
    }
}

/// A dispatcher that ignores the action entirely and records a fixed
/// non-boolean result, breaking the recording contract on purpose.
pub struct ClobberingDispatcher;

impl<E> Dispatch<E> for ClobberingDispatcher {
    fn dispatch(&self, state: &mut ChainState<E>, _action: BoxedAction<'_, E>, _arg: ActionArg) {
        state.record(ActionOutcome::complete(Value::new(42_i32)));
    }
}
