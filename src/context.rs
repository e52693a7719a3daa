//! Chain state and the caller-facing context surface.
//!
//! A [`Context`] holds the two slots a chain carries between applies (the
//! latest result and the first error) and exposes one apply method per
//! supported action shape. Every apply funnels into the dispatcher the
//! context was constructed with; [`Context::flush`] is the single point
//! where the caller inspects what the chain accumulated.

use std::any;

use serde::{Deserialize, Serialize};

use crate::behavior::{ActionArg, InjectionBehavior};
use crate::dispatch::{Dispatch, Dispatcher};
use crate::outcome::ActionOutcome;
use crate::value::{ContractViolation, Value};

// ============================================================================
// Chain Phase
// ============================================================================

/// The observable phase of a chain.
///
/// Derived from the error slot on demand, so it cannot drift from the state
/// it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChainPhase {
    /// No action has faulted since the last flush.
    #[default]
    Clear,

    /// An action has faulted. Later actions are skipped until flush.
    Faulted,
}

// ============================================================================
// Chain State
// ============================================================================

/// The mutable slots of one chain: the latest result and the first error.
///
/// Owned by a [`Context`] and handed mutably to its dispatcher on every
/// apply. The fault latches: dispatchers check [`ChainState::is_faulted`]
/// before running anything, and only [`ChainState::reset`] clears the slots.
#[derive(Debug)]
pub struct ChainState<E> {
    last_result: Option<Value>,
    last_error: Option<E>,
}

impl<E> ChainState<E> {
    /// Create an empty state: no result, no error.
    pub fn new() -> Self {
        Self {
            last_result: None,
            last_error: None,
        }
    }

    /// Whether the error slot is occupied.
    pub fn is_faulted(&self) -> bool {
        self.last_error.is_some()
    }

    /// The current phase implied by the error slot.
    pub fn phase(&self) -> ChainPhase {
        if self.is_faulted() {
            ChainPhase::Faulted
        } else {
            ChainPhase::Clear
        }
    }

    /// Borrow the latest result, if any.
    pub fn last_result(&self) -> Option<&Value> {
        self.last_result.as_ref()
    }

    /// Borrow the latched error, if any.
    pub fn last_error(&self) -> Option<&E> {
        self.last_error.as_ref()
    }

    /// Move the latest result out, leaving the slot empty.
    ///
    /// Used by dispatchers to inject the previous result into an action that
    /// is about to overwrite the slot anyway.
    pub fn take_result(&mut self) -> Option<Value> {
        self.last_result.take()
    }

    /// Store an action's outcome, overwriting both slots.
    ///
    /// Unconditional: an erroring action's partial value lands here too.
    /// Dispatchers must check [`ChainState::is_faulted`] before running an
    /// action, not before recording its outcome.
    pub fn record(&mut self, outcome: ActionOutcome<E>) {
        let (value, error) = outcome.into_parts();
        self.last_result = value;
        self.last_error = error;
    }

    /// Empty both slots and hand back the pre-reset snapshot.
    pub fn reset(&mut self) -> (Option<Value>, Option<E>) {
        (self.last_result.take(), self.last_error.take())
    }
}

impl<E> Default for ChainState<E> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Context
// ============================================================================

/// The stateful holder for one logical chain of fallible actions.
///
/// Apply calls run their action immediately, in the caller's thread, against
/// the context's state. The first action to report an error latches the
/// chain; every later apply is a no-op until [`Context::flush`] returns the
/// accumulated `(result, error)` snapshot and resets the context.
///
/// A context represents one sequential chain. It is not internally
/// synchronized; concurrent chains belong on separate instances.
///
/// ```
/// use fuseline::{expect_value, ActionArg, Context, Value};
///
/// let mut chain: Context<String> = Context::new();
/// chain.apply_unary_value(
///     |v| Ok(Some(Value::new(expect_value::<i32>(v) + 1))),
///     ActionArg::inject(1_i32),
/// );
/// chain.apply_unary_value(
///     |v| Ok(Some(Value::new(expect_value::<i32>(v) * 6))),
///     ActionArg::use_previous(),
/// );
///
/// let (result, error) = chain.flush();
/// assert!(error.is_none());
/// assert_eq!(expect_value::<i32>(result), 12);
/// ```
pub struct Context<E> {
    state: ChainState<E>,
    dispatcher: Box<dyn Dispatch<E>>,
}

impl<E> Context<E> {
    /// Create an empty context bound to the default [`Dispatcher`].
    pub fn new() -> Self {
        Self::with_dispatcher(Box::new(Dispatcher))
    }

    /// Create an empty context bound to an alternate dispatcher.
    pub fn with_dispatcher(dispatcher: Box<dyn Dispatch<E>>) -> Self {
        Self {
            state: ChainState::new(),
            dispatcher,
        }
    }

    /// Whether the chain has latched a fault.
    pub fn is_faulted(&self) -> bool {
        self.state.is_faulted()
    }

    /// The chain's current phase.
    pub fn phase(&self) -> ChainPhase {
        self.state.phase()
    }

    /// Read-only view of the chain state.
    pub fn state(&self) -> &ChainState<E> {
        &self.state
    }

    /// Apply an action in the canonical shape: one optional input value in,
    /// an [`ActionOutcome`] out.
    ///
    /// This is the shape the dispatcher runs and the only one that can hand
    /// back a partial value alongside an error. The `apply_*` adapters all
    /// reshape into it.
    pub fn apply<F>(&mut self, action: F, arg: ActionArg)
    where
        F: FnOnce(Option<Value>) -> ActionOutcome<E>,
    {
        self.dispatcher
            .dispatch(&mut self.state, Box::new(action), arg);
    }

    /// Apply an action that takes no input and returns only an error.
    ///
    /// The chain's result slot is left absent for the next action.
    pub fn apply_nullary_void<F>(&mut self, action: F, behavior: InjectionBehavior)
    where
        F: FnOnce() -> Result<(), E>,
    {
        self.apply(
            move |_| match action() {
                Ok(()) => ActionOutcome::empty(),
                Err(error) => ActionOutcome::fault(error),
            },
            ActionArg::from(behavior),
        );
    }

    /// Apply an action that takes no input and returns a value.
    ///
    /// The value becomes the chain's result, injected into the next action
    /// unless that action's behavior overrides it.
    pub fn apply_nullary_value<F>(&mut self, action: F, behavior: InjectionBehavior)
    where
        F: FnOnce() -> Result<Option<Value>, E>,
    {
        self.apply(move |_| action().into(), ActionArg::from(behavior));
    }

    /// Apply an action that consumes the injected value and returns only an
    /// error.
    ///
    /// The chain's result slot is left absent for the next action.
    pub fn apply_unary_void<F>(&mut self, action: F, arg: ActionArg)
    where
        F: FnOnce(Option<Value>) -> Result<(), E>,
    {
        self.apply(
            move |injected| match action(injected) {
                Ok(()) => ActionOutcome::empty(),
                Err(error) => ActionOutcome::fault(error),
            },
            arg,
        );
    }

    /// Apply an action that consumes the injected value and returns a value.
    pub fn apply_unary_value<F>(&mut self, action: F, arg: ActionArg)
    where
        F: FnOnce(Option<Value>) -> Result<Option<Value>, E>,
    {
        self.apply(move |injected| action(injected).into(), arg);
    }

    /// Apply an action that takes no input and returns a boolean, handing
    /// the boolean back for inlining in conditions.
    ///
    /// Returns `false` whenever the chain is faulted, whether the fault came
    /// from this action or an earlier one.
    pub fn apply_nullary_bool<F>(&mut self, action: F, behavior: InjectionBehavior) -> bool
    where
        F: FnOnce() -> Result<bool, E>,
    {
        self.apply_unary_bool(move |_| action(), ActionArg::from(behavior))
    }

    /// Apply an action that consumes the injected value and returns a
    /// boolean, handing the boolean back for inlining in conditions.
    ///
    /// The boolean also becomes the chain's result, injected into the next
    /// action like any other value. Returns `false` whenever the chain is
    /// faulted, whether the fault came from this action or an earlier one.
    ///
    /// # Panics
    ///
    /// Panics with a [`ContractViolation`] if the chain is clear after the
    /// call but the stored result is not a boolean. That can only happen
    /// when a substituted dispatcher breaks the recording contract.
    pub fn apply_unary_bool<F>(&mut self, action: F, arg: ActionArg) -> bool
    where
        F: FnOnce(Option<Value>) -> Result<bool, E>,
    {
        self.apply(
            move |injected| match action(injected) {
                Ok(flag) => ActionOutcome::complete(Value::new(flag)),
                Err(error) => ActionOutcome::fault(error),
            },
            arg,
        );

        // Read-back. A faulted chain answers false without touching the
        // result slot, whose type is unknown once an action has failed.
        if self.state.is_faulted() {
            return false;
        }
        match self.state.last_result() {
            Some(value) => match value.downcast_ref::<bool>() {
                Some(flag) => *flag,
                None => panic!(
                    "{}",
                    ContractViolation::TypeMismatch {
                        expected: any::type_name::<bool>(),
                        found: value.type_name(),
                    }
                ),
            },
            None => panic!(
                "{}",
                ContractViolation::Missing {
                    expected: any::type_name::<bool>(),
                }
            ),
        }
    }

    /// Return the `(result, error)` snapshot exactly as held and reset the
    /// context to its freshly constructed state.
    ///
    /// Never inspects the error. Flushing a never-used context returns
    /// `(None, None)`.
    pub fn flush(&mut self) -> (Option<Value>, Option<E>) {
        self.state.reset()
    }
}

impl<E> Default for Context<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_record_overwrites_both_slots() {
        let mut state: ChainState<&str> = ChainState::new();
        state.record(ActionOutcome::complete(Value::new(1_i32)));
        assert!(state.last_result().is_some());
        assert_eq!(state.phase(), ChainPhase::Clear);

        state.record(ActionOutcome::fault("boom"));
        assert!(state.last_result().is_none());
        assert_eq!(state.phase(), ChainPhase::Faulted);
    }

    #[test]
    fn state_reset_empties_and_snapshots() {
        let mut state: ChainState<&str> = ChainState::new();
        state.record(ActionOutcome::partial(Value::new(2_i32), "late"));

        let (value, error) = state.reset();
        assert_eq!(value.expect("value should survive").cast::<i32>(), 2);
        assert_eq!(error, Some("late"));

        assert!(state.last_result().is_none());
        assert!(state.last_error().is_none());
        assert_eq!(state.phase(), ChainPhase::Clear);
    }

    #[test]
    fn take_result_leaves_the_slot_empty() {
        let mut state: ChainState<&str> = ChainState::new();
        state.record(ActionOutcome::complete(Value::new(3_i32)));

        assert_eq!(state.take_result().map(Value::cast::<i32>), Some(3));
        assert!(state.last_result().is_none());
    }
}
