//! The atomic dispatch step every apply funnels into.
//!
//! The dispatcher decides three things for one action: whether it runs at
//! all given the fault state, which value it receives, and how its outcome
//! lands in the chain state. Everything else in the crate is reshaping.

use crate::behavior::{ActionArg, InjectionBehavior};
use crate::context::ChainState;
use crate::outcome::ActionOutcome;
use crate::value::Value;

/// A caller action restated in the one shape the dispatcher runs: one
/// optional input value in, an [`ActionOutcome`] out.
pub type BoxedAction<'a, E> = Box<dyn FnOnce(Option<Value>) -> ActionOutcome<E> + 'a>;

/// The dispatch step behind every apply call.
///
/// Installed into a [`Context`](crate::Context) at construction, so an
/// alternate implementation (instrumentation, tests) can stand in without
/// changing the apply surface.
pub trait Dispatch<E>: Send {
    /// Run, or skip, one action against the chain state.
    fn dispatch(&self, state: &mut ChainState<E>, action: BoxedAction<'_, E>, arg: ActionArg);
}

/// The default dispatcher.
///
/// Latches on the first fault: once the state holds an error, every further
/// action is skipped untouched until the state is flushed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl<E> Dispatch<E> for Dispatcher {
    fn dispatch(&self, state: &mut ChainState<E>, action: BoxedAction<'_, E>, arg: ActionArg) {
        if state.is_faulted() {
            #[cfg(feature = "tracing")]
            tracing::debug!(behavior = ?arg.behavior, "action.skip");

            return;
        }

        #[cfg(feature = "tracing")]
        tracing::info!(behavior = ?arg.behavior, "action.start");

        let injected = match arg.behavior {
            InjectionBehavior::OverridePrevious => arg.value,
            // The result slot is overwritten below either way, so the
            // previous value moves into the action instead of being cloned.
            InjectionBehavior::NotSpecified | InjectionBehavior::UsePrevious => {
                state.take_result()
            }
        };

        let outcome = action(injected);

        #[cfg(feature = "tracing")]
        if outcome.is_fault() {
            tracing::error!(outcome = "fault", "action.end");
        } else {
            tracing::info!(outcome = "ok", "action.end");
        }

        state.record(outcome);
    }
}
