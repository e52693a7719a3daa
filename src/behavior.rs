//! Injection behavior and the per-call action argument.
//!
//! An [`ActionArg`] travels with each apply call and tells the dispatcher
//! which value to feed into the action: the previous action's result, or a
//! value supplied at the call site.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// How the dispatcher selects the value injected into an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InjectionBehavior {
    /// No behavior has been declared. Treated as `UsePrevious`.
    #[default]
    NotSpecified,

    /// Inject the value produced by the previous action in the chain.
    /// If no previous action ran, nothing is injected.
    /// A value supplied in the argument is ignored.
    UsePrevious,

    /// Inject the value supplied in the argument.
    /// A previous result held by the chain is ignored.
    OverridePrevious,
}

/// The argument for one apply call: an optional value plus the behavior
/// deciding whether that value is used.
///
/// Constructed fresh at each call site and consumed by the dispatch; it has
/// no identity beyond the call.
#[derive(Debug, Default)]
pub struct ActionArg {
    /// Value offered for injection. Read only under
    /// [`InjectionBehavior::OverridePrevious`].
    pub value: Option<Value>,

    /// Injection policy for this call.
    pub behavior: InjectionBehavior,
}

impl ActionArg {
    /// Create an argument from explicit parts.
    pub fn new(value: Option<Value>, behavior: InjectionBehavior) -> Self {
        Self { value, behavior }
    }

    /// Argument that injects the supplied value, overriding whatever result
    /// the chain currently holds.
    pub fn inject<T: Send + 'static>(value: T) -> Self {
        Self {
            value: Some(Value::new(value)),
            behavior: InjectionBehavior::OverridePrevious,
        }
    }

    /// Argument that injects the previous action's result.
    pub fn use_previous() -> Self {
        Self {
            value: None,
            behavior: InjectionBehavior::UsePrevious,
        }
    }
}

impl From<InjectionBehavior> for ActionArg {
    fn from(behavior: InjectionBehavior) -> Self {
        Self {
            value: None,
            behavior,
        }
    }
}
