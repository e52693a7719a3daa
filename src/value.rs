//! Owned runtime-typed values threaded between chain actions.
//!
//! Adjacent actions agree out of band on the value shapes they exchange.
//! Absence is always `Option<Value>`, never a sentinel within the value
//! space, and a value is exclusively owned wherever it currently sits.

use std::any::{self, Any};
use std::fmt;

/// Misuse of the chain machinery, as opposed to an error an action reports.
///
/// A mismatch between the value one action produced and the type the next
/// read expects is a bug at the call sites, not a chain-level fault, so it
/// panics with one of these instead of latching the chain.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// A typed read found a value of a different runtime type.
    #[error("expected a `{expected}` value in the chain, found `{found}`")]
    TypeMismatch {
        /// Type the reader asked for.
        expected: &'static str,
        /// Type actually stored.
        found: &'static str,
    },

    /// A typed read found no value at all.
    #[error("expected a `{expected}` value in the chain, found none")]
    Missing {
        /// Type the reader asked for.
        expected: &'static str,
    },
}

/// An owned, runtime-typed value produced by one action and injected into a
/// later one.
///
/// The concrete type name is recorded at construction so mismatches can name
/// both sides.
pub struct Value {
    inner: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Value {
    /// Wrap a concrete value.
    pub fn new<T: Send + 'static>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: any::type_name::<T>(),
        }
    }

    /// Name of the wrapped value's concrete type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the wrapped value is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Take the value out as a `T`.
    pub fn downcast<T: 'static>(self) -> Result<T, ContractViolation> {
        let found = self.type_name;
        self.inner
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ContractViolation::TypeMismatch {
                expected: any::type_name::<T>(),
                found,
            })
    }

    /// Borrow the value as a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Take the value out as a `T`, panicking on a type mismatch.
    pub fn cast<T: 'static>(self) -> T {
        match self.downcast() {
            Ok(value) => value,
            Err(violation) => panic!("{violation}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&self.type_name).finish()
    }
}

/// Take a `T` out of an optional chain value, panicking if the value is
/// absent or of another type.
///
/// The usual way for an action body to read its injected input.
pub fn expect_value<T: 'static>(value: Option<Value>) -> T {
    match value {
        Some(value) => value.cast(),
        None => panic!(
            "{}",
            ContractViolation::Missing {
                expected: any::type_name::<T>(),
            }
        ),
    }
}
