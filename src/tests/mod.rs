//! Tests for the deferred-error chaining context.
//!
//! ## Test Organization
//!
//! - `common`: shared error type, fixture actions, and substitute dispatchers
//! - `basic`: success-path chains and flush snapshots
//! - `injection`: value injection behaviors
//! - `fault`: fault latching and skip behavior
//! - `boolean`: boolean adapter read-back rules
//!
//! ## Fixture Actions
//!
//! Tests chain small arithmetic actions:
//! - `add_one` / `multiply_by_six`: integer transforms threaded by value
//! - `convert_to_string`: changes the value's runtime type mid-chain
//! - counting actions: bump a shared counter to prove whether a body ran

mod common;
