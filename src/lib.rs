//! shotvars - typed production variables with per-shot overrides
//!
//! A variable is a named, typed entry (string, integer, float, boolean,
//! color, vector) with a default value and a map of per-shot overrides.
//! The full variable set is published as immutable, sequentially numbered
//! JSON snapshots alongside a mutable "latest" record.

pub mod cli;
pub mod codec;
pub mod publish;
pub mod store;
