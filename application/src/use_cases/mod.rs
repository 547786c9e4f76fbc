//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod agent_controller;
pub mod run_exchange;

#[cfg(test)]
pub(crate) mod test_support;
