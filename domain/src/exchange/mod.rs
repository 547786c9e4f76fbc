//! Exchange domain: one submit → request → response → append cycle.
//!
//! - [`request`]: converts session state + new input into a provider payload
//! - [`response`]: tagged provider results, decoded once at the adapter boundary
//! - [`interpreter`]: turns results into agent messages for the log

pub mod interpreter;
pub mod request;
pub mod response;
