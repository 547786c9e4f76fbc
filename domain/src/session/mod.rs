//! Agent session domain.
//!
//! - [`entities::Message`]: a single append-only entry of the log
//! - [`mode::Mode`]: which payload shape subsequent submissions use
//! - [`state::Session`]: the session state store and its `Idle` / `Exchanging` machine

pub mod entities;
pub mod mode;
pub mod state;
