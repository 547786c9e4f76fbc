//! Application-level configuration.
//!
//! - [`ExchangeParams`]: history window, exchange timeout and starting mode

pub mod exchange_params;

pub use exchange_params::ExchangeParams;
