//! Purpose: Define the public Rust API for consuming the quote and greeting services.
//! Exports: Fetcher, decoder entrypoint, record shapes, endpoints, and the consume driver.
//! Role: Public, additive-only surface used by the CLI and integration tests.
//! Invariants: This module is the only public path to the fetch/decode pipeline.

mod consume;
mod endpoints;
mod fetch;
mod records;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::json::parse::decode;
pub use consume::{ConsumeOptions, ConsumeReport, Consumed, Target, consume};
pub use endpoints::{DEFAULT_GREETING_URL, DEFAULT_QUOTE_URL, Endpoints, NAME_PLACEHOLDER};
pub use fetch::{DEFAULT_USER_AGENT, Fetcher, FetcherOptions};
pub use records::{Greeting, Quote, QuoteValue, Shape};
