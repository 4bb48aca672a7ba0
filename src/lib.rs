//! Purpose: Library crate backing the `rest-consumer` CLI and its tests.
//! Exports: `api` (fetcher, decoder, records, driver) and `core` (errors).
//! Role: Keeps transport and decoding testable without the binary.
//! Invariants: Clients are constructed explicitly; there is no process-wide state.
pub mod api;
pub mod core;
pub(crate) mod json;
