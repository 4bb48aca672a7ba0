// Core modules shared by the fetcher, decoder and CLI.
pub mod error;
