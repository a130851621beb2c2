//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::TesterArgs;
pub use types::{HttpMethod, PositiveU64, PositiveUsize, Protocol};

pub(crate) use parsers::{parse_duration_arg, parse_header};
