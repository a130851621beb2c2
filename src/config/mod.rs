//! Configuration loading, merging, and validation.
pub(crate) mod apply;
mod build;
mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::apply_config;
pub use build::build_test_config;
pub use loader::load_config;

#[cfg(test)]
pub(crate) use loader::load_config_file;
