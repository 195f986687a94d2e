//! Test modules for the plugin system
//!
//! Shared fixtures live in `utils`; the remaining modules exercise the
//! manager end to end.

pub(crate) mod utils;
