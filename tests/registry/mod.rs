//! Registry integration test modules

pub mod linked;
pub mod loading;
pub mod queries;
