//! Carver skill core: configuration, credential resolution, and the
//! tri-state bootstrap outcome shared by the CLI and bootstrap layers.

pub mod config;
pub mod credentials;
pub mod outcome;
