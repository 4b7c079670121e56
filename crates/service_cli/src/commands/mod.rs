//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod boundary;
pub mod check;
pub mod convergence;
pub mod demo;
pub mod price;
