//! Runtime detection and external command execution
//!
//! This module provides:
//! - Node.js / package manager detection
//! - The command runner every step shells out through
//! - A recording runner for tests

pub mod check;
pub mod mock;
pub mod runner;
pub mod version;

pub use check::{check_node, check_package_manager, check_runtimes, RuntimeInfo};
pub use mock::MockRunner;
pub use runner::{CommandRunner, CommandSpec, SystemRunner};
