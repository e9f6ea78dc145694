//! CLI command definitions and handlers
//!
//! This module organizes the CLI into logical submodules:
//! - [`commands`] - Command enum definitions and usage text
//! - [`resolve`] - Argument shortcuts and command inference
//! - [`handlers`] - Command execution handlers

mod commands;
mod handlers;
mod resolve;

pub use commands::*;
pub use handlers::*;
pub use resolve::*;
