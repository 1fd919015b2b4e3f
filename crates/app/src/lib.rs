//! Courier command line front end.
//!
//! Wires the infrastructure adapters to the workspace store. The binary in
//! `main.rs` only parses arguments, sets up logging and calls [`commands`].

pub mod adapters;
pub mod cli;
pub mod commands;

pub use cli::{Cli, Command, RenderFormat};
