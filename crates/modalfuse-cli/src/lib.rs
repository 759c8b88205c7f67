//! modalfuse CLI library: argument types and command handlers.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{handle_embed, handle_inspect, handle_run, handle_upload, setup};
