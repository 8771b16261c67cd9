pub mod commands;

pub use commands::{CaseCommands, Cli, Commands, OutputFormat};
