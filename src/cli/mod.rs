mod commands;

pub use commands::{Cli, Command, OutputFormat, TabCommand, Target};
