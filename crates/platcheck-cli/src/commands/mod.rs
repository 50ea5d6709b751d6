//! Command handlers. Each submodule owns one subcommand's `execute`.

pub mod check;
pub mod completions;
pub mod requirements;
