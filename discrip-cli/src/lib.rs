// discrip-cli/src/lib.rs
//
// Library portion of the discrip CLI application.
// Contains argument definitions, logging setup, the terminal prompter and
// the command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod prompt;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::rip::run_rip;
pub use prompt::TerminalPrompter;
