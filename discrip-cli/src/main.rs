// discrip-cli/src/main.rs
//
// Entry point for the `discrip` binary: parses the disc paths and hands off
// to `run_rip`. Any error ends the process with exit code 1.

use clap::Parser;
use console::style;
use discrip_cli::{Cli, run_rip};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_rip(cli) {
        log::debug!("Run failed: {e:?}");
        if std::env::var_os("NO_COLOR").is_none() {
            eprintln!("{} {e}", style("Error:").red().bold());
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}
