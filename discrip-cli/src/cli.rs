// discrip-cli/src/cli.rs
//
// Defines the command-line argument structure using clap. Everything other
// than the disc list comes from the configuration file and `DISCRIP_*`
// environment variables.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "discrip: pick TV episodes from disc images and encode them",
    long_about = "Scans disc images with HandBrakeCLI, groups their titles by series and \
                  season, asks which titles are episodes, and encodes the confirmed set.\n\n\
                  Settings are read from $DISCRIP_CONFIG or <config dir>/discrip/config.toml \
                  and can be overridden with DISCRIP_* environment variables."
)]
pub struct Cli {
    /// Disc images or folders to scan, in any order
    #[arg(value_name = "DISC_PATH")]
    pub disc_paths: Vec<PathBuf>,
}
