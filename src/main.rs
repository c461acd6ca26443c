//! CLI entry point for the jigsaw solver

use clap::Parser;
use tilestitch::io::cli::{Cli, run};

fn main() -> tilestitch::Result<()> {
    run(Cli::parse())
}
