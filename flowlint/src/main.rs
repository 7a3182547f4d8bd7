//! Binary entry point for the `flowlint` control-flow linter.

use anyhow::Result;
use clap::Parser;

use flowlint::cli::Cli;
use flowlint::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let code = commands::run(&cli)?;
    std::process::exit(code);
}
