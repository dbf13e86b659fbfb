use clap::Parser;
use std::process::ExitCode;

use mlss::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.run()
}
