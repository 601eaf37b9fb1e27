mod repl;
mod runner;

use clap::Parser;
use std::path::PathBuf;

/// Run an Ember script, or start an interactive session when no path is
/// given.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    path: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    match cli.path {
        None => repl::start(),
        Some(path) => {
            let source = std::fs::read_to_string(path).expect("could not read input file");
            runner::execute(&source);
        }
    }
}
