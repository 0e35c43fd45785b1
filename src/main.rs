use clap::Parser;
use templateur::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
