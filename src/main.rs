use clap::Parser;
use marketsim::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
