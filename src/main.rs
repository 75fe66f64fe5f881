use clap::Parser;
use dealboard::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    dealboard::logging::init(cli.verbose);
    run(cli)
}
