use clap::Parser;
use sqlens::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli::run(&cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
