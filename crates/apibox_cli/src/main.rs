//! apibox command-line driver

mod command;

use anyhow::Result;
use std::env;

fn main() -> Result<()> {
    // APIBOX_LOG controls the log level, default "info"
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("APIBOX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    command::run(&args)
}
