//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Locating the config file and setting up logging
//! - Feeding process arguments to the core resolver and dispatcher
//! - Printing results on stdout and errors on stderr

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::init_tracing();

    let tokens = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    cli::App::from_env()?.run(tokens).await
}
