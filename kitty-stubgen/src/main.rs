//! CLI entrypoint for `kitty-stubgen`.

use clap::Parser;
use tracing::info;

use kitty_stubgen::cli::Args;
use kitty_stubgen::error::StubgenError;
use kitty_stubgen::{config, generate_stub, logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<(), StubgenError> {
    let args = Args::parse();
    logging::init(args.verbosity.level())?;

    let config = config::load_config(&args)?;
    let summary = generate_stub(&config)?;
    info!(
        path = %summary.stub.path,
        classes = summary.class_names.len(),
        "kitty-stubgen finished"
    );
    Ok(())
}
