//! abgsim
//!
//! Main entry point for the interactive blood-gas recorder.

use abgsim::{Classifier, ReadingService, ReadingStore, Shell, DEFAULT_STORE_FILE};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Default to info unless RUST_LOG overrides; logs go to stderr so
    // they never interleave with the menu.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = ReadingStore::load(DEFAULT_STORE_FILE);
    let service = ReadingService::new(Classifier::default(), store);
    let mut shell = Shell::new(service);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell.run(&mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
