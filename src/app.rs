// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod linker;
pub mod mapper;
pub mod matcher;
pub mod models;
pub mod prompt;

use anyhow::Result;
use clap::Parser;
use std::io;

use self::cli::Cli;
use self::config::{resolve_config, validate};
use self::linker::{ensure_supported_platform, TreeLinker};
use self::prompt::Prompt;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Refuse platforms without file links before looking at arguments
    ensure_supported_platform()?;

    // 2. Parse Args (usage errors, help and version exit inside clap)
    let args = Cli::parse();

    // 3. Resolve and validate Configuration
    let config = resolve_config(args)?;
    validate(&config)?;

    // 4. Single blocking confirmation, never inside the walk
    if config.confirm_before_run {
        let stdin = io::stdin();
        Prompt::confirm(&config, &mut stdin.lock(), &mut io::stdout())?;
    }

    // 5. Walk and link
    let report = TreeLinker::new(&config).run();

    log::info!(
        "done: {} linked ({} replaced), {} skipped, {} ignored, {} failed",
        report.created,
        report.replaced,
        report.skipped,
        report.ignored,
        report.failed
    );

    Ok(())
}
