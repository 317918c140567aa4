//! Rentoso CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Document has unresolved fields
//! - 4: Template or context error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands, IncompleteDocument};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const INCOMPLETE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let directives: &[&str] = if cli.verbose {
        &["rentoso_cli=debug", "rentoso_tokens=debug"]
    } else if cli.quiet {
        &["rentoso_cli=error"]
    } else {
        &["rentoso_cli=info"]
    };

    let mut filter = EnvFilter::from_default_env().add_directive(LevelFilter::WARN.into());
    for directive in directives {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    // Logging may already be initialized by an embedding process.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::Render(args) => commands::render::execute(args).await,
        Commands::Contract(args) => commands::contract::execute(args).await,
        Commands::Scan(args) => commands::scan::execute(args).await,
        Commands::Check(args) => commands::check::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<IncompleteDocument>().is_some() {
        return ExitCodes::INCOMPLETE;
    }

    if let Some(io) = e.chain().find_map(|c| c.downcast_ref::<std::io::Error>()) {
        return match io.kind() {
            std::io::ErrorKind::NotFound => ExitCodes::INVALID_ARGS,
            _ => ExitCodes::GENERAL_ERROR,
        };
    }

    match e.chain().find_map(|c| c.downcast_ref::<rentoso_tokens::TokenError>()) {
        Some(
            rentoso_tokens::TokenError::InvalidOverride(_)
            | rentoso_tokens::TokenError::InvalidToken(_),
        ) => ExitCodes::INVALID_ARGS,
        Some(_) => ExitCodes::TEMPLATE_ERROR,
        None => ExitCodes::GENERAL_ERROR,
    }
}
