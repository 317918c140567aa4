//! Scan command - List placeholders referenced by a template.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use rentoso_tokens::scan_tokens;

use super::read_file;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Template file to scan
    #[arg(short, long)]
    pub template: PathBuf,

    /// Print the paths as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: ScanArgs) -> Result<()> {
    let template = read_file(&args.template).await?;
    let tokens = scan_tokens(&template);

    info!(
        "Found {} distinct placeholder(s) in {}",
        tokens.len(),
        args.template.display()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }

    Ok(())
}
