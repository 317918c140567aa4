//! Check command - Report unresolved fields in a rendered document.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use rentoso_tokens::unresolved_paths;

use super::{read_file, IncompleteDocument};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rendered document to check
    #[arg(short, long)]
    pub input: PathBuf,
}

pub async fn execute(args: CheckArgs) -> Result<()> {
    let document = read_file(&args.input).await?;
    let missing: Vec<String> = unresolved_paths(&document).into_iter().collect();

    if missing.is_empty() {
        println!("✅ {} has no unresolved fields", args.input.display());
        return Ok(());
    }

    println!("⚠️  {} has unresolved fields:", args.input.display());
    for path in &missing {
        println!("   - {}", path);
    }
    info!("{} unresolved field(s)", missing.len());

    Err(IncompleteDocument { missing }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_check_complete_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.html");
        fs::write(&input, "<p>Juan [[not a field]]</p>").unwrap();

        execute(CheckArgs { input }).await.unwrap();
    }

    #[tokio::test]
    async fn test_check_incomplete_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.html");
        fs::write(&input, "<p>[[fecha.hoy]] [[prospecto.doc]] [[fecha.hoy]]</p>").unwrap();

        let err = execute(CheckArgs { input }).await.unwrap_err();
        let incomplete = err.downcast_ref::<IncompleteDocument>().unwrap();
        assert_eq!(incomplete.missing, vec!["fecha.hoy", "prospecto.doc"]);
    }
}
