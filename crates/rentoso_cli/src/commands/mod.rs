//! CLI command definitions.
//!
//! Each subcommand wraps one operation of the token engine: rendering a
//! template against a context, building a contract from records, listing
//! tokens, or checking a document for missing fields.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, info, warn};

use rentoso_tokens::{highlight_unresolved, unresolved_paths, Context};

pub mod check;
pub mod contract;
pub mod render;
pub mod scan;

/// Rentoso - contract template rendering
#[derive(Parser)]
#[command(name = "rentoso")]
#[command(version, about = "Rentoso - contract template rendering")]
#[command(long_about = r#"
Renders contract templates containing {{path.to.value}} placeholders.
Placeholders that cannot be resolved are left as [[path]] markers.

COMMANDS:
  render    → Render a template against a JSON/YAML context
  contract  → Render a contract from property and prospect records
  scan      → List the placeholders a template references
  check     → Report unresolved [[path]] markers in a document

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Document has unresolved fields
  4 - Template or context error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template against a context file
    Render(render::RenderArgs),

    /// Render a contract from property and prospect records
    Contract(contract::ContractArgs),

    /// List the placeholders referenced by a template
    Scan(scan::ScanArgs),

    /// Check a rendered document for unresolved fields
    Check(check::CheckArgs),
}

/// Raised when a document still has unresolved fields and completeness was required.
#[derive(Debug, Error)]
#[error("Document has {} unresolved field(s): {}", .missing.len(), .missing.join(", "))]
pub struct IncompleteDocument {
    pub missing: Vec<String>,
}

/// Options shared by commands that produce a rendered document.
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Manual value for an unresolved field (repeatable)
    #[arg(long = "set", value_name = "PATH=VALUE", value_parser = rentoso_tokens::parse_override)]
    pub overrides: Vec<(String, String)>,

    /// Wrap unresolved markers in a highlight span
    #[arg(long)]
    pub highlight: bool,

    /// CSS class used by --highlight
    #[arg(long, env = "RENTOSO_HIGHLIGHT_CLASS", default_value = rentoso_tokens::DEFAULT_HIGHLIGHT_CLASS)]
    pub highlight_class: String,

    /// Fail when any field remains unresolved
    #[arg(long)]
    pub strict: bool,

    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    /// Apply overrides, report missing fields, then write the document.
    pub async fn finish(&self, rendered: String) -> Result<()> {
        let document = if self.overrides.is_empty() {
            rendered
        } else {
            let overrides: HashMap<String, String> = self.overrides.iter().cloned().collect();
            debug!("Applying {} manual override(s)", overrides.len());
            rentoso_tokens::apply_overrides(&rendered, &overrides)
        };

        let missing: Vec<String> = unresolved_paths(&document).into_iter().collect();
        if !missing.is_empty() {
            warn!("Unresolved fields: {}", missing.join(", "));
            if self.strict {
                return Err(IncompleteDocument { missing }.into());
            }
        }

        let document = if self.highlight {
            highlight_unresolved(&document, &self.highlight_class)
        } else {
            document
        };

        write_output(self.output.as_deref(), &document).await
    }
}

/// Read a UTF-8 file.
pub async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Load a context document, YAML or JSON by extension.
pub async fn load_context(path: &Path) -> Result<Context> {
    let content = read_file(path).await?;
    Context::parse(&content, path).with_context(|| format!("Invalid context file {}", path.display()))
}

/// Write to the given file, or stdout when none.
pub async fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_with_overrides() {
        let cli = Cli::try_parse_from([
            "rentoso",
            "render",
            "--template",
            "contrato.html",
            "--context",
            "ctx.yaml",
            "--set",
            "prospecto.doc=CC 1020",
            "--strict",
        ])
        .unwrap();

        match cli.command {
            Commands::Render(args) => {
                assert_eq!(
                    args.output.overrides,
                    vec![("prospecto.doc".to_string(), "CC 1020".to_string())]
                );
                assert!(args.output.strict);
                assert!(!args.output.highlight);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_rejects_bad_override() {
        let result = Cli::try_parse_from([
            "rentoso",
            "render",
            "--template",
            "t.html",
            "--context",
            "c.json",
            "--set",
            "missing-equals",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_finish_strict_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let args = OutputArgs {
            overrides: vec![("a".to_string(), "uno".to_string())],
            highlight: false,
            highlight_class: "empty-token".to_string(),
            strict: true,
            output: Some(dir.path().join("out.html")),
        };

        let err = args.finish("[[a]] [[b]]".to_string()).await.unwrap_err();
        let incomplete = err.downcast_ref::<IncompleteDocument>().unwrap();
        assert_eq!(incomplete.missing, vec!["b".to_string()]);
        assert!(!dir.path().join("out.html").exists());
    }

    #[tokio::test]
    async fn test_finish_writes_highlighted_document() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.html");
        let args = OutputArgs {
            overrides: Vec::new(),
            highlight: true,
            highlight_class: "campo".to_string(),
            strict: false,
            output: Some(out.clone()),
        };

        args.finish("<p>[[b]]</p>".to_string()).await.unwrap();
        let written = std::fs::read_to_string(out).unwrap();
        assert_eq!(written, r#"<p><span class="campo">[[b]]</span></p>"#);
    }
}
