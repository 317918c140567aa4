//! Render command - Render a template against a context file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use rentoso_tokens::TokenRenderer;

use super::{load_context, read_file, OutputArgs};

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template file containing {{path}} placeholders
    #[arg(short, long)]
    pub template: PathBuf,

    /// Context file (JSON, or YAML by .yaml/.yml extension)
    #[arg(short, long)]
    pub context: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub async fn execute(args: RenderArgs) -> Result<()> {
    info!("Rendering template: {}", args.template.display());

    let template = read_file(&args.template).await?;
    let context = load_context(&args.context).await?;

    let report = TokenRenderer::new().render_report(&template, context.as_value());
    info!(
        "Resolved {} of {} placeholder(s)",
        report.resolved.len(),
        report.resolved.len() + report.unresolved.len()
    );

    args.output.finish(report.output).await
}
