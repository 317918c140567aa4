//! Contract command - Render a contract from property and prospect records.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;
use serde::de::DeserializeOwned;
use tracing::info;

use rentoso_tokens::{contract::parse_record, render, ContractContext, Propiedad, Prospecto};

use super::{read_file, OutputArgs};

#[derive(Args, Debug)]
pub struct ContractArgs {
    /// Contract template file
    #[arg(short, long)]
    pub template: PathBuf,

    /// Property record (JSON or YAML)
    #[arg(long)]
    pub propiedad: PathBuf,

    /// Prospect record (JSON or YAML)
    #[arg(long)]
    pub prospecto: PathBuf,

    /// Company name placed in empresa.nombre
    #[arg(long, env = "RENTOSO_COMPANY", default_value = rentoso_tokens::DEFAULT_COMPANY)]
    pub company: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub async fn execute(args: ContractArgs) -> Result<()> {
    let template = read_file(&args.template).await?;
    let propiedad: Propiedad = load_record(&args.propiedad).await?;
    let prospecto: Prospecto = load_record(&args.prospecto).await?;

    info!(
        "Generating contract for {} on {}",
        prospecto.nombre, propiedad.titulo
    );

    let context = ContractContext::new(&propiedad, &prospecto)
        .company(args.company.as_str())
        .build();

    args.output.finish(render(&template, &context)).await
}

async fn load_record<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_file(path).await?;
    parse_record(&content, path).with_context(|| format!("Invalid record file {}", path.display()))
}
