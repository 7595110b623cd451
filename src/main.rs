use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crd_defaulter::crd::add_defaulting_funcs;
use crd_defaulter::Defaulters;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// Apply apiextensions.k8s.io/v1beta1 defaults to CustomResourceDefinition manifests
#[derive(Parser, Debug)]
#[command(name = "crd-defaulter", version)]
struct Args {
    /// Manifest to read, YAML or JSON. Reads stdin when omitted or "-".
    #[arg(env = "CRD_DEFAULTER_INPUT")]
    input: Option<PathBuf>,

    /// Output format of the defaulted manifest
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = OutputFormat::Yaml,
        env = "CRD_DEFAULTER_OUTPUT"
    )]
    output: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Yaml,
    Json,
}

/// Default every document of a (possibly multi-document) manifest
///
/// Empty documents are skipped. Documents keep their order.
fn default_manifest(
    defaulters: &Defaulters,
    manifest: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let mut documents = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(manifest).enumerate() {
        let value = Value::deserialize(document)
            .with_context(|| format!("Failed to parse document {}", index))?;
        if value.is_null() {
            continue;
        }

        let defaulted = defaulters
            .default_value(value)
            .with_context(|| format!("Failed to default document {}", index))?;
        debug!(document = index, "Defaulted document");
        documents.push(defaulted);
    }

    let mut out = String::new();
    for (index, document) in documents.iter().enumerate() {
        match format {
            OutputFormat::Yaml => {
                if index > 0 {
                    out.push_str("---\n");
                }
                out.push_str(&serde_yaml::to_string(document)?);
            }
            OutputFormat::Json => {
                out.push_str(&serde_json::to_string_pretty(document)?);
                out.push('\n');
            }
        }
    }

    Ok(out)
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the manifest
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut defaulters = Defaulters::new();
    add_defaulting_funcs(&mut defaulters);
    debug!(kinds = defaulters.kinds().count(), "Defaulting functions registered");

    let manifest = read_input(args.input.as_ref())?;
    let output = default_manifest(&defaulters, &manifest, args.output)?;

    info!(
        input = ?args.input,
        format = ?args.output,
        "Manifest defaulted"
    );
    print!("{}", output);
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
