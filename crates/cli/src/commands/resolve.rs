//! Resolution commands - single reference and batch file

use anyhow::{Context, Result};
use cpres_core::{Resolution, ResolverConfig};
use cpres_persistence::SqliteGateway;
use cpres_resolver::Resolver;
use serde::Serialize;
use std::path::Path;

use crate::db;
use crate::OutputFormat;

/// One resolved line of output
#[derive(Serialize)]
struct ResolutionOutput<'a> {
    tag: &'a str,
    reference: &'a str,
    #[serde(flatten)]
    resolution: &'a Resolution,
}

/// Resolve one reference and print it
pub async fn run_single(
    db_path: &Path,
    config: ResolverConfig,
    tag: &str,
    reference: &str,
    format: OutputFormat,
) -> Result<()> {
    let resolver = open_resolver(db_path, config).await?;

    let resolution = resolver.resolve(tag, reference).await;
    println!("{}", format_line(tag, reference, &resolution, resolver.config(), format)?);

    resolver.gateway().pool().close().await;
    Ok(())
}

/// Resolve every `TAG REFERENCE` line of `file`, sequentially
pub async fn run_batch(
    db_path: &Path,
    config: ResolverConfig,
    file: &Path,
    format: OutputFormat,
) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read batch file {:?}", file))?;
    let resolver = open_resolver(db_path, config).await?;

    let mut total = 0usize;
    for (line_no, line) in content.lines().enumerate() {
        let Some((tag, reference)) = parse_line(line) else {
            if !is_skippable(line) {
                tracing::warn!(line = line_no + 1, "Skipping malformed batch line");
            }
            continue;
        };

        let resolution = resolver.resolve(tag, reference).await;
        println!("{}", format_line(tag, reference, &resolution, resolver.config(), format)?);
        total += 1;
    }

    tracing::info!(total, "Batch resolution finished");
    resolver.gateway().pool().close().await;
    Ok(())
}

async fn open_resolver(db_path: &Path, config: ResolverConfig) -> Result<Resolver<SqliteGateway>> {
    let pool = db::connect(db_path).await?;
    Ok(Resolver::with_config(SqliteGateway::new(pool), config))
}

fn is_skippable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Parse `TAG REFERENCE`; blank lines, comments and lines without two fields yield `None`
fn parse_line(line: &str) -> Option<(&str, &str)> {
    if is_skippable(line) {
        return None;
    }
    let mut parts = line.split_whitespace();
    let tag = parts.next()?;
    let reference = parts.next()?;
    Some((tag, reference))
}

fn format_line(
    tag: &str,
    reference: &str,
    resolution: &Resolution,
    config: &ResolverConfig,
    format: OutputFormat,
) -> Result<String> {
    let line = match format {
        OutputFormat::Legacy => resolution.render(config),
        OutputFormat::Json => serde_json::to_string(&ResolutionOutput {
            tag,
            reference,
            resolution,
        })?,
        OutputFormat::Text => match resolution {
            Resolution::Resolved(resolved) => format!(
                "{} {}\t{}\t({:?})",
                tag, reference, resolved.name, resolved.origin
            ),
            Resolution::NotFound => format!("{} {}\t<not found>", tag, reference),
            Resolution::UnknownType => format!("{} {}\t{}", tag, reference, config.unknown_system_text),
            Resolution::Failed { detail } => format!("{} {}\tFAILED: {}", tag, reference, detail),
        },
    };
    Ok(line)
}
