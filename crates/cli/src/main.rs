//! scribe CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: flags with environment fallbacks, validated
//!    into a [`config::CliConfig`] before anything else happens.
//! 2. **Wire observability**: `tracing-subscriber` with a text or JSON layer
//!    and, when configured, an OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: the commit source (stdin or GitHub), the
//!    `OpenAiProvider`, and the numbered-file sink, injected into
//!    [`nodes::ReleaseNotesGenerator`].
//! 4. **Report**: one line per written note, the parse diagnostic if the
//!    payload was rejected, then `Done`.

mod config;
mod sink;
mod source;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use github::GithubCommitSource;
use llm::OpenAiProvider;
use nodes::ReleaseNotesGenerator;
use pipeline::{CommitSource, RunId};
use tracing::info;

use crate::config::{Args, CliConfig, SourceConfig};
use crate::sink::FileNoteSink;
use crate::source::StdinSource;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let telemetry = telemetry::init(args.json_logs)?;

    let result = run(args).await;

    telemetry.shutdown();
    result
}

async fn run(args: Args) -> Result<()> {
    let config = CliConfig::from_args(args)?;

    let source: Box<dyn CommitSource> = match config.source {
        SourceConfig::Stdin => Box::new(StdinSource),
        SourceConfig::Github(settings) => Box::new(GithubCommitSource::new(settings)?),
    };
    let provider = Arc::new(OpenAiProvider::new(config.provider)?);
    info!(endpoint = provider.endpoint(), "Completion provider ready");
    let sink = Arc::new(FileNoteSink::new(config.sink));
    let generator = ReleaseNotesGenerator::new(provider, sink, config.generator);

    let payload = source
        .read_commits()
        .await
        .context("failed to read commits")?;

    let run_id = RunId::new_random();
    let summary = generator
        .run(run_id, &payload)
        .await
        .with_context(|| format!("release-notes run {run_id} failed"))?;

    if let Some(diagnostic) = &summary.diagnostic {
        println!("{diagnostic}");
    }
    for note in &summary.notes {
        println!("{}", note.location);
    }
    info!(
        run_id = %summary.run_id,
        entries = summary.entries,
        notes = summary.notes.len(),
        prompt_tokens = summary.usage.prompt_tokens.as_u64(),
        completion_tokens = summary.usage.completion_tokens.as_u64(),
        "Run complete"
    );
    println!("Done");
    Ok(())
}
