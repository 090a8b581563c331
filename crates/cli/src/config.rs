//! Command-line and environment configuration.
//!
//! [`Args`] is the raw clap surface; [`CliConfig::from_args`] validates it into
//! the typed settings each crate is constructed from. A run never starts with
//! an invalid configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use github::GithubConfig;
use llm::OpenAiConfig;
use nodes::{GeneratorSettings, SummaryMode};
use pipeline::{BranchName, ModelName, RepositoryId, ScribeError};

/// Turn a JSON array of commits into Markdown release notes.
///
/// Commits are read from stdin unless `--github` is given.
#[derive(Debug, Parser)]
#[command(name = "scribe", version)]
pub struct Args {
    /// API key for the completion endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Completion model
    #[arg(long, env = "SCRIBE_MODEL", default_value = llm::DEFAULT_MODEL)]
    model: String,

    /// Chat-completions endpoint URL
    #[arg(long, env = "SCRIBE_LLM_ENDPOINT", default_value = llm::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "SCRIBE_TIMEOUT_SECS", default_value_t = llm::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// One note per commit, or one note for all commits
    #[arg(long, value_enum, default_value_t = ModeArg::PerCommit)]
    mode: ModeArg,

    /// Directory the notes are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// File name prefix of each note
    #[arg(long, default_value = "releaseNotes")]
    prefix: String,

    /// File name extension of each note, including the dot
    #[arg(long, default_value = ".txt")]
    extension: String,

    /// Read commits from this GitHub repository instead of stdin
    #[arg(long, value_name = "OWNER/REPO")]
    github: Option<String>,

    /// Branch to list commits from (with --github)
    #[arg(long, default_value = "main")]
    branch: String,

    /// Number of commits to list (with --github), 1-100
    #[arg(long, default_value_t = github::DEFAULT_PER_PAGE)]
    per_page: u8,

    /// GitHub token (with --github)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// GitHub REST API root
    #[arg(long, env = "SCRIBE_GITHUB_API", default_value = github::DEFAULT_API_BASE)]
    github_api: String,

    /// Log each rendered prompt
    #[arg(long)]
    show_prompt: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    PerCommit,
    Combined,
}

impl From<ModeArg> for SummaryMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::PerCommit => SummaryMode::PerCommit,
            ModeArg::Combined => SummaryMode::Combined,
        }
    }
}

/// Where commits come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Read a JSON array from standard input.
    Stdin,
    /// List a branch's commits through the GitHub API.
    Github(GithubConfig),
}

/// Where and how notes are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output directory; created on first write.
    pub dir: PathBuf,
    /// File name prefix (e.g. `releaseNotes`).
    pub prefix: String,
    /// File name extension including the dot, or empty.
    pub extension: String,
}

/// Validated configuration for one `scribe` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Completion provider connection.
    pub provider: OpenAiConfig,
    /// Generator knobs.
    pub generator: GeneratorSettings,
    /// Commit source selection.
    pub source: SourceConfig,
    /// Note sink settings.
    pub sink: SinkConfig,
}

impl CliConfig {
    /// Validates raw arguments.
    ///
    /// # Errors
    ///
    /// [`ScribeError::ConfigurationError`] naming the first invalid setting.
    pub fn from_args(args: Args) -> Result<Self, ScribeError> {
        let api_key = args.api_key.filter(|k| !k.trim().is_empty());
        if api_key.is_none() && args.endpoint == llm::DEFAULT_ENDPOINT {
            return Err(ScribeError::config(
                "an API key is required for the default endpoint (set OPENAI_API_KEY or --api-key)",
            ));
        }
        if args.timeout_secs == 0 {
            return Err(ScribeError::config("--timeout-secs must be greater than zero"));
        }
        let timeout = Duration::from_secs(args.timeout_secs);

        let model = ModelName::new(args.model)
            .ok_or_else(|| ScribeError::config("--model must not be empty"))?;

        validate_file_name_part("--prefix", &args.prefix, false)?;
        validate_file_name_part("--extension", &args.extension, true)?;
        if !args.extension.is_empty() && !args.extension.starts_with('.') {
            return Err(ScribeError::config("--extension must start with '.'"));
        }

        let source = match args.github {
            None => SourceConfig::Stdin,
            Some(repo) => {
                let repository = RepositoryId::parse(&repo).ok_or_else(|| {
                    ScribeError::config(format!("--github expects OWNER/REPO, got '{repo}'"))
                })?;
                let branch = BranchName::new(args.branch)
                    .ok_or_else(|| ScribeError::config("--branch must not be empty"))?;
                if !(1..=100).contains(&args.per_page) {
                    return Err(ScribeError::config("--per-page must be between 1 and 100"));
                }
                SourceConfig::Github(GithubConfig {
                    api_base: args.github_api,
                    repository,
                    branch,
                    per_page: args.per_page,
                    token: args.github_token.filter(|t| !t.trim().is_empty()),
                    timeout,
                })
            }
        };

        Ok(Self {
            provider: OpenAiConfig {
                endpoint: args.endpoint,
                api_key,
                timeout,
            },
            generator: GeneratorSettings {
                model,
                mode: args.mode.into(),
                show_prompt: args.show_prompt,
            },
            source,
            sink: SinkConfig {
                dir: args.output_dir,
                prefix: args.prefix,
                extension: args.extension,
            },
        })
    }
}

fn validate_file_name_part(flag: &str, value: &str, allow_empty: bool) -> Result<(), ScribeError> {
    if value.is_empty() && !allow_empty {
        return Err(ScribeError::config(format!("{flag} must not be empty")));
    }
    if value.contains(['/', '\\']) {
        return Err(ScribeError::config(format!(
            "{flag} must not contain path separators"
        )));
    }
    Ok(())
}
