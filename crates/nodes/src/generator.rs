//! The release-notes generator.

use std::sync::Arc;

use pipeline::{
    normalize_commits, CleanedEntry, Completion, CompletionRequest, LlmProvider, ModelName,
    NoteNumber, NoteSink, ReleaseNotesPrompt, RunId, ScribeError, TokenUsage,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// How commit entries are grouped into prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryMode {
    /// One prompt and one note per commit entry.
    #[default]
    PerCommit,
    /// All entries in a single prompt producing one note.
    Combined,
}

/// Per-run knobs for [`ReleaseNotesGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Model requested from the provider.
    pub model: ModelName,
    /// Prompt grouping.
    pub mode: SummaryMode,
    /// Log every rendered prompt at `info` level.
    pub show_prompt: bool,
}

/// A note that reached the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenNote {
    /// Position in the output sequence.
    pub number: NoteNumber,
    /// Location reported by the sink.
    pub location: String,
}

/// Outcome of a run that did not abort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Identifier recorded on the run's span.
    pub run_id: RunId,
    /// Number of cleaned entries derived from the payload.
    pub entries: usize,
    /// Notes written, in order.
    pub notes: Vec<WrittenNote>,
    /// The parse diagnostic, when the payload was rejected.
    pub diagnostic: Option<String>,
    /// Token usage summed over all completions that reported it.
    pub usage: TokenUsage,
}

/// Drives normalize, prompt, completion and storage for one commit payload.
pub struct ReleaseNotesGenerator {
    provider: Arc<dyn LlmProvider>,
    sink: Arc<dyn NoteSink>,
    settings: GeneratorSettings,
    prompt: ReleaseNotesPrompt,
}

impl ReleaseNotesGenerator {
    /// Creates a generator over the given provider and sink.
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        sink: Arc<dyn NoteSink>,
        settings: GeneratorSettings,
    ) -> Self {
        Self {
            provider,
            sink,
            settings,
            prompt: ReleaseNotesPrompt,
        }
    }

    /// Runs the pipeline over `commits_json`.
    ///
    /// A payload that fails to parse is not an error: the diagnostic is logged
    /// and returned in [`RunSummary::diagnostic`], and no completion is
    /// requested. The diagnostic is never sent to the provider as a prompt, and
    /// no placeholder note is written for it. Entries are processed one at a time in input order; the first
    /// provider or sink failure aborts the run.
    ///
    /// # Errors
    ///
    /// [`ScribeError::Completion`] or [`ScribeError::Sink`].
    #[instrument(skip(self, run_id, commits_json), fields(run_id = %run_id, mode = ?self.settings.mode))]
    pub async fn run(&self, run_id: RunId, commits_json: &str) -> Result<RunSummary, ScribeError> {
        let mut summary = RunSummary {
            run_id,
            entries: 0,
            notes: Vec::new(),
            diagnostic: None,
            usage: TokenUsage::default(),
        };

        let entries = match normalize_commits(commits_json) {
            Ok(entries) => entries,
            Err(failure) => {
                warn!(error = %failure, "Commit payload rejected; no notes generated");
                summary.diagnostic = Some(failure.to_string());
                return Ok(summary);
            }
        };
        summary.entries = entries.len();
        info!(entries = entries.len(), "Commit payload normalized");

        if entries.is_empty() {
            return Ok(summary);
        }

        let batches: Vec<&[CleanedEntry]> = match self.settings.mode {
            SummaryMode::PerCommit => entries.chunks(1).collect(),
            SummaryMode::Combined => vec![entries.as_slice()],
        };

        for (index, batch) in batches.into_iter().enumerate() {
            let number = NoteNumber::new(index as u64);
            let completion = self.summarize(number, batch).await?;
            if let Some(usage) = completion.usage {
                summary.usage += usage;
            }

            let location = self.sink.write_note(number, &completion.text).await?;
            info!(note = %number, location = %location, "Release notes written");
            summary.notes.push(WrittenNote { number, location });
        }

        Ok(summary)
    }

    async fn summarize(
        &self,
        number: NoteNumber,
        batch: &[CleanedEntry],
    ) -> Result<Completion, ScribeError> {
        let texts: Vec<String> = batch.iter().map(ToString::to_string).collect();
        let prompt = self.prompt.render(&texts);
        if self.settings.show_prompt {
            info!(note = %number, prompt = %prompt, "Rendered prompt");
        }

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            prompt,
        };
        Ok(self.provider.complete(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pipeline::{LlmError, SinkError, TokenCount};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Echoes a numbered reply and records every prompt it was given.
    #[derive(Default)]
    struct FakeProvider {
        prompts: Mutex<Vec<String>>,
        fail_on_call: Option<usize>,
    }

    #[async_trait]
    impl LlmProvider for FakeProvider {
        async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError> {
            let mut prompts = self.prompts.lock().unwrap();
            let call = prompts.len();
            prompts.push(request.prompt.clone());
            if self.fail_on_call == Some(call) {
                return Err(LlmError::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(Completion {
                text: format!("## Summary\n- note {call}"),
                usage: Some(TokenUsage {
                    prompt_tokens: TokenCount::new(10),
                    completion_tokens: TokenCount::new(5),
                }),
            })
        }
    }

    #[derive(Default)]
    struct MemorySink {
        notes: Mutex<Vec<(NoteNumber, String)>>,
        read_only: bool,
    }

    #[async_trait]
    impl NoteSink for MemorySink {
        async fn write_note(&self, number: NoteNumber, text: &str) -> Result<String, SinkError> {
            let location = format!("memory://{number}");
            if self.read_only {
                return Err(SinkError {
                    location,
                    message: "read-only".to_string(),
                });
            }
            self.notes.lock().unwrap().push((number, text.to_string()));
            Ok(location)
        }
    }

    fn settings(mode: SummaryMode) -> GeneratorSettings {
        GeneratorSettings {
            model: ModelName::new("gpt-4o-mini").unwrap(),
            mode,
            show_prompt: false,
        }
    }

    const PAYLOAD: &str = r#"[
        {"message": "Add export button #12", "author": "Ada", "date": "2024-03-01"},
        {"message": "wip: scratch\nFix crash on save", "author": "Grace"}
    ]"#;

    #[tokio::test]
    async fn per_commit_mode_writes_one_note_per_entry_in_order() {
        let provider = Arc::new(FakeProvider::default());
        let sink = Arc::new(MemorySink::default());
        let generator =
            ReleaseNotesGenerator::new(provider.clone(), sink.clone(), settings(SummaryMode::PerCommit));

        let summary = generator.run(RunId::new_random(), PAYLOAD).await.unwrap();

        assert_eq!(summary.entries, 2);
        assert_eq!(summary.diagnostic, None);
        assert_eq!(
            summary.notes,
            vec![
                WrittenNote {
                    number: NoteNumber::new(0),
                    location: "memory://0".to_string()
                },
                WrittenNote {
                    number: NoteNumber::new(1),
                    location: "memory://1".to_string()
                },
            ]
        );
        assert_eq!(summary.usage.total(), TokenCount::new(30));

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].contains("Author: Ada\nDate: 2024-03-01\nMessage:\nAdd export button"));
        assert!(prompts[1].contains("Author: Grace\nDate: Unknown date\nMessage:\nFix crash on save"));

        let notes = sink.notes.lock().unwrap();
        assert_eq!(notes[1], (NoteNumber::new(1), "## Summary\n- note 1".to_string()));
    }

    #[tokio::test]
    async fn combined_mode_sends_all_entries_in_one_prompt() {
        let provider = Arc::new(FakeProvider::default());
        let sink = Arc::new(MemorySink::default());
        let generator =
            ReleaseNotesGenerator::new(provider.clone(), sink.clone(), settings(SummaryMode::Combined));

        let summary = generator.run(RunId::new_random(), PAYLOAD).await.unwrap();

        assert_eq!(summary.entries, 2);
        assert_eq!(summary.notes.len(), 1);
        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Add export button\n\nAuthor: Grace"));
    }

    #[tokio::test]
    async fn malformed_payload_is_reported_without_calling_the_provider() {
        let provider = Arc::new(FakeProvider::default());
        let sink = Arc::new(MemorySink::default());
        let generator =
            ReleaseNotesGenerator::new(provider.clone(), sink.clone(), settings(SummaryMode::PerCommit));

        let summary = generator.run(RunId::new_random(), "not json").await.unwrap();

        let diagnostic = summary.diagnostic.unwrap();
        assert!(diagnostic.starts_with("Failed to parse commit messages:"));
        assert!(summary.notes.is_empty());
        assert!(provider.prompts.lock().unwrap().is_empty());
        assert!(sink.notes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_payload_writes_nothing() {
        let provider = Arc::new(FakeProvider::default());
        let generator = ReleaseNotesGenerator::new(
            provider.clone(),
            Arc::new(MemorySink::default()),
            settings(SummaryMode::Combined),
        );

        let summary = generator.run(RunId::new_random(), "[]").await.unwrap();

        assert_eq!(summary.entries, 0);
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_aborts_after_earlier_notes() {
        let provider = Arc::new(FakeProvider {
            fail_on_call: Some(1),
            ..FakeProvider::default()
        });
        let sink = Arc::new(MemorySink::default());
        let generator =
            ReleaseNotesGenerator::new(provider.clone(), sink.clone(), settings(SummaryMode::PerCommit));

        let err = generator.run(RunId::new_random(), PAYLOAD).await.unwrap_err();

        assert!(matches!(err, ScribeError::Completion(LlmError::Status { status: 500, .. })));
        assert_eq!(sink.notes.lock().unwrap().len(), 1);
        assert_eq!(provider.prompts.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn sink_failure_is_returned() {
        let generator = ReleaseNotesGenerator::new(
            Arc::new(FakeProvider::default()),
            Arc::new(MemorySink {
                read_only: true,
                ..MemorySink::default()
            }),
            settings(SummaryMode::PerCommit),
        );

        let err = generator.run(RunId::new_random(), PAYLOAD).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to write note to memory://0: read-only"
        );
    }
}
