//! The release-notes prompt template.

/// Instruction placed before the commit entries.
const INSTRUCTION: &str = "Summarize the following commit messages into release notes in Markdown:";

/// Output skeleton the model is asked to follow.
const FORMAT: &str = "Format:\n## Summary\n- Feature highlights\n- Bug fixes\n- Improvements";

/// Builds the prompt sent to the completion provider.
///
/// The template is fixed; only the embedded entries vary. Entries are
/// separated by a blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseNotesPrompt;

impl ReleaseNotesPrompt {
    /// Renders the prompt for the given entry texts.
    pub fn render<S: AsRef<str>>(&self, entries: &[S]) -> String {
        let body = entries
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{INSTRUCTION}\n\n{body}\n\n{FORMAT}\n")
    }
}
