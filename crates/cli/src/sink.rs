//! Numbered-file note sink.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pipeline::{NoteNumber, NoteSink, SinkError};
use tracing::debug;

use crate::config::SinkConfig;

/// Writes each note to `<dir>/<prefix><number><extension>`, overwriting any
/// existing file.
pub struct FileNoteSink {
    dir: PathBuf,
    prefix: String,
    extension: String,
}

impl FileNoteSink {
    /// Creates a sink from validated settings.
    pub fn new(config: SinkConfig) -> Self {
        Self {
            dir: config.dir,
            prefix: config.prefix,
            extension: config.extension,
        }
    }

    /// Path note `number` is written to.
    pub fn path_for(&self, number: NoteNumber) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", self.prefix, number, self.extension))
    }
}

fn sink_error(path: &Path, err: std::io::Error) -> SinkError {
    SinkError {
        location: path.display().to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl NoteSink for FileNoteSink {
    async fn write_note(&self, number: NoteNumber, text: &str) -> Result<String, SinkError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| sink_error(&self.dir, e))?;

        let path = self.path_for(number);
        tokio::fs::write(&path, text)
            .await
            .map_err(|e| sink_error(&path, e))?;

        debug!(path = %path.display(), bytes = text.len(), "Note written");
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sink(dir: PathBuf) -> FileNoteSink {
        FileNoteSink::new(SinkConfig {
            dir,
            prefix: "releaseNotes".to_string(),
            extension: ".txt".to_string(),
        })
    }

    #[tokio::test]
    async fn writes_numbered_files_creating_the_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("notes");
        let sink = sink(out.clone());

        let first = sink.write_note(NoteNumber::new(0), "## Summary\n- a").await.unwrap();
        sink.write_note(NoteNumber::new(1), "## Summary\n- b").await.unwrap();

        assert_eq!(first, out.join("releaseNotes0.txt").display().to_string());
        assert_eq!(
            std::fs::read_to_string(out.join("releaseNotes1.txt")).unwrap(),
            "## Summary\n- b"
        );
    }

    #[tokio::test]
    async fn rewriting_a_number_replaces_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = sink(tmp.path().to_path_buf());

        sink.write_note(NoteNumber::new(0), "old and longer").await.unwrap();
        sink.write_note(NoteNumber::new(0), "new").await.unwrap();

        assert_eq!(
            std::fs::read_to_string(tmp.path().join("releaseNotes0.txt")).unwrap(),
            "new"
        );
    }

    #[tokio::test]
    async fn unwritable_directory_reports_location() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("occupied");
        std::fs::write(&blocker, "a file, not a directory").unwrap();
        let sink = sink(blocker.clone());

        let err = sink.write_note(NoteNumber::new(0), "x").await.unwrap_err();

        assert_eq!(err.location, blocker.display().to_string());
    }

    #[test]
    fn empty_extension_is_allowed() {
        let sink = FileNoteSink::new(SinkConfig {
            dir: PathBuf::from("out"),
            prefix: "notes-".to_string(),
            extension: String::new(),
        });
        assert_eq!(sink.path_for(NoteNumber::new(7)), PathBuf::from("out/notes-7"));
    }
}
