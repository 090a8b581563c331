//! Commit records as supplied by a commit source, and the cleaned entries
//! derived from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::normalizer::clean_message;

/// Placeholder used when a record has no `message`.
pub const DEFAULT_MESSAGE: &str = "No message";
/// Placeholder used when a record has no `author`.
pub const DEFAULT_AUTHOR: &str = "Unknown author";
/// Placeholder used when a record has no `date`.
pub const DEFAULT_DATE: &str = "Unknown date";

/// One commit as described by the input payload.
///
/// Every field is optional; extraction from JSON is best-effort (see
/// [`CommitRecord::from_object`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit SHA, when the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// Raw commit message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Author display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Commit date, in whatever format the source uses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl CommitRecord {
    /// Extracts the known fields from one JSON object.
    ///
    /// - strings are taken verbatim;
    /// - `null` or an absent key counts as missing;
    /// - an `author` object with a string `name` contributes that name;
    /// - any other value is kept as its compact JSON text.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            sha: text_field(object, "sha"),
            message: text_field(object, "message"),
            author: author_field(object),
            date: text_field(object, "date"),
        }
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn author_field(object: &Map<String, Value>) -> Option<String> {
    if let Some(Value::Object(author)) = object.get("author") {
        if let Some(Value::String(name)) = author.get("name") {
            return Some(name.clone());
        }
    }
    text_field(object, "author")
}

/// The labeled, cleaned text block derived from a [`CommitRecord`].
///
/// Entries carry no identity beyond their position in the output sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedEntry {
    /// Author, or [`DEFAULT_AUTHOR`].
    pub author: String,
    /// Date, or [`DEFAULT_DATE`].
    pub date: String,
    /// Message after [`clean_message`]; [`DEFAULT_MESSAGE`] is cleaned too.
    pub message: String,
}

impl CleanedEntry {
    /// Applies defaults and message cleaning to one record.
    pub fn from_record(record: &CommitRecord) -> Self {
        let message = record.message.as_deref().unwrap_or(DEFAULT_MESSAGE);
        Self {
            author: record
                .author
                .clone()
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            date: record
                .date
                .clone()
                .unwrap_or_else(|| DEFAULT_DATE.to_string()),
            message: clean_message(message),
        }
    }
}

impl std::fmt::Display for CleanedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Author: {}\nDate: {}\nMessage:\n{}",
            self.author, self.date, self.message
        )
    }
}
