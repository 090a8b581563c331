//! Commit message normalizer.
//!
//! Turns a JSON array of commit objects into labeled, cleaned text entries
//! ready to be embedded in a summarization prompt. Everything here is a pure
//! function of its input.
//!
//! Message cleaning removes, in one pass:
//!
//! 1. escaped-unicode sequences (`\u` plus four hex digits, as literal text);
//! 2. ticket references (`#4521`, and bare digit runs);
//! 3. `wip:` / `chore:` / `refactor:` labels through the end of their line,
//!    with or without a conventional-commit scope (`chore(deps):`), wherever
//!    the label appears; a word glued to the label (`autowip:`) goes with it;
//! 4. whitespace runs, collapsed to a single space and trimmed.
//!
//! Escapes go first because step 2 would otherwise eat their hex digits and
//! leave a mangled `\ue` behind. The pass is repeated until the text stops
//! changing, so [`clean_message`] is idempotent even when a removal joins
//! fragments into a new match.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::{CleanedEntry, CommitRecord, ParseFailure};

static UNICODE_ESCAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\u[0-9A-Fa-f]{4}").expect("Invalid unicode escape regex")
});

static TICKET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#?\d+").expect("Invalid ticket regex"));

static NOISE_LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\w*(?:wip|chore|refactor)(?:\([^)\n]*\))?!?:[^\n]*")
        .expect("Invalid noise label regex")
});

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Cleans one commit message.
///
/// See the module docs for the transformation order. The result never
/// contains ticket numbers, noise labels, unicode escapes, or runs of more
/// than one whitespace character.
pub fn clean_message(message: &str) -> String {
    let mut current = clean_pass(message);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(message: &str) -> String {
    let text = UNICODE_ESCAPE_REGEX.replace_all(message, "");
    let text = TICKET_REGEX.replace_all(&text, "");
    let text = NOISE_LABEL_REGEX.replace_all(&text, "");
    let text = WHITESPACE_REGEX.replace_all(&text, " ");
    text.trim().to_string()
}

/// Parses a commit payload into records, one per array element.
///
/// # Errors
///
/// [`ParseFailure`] if `input` is not valid JSON, is not an array, or has an
/// element that is not an object.
pub fn parse_commits(input: &str) -> Result<Vec<CommitRecord>, ParseFailure> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(input)?;
    tracing::debug!(commits = objects.len(), "Parsed commit payload");
    Ok(objects.iter().map(CommitRecord::from_object).collect())
}

/// Parses and cleans a commit payload, preserving input order.
///
/// # Errors
///
/// [`ParseFailure`] under the same conditions as [`parse_commits`]; no partial
/// results are returned.
pub fn normalize_commits(input: &str) -> Result<Vec<CleanedEntry>, ParseFailure> {
    Ok(parse_commits(input)?
        .iter()
        .map(CleanedEntry::from_record)
        .collect())
}

/// Produces the formatted entry strings for a commit payload.
///
/// On malformed input the result is a single entry
/// `"Failed to parse commit messages: <diagnostic>"`.
pub fn clean_commit_messages(input: &str) -> Vec<String> {
    match normalize_commits(input) {
        Ok(entries) => entries.iter().map(ToString::to_string).collect(),
        Err(failure) => {
            tracing::warn!(error = %failure, "Commit payload rejected");
            vec![failure.to_string()]
        }
    }
}
