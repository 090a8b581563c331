//! Newtype identifiers for the release-notes domain.
//!
//! Every name that crosses a crate boundary (model, repository, branch, commit)
//! is a distinct newtype so a [`BranchName`] can never be passed where a
//! [`ModelName`] is expected, even though both wrap a `String`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// or only whitespace.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// Name of the completion model requested from the provider (e.g. `"gpt-4o-mini"`).
    ModelName
}

string_id! {
    /// A Git branch name (e.g. `"main"`).
    BranchName
}

string_id! {
    /// A Git commit SHA as reported by the commit source.
    CommitSha
}

/// Identifies a GitHub repository in `"owner/repo"` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    owner: String,
    name: String,
}

impl RepositoryId {
    /// Parses `"owner/repo"`.
    ///
    /// Returns `None` unless the value has exactly one `/` with a non-empty,
    /// whitespace-free segment on each side.
    pub fn parse(value: &str) -> Option<Self> {
        let (owner, name) = value.split_once('/')?;
        let valid = |s: &str| !s.is_empty() && !s.contains('/') && !s.contains(char::is_whitespace);
        if valid(owner) && valid(name) {
            Some(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            })
        } else {
            None
        }
    }

    /// The account or organisation that owns the repository.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name without its owner.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// ---------------------------------------------------------------------------
// Integer-backed
// ---------------------------------------------------------------------------

/// Zero-based position of a written note in the run's output sequence.
///
/// Notes are numbered in input order; the file sink turns the number into the
/// output file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoteNumber(u64);

impl NoteNumber {
    /// Creates a note number from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for NoteNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single invocation of the release-notes generator.
///
/// Generated fresh for every CLI invocation and recorded on the run span so
/// all log lines of one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn string_ids_reject_blank_values() {
        assert!(ModelName::new("").is_none());
        assert!(BranchName::new("   ").is_none());
        assert_eq!(ModelName::new("gpt-4o-mini").unwrap().as_str(), "gpt-4o-mini");
    }

    #[rstest]
    #[case::plain("acme/widgets", Some(("acme", "widgets")))]
    #[case::dotted("acme/widgets.rs", Some(("acme", "widgets.rs")))]
    #[case::missing_slash("acme", None)]
    #[case::empty_owner("/widgets", None)]
    #[case::empty_name("acme/", None)]
    #[case::nested("acme/widgets/extra", None)]
    #[case::whitespace("acme/wid gets", None)]
    fn repository_id_parses_owner_and_name(
        #[case] input: &str,
        #[case] expected: Option<(&str, &str)>,
    ) {
        let parsed = RepositoryId::parse(input);
        assert_eq!(
            parsed.as_ref().map(|r| (r.owner(), r.name())),
            expected
        );
        if let Some(repo) = parsed {
            assert_eq!(repo.to_string(), input);
        }
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunId::new_random(), RunId::new_random());
    }
}
