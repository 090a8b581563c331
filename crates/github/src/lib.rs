//! scribe GitHub infrastructure adapter.
//!
//! Implements [`pipeline::CommitSource`] by listing the most recent commits of
//! one branch through the GitHub REST API. Each commit is flattened to the
//! `{sha, message, author, date}` shape the normalizer expects, so stdin and
//! GitHub input go through exactly the same cleaning path.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. All GitHub
//! API details (headers, authentication, response shape) are handled here;
//! the [`pipeline`] crate never sees them.

pub mod commits;

pub use commits::{GithubCommitSource, GithubConfig, DEFAULT_API_BASE, DEFAULT_PER_PAGE};
