//! Boundary between the contract and the suggestion source.
//!
//! The source is whatever produces candidates for a query: a search index, a
//! remote service, or a recorded document. The contract never trusts its
//! output directly; [`SuggestionLookup`] validates every batch first.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::ResponseError;
use crate::response::ScreenedResponse;
use crate::validation::{
    ValidationOptions, screen_suggestion_response_with, validate_suggestion_response_with,
};

/// Errors raised by suggestion source adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source could not be reached or read.
    #[error("suggestion source unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
    /// The source returned something that is not JSON.
    #[error("suggestion source returned malformed JSON: {message}")]
    Malformed {
        /// Description of the parse error.
        message: String,
    },
}

/// Port for the collaborator that produces raw suggestion envelopes.
#[cfg_attr(test, mockall::automock)]
pub trait SuggestionSource: Send + Sync {
    /// Returns the raw response envelope for `query`.
    fn lookup(&self, query: &str) -> Result<Value, SourceError>;
}

/// Source that replays a response document stored on disk.
///
/// The document is re-read on every lookup and returned as-is whatever the
/// query; no matching happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSuggestionSource {
    path: PathBuf,
}

impl RecordedSuggestionSource {
    /// Creates a source backed by the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the recorded document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SuggestionSource for RecordedSuggestionSource {
    fn lookup(&self, _query: &str) -> Result<Value, SourceError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| SourceError::Unavailable {
            message: format!("failed to read '{}': {e}", self.path.display()),
        })?;

        serde_json::from_str(&contents).map_err(|e| SourceError::Malformed {
            message: e.to_string(),
        })
    }
}

/// What to do with a batch containing invalid suggestions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidItemPolicy {
    /// Fail the whole lookup on the first invalid suggestion.
    #[default]
    RejectBatch,
    /// Drop invalid suggestions and keep the rest.
    SkipInvalid,
}

/// Errors returned by [`SuggestionLookup::lookup`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The source failed to produce a response.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// The source produced a response that violates the contract.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Validating wrapper around a [`SuggestionSource`].
///
/// # Example
///
/// ```
/// use serde_json::{Value, json};
/// use suggestion_contract::{
///     InvalidItemPolicy, SourceError, SuggestionLookup, SuggestionSource,
/// };
///
/// struct Fixed;
///
/// impl SuggestionSource for Fixed {
///     fn lookup(&self, _query: &str) -> Result<Value, SourceError> {
///         Ok(json!({"data": [
///             {"id": "1", "type": "user", "avatar": null, "alias": "jdoe"},
///             {"id": "2", "type": "robot", "avatar": null, "alias": "r2"}
///         ]}))
///     }
/// }
///
/// let lookup = SuggestionLookup::new(Fixed).with_policy(InvalidItemPolicy::SkipInvalid);
/// let screened = lookup.lookup("j").expect("lookup succeeds");
///
/// assert_eq!(screened.response().len(), 1);
/// assert_eq!(screened.rejected().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SuggestionLookup<S> {
    source: S,
    options: ValidationOptions,
    policy: InvalidItemPolicy,
}

impl<S: SuggestionSource> SuggestionLookup<S> {
    /// Wraps `source` with strict validation and [`InvalidItemPolicy::RejectBatch`].
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: ValidationOptions::default(),
            policy: InvalidItemPolicy::default(),
        }
    }

    /// Replaces the validation options.
    #[must_use]
    pub fn with_options(self, options: ValidationOptions) -> Self {
        Self { options, ..self }
    }

    /// Replaces the invalid item policy.
    #[must_use]
    pub fn with_policy(self, policy: InvalidItemPolicy) -> Self {
        Self { policy, ..self }
    }

    /// Returns the wrapped source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetches suggestions for `query` and validates them.
    ///
    /// Under [`InvalidItemPolicy::RejectBatch`] the returned rejection list is
    /// always empty.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Source`] when the source fails and
    /// [`LookupError::Response`] when the batch violates the contract.
    pub fn lookup(&self, query: &str) -> Result<ScreenedResponse, LookupError> {
        debug!(query, policy = ?self.policy, "looking up suggestions");
        let raw = self.source.lookup(query)?;

        let screened = match self.policy {
            InvalidItemPolicy::RejectBatch => {
                let response = validate_suggestion_response_with(&raw, self.options)
                    .inspect_err(|err| warn!(query, error = %err, "rejecting suggestion batch"))?;
                ScreenedResponse::new(response, Vec::new())
            }
            InvalidItemPolicy::SkipInvalid => {
                let screened = screen_suggestion_response_with(&raw, self.options)?;
                for err in screened.rejected() {
                    warn!(query, index = ?err.index(), error = %err, "dropping invalid suggestion");
                }
                screened
            }
        };

        info!(
            query,
            accepted = screened.response().len(),
            rejected = screened.rejected().len(),
            "suggestion lookup validated"
        );
        Ok(screened)
    }
}
