//! Error types for the suggestion contract.
//!
//! Validation failures are reported as values so the boundary code invoking
//! the contract can decide whether to drop a malformed item or reject the
//! whole batch.

use thiserror::Error;

/// Errors raised while validating a single suggestion record.
///
/// Each variant names the first field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    /// The candidate is not a JSON object.
    #[error("suggestion must be a JSON object, found {found}")]
    MalformedRecord {
        /// JSON kind of the rejected candidate.
        found: &'static str,
    },

    /// The `id` field is absent, not a string, or empty.
    #[error("suggestion id must be a non-empty string")]
    MissingIdentifier,

    /// The `type` field is not one of the permitted variants.
    #[error("suggestion type must be \"user\" or \"company\", found {found}")]
    InvalidTypeVariant {
        /// Rendered value of the rejected `type` field.
        found: String,
    },

    /// The `alias` field is absent, not a string, or empty.
    #[error("suggestion alias must be a non-empty string")]
    MissingAlias,

    /// The `avatar` key was omitted.
    #[error("suggestion avatar must be present (use null when unavailable)")]
    MissingAvatar,

    /// The `avatar` field is neither a well-formed URL nor null.
    #[error("suggestion avatar must be an absolute URL or null, found {found}")]
    InvalidAvatarValue {
        /// Rendered value of the rejected `avatar` field.
        found: String,
    },

    /// The `name` field is present but not a string.
    #[error("suggestion name must be a string when present, found {found}")]
    InvalidNameValue {
        /// JSON kind of the rejected `name` field.
        found: &'static str,
    },
}

/// Errors raised while validating a suggestion response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// The document is not valid JSON.
    #[error("invalid suggestion response JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The envelope is not a JSON object.
    #[error("suggestion response must be a JSON object, found {found}")]
    MalformedEnvelope {
        /// JSON kind of the rejected envelope.
        found: &'static str,
    },

    /// The envelope has no `data` field, or it is null.
    #[error("suggestion response is missing the data field")]
    MissingDataField,

    /// The `data` field is present but not an array.
    #[error("suggestion response data must be an array, found {found}")]
    InvalidDataField {
        /// JSON kind of the rejected `data` field.
        found: &'static str,
    },

    /// An element of `data` failed validation.
    #[error("invalid suggestion at index {index}: {source}")]
    NestedSuggestion {
        /// Position of the failing element in `data`.
        index: usize,
        /// Underlying validation failure.
        #[source]
        source: SuggestionError,
    },

    /// Two elements of `data` share an id.
    #[error("duplicate suggestion id '{id}' at index {index}")]
    DuplicateIdentifier {
        /// Position of the repeated id.
        index: usize,
        /// The repeated id.
        id: String,
    },
}

impl ResponseError {
    /// Returns the position in `data` this error refers to, if any.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::NestedSuggestion { index, .. } | Self::DuplicateIdentifier { index, .. } => {
                Some(*index)
            }
            Self::ParseError { .. }
            | Self::MalformedEnvelope { .. }
            | Self::MissingDataField
            | Self::InvalidDataField { .. } => None,
        }
    }
}
