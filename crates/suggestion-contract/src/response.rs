//! Suggestion response envelope.
//!
//! The envelope wraps an ordered batch of suggestions. Order is the ranking
//! chosen by the producer and is preserved by every operation here.

use std::collections::HashSet;
use std::slice;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ResponseError;
use crate::suggestion::Suggestion;
use crate::validation::{ValidationOptions, validate_suggestion_response_with};

/// An ordered, validated batch of suggestions.
///
/// Serializes as `{"data": [...]}`; an empty batch is written as an empty
/// array, never `null`.
///
/// # Example
///
/// ```
/// use suggestion_contract::SuggestionResponse;
///
/// let json = r#"{"data": [
///     {"id": "1", "type": "user", "avatar": null, "alias": "jdoe"},
///     {"id": "2", "type": "company", "avatar": null, "name": "Acme Inc", "alias": "acme"}
/// ]}"#;
///
/// let response = SuggestionResponse::from_json(json).expect("valid response");
/// let names: Vec<&str> = response.display_names().collect();
/// assert_eq!(names, ["jdoe", "Acme Inc"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct SuggestionResponse {
    data: Vec<Suggestion>,
}

impl SuggestionResponse {
    /// Wraps an ordered batch of suggestions.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::DuplicateIdentifier`] when two suggestions
    /// share an id.
    pub fn new(data: Vec<Suggestion>) -> Result<Self, ResponseError> {
        let mut seen_ids = HashSet::with_capacity(data.len());
        if let Some((index, duplicate)) = data
            .iter()
            .enumerate()
            .find(|&(_, suggestion)| !seen_ids.insert(suggestion.id()))
        {
            return Err(ResponseError::DuplicateIdentifier {
                index,
                id: duplicate.id().to_owned(),
            });
        }
        Ok(Self { data })
    }

    /// Returns a response with no suggestions.
    #[must_use]
    pub const fn empty() -> Self {
        Self { data: Vec::new() }
    }

    pub(crate) const fn from_validated(data: Vec<Suggestion>) -> Self {
        Self { data }
    }

    /// Parses and validates a response document using the default options.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::ParseError`] when `json` is not JSON, or the
    /// validation error for the first failing part of the document.
    pub fn from_json(json: &str) -> Result<Self, ResponseError> {
        Self::from_json_with(json, ValidationOptions::default())
    }

    /// Parses and validates a response document.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::ParseError`] when `json` is not JSON, or the
    /// validation error for the first failing part of the document.
    pub fn from_json_with(json: &str, options: ValidationOptions) -> Result<Self, ResponseError> {
        let raw: Value = serde_json::from_str(json).map_err(|e| ResponseError::ParseError {
            message: e.to_string(),
        })?;

        validate_suggestion_response_with(&raw, options)
    }

    /// Returns the suggestions in display order.
    #[must_use]
    pub fn data(&self) -> &[Suggestion] {
        &self.data
    }

    /// Returns the number of suggestions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when the lookup produced no matches.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over the suggestions in display order.
    pub fn iter(&self) -> slice::Iter<'_, Suggestion> {
        self.data.iter()
    }

    /// Iterates over the display text of each suggestion, in order.
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(Suggestion::display_name)
    }

    /// Consumes the response, returning the suggestions in order.
    #[must_use]
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.data
    }
}

impl<'a> IntoIterator for &'a SuggestionResponse {
    type Item = &'a Suggestion;
    type IntoIter = slice::Iter<'a, Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Value> for SuggestionResponse {
    type Error = ResponseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validate_suggestion_response_with(&value, ValidationOptions::default())
    }
}

/// A batch split into accepted suggestions and rejected elements.
///
/// Produced by [`crate::screen_suggestion_response`]. Each rejection carries
/// the index of the element in the original `data` array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenedResponse {
    response: SuggestionResponse,
    rejected: Vec<ResponseError>,
}

impl ScreenedResponse {
    pub(crate) const fn new(response: SuggestionResponse, rejected: Vec<ResponseError>) -> Self {
        Self { response, rejected }
    }

    /// Returns the accepted suggestions.
    #[must_use]
    pub const fn response(&self) -> &SuggestionResponse {
        &self.response
    }

    /// Returns the per-element failures, in input order.
    #[must_use]
    pub fn rejected(&self) -> &[ResponseError] {
        &self.rejected
    }

    /// Splits the screening result into its parts.
    #[must_use]
    pub fn into_parts(self) -> (SuggestionResponse, Vec<ResponseError>) {
        (self.response, self.rejected)
    }
}
