//! Error types for the suggestion check CLI.

use thiserror::Error;

use crate::source::LookupError;

/// Errors surfaced by the check flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// No response document was configured.
    #[error("missing required setting: --input (or SUGGESTIONS_INPUT)")]
    MissingInput,
    /// Settings could not be loaded.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration failure.
        message: String,
    },
    /// The lookup or validation failed.
    #[error("suggestion check failed: {source}")]
    Lookup {
        /// Underlying lookup error.
        #[from]
        #[source]
        source: LookupError,
    },
}
