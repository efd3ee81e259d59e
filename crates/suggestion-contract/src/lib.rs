//! Data contract for mention and autocomplete suggestions.
//!
//! A suggestion source answers a lookup with an envelope of candidate
//! entities (people or organizations). This crate defines what a valid
//! suggestion and a valid response look like, and validates untrusted
//! payloads before a consumer renders them. It does not search, rank, or
//! fetch anything itself.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Typed [`Suggestion`] and [`SuggestionResponse`] values with a stable
//!   JSON wire shape
//! - Validation of loosely typed JSON with index-tagged errors
//! - Display name fallback from `name` to `alias`
//! - Screening a batch so invalid items can be dropped instead of failing
//!   the whole response
//! - A [`SuggestionSource`] port and a validating [`SuggestionLookup`]
//!
//! # Example
//!
//! ```
//! use suggestion_contract::{SuggestionResponse, normalize_display_name};
//!
//! let json = r#"{"data": [
//!     {"id": "1", "type": "user", "avatar": null, "alias": "jdoe"},
//!     {"id": "2", "type": "company", "avatar": "https://x.test/a.png",
//!      "name": "Acme Inc", "alias": "acme"}
//! ]}"#;
//!
//! let response = SuggestionResponse::from_json(json).expect("valid response");
//! let labels: Vec<&str> = response.iter().map(normalize_display_name).collect();
//!
//! assert_eq!(labels, ["jdoe", "Acme Inc"]);
//! ```

mod avatar;
pub mod check_cli;
mod config;
mod error;
mod response;
mod source;
mod suggestion;
mod validation;

pub use avatar::{AvatarUrl, is_valid_avatar_url};
pub use config::CheckSettings;
pub use error::{ResponseError, SuggestionError};
pub use response::{ScreenedResponse, SuggestionResponse};
pub use source::{
    InvalidItemPolicy, LookupError, RecordedSuggestionSource, SourceError, SuggestionLookup,
    SuggestionSource,
};
pub use suggestion::{Suggestion, SuggestionKind};
pub use validation::{
    ValidationOptions, normalize_display_name, screen_suggestion_response,
    screen_suggestion_response_with, validate_suggestion, validate_suggestion_response,
    validate_suggestion_response_with, validate_suggestion_with,
};
