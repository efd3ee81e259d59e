//! CLI support for checking recorded suggestion responses.
//!
//! The binary delegates to these functions so they can be exercised in tests
//! without spawning a subprocess.

mod error;

pub use error::CliError;

use crate::config::CheckSettings;
use crate::response::ScreenedResponse;
use crate::source::{RecordedSuggestionSource, SuggestionLookup};

/// Validates the response document named by `settings`.
///
/// # Errors
///
/// Returns [`CliError::MissingInput`] when no document is configured, or
/// [`CliError::Lookup`] when reading or validating the document fails.
///
/// # Example
///
/// ```
/// use suggestion_contract::CheckSettings;
/// use suggestion_contract::check_cli::{CliError, run_check};
///
/// let settings = CheckSettings {
///     input: None,
///     query: None,
///     allow_missing_avatar: false,
///     skip_invalid: false,
/// };
///
/// assert_eq!(run_check(&settings), Err(CliError::MissingInput));
/// ```
pub fn run_check(settings: &CheckSettings) -> Result<ScreenedResponse, CliError> {
    let path = settings.input.clone().ok_or(CliError::MissingInput)?;
    let lookup = SuggestionLookup::new(RecordedSuggestionSource::new(path))
        .with_options(settings.validation_options())
        .with_policy(settings.invalid_item_policy());

    Ok(lookup.lookup(settings.query())?)
}

/// Formats the report printed on success.
///
/// One tab-separated line per accepted suggestion (`index`, `type`, `id`,
/// display name), then a summary line.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use suggestion_contract::check_cli::render_report;
/// use suggestion_contract::screen_suggestion_response;
///
/// let screened = screen_suggestion_response(&json!({"data": [
///     {"id": "1", "type": "user", "avatar": null, "alias": "jdoe"}
/// ]}))
/// .expect("valid envelope");
///
/// assert_eq!(render_report(&screened), "0\tuser\t1\tjdoe\naccepted=1 rejected=0\n");
/// ```
#[must_use]
pub fn render_report(screened: &ScreenedResponse) -> String {
    let mut report: String = screened
        .response()
        .iter()
        .enumerate()
        .map(|(index, suggestion)| {
            format!(
                "{index}\t{}\t{}\t{}\n",
                suggestion.kind(),
                suggestion.id(),
                suggestion.display_name()
            )
        })
        .collect();
    report.push_str(&format!(
        "accepted={} rejected={}\n",
        screened.response().len(),
        screened.rejected().len()
    ));
    report
}
