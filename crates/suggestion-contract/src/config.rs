//! Settings for the `suggestion-check` tool, loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::source::InvalidItemPolicy;
use crate::validation::ValidationOptions;

/// Configuration values controlling how a recorded response is checked.
///
/// Values come from command-line flags, `SUGGESTIONS_*` environment
/// variables, and configuration files, in OrthoConfig's usual precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SUGGESTIONS")]
pub struct CheckSettings {
    /// Path of the response document to check.
    pub input: Option<PathBuf>,
    /// Query forwarded to the suggestion source.
    pub query: Option<String>,
    /// Read an omitted `avatar` key as `null`.
    #[ortho_config(default = false)]
    pub allow_missing_avatar: bool,
    /// Drop invalid suggestions instead of failing the batch.
    #[ortho_config(default = false)]
    pub skip_invalid: bool,
}

impl CheckSettings {
    /// Returns the configured query, or an empty string.
    #[must_use]
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }

    /// Returns the validation options implied by these settings.
    #[must_use]
    pub const fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            allow_missing_avatar: self.allow_missing_avatar,
        }
    }

    /// Returns the invalid item policy implied by these settings.
    #[must_use]
    pub const fn invalid_item_policy(&self) -> InvalidItemPolicy {
        if self.skip_invalid {
            InvalidItemPolicy::SkipInvalid
        } else {
            InvalidItemPolicy::RejectBatch
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for check settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> CheckSettings {
        CheckSettings::load_from_iter([OsString::from("suggestion-check")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("SUGGESTIONS_INPUT", None::<String>),
            ("SUGGESTIONS_QUERY", None::<String>),
            ("SUGGESTIONS_ALLOW_MISSING_AVATAR", None::<String>),
            ("SUGGESTIONS_SKIP_INVALID", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.input.is_none());
        assert_eq!(settings.query(), "");
        assert_eq!(settings.validation_options(), ValidationOptions::default());
        assert_eq!(
            settings.invalid_item_policy(),
            InvalidItemPolicy::RejectBatch
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "SUGGESTIONS_INPUT",
                Some("/tmp/suggestions.json".to_owned()),
            ),
            ("SUGGESTIONS_QUERY", Some("ac".to_owned())),
            ("SUGGESTIONS_ALLOW_MISSING_AVATAR", Some("true".to_owned())),
            ("SUGGESTIONS_SKIP_INVALID", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.input,
            Some(PathBuf::from("/tmp/suggestions.json"))
        );
        assert_eq!(settings.query(), "ac");
        assert_eq!(
            settings.validation_options(),
            ValidationOptions::lenient_avatar()
        );
        assert_eq!(
            settings.invalid_item_policy(),
            InvalidItemPolicy::SkipInvalid
        );
    }

    #[rstest]
    fn lenient_avatar_does_not_imply_skipping_invalid_items() {
        let _guard = lock_env([
            ("SUGGESTIONS_INPUT", None::<String>),
            ("SUGGESTIONS_QUERY", None::<String>),
            ("SUGGESTIONS_ALLOW_MISSING_AVATAR", Some("true".to_owned())),
            ("SUGGESTIONS_SKIP_INVALID", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.validation_options(),
            ValidationOptions::lenient_avatar()
        );
        assert_eq!(
            settings.invalid_item_policy(),
            InvalidItemPolicy::RejectBatch
        );
    }

    #[rstest]
    #[case("maybe")]
    #[case("sometimes")]
    fn non_boolean_skip_invalid_is_rejected(#[case] raw: &str) {
        let _guard = lock_env([
            ("SUGGESTIONS_INPUT", None::<String>),
            ("SUGGESTIONS_QUERY", None::<String>),
            ("SUGGESTIONS_ALLOW_MISSING_AVATAR", None::<String>),
            ("SUGGESTIONS_SKIP_INVALID", Some(raw.to_owned())),
        ]);

        let result = CheckSettings::load_from_iter([OsString::from("suggestion-check")]);
        assert!(result.is_err(), "expected {raw:?} to be rejected");
    }
}
