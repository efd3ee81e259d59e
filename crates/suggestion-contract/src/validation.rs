//! Validators for untrusted suggestion payloads.
//!
//! The validators accept loosely typed [`serde_json::Value`] input, as
//! produced by a suggestion source, and return contract types or the first
//! failing field.
//!
//! # Validation Rules
//!
//! Checked in this order, stopping at the first failure:
//!
//! - the record is a JSON object
//! - `id` is a non-empty string
//! - `type` is `"user"` or `"company"`
//! - `alias` is a non-empty string
//! - `avatar` is an absolute URL or `null`
//! - `name`, when present and not `null`, is a string (empty means absent)

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::avatar::AvatarUrl;
use crate::error::{ResponseError, SuggestionError};
use crate::response::{ScreenedResponse, SuggestionResponse};
use crate::suggestion::{Suggestion, SuggestionKind};

/// Knobs that relax the default validation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Read an omitted `avatar` key as `null` instead of failing with
    /// [`SuggestionError::MissingAvatar`].
    pub allow_missing_avatar: bool,
}

impl ValidationOptions {
    /// Options that accept records without an `avatar` key.
    #[must_use]
    pub const fn lenient_avatar() -> Self {
        Self {
            allow_missing_avatar: true,
        }
    }
}

/// Validates one suggestion record using the default options.
///
/// # Errors
///
/// Returns the [`SuggestionError`] for the first field that fails.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use suggestion_contract::{SuggestionError, validate_suggestion};
///
/// let jdoe = validate_suggestion(&json!({
///     "id": "1", "type": "user", "avatar": null, "alias": "jdoe"
/// }))
/// .expect("valid suggestion");
/// assert_eq!(jdoe.display_name(), "jdoe");
///
/// let robot = validate_suggestion(&json!({"id": "3", "type": "robot", "alias": "r1"}));
/// assert!(matches!(robot, Err(SuggestionError::InvalidTypeVariant { .. })));
/// ```
pub fn validate_suggestion(candidate: &Value) -> Result<Suggestion, SuggestionError> {
    validate_suggestion_with(candidate, ValidationOptions::default())
}

/// Validates one suggestion record.
///
/// # Errors
///
/// Returns the [`SuggestionError`] for the first field that fails.
pub fn validate_suggestion_with(
    candidate: &Value,
    options: ValidationOptions,
) -> Result<Suggestion, SuggestionError> {
    let record = candidate
        .as_object()
        .ok_or_else(|| SuggestionError::MalformedRecord {
            found: json_kind(candidate),
        })?;

    let id = non_empty_str(record, "id").ok_or(SuggestionError::MissingIdentifier)?;
    let kind = parse_kind(record.get("type"))?;
    let alias = non_empty_str(record, "alias").ok_or(SuggestionError::MissingAlias)?;
    let avatar = parse_avatar(record.get("avatar"), options)?;
    let name = parse_name(record.get("name"))?;

    Ok(Suggestion::new(id, kind, alias)?
        .with_avatar_url(avatar)
        .with_name(name.unwrap_or_default()))
}

/// Returns the text a consumer should display for `suggestion`.
///
/// This is the name when one is present and non-empty, otherwise the alias.
///
/// # Examples
///
/// ```
/// use suggestion_contract::{Suggestion, SuggestionKind, normalize_display_name};
///
/// let bare = Suggestion::new("1", SuggestionKind::User, "jdoe").expect("valid");
/// assert_eq!(normalize_display_name(&bare), "jdoe");
///
/// let named = bare.with_name("Jane Doe");
/// assert_eq!(normalize_display_name(&named), "Jane Doe");
/// ```
#[must_use]
pub fn normalize_display_name(suggestion: &Suggestion) -> &str {
    suggestion
        .name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| suggestion.alias())
}

/// Validates a response envelope using the default options.
///
/// # Errors
///
/// Returns [`ResponseError`] for envelope failures, or the first invalid
/// element tagged with its index.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use suggestion_contract::{ResponseError, SuggestionError, validate_suggestion_response};
///
/// let empty = validate_suggestion_response(&json!({"data": []})).expect("valid response");
/// assert!(empty.is_empty());
///
/// let bad = validate_suggestion_response(&json!({
///     "data": [{"id": "1", "type": "user", "alias": ""}]
/// }));
/// assert_eq!(
///     bad,
///     Err(ResponseError::NestedSuggestion {
///         index: 0,
///         source: SuggestionError::MissingAlias,
///     })
/// );
/// ```
pub fn validate_suggestion_response(candidate: &Value) -> Result<SuggestionResponse, ResponseError> {
    validate_suggestion_response_with(candidate, ValidationOptions::default())
}

/// Validates a response envelope, preserving element order.
///
/// # Errors
///
/// Returns [`ResponseError`] for envelope failures, or the first invalid
/// element tagged with its index.
pub fn validate_suggestion_response_with(
    candidate: &Value,
    options: ValidationOptions,
) -> Result<SuggestionResponse, ResponseError> {
    let items = envelope_items(candidate)?;
    let mut seen_ids = HashSet::with_capacity(items.len());

    let data = items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_element(index, item, options, &mut seen_ids))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SuggestionResponse::from_validated(data))
}

/// Validates a response envelope, setting aside invalid elements.
///
/// Envelope failures still fail the call. Element failures are collected in
/// [`ScreenedResponse::rejected`] and the remaining suggestions keep their
/// relative order.
///
/// # Errors
///
/// Returns [`ResponseError`] when the envelope itself is malformed.
pub fn screen_suggestion_response(candidate: &Value) -> Result<ScreenedResponse, ResponseError> {
    screen_suggestion_response_with(candidate, ValidationOptions::default())
}

/// Validates a response envelope with `options`, setting aside invalid
/// elements.
///
/// # Errors
///
/// Returns [`ResponseError`] when the envelope itself is malformed.
pub fn screen_suggestion_response_with(
    candidate: &Value,
    options: ValidationOptions,
) -> Result<ScreenedResponse, ResponseError> {
    let items = envelope_items(candidate)?;
    let mut seen_ids = HashSet::with_capacity(items.len());
    let mut accepted = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match validate_element(index, item, options, &mut seen_ids) {
            Ok(suggestion) => accepted.push(suggestion),
            Err(err) => rejected.push(err),
        }
    }

    Ok(ScreenedResponse::new(
        SuggestionResponse::from_validated(accepted),
        rejected,
    ))
}

fn validate_element(
    index: usize,
    item: &Value,
    options: ValidationOptions,
    seen_ids: &mut HashSet<String>,
) -> Result<Suggestion, ResponseError> {
    let suggestion = validate_suggestion_with(item, options)
        .map_err(|source| ResponseError::NestedSuggestion { index, source })?;
    if !seen_ids.insert(suggestion.id().to_owned()) {
        return Err(ResponseError::DuplicateIdentifier {
            index,
            id: suggestion.id().to_owned(),
        });
    }
    Ok(suggestion)
}

fn envelope_items(candidate: &Value) -> Result<&[Value], ResponseError> {
    let envelope = candidate
        .as_object()
        .ok_or_else(|| ResponseError::MalformedEnvelope {
            found: json_kind(candidate),
        })?;

    match envelope.get("data") {
        None | Some(Value::Null) => Err(ResponseError::MissingDataField),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ResponseError::InvalidDataField {
            found: json_kind(other),
        }),
    }
}

fn non_empty_str<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn parse_kind(value: Option<&Value>) -> Result<SuggestionKind, SuggestionError> {
    value
        .and_then(Value::as_str)
        .and_then(SuggestionKind::from_wire)
        .ok_or_else(|| SuggestionError::InvalidTypeVariant {
            found: render(value),
        })
}

fn parse_avatar(
    value: Option<&Value>,
    options: ValidationOptions,
) -> Result<Option<AvatarUrl>, SuggestionError> {
    match value {
        None if options.allow_missing_avatar => Ok(None),
        None => Err(SuggestionError::MissingAvatar),
        Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => AvatarUrl::parse(raw).map(Some).ok_or_else(|| {
            SuggestionError::InvalidAvatarValue {
                found: render(value),
            }
        }),
        Some(_) => Err(SuggestionError::InvalidAvatarValue {
            found: render(value),
        }),
    }
}

fn parse_name(value: Option<&Value>) -> Result<Option<&str>, SuggestionError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(name)) => Ok(Some(name.as_str())),
        Some(other) => Err(SuggestionError::InvalidNameValue {
            found: json_kind(other),
        }),
    }
}

fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "nothing".to_owned(), Value::to_string)
}

/// Names the JSON kind of `value` for error messages.
pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    //! Field-level validation rules and error ordering.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn jdoe() -> Value {
        json!({"id": "1", "type": "user", "avatar": null, "alias": "jdoe"})
    }

    #[test]
    fn accepts_minimal_user() {
        let suggestion = validate_suggestion(&jdoe()).expect("valid suggestion");

        assert_eq!(suggestion.id(), "1");
        assert_eq!(suggestion.kind(), SuggestionKind::User);
        assert_eq!(suggestion.avatar(), None);
        assert_eq!(suggestion.name(), None);
        assert_eq!(suggestion.alias(), "jdoe");
        assert_eq!(normalize_display_name(&suggestion), "jdoe");
    }

    #[test]
    fn accepts_fully_populated_company() {
        let candidate = json!({
            "id": "2",
            "type": "company",
            "avatar": "https://x.test/a.png",
            "name": "Acme Inc",
            "alias": "acme"
        });

        let suggestion = validate_suggestion(&candidate).expect("valid suggestion");

        assert_eq!(suggestion.kind(), SuggestionKind::Company);
        assert_eq!(
            suggestion.avatar().map(AvatarUrl::as_str),
            Some("https://x.test/a.png")
        );
        assert_eq!(normalize_display_name(&suggestion), "Acme Inc");
        assert_eq!(serde_json::to_value(&suggestion).expect("serialize"), candidate);
    }

    #[rstest]
    #[case::robot(json!("robot"), "\"robot\"")]
    #[case::admin(json!("admin"), "\"admin\"")]
    #[case::empty(json!(""), "\"\"")]
    #[case::null(Value::Null, "null")]
    #[case::capitalised(json!("User"), "\"User\"")]
    #[case::number(json!(1), "1")]
    fn rejects_unknown_type_variants(#[case] kind: Value, #[case] found: &str) {
        let mut candidate = jdoe();
        candidate["type"] = kind;

        assert_eq!(
            validate_suggestion(&candidate),
            Err(SuggestionError::InvalidTypeVariant {
                found: found.to_owned()
            })
        );
    }

    #[test]
    fn rejects_missing_type() {
        let candidate = json!({"id": "1", "avatar": null, "alias": "jdoe"});
        assert_eq!(
            validate_suggestion(&candidate),
            Err(SuggestionError::InvalidTypeVariant {
                found: "nothing".to_owned()
            })
        );
    }

    #[rstest]
    #[case::absent(json!({"id": "1", "type": "user", "avatar": null}))]
    #[case::empty(json!({"id": "1", "type": "user", "avatar": null, "alias": ""}))]
    #[case::null(json!({"id": "1", "type": "user", "avatar": null, "alias": null}))]
    #[case::number(json!({"id": "1", "type": "user", "avatar": null, "alias": 7}))]
    fn rejects_missing_alias(#[case] candidate: Value) {
        assert_eq!(
            validate_suggestion(&candidate),
            Err(SuggestionError::MissingAlias)
        );
    }

    #[rstest]
    #[case::absent(json!({"type": "user", "avatar": null, "alias": "jdoe"}))]
    #[case::empty(json!({"id": "", "type": "user", "avatar": null, "alias": "jdoe"}))]
    #[case::number(json!({"id": 1, "type": "user", "avatar": null, "alias": "jdoe"}))]
    fn rejects_missing_identifier(#[case] candidate: Value) {
        assert_eq!(
            validate_suggestion(&candidate),
            Err(SuggestionError::MissingIdentifier)
        );
    }

    #[rstest]
    #[case::relative(json!("/a.png"), "\"/a.png\"")]
    #[case::garbage(json!("not a url"), "\"not a url\"")]
    #[case::number(json!(42), "42")]
    #[case::object(json!({"url": "https://x.test"}), r#"{"url":"https://x.test"}"#)]
    fn rejects_invalid_avatar_values(#[case] avatar: Value, #[case] found: &str) {
        let mut candidate = jdoe();
        candidate["avatar"] = avatar;

        assert_eq!(
            validate_suggestion(&candidate),
            Err(SuggestionError::InvalidAvatarValue {
                found: found.to_owned()
            })
        );
    }

    #[rstest]
    #[case::ftp("ftp://x.test/a.png")]
    #[case::data_uri("data:image/png;base64,AAAA")]
    #[case::file("file:///tmp/a.png")]
    fn accepts_avatars_of_any_absolute_scheme(#[case] avatar: &str) {
        let mut candidate = jdoe();
        candidate["avatar"] = json!(avatar);

        let suggestion = validate_suggestion(&candidate).expect("valid suggestion");

        assert_eq!(suggestion.avatar().map(AvatarUrl::as_str), Some(avatar));
        assert_eq!(serde_json::to_value(&suggestion).expect("serialize"), candidate);
    }

    #[test]
    fn omitted_avatar_is_rejected_by_default() {
        let candidate = json!({"id": "1", "type": "user", "alias": "jdoe"});
        assert_eq!(
            validate_suggestion(&candidate),
            Err(SuggestionError::MissingAvatar)
        );
    }

    #[test]
    fn omitted_avatar_reads_as_null_when_allowed() {
        let candidate = json!({"id": "1", "type": "user", "alias": "jdoe"});
        let suggestion = validate_suggestion_with(&candidate, ValidationOptions::lenient_avatar())
            .expect("valid suggestion");
        assert_eq!(suggestion.avatar(), None);
    }

    #[rstest]
    #[case::empty(json!(""))]
    #[case::null(Value::Null)]
    fn empty_or_null_name_falls_back_to_alias(#[case] name: Value) {
        let mut candidate = jdoe();
        candidate["name"] = name;

        let suggestion = validate_suggestion(&candidate).expect("valid suggestion");

        assert_eq!(suggestion.name(), None);
        assert_eq!(normalize_display_name(&suggestion), "jdoe");
    }

    #[rstest]
    #[case::absent(None, None)]
    #[case::empty(Some(json!("")), None)]
    #[case::whitespace(Some(json!("  ")), Some("  "))]
    #[case::named(Some(json!("Jane Doe")), Some("Jane Doe"))]
    fn stores_name_only_when_non_empty(
        #[case] name: Option<Value>,
        #[case] expected: Option<&str>,
    ) {
        let mut candidate = jdoe();
        if let Some(value) = name {
            candidate["name"] = value;
        }

        let suggestion = validate_suggestion(&candidate).expect("valid suggestion");

        assert_eq!(suggestion.name(), expected);
    }

    #[test]
    fn rejects_non_string_name() {
        let mut candidate = jdoe();
        candidate["name"] = json!(["Jane"]);
        assert_eq!(
            validate_suggestion(&candidate),
            Err(SuggestionError::InvalidNameValue { found: "array" })
        );
    }

    #[rstest]
    #[case::array(json!([]), "array")]
    #[case::string(json!("jdoe"), "string")]
    #[case::null(Value::Null, "null")]
    fn rejects_non_object_records(#[case] candidate: Value, #[case] found: &'static str) {
        assert_eq!(
            validate_suggestion(&candidate),
            Err(SuggestionError::MalformedRecord { found })
        );
    }

    #[test]
    fn reports_type_before_alias() {
        let candidate = json!({"id": "3", "type": "robot", "alias": ""});
        assert!(matches!(
            validate_suggestion(&candidate),
            Err(SuggestionError::InvalidTypeVariant { .. })
        ));
    }

    #[test]
    fn reports_alias_before_avatar() {
        let candidate = json!({"id": "1", "type": "user", "alias": ""});
        assert_eq!(
            validate_suggestion(&candidate),
            Err(SuggestionError::MissingAlias)
        );
    }

    #[test]
    fn ignores_unknown_fields() {
        let mut candidate = jdoe();
        candidate["score"] = json!(0.9);
        let suggestion = validate_suggestion(&candidate).expect("valid suggestion");
        assert_eq!(serde_json::to_value(&suggestion).expect("serialize"), jdoe());
    }

    #[test]
    fn response_requires_data_field() {
        assert_eq!(
            validate_suggestion_response(&json!({})),
            Err(ResponseError::MissingDataField)
        );
        assert_eq!(
            validate_suggestion_response(&json!({"data": null})),
            Err(ResponseError::MissingDataField)
        );
    }

    #[rstest]
    #[case::object(json!({"data": {}}), "object")]
    #[case::string(json!({"data": "[]"}), "string")]
    fn response_requires_data_array(#[case] candidate: Value, #[case] found: &'static str) {
        assert_eq!(
            validate_suggestion_response(&candidate),
            Err(ResponseError::InvalidDataField { found })
        );
    }

    #[test]
    fn response_rejects_non_object_envelope() {
        assert_eq!(
            validate_suggestion_response(&json!([])),
            Err(ResponseError::MalformedEnvelope { found: "array" })
        );
    }

    #[test]
    fn response_tags_first_failure_with_index() {
        let candidate = json!({"data": [
            jdoe(),
            {"id": "2", "type": "company", "avatar": null, "alias": "acme"},
            {"id": "3", "type": "robot", "avatar": null, "alias": "r1"},
            {"id": "4", "type": "user", "avatar": null, "alias": ""}
        ]});

        assert_eq!(
            validate_suggestion_response(&candidate),
            Err(ResponseError::NestedSuggestion {
                index: 2,
                source: SuggestionError::InvalidTypeVariant {
                    found: "\"robot\"".to_owned()
                },
            })
        );
    }

    #[test]
    fn response_rejects_duplicate_ids() {
        let candidate = json!({"data": [
            jdoe(),
            {"id": "1", "type": "company", "avatar": null, "alias": "acme"}
        ]});

        assert_eq!(
            validate_suggestion_response(&candidate),
            Err(ResponseError::DuplicateIdentifier {
                index: 1,
                id: "1".to_owned()
            })
        );
    }

    #[test]
    fn screening_keeps_valid_items_in_order() {
        let candidate = json!({"data": [
            {"id": "a", "type": "user", "avatar": null, "alias": "first"},
            {"id": "b", "type": "robot", "avatar": null, "alias": "bad"},
            {"id": "c", "type": "company", "avatar": null, "alias": "third"},
            {"id": "a", "type": "user", "avatar": null, "alias": "dupe"}
        ]});

        let screened = screen_suggestion_response(&candidate).expect("valid envelope");

        let ids: Vec<&str> = screened.response().iter().map(Suggestion::id).collect();
        assert_eq!(ids, ["a", "c"]);
        let rejected: Vec<Option<usize>> =
            screened.rejected().iter().map(ResponseError::index).collect();
        assert_eq!(rejected, [Some(1), Some(3)]);
    }

    #[test]
    fn screening_still_fails_on_envelope_errors() {
        assert_eq!(
            screen_suggestion_response(&json!({"items": []})),
            Err(ResponseError::MissingDataField)
        );
    }
}
