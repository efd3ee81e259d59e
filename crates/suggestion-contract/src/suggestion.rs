//! Suggestion entity and its wire shape.
//!
//! A [`Suggestion`] is one candidate (a user or a company) offered in answer
//! to a lookup. Values are immutable once built and can only be obtained
//! through the checked constructors or the validators, so holding one means
//! the contract's field rules already hold.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::avatar::AvatarUrl;
use crate::error::SuggestionError;
use crate::validation::validate_suggestion;

/// The closed set of entities a suggestion can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// A person.
    User,
    /// An organization.
    Company,
}

impl SuggestionKind {
    /// Returns the wire spelling of the variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Company => "company",
        }
    }

    /// Parses the wire spelling of a variant.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "company" => Some(Self::Company),
            _ => None,
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated suggestion.
///
/// Serializes to:
///
/// ```json
/// {"id": "2", "type": "company", "avatar": null, "name": "Acme Inc", "alias": "acme"}
/// ```
///
/// `avatar` is always written (as `null` when unavailable) and `name` is
/// omitted when absent.
///
/// # Example
///
/// ```
/// use suggestion_contract::{Suggestion, SuggestionKind};
///
/// let acme = Suggestion::new("2", SuggestionKind::Company, "acme")
///     .expect("valid suggestion")
///     .with_name("Acme Inc");
///
/// assert_eq!(acme.display_name(), "Acme Inc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Suggestion {
    id: String,
    #[serde(rename = "type")]
    kind: SuggestionKind,
    avatar: Option<AvatarUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    alias: String,
}

impl Suggestion {
    /// Builds a suggestion with no avatar and no name.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::MissingIdentifier`] when `id` is empty and
    /// [`SuggestionError::MissingAlias`] when `alias` is empty.
    pub fn new(
        id: impl Into<String>,
        kind: SuggestionKind,
        alias: impl Into<String>,
    ) -> Result<Self, SuggestionError> {
        let owned_id: String = id.into();
        if owned_id.is_empty() {
            return Err(SuggestionError::MissingIdentifier);
        }
        let owned_alias: String = alias.into();
        if owned_alias.is_empty() {
            return Err(SuggestionError::MissingAlias);
        }
        Ok(Self {
            id: owned_id,
            kind,
            avatar: None,
            name: None,
            alias: owned_alias,
        })
    }

    /// Attaches an avatar URL.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::InvalidAvatarValue`] when `raw` is not a
    /// well-formed avatar URL.
    pub fn with_avatar(self, raw: &str) -> Result<Self, SuggestionError> {
        let avatar = AvatarUrl::parse(raw).ok_or_else(|| SuggestionError::InvalidAvatarValue {
            found: Value::from(raw).to_string(),
        })?;
        Ok(self.with_avatar_url(Some(avatar)))
    }

    /// Sets or clears an already validated avatar.
    #[must_use]
    pub fn with_avatar_url(self, avatar: Option<AvatarUrl>) -> Self {
        Self { avatar, ..self }
    }

    /// Sets the display name. An empty name is stored as absent.
    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        let text: String = name.into();
        Self {
            name: (!text.is_empty()).then_some(text),
            ..self
        }
    }

    /// Returns the opaque identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the entity variant.
    #[must_use]
    pub const fn kind(&self) -> SuggestionKind {
        self.kind
    }

    /// Returns the avatar, or `None` when no avatar is available.
    #[must_use]
    pub const fn avatar(&self) -> Option<&AvatarUrl> {
        self.avatar.as_ref()
    }

    /// Returns the display name, if the producer supplied one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the short handle.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the text a consumer should display for this suggestion.
    ///
    /// See [`crate::normalize_display_name`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        crate::validation::normalize_display_name(self)
    }
}

impl TryFrom<Value> for Suggestion {
    type Error = SuggestionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validate_suggestion(&value)
    }
}
