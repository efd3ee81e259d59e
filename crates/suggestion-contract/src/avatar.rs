//! Avatar URL value object.
//!
//! Avatars are absolute URLs of any scheme (`https`, `data`, `file`, ...). The
//! producer's text is kept verbatim so a value serializes back exactly as it
//! was received.

use std::fmt;

use serde::Serialize;
use url::Url;

/// A validated avatar URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AvatarUrl(String);

impl AvatarUrl {
    /// Validates and wraps an avatar URL.
    ///
    /// Returns `None` when `raw` is not a well-formed avatar URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use suggestion_contract::AvatarUrl;
    ///
    /// assert!(AvatarUrl::parse("https://x.test/a.png").is_some());
    /// assert!(AvatarUrl::parse("not a url").is_none());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        is_valid_avatar_url(raw).then(|| Self(raw.to_owned()))
    }

    /// Returns the URL text as supplied by the producer.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AvatarUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AvatarUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AvatarUrl> for String {
    fn from(value: AvatarUrl) -> Self {
        value.0
    }
}

/// Returns `true` when `raw` parses as an absolute URL.
///
/// Surrounding whitespace is rejected rather than trimmed, since the stored
/// text must match what the producer sent.
#[must_use]
pub fn is_valid_avatar_url(raw: &str) -> bool {
    !raw.is_empty() && raw.trim() == raw && Url::parse(raw).is_ok()
}
