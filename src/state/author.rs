use std::fmt;

/// Sentinel used when the profile name cannot be found on the first page
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Display name of the diary's author, used as a path segment for every post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorIdentity(String);

impl AuthorIdentity {
    /// Builds the identity from the raw profile-name text
    ///
    /// Surrounding whitespace is trimmed and internal spaces are removed
    /// (`"乃木 坂子"` becomes `"乃木坂子"`). Missing or blank names fall back
    /// to [`UNKNOWN_AUTHOR`].
    pub fn resolve(raw: Option<&str>) -> Self {
        let name = raw
            .map(|name| name.trim().replace(' ', ""))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        Self(name)
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_AUTHOR.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_AUTHOR
    }
}

impl fmt::Display for AuthorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
