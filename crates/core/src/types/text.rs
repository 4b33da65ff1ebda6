//! Free-text fields (complaint descriptions and response texts).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating a [`ComplaintText`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// The input is empty or whitespace only.
    #[error("text cannot be empty")]
    Empty,
}

/// A non-empty block of user-entered text.
///
/// Surrounding whitespace is stripped on construction, so a text made only
/// of spaces and newlines is rejected as empty.
///
/// ## Examples
///
/// ```
/// use complaint_desk_core::ComplaintText;
///
/// let text = ComplaintText::parse("  Noisy neighbor\n").unwrap();
/// assert_eq!(text.as_str(), "Noisy neighbor");
///
/// assert!(ComplaintText::parse(" \n\t").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ComplaintText(String);

impl ComplaintText {
    /// Parse a `ComplaintText`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if nothing remains after trimming.
    pub fn parse(s: &str) -> Result<Self, TextError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComplaintText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ComplaintText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ComplaintText {
    type Error = TextError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ComplaintText> for String {
    fn from(text: ComplaintText) -> Self {
        text.0
    }
}

impl AsRef<str> for ComplaintText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ComplaintText {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ComplaintText {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
