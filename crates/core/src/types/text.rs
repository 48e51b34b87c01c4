//! Required (non-blank) text fields.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A string that is guaranteed to contain at least one non-whitespace character.
///
/// Every required text field of a resource (store name, billboard label,
/// color value, ...) is stored as `RequiredText`, so a record can never be
/// persisted with a blank required field.
///
/// ```
/// use shop_pilot_core::RequiredText;
///
/// assert!(RequiredText::parse("Summer sale").is_some());
/// assert!(RequiredText::parse("").is_none());
/// assert!(RequiredText::parse("   ").is_none());
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RequiredText(String);

impl RequiredText {
    /// Parse from a borrowed string, returning `None` when it is blank.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_string(s.to_owned())
    }

    /// Take ownership of a string, returning `None` when it is blank.
    #[must_use]
    pub fn from_string(s: String) -> Option<Self> {
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Returns the text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RequiredText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_string(s).ok_or_else(|| serde::de::Error::custom("text cannot be blank"))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for RequiredText {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for RequiredText {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Self::from_string(s).ok_or_else(|| "blank value in required text column".into())
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for RequiredText {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
