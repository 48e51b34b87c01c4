//! Store owner identity.
//!
//! Users live in the external identity provider, not in our database. The
//! only thing we persist about them is the opaque user id from the `sub`
//! claim of their token, stored as `store.owner_id`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OwnerId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnerIdError {
    /// The input string is empty or whitespace.
    #[error("owner id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("owner id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Opaque identity-provider user id that owns a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Maximum accepted length of a provider user id.
    pub const MAX_LENGTH: usize = 255;

    /// Parse an `OwnerId` from a token subject.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank or longer than 255 characters.
    pub fn parse(s: &str) -> Result<Self, OwnerIdError> {
        if s.trim().is_empty() {
            return Err(OwnerIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(OwnerIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the owner id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OwnerId {
    type Err = OwnerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for OwnerId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OwnerId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for OwnerId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_ids() {
        assert!(OwnerId::parse("user_2a9XkLmQ").is_ok());
        assert!(OwnerId::parse("auth0|65f0c2").is_ok());
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(OwnerId::parse(""), Err(OwnerIdError::Empty));
        assert_eq!(OwnerId::parse("   "), Err(OwnerIdError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "u".repeat(OwnerId::MAX_LENGTH + 1);
        assert!(matches!(
            OwnerId::parse(&long),
            Err(OwnerIdError::TooLong { .. })
        ));
    }

    #[test]
    fn test_display() {
        let owner = OwnerId::parse("user_1").unwrap();
        assert_eq!(owner.to_string(), "user_1");
    }
}
